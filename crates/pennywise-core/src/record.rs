//! Usage records
//!
//! [`UsageRecord`] is the immutable, persisted unit of spend tracking.
//! [`NewUsage`] is the append-time input: the ledger fills in the id,
//! timestamp, total tokens and cost when they are absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-tenant organization tag used when none is supplied.
pub const DEFAULT_ORG_ID: &str = "demo_org";

/// A usage event as stored in the ledger. Never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Monotonic id assigned at write time
    pub id: i64,
    /// Write-time timestamp (UTC)
    pub timestamp: DateTime<Utc>,
    /// Organization tag
    pub org_id: String,
    /// Caller identity
    pub user_id: String,
    /// Provider name
    pub provider: String,
    /// Model name
    pub model: String,
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Always prompt_tokens + completion_tokens
    pub total_tokens: u32,
    /// Cost in USD (non-negative)
    pub cost: f64,
    /// Whether the response came from the cache
    pub cache_hit: bool,
    /// Original model, set only when routing changed the model
    pub model_routed_from: Option<String>,
    /// Free-text feature tag
    pub feature: Option<String>,
}

/// Input for a ledger append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUsage {
    /// Caller identity
    pub user_id: String,
    /// Provider name
    pub provider: String,
    /// Model name
    pub model: String,
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Organization tag; defaults to [`DEFAULT_ORG_ID`]
    #[serde(default)]
    pub org_id: Option<String>,
    /// Explicit timestamp (seeding); assigned at write time when absent
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Explicit cost; computed from the pricing table when absent
    #[serde(default)]
    pub cost: Option<f64>,
    /// Cache-hit flag
    #[serde(default)]
    pub cache_hit: bool,
    /// Original model when routing changed the model
    #[serde(default)]
    pub model_routed_from: Option<String>,
    /// Free-text feature tag
    #[serde(default)]
    pub feature: Option<String>,
}

impl NewUsage {
    /// Create a usage event with the required fields.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
        prompt_tokens: u32,
        completion_tokens: u32,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            provider: provider.into(),
            model: model.into(),
            prompt_tokens,
            completion_tokens,
            org_id: None,
            timestamp: None,
            cost: None,
            cache_hit: false,
            model_routed_from: None,
            feature: None,
        }
    }

    /// Tag the event with a feature.
    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    /// Mark the event as served from cache.
    #[must_use]
    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = cache_hit;
        self
    }

    /// Record the model the request was routed away from.
    #[must_use]
    pub fn with_routed_from(mut self, original_model: impl Into<String>) -> Self {
        self.model_routed_from = Some(original_model.into());
        self
    }

    /// Set an explicit timestamp (demo seeding).
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

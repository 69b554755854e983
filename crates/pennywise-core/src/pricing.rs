//! Model Pricing - provider/model price table and cost calculation
//!
//! Prices are expressed in USD per 1K tokens. Lookups never fail: unknown
//! (provider, model) pairs fall back to a flat default rate so that cost
//! estimation can never block a request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Constants (USD per 1K tokens)
// ============================================================================

/// Fallback price per 1K tokens for unknown (provider, model) pairs
pub const DEFAULT_PRICE_PER_1K: f64 = 0.001;

// OpenAI
/// GPT-4 price per 1K tokens
pub const GPT4_PRICE: f64 = 0.03;
/// GPT-4 Turbo price per 1K tokens
pub const GPT4_TURBO_PRICE: f64 = 0.01;
/// GPT-3.5 Turbo price per 1K tokens
pub const GPT35_TURBO_PRICE: f64 = 0.0015;

// Anthropic
/// Claude Opus price per 1K tokens
pub const CLAUDE_OPUS_PRICE: f64 = 0.075;
/// Claude Sonnet price per 1K tokens
pub const CLAUDE_SONNET_PRICE: f64 = 0.015;
/// Claude Haiku price per 1K tokens
pub const CLAUDE_HAIKU_PRICE: f64 = 0.00125;

// ============================================================================
// Pricing Table
// ============================================================================

/// A single pricing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingEntry {
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Model name (e.g. "gpt-4")
    pub model: String,
    /// Price per 1K tokens (USD)
    pub price_per_1k: f64,
}

/// Immutable (provider, model) → price-per-1K-tokens table.
///
/// Loaded once at startup; misses resolve to [`DEFAULT_PRICE_PER_1K`].
#[derive(Debug, Clone)]
pub struct PricingTable {
    prices: HashMap<(String, String), f64>,
}

impl Default for PricingTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("openai", "gpt-4", GPT4_PRICE);
        table.insert("openai", "gpt-4-turbo", GPT4_TURBO_PRICE);
        table.insert("openai", "gpt-3.5-turbo", GPT35_TURBO_PRICE);
        table.insert("anthropic", "claude-opus", CLAUDE_OPUS_PRICE);
        table.insert("anthropic", "claude-sonnet", CLAUDE_SONNET_PRICE);
        table.insert("anthropic", "claude-haiku", CLAUDE_HAIKU_PRICE);
        table
    }
}

impl PricingTable {
    /// Create an empty table (everything falls back to the default rate).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    /// Build a table from explicit entries.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = PricingEntry>) -> Self {
        let mut table = Self::empty();
        for e in entries {
            table.insert(&e.provider, &e.model, e.price_per_1k);
        }
        table
    }

    /// Insert or replace a price.
    pub fn insert(&mut self, provider: &str, model: &str, price_per_1k: f64) {
        self.prices
            .insert((provider.to_string(), model.to_string()), price_per_1k);
    }

    /// Price per 1K tokens for a (provider, model) pair.
    ///
    /// Unknown pairs yield [`DEFAULT_PRICE_PER_1K`], never an error.
    #[must_use]
    pub fn price_per_1k(&self, provider: &str, model: &str) -> f64 {
        self.prices
            .get(&(provider.to_string(), model.to_string()))
            .copied()
            .unwrap_or(DEFAULT_PRICE_PER_1K)
    }

    /// Cost in USD for `total_tokens` tokens of the given model.
    ///
    /// No rounding here; rounding happens only at presentation boundaries.
    #[must_use]
    pub fn cost_for(&self, provider: &str, model: &str, total_tokens: u32) -> f64 {
        (f64::from(total_tokens) / 1000.0) * self.price_per_1k(provider, model)
    }

    /// Number of known (provider, model) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the table has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

//! Optimization Engine - the per-request cost-optimization decision path
//!
//! Orchestrates cache lookup and model routing to decide what should
//! happen for a request: serve from cache, downgrade the model, or pass
//! through. Produces a transient [`OptimizationDecision`]; it never
//! writes to the usage ledger — logging is a separate, caller-invoked
//! step, so durability failures cannot block the decision.

use crate::cache::{fingerprint, ResponseCache};
use crate::completion::CompletionProvider;
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::pricing::PricingTable;
use crate::router::ModelRouter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-request decision record. Transient; consumed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationDecision {
    /// Model the caller asked for
    pub original_model: String,
    /// Model the request was (or would be) served with
    pub routed_model: String,
    /// Whether the response came from the cache
    pub cache_hit: bool,
    /// Response text (cached or freshly synthesized)
    pub response: String,
    /// Estimated USD saved by this decision
    pub cost_saved: f64,
}

/// Cache + router orchestrator. Dependencies are injected so backing
/// stores and providers are swappable in tests and deployments.
pub struct OptimizationEngine {
    cache: Arc<dyn ResponseCache>,
    router: ModelRouter,
    pricing: Arc<PricingTable>,
    provider: Arc<dyn CompletionProvider>,
    config: OptimizerConfig,
}

impl OptimizationEngine {
    /// Create an engine from its collaborators.
    #[must_use]
    pub fn new(
        cache: Arc<dyn ResponseCache>,
        router: ModelRouter,
        pricing: Arc<PricingTable>,
        provider: Arc<dyn CompletionProvider>,
        config: OptimizerConfig,
    ) -> Self {
        Self {
            cache,
            router,
            pricing,
            provider,
            config,
        }
    }

    /// Decide how to serve a request.
    ///
    /// Cache backend failures degrade to always-miss behavior; cache
    /// population failures are logged and swallowed. Neither fails the
    /// request.
    pub async fn optimize(
        &self,
        prompt: &str,
        requested_model: &str,
        provider_name: &str,
        user_id: &str,
    ) -> Result<OptimizationDecision> {
        let fp = fingerprint(prompt);

        let cached = match self.cache.get(&fp) {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, "cache lookup failed, treating as miss");
                None
            }
        };

        if let Some(response) = cached {
            debug!(user_id, model = requested_model, "cache hit");
            return Ok(OptimizationDecision {
                original_model: requested_model.to_string(),
                // No routing is attempted on a cache hit
                routed_model: requested_model.to_string(),
                cache_hit: true,
                response,
                cost_saved: self.config.cache_hit_saving,
            });
        }

        let routed_model = self.router.route(prompt, requested_model);
        let response = self.provider.complete(prompt, &routed_model).await?;

        // Keyed on prompt content only, decoupled from the routing outcome
        if let Err(e) = self.cache.put(&fp, &response) {
            warn!(error = %e, "cache put failed, continuing uncached");
        }

        let cost_saved = if routed_model == requested_model {
            0.0
        } else {
            self.route_saving(provider_name, requested_model, &routed_model)
        };

        debug!(
            user_id,
            requested = requested_model,
            routed = %routed_model,
            cost_saved,
            "cache miss"
        );

        Ok(OptimizationDecision {
            original_model: requested_model.to_string(),
            routed_model,
            cache_hit: false,
            response,
            cost_saved,
        })
    }

    /// Per-1K price delta between the requested and routed model.
    fn route_saving(&self, provider: &str, requested: &str, routed: &str) -> f64 {
        let delta =
            self.pricing.price_per_1k(provider, requested) - self.pricing.price_per_1k(provider, routed);
        delta.max(0.0)
    }
}

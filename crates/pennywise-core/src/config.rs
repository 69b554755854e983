//! Core configuration
//!
//! Routing and savings policy live in configuration data, not code, so
//! they can be tuned without redeploying logic. Everything has working
//! defaults; a TOML file can override any subset of fields.

use crate::error::{Error, Result};
use crate::router::RouterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Estimated saving (USD) attributed to a single cache hit.
pub const DEFAULT_CACHE_HIT_SAVING: f64 = 0.03;

/// Assumed fraction of total spend avoided by optimization. An
/// approximation, not a measured value.
pub const DEFAULT_SAVINGS_RATIO: f64 = 0.7;

fn default_cache_hit_saving() -> f64 {
    DEFAULT_CACHE_HIT_SAVING
}

fn default_savings_ratio() -> f64 {
    DEFAULT_SAVINGS_RATIO
}

/// Savings-estimate policy for the optimization engine and aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Flat per-hit saving credited when the cache answers a request
    #[serde(default = "default_cache_hit_saving")]
    pub cache_hit_saving: f64,
    /// Assumed savings ratio applied to total spend in summaries
    #[serde(default = "default_savings_ratio")]
    pub savings_ratio: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            cache_hit_saving: DEFAULT_CACHE_HIT_SAVING,
            savings_ratio: DEFAULT_SAVINGS_RATIO,
        }
    }
}

/// Aggregated core configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Model routing policy
    #[serde(default)]
    pub router: RouterConfig,
    /// Savings-estimate policy
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl CoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Internal(format!("read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Internal(format!("parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.router.simple_prompt_max_chars, 100);
        assert_eq!(config.router.downgrades.len(), 2);
        assert!((config.optimizer.cache_hit_saving - 0.03).abs() < 1e-12);
        assert!((config.optimizer.savings_ratio - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_partial_toml_override() {
        let config: CoreConfig = toml::from_str(
            r#"
            [optimizer]
            savings_ratio = 0.5

            [router]
            simple_prompt_max_chars = 80
            "#,
        )
        .unwrap();
        assert!((config.optimizer.savings_ratio - 0.5).abs() < 1e-12);
        // Unset fields keep their defaults
        assert!((config.optimizer.cache_hit_saving - 0.03).abs() < 1e-12);
        assert_eq!(config.router.simple_prompt_max_chars, 80);
    }

    #[test]
    fn test_downgrade_rules_from_toml() {
        let config: CoreConfig = toml::from_str(
            r#"
            [[router.downgrades]]
            matches = "gpt-4"
            target = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.router.downgrades.len(), 1);
        assert_eq!(config.router.downgrades[0].target, "gpt-4o-mini");
    }
}

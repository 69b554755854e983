//! Model Router - complexity-based model downgrading
//!
//! Short prompts are classified "simple" and, when they request a premium
//! model, are downgraded to a cheaper sibling from the same provider
//! family. The mapping is a pure, total function of (prompt length class,
//! requested model): no hidden state, no randomness.
//!
//! Failing to downgrade is acceptable; routing a complex prompt to a
//! materially worse model is not — long prompts always pass through.

use serde::{Deserialize, Serialize};

/// Prompt length (in chars) below which a prompt is considered simple.
pub const DEFAULT_SIMPLE_PROMPT_MAX_CHARS: usize = 100;

/// A single downgrade rule: models whose name contains `matches` are
/// rewritten to `target` for simple prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DowngradeRule {
    /// Substring matched against the requested model name
    pub matches: String,
    /// Cheaper sibling model to route to
    pub target: String,
}

impl DowngradeRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(matches: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            matches: matches.into(),
            target: target.into(),
        }
    }
}

fn default_threshold() -> usize {
    DEFAULT_SIMPLE_PROMPT_MAX_CHARS
}

/// Routing configuration. Data-driven so the policy can be tuned without
/// redeploying logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Prompts strictly shorter than this are "simple"
    #[serde(default = "default_threshold")]
    pub simple_prompt_max_chars: usize,
    /// Downgrade rules, evaluated in order; first match wins
    #[serde(default)]
    pub downgrades: Vec<DowngradeRule>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            simple_prompt_max_chars: DEFAULT_SIMPLE_PROMPT_MAX_CHARS,
            downgrades: vec![
                // Top-tier OpenAI → cheapest sibling
                DowngradeRule::new("gpt-4", "gpt-3.5-turbo"),
                // Top-tier Anthropic → cheapest sibling
                DowngradeRule::new("opus", "claude-haiku"),
            ],
        }
    }
}

/// Deterministic (prompt, requested model) → effective model router.
#[derive(Debug, Clone, Default)]
pub struct ModelRouter {
    config: RouterConfig,
}

impl ModelRouter {
    /// Create a router with the given configuration.
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Choose the effective model for a prompt.
    ///
    /// Non-premium models and prompts at or above the length threshold
    /// pass through unchanged.
    #[must_use]
    pub fn route(&self, prompt: &str, requested_model: &str) -> String {
        if prompt.chars().count() < self.config.simple_prompt_max_chars {
            for rule in &self.config.downgrades {
                if requested_model.contains(rule.matches.as_str()) {
                    return rule.target.clone();
                }
            }
        }
        requested_model.to_string()
    }

    /// Access the active configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_downgrades_gpt4() {
        let router = ModelRouter::default();
        assert_eq!(router.route("Hi", "gpt-4"), "gpt-3.5-turbo");
        assert_eq!(router.route("Hi", "gpt-4-turbo"), "gpt-3.5-turbo");
    }

    #[test]
    fn test_short_prompt_downgrades_opus() {
        let router = ModelRouter::default();
        assert_eq!(router.route("summarize", "claude-opus"), "claude-haiku");
    }

    #[test]
    fn test_mid_tier_model_unchanged() {
        let router = ModelRouter::default();
        assert_eq!(router.route("Hi", "gpt-3.5-turbo"), "gpt-3.5-turbo");
        assert_eq!(router.route("Hi", "claude-sonnet"), "claude-sonnet");
    }

    #[test]
    fn test_length_boundary() {
        let router = ModelRouter::default();
        let p99 = "x".repeat(99);
        let p100 = "x".repeat(100);
        let p150 = "x".repeat(150);
        assert_eq!(router.route(&p99, "gpt-4"), "gpt-3.5-turbo");
        assert_eq!(router.route(&p100, "gpt-4"), "gpt-4");
        assert_eq!(router.route(&p150, "gpt-4"), "gpt-4");
    }

    #[test]
    fn test_deterministic() {
        let router = ModelRouter::default();
        let a = router.route("short prompt", "claude-opus");
        let b = router.route("short prompt", "claude-opus");
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_config() {
        let router = ModelRouter::new(RouterConfig {
            simple_prompt_max_chars: 10,
            downgrades: vec![DowngradeRule::new("sonnet", "claude-haiku")],
        });
        assert_eq!(router.route("hey", "claude-sonnet"), "claude-haiku");
        // Above the tuned threshold
        assert_eq!(router.route("a longer prompt", "claude-sonnet"), "claude-sonnet");
        // No rule for gpt-4 in this config
        assert_eq!(router.route("hey", "gpt-4"), "gpt-4");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let router = ModelRouter::new(RouterConfig {
            simple_prompt_max_chars: 100,
            downgrades: vec![
                DowngradeRule::new("gpt-4", "gpt-3.5-turbo"),
                DowngradeRule::new("gpt-4-turbo", "gpt-4o-mini"),
            ],
        });
        // "gpt-4" matches before the more specific rule
        assert_eq!(router.route("Hi", "gpt-4-turbo"), "gpt-3.5-turbo");
    }
}

//! Completion Provider - swappable response generation seam
//!
//! The optimization engine never talks to a real LLM; it delegates to a
//! [`CompletionProvider`]. The demo configuration uses
//! [`TemplateProvider`], which synthesizes a placeholder response
//! deterministically from the prompt. Real deployments substitute an
//! actual provider client behind the same trait.

use crate::error::Result;

/// Narrow interface for generating a response to a prompt.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (for logs and diagnostics)
    fn name(&self) -> &str;

    /// Generate a response for the prompt using the given model.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String>;
}

/// Length of the prompt excerpt echoed into templated responses.
const EXCERPT_CHARS: usize = 50;

/// Demo provider returning a templated placeholder response.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateProvider;

#[async_trait::async_trait]
impl CompletionProvider for TemplateProvider {
    fn name(&self) -> &str {
        "template"
    }

    async fn complete(&self, prompt: &str, _model: &str) -> Result<String> {
        let excerpt: String = prompt.chars().take(EXCERPT_CHARS).collect();
        Ok(format!("Optimized response to: {excerpt}..."))
    }
}

/// Test provider with queued canned responses.
pub mod mock {
    use super::CompletionProvider;
    use crate::error::{Error, Result};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Returns queued responses, or a default when the queue is empty.
    /// Can be switched into a failing mode to exercise degraded paths.
    #[derive(Debug, Default)]
    pub struct MockProvider {
        responses: Mutex<VecDeque<String>>,
        failing: std::sync::atomic::AtomicBool,
    }

    impl MockProvider {
        /// Create a new mock provider.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response.
        pub fn push_response(&self, response: impl Into<String>) {
            self.responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(response.into());
        }

        /// Make subsequent `complete` calls fail.
        pub fn set_failing(&self, failing: bool) {
            self.failing
                .store(failing, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, _prompt: &str, _model: &str) -> Result<String> {
            if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(Error::Provider("mock failure".to_string()));
            }
            let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
            Ok(responses
                .pop_front()
                .unwrap_or_else(|| "mock response".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_provider_echoes_excerpt() {
        let provider = TemplateProvider;
        let response = provider.complete("What is Rust?", "gpt-4").await.unwrap();
        assert_eq!(response, "Optimized response to: What is Rust?...");
    }

    #[tokio::test]
    async fn test_template_provider_truncates_long_prompts() {
        let provider = TemplateProvider;
        let long = "a".repeat(200);
        let response = provider.complete(&long, "gpt-4").await.unwrap();
        assert_eq!(
            response,
            format!("Optimized response to: {}...", "a".repeat(50))
        );
    }

    #[tokio::test]
    async fn test_template_provider_deterministic() {
        let provider = TemplateProvider;
        let a = provider.complete("same prompt", "gpt-4").await.unwrap();
        let b = provider.complete("same prompt", "claude-opus").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_mock_provider_queue() {
        let provider = mock::MockProvider::new();
        provider.push_response("first");
        assert_eq!(provider.complete("p", "m").await.unwrap(), "first");
        assert_eq!(provider.complete("p", "m").await.unwrap(), "mock response");
    }
}

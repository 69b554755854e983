//! Error types for pennywise-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request input, rejected before reaching core logic
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Durable storage (usage ledger) failure — retryable
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache backend failure — the decision path degrades to always-miss
    #[error("cache error: {0}")]
    Cache(String),

    /// Completion provider failure
    #[error("provider error: {0}")]
    Provider(String),

    /// Serialization / deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Whether the caller may retry the operation.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;

//! UsageLedger — SQLite persistence for usage records.
//!
//! Append-only: records are never updated and only deleted by the
//! explicit bulk [`UsageLedger::reset_all`] used for demo reseeding.
//! The ledger survives process restarts; the response cache does not.

mod crud;
mod migrations;
mod seed;


use crate::error::{Error, Result};
use crate::pricing::PricingTable;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;
use tracing::{debug, info};

/// SQLite-backed usage ledger.
#[derive(Clone)]
pub struct UsageLedger {
    pool: SqlitePool,
    pricing: Arc<PricingTable>,
}

impl UsageLedger {
    /// Open (or create) a ledger at the given path.
    pub async fn from_path(db_path: &std::path::Path, pricing: Arc<PricingTable>) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Internal(format!("mkdir: {e}")))?;
        }
        let url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Enable WAL for read/write concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;

        let ledger = Self { pool, pricing };
        ledger.run_migrations().await?;
        info!("Usage ledger initialized at {}", db_path.display());
        Ok(ledger)
    }

    /// In-memory ledger (for tests).
    pub async fn in_memory(pricing: Arc<PricingTable>) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let ledger = Self { pool, pricing };
        ledger.run_migrations().await?;
        debug!("In-memory usage ledger initialized");
        Ok(ledger)
    }

    /// Pricing table used to cost events without an explicit cost.
    #[must_use]
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

use super::UsageLedger;
use crate::error::Result;

impl UsageLedger {
    pub(super) async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS usage_logs (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp         TEXT NOT NULL,
                org_id            TEXT NOT NULL DEFAULT 'demo_org',
                user_id           TEXT NOT NULL,
                provider          TEXT NOT NULL,
                model             TEXT NOT NULL,
                prompt_tokens     INTEGER NOT NULL,
                completion_tokens INTEGER NOT NULL,
                total_tokens      INTEGER NOT NULL,
                cost              REAL NOT NULL,
                cache_hit         INTEGER NOT NULL DEFAULT 0,
                model_routed_from TEXT,
                feature           TEXT
            )",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_usage_logs_timestamp
             ON usage_logs(timestamp)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_usage_logs_user
             ON usage_logs(user_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

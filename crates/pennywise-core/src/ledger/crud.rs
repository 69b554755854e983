use super::UsageLedger;
use crate::error::{Error, Result};
use crate::record::{NewUsage, UsageRecord, DEFAULT_ORG_ID};
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::warn;

impl UsageLedger {
    /// Append a usage event and return the stored record.
    ///
    /// Assigns the id and, when absent, the timestamp; enforces
    /// `total_tokens = prompt + completion`; computes the cost from the
    /// pricing table when not supplied. Ids are unique and monotonically
    /// non-decreasing (AUTOINCREMENT).
    pub async fn append(&self, usage: NewUsage) -> Result<UsageRecord> {
        if usage.user_id.is_empty() {
            return Err(Error::InvalidInput("user_id must not be empty".to_string()));
        }

        let timestamp = usage.timestamp.unwrap_or_else(Utc::now);
        let org_id = usage
            .org_id
            .unwrap_or_else(|| DEFAULT_ORG_ID.to_string());
        let total_tokens = usage
            .prompt_tokens
            .checked_add(usage.completion_tokens)
            .ok_or_else(|| Error::InvalidInput("token count overflow".to_string()))?;
        let cost = match usage.cost {
            Some(c) if c >= 0.0 => c,
            Some(c) => {
                return Err(Error::InvalidInput(format!("negative cost: {c}")));
            }
            None => self
                .pricing()
                .cost_for(&usage.provider, &usage.model, total_tokens),
        };

        let result = sqlx::query(
            "INSERT INTO usage_logs
             (timestamp, org_id, user_id, provider, model, prompt_tokens,
              completion_tokens, total_tokens, cost, cache_hit,
              model_routed_from, feature)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )
        .bind(timestamp.to_rfc3339())
        .bind(&org_id)
        .bind(&usage.user_id)
        .bind(&usage.provider)
        .bind(&usage.model)
        .bind(i64::from(usage.prompt_tokens))
        .bind(i64::from(usage.completion_tokens))
        .bind(i64::from(total_tokens))
        .bind(cost)
        .bind(i64::from(usage.cache_hit))
        .bind(&usage.model_routed_from)
        .bind(&usage.feature)
        .execute(self.pool())
        .await?;

        Ok(UsageRecord {
            id: result.last_insert_rowid(),
            timestamp,
            org_id,
            user_id: usage.user_id,
            provider: usage.provider,
            model: usage.model,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens,
            cost,
            cache_hit: usage.cache_hit,
            model_routed_from: usage.model_routed_from,
            feature: usage.feature,
        })
    }

    /// Records with timestamp ≥ `since`, ascending by timestamp.
    pub async fn records_since(&self, since: DateTime<Utc>) -> Result<Vec<UsageRecord>> {
        let rows = sqlx::query(
            "SELECT id, timestamp, org_id, user_id, provider, model,
                    prompt_tokens, completion_tokens, total_tokens, cost,
                    cache_hit, model_routed_from, feature
             FROM usage_logs WHERE timestamp >= ?1 ORDER BY timestamp",
        )
        .bind(since.to_rfc3339())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// All records, ascending by timestamp.
    pub async fn all_records(&self) -> Result<Vec<UsageRecord>> {
        let rows = sqlx::query(
            "SELECT id, timestamp, org_id, user_id, provider, model,
                    prompt_tokens, completion_tokens, total_tokens, cost,
                    cache_hit, model_routed_from, feature
             FROM usage_logs ORDER BY timestamp",
        )
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Total number of records.
    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM usage_logs")
            .fetch_one(self.pool())
            .await?;
        let count: i64 = row.try_get("cnt")?;
        Ok(count as u64)
    }

    /// Destructive bulk delete of every record. Demo reseeding only.
    pub async fn reset_all(&self) -> Result<()> {
        warn!("resetting usage ledger: deleting all records");
        sqlx::query("DELETE FROM usage_logs")
            .execute(self.pool())
            .await?;
        Ok(())
    }

    pub(super) fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<UsageRecord> {
        let timestamp_str: String = row.try_get("timestamp")?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|e| Error::Internal(format!("bad timestamp in ledger: {e}")))?
            .with_timezone(&Utc);
        let prompt_tokens: i64 = row.try_get("prompt_tokens")?;
        let completion_tokens: i64 = row.try_get("completion_tokens")?;
        let total_tokens: i64 = row.try_get("total_tokens")?;
        let cache_hit: i64 = row.try_get("cache_hit")?;

        Ok(UsageRecord {
            id: row.try_get("id")?,
            timestamp,
            org_id: row.try_get("org_id")?,
            user_id: row.try_get("user_id")?,
            provider: row.try_get("provider")?,
            model: row.try_get("model")?,
            prompt_tokens: prompt_tokens as u32,
            completion_tokens: completion_tokens as u32,
            total_tokens: total_tokens as u32,
            cost: row.try_get("cost")?,
            cache_hit: cache_hit != 0,
            model_routed_from: row.try_get("model_routed_from")?,
            feature: row.try_get("feature")?,
        })
    }
}

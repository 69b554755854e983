//! Analytics Aggregator - spend summaries over the usage ledger
//!
//! Builds a [`SummaryReport`] on demand. The `days` window applies to the
//! overall totals and the daily breakdown; the provider breakdown and the
//! top-spender list deliberately aggregate the entire ledger history.

use crate::error::Result;
use crate::ledger::UsageLedger;
use crate::record::UsageRecord;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Maximum entries in the top-spenders list.
pub const TOP_USERS_LIMIT: usize = 10;

/// Per-day aggregate (UTC calendar date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Calendar date (UTC)
    pub date: NaiveDate,
    /// Spend for the day (USD)
    pub cost: f64,
    /// Requests for the day
    pub requests: u64,
    /// Cache hits for the day
    pub cache_hits: u64,
    /// Estimated savings for the day (cost × savings ratio)
    pub saved: f64,
}

/// Per-provider aggregate over the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUsage {
    /// Provider name
    pub provider: String,
    /// Total spend (USD)
    pub cost: f64,
    /// Request count
    pub requests: u64,
}

/// Per-user aggregate over the whole ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUsage {
    /// User id
    pub user_id: String,
    /// Total spend (USD)
    pub cost: f64,
    /// Request count
    pub requests: u64,
}

/// Derived spend summary. Full precision; rounding belongs to the
/// presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Requests inside the window
    pub total_requests: u64,
    /// Spend inside the window (USD)
    pub total_cost: f64,
    /// Estimated avoided spend (total_cost × savings ratio)
    pub estimated_cost_saved: f64,
    /// Cache hits inside the window
    pub cache_hits: u64,
    /// Cache hits / requests × 100; 0 when there are no requests
    pub cache_hit_rate: f64,
    /// Mean cost per request inside the window; 0 when empty
    pub avg_cost_per_request: f64,
    /// Per-day aggregates, ascending by date
    pub daily_breakdown: Vec<DailyUsage>,
    /// Per-provider aggregates (entire history)
    pub provider_breakdown: Vec<ProviderUsage>,
    /// Up to 10 per-user aggregates, descending by cost (entire history)
    pub top_users: Vec<UserUsage>,
}

/// On-demand summary computation over a [`UsageLedger`].
#[derive(Clone)]
pub struct Aggregator {
    ledger: UsageLedger,
    savings_ratio: f64,
}

impl Aggregator {
    /// Create an aggregator with the given assumed-savings ratio.
    #[must_use]
    pub fn new(ledger: UsageLedger, savings_ratio: f64) -> Self {
        Self {
            ledger,
            savings_ratio,
        }
    }

    /// Build a summary for the last `days` days.
    ///
    /// An empty ledger yields zero totals and empty breakdowns, never an
    /// error or NaN. Windows wider than the representable time range
    /// saturate to all of history.
    pub async fn summarize(&self, days: u32) -> Result<SummaryReport> {
        let since = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let windowed = self.ledger.records_since(since).await?;
        let all = self.ledger.all_records().await?;

        let total_requests = windowed.len() as u64;
        let total_cost: f64 = windowed.iter().map(|r| r.cost).sum();
        let cache_hits = windowed.iter().filter(|r| r.cache_hit).count() as u64;

        let cache_hit_rate = if total_requests > 0 {
            (cache_hits as f64 / total_requests as f64) * 100.0
        } else {
            0.0
        };
        let avg_cost_per_request = if total_requests > 0 {
            total_cost / total_requests as f64
        } else {
            0.0
        };

        Ok(SummaryReport {
            total_requests,
            total_cost,
            estimated_cost_saved: total_cost * self.savings_ratio,
            cache_hits,
            cache_hit_rate,
            avg_cost_per_request,
            daily_breakdown: self.daily_breakdown(&windowed),
            provider_breakdown: Self::provider_breakdown(&all),
            top_users: Self::top_users(&all),
        })
    }

    fn daily_breakdown(&self, records: &[UsageRecord]) -> Vec<DailyUsage> {
        let mut days: BTreeMap<NaiveDate, DailyUsage> = BTreeMap::new();
        for record in records {
            let date = record.timestamp.date_naive();
            let day = days.entry(date).or_insert_with(|| DailyUsage {
                date,
                cost: 0.0,
                requests: 0,
                cache_hits: 0,
                saved: 0.0,
            });
            day.cost += record.cost;
            day.requests += 1;
            if record.cache_hit {
                day.cache_hits += 1;
            }
        }
        days.into_values()
            .map(|mut day| {
                day.saved = day.cost * self.savings_ratio;
                day
            })
            .collect()
    }

    fn provider_breakdown(records: &[UsageRecord]) -> Vec<ProviderUsage> {
        let mut providers: HashMap<String, ProviderUsage> = HashMap::new();
        for record in records {
            let entry = providers
                .entry(record.provider.clone())
                .or_insert_with(|| ProviderUsage {
                    provider: record.provider.clone(),
                    cost: 0.0,
                    requests: 0,
                });
            entry.cost += record.cost;
            entry.requests += 1;
        }
        let mut breakdown: Vec<_> = providers.into_values().collect();
        // Stable output order for an otherwise-unordered set
        breakdown.sort_by(|a, b| a.provider.cmp(&b.provider));
        breakdown
    }

    fn top_users(records: &[UsageRecord]) -> Vec<UserUsage> {
        let mut users: HashMap<String, UserUsage> = HashMap::new();
        for record in records {
            let entry = users
                .entry(record.user_id.clone())
                .or_insert_with(|| UserUsage {
                    user_id: record.user_id.clone(),
                    cost: 0.0,
                    requests: 0,
                });
            entry.cost += record.cost;
            entry.requests += 1;
        }
        let mut top: Vec<_> = users.into_values().collect();
        top.sort_by(|a, b| {
            b.cost
                .partial_cmp(&a.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        top.truncate(TOP_USERS_LIMIT);
        top
    }
}

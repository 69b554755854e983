//! Spend summary endpoint
//!
//! GET /v1/summary?days=30 — aggregated spend analytics. Rounds money to
//! 2 decimals, rates to 1 and per-call averages to 4; the core report
//! carries full precision.

use crate::api::{round1, round2, round4, ApiError};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

fn default_days() -> u32 {
    30
}

/// Query parameters for GET /v1/summary.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(default = "default_days")]
    pub days: u32,
}

/// Per-day row in the summary response.
#[derive(Debug, Serialize)]
pub struct DailyRow {
    pub date: String,
    pub cost: f64,
    pub requests: u64,
    pub cache_hits: u64,
    pub saved: f64,
}

/// Per-provider row in the summary response.
#[derive(Debug, Serialize)]
pub struct ProviderRow {
    pub provider: String,
    pub cost: f64,
    pub requests: u64,
}

/// Per-user row in the summary response.
#[derive(Debug, Serialize)]
pub struct UserRow {
    pub user_id: String,
    pub cost: f64,
    pub requests: u64,
}

/// Response for GET /v1/summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_requests: u64,
    pub total_cost: f64,
    pub cost_saved: f64,
    pub cache_hits: u64,
    pub cache_hit_rate: f64,
    pub avg_cost_per_request: f64,
    pub daily_breakdown: Vec<DailyRow>,
    pub provider_breakdown: Vec<ProviderRow>,
    pub top_users: Vec<UserRow>,
}

/// GET /v1/summary handler.
async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let report = state.aggregator.summarize(params.days).await?;

    Ok(Json(SummaryResponse {
        total_requests: report.total_requests,
        total_cost: round2(report.total_cost),
        cost_saved: round2(report.estimated_cost_saved),
        cache_hits: report.cache_hits,
        cache_hit_rate: round1(report.cache_hit_rate),
        avg_cost_per_request: round4(report.avg_cost_per_request),
        daily_breakdown: report
            .daily_breakdown
            .into_iter()
            .map(|d| DailyRow {
                date: d.date.to_string(),
                cost: round2(d.cost),
                requests: d.requests,
                cache_hits: d.cache_hits,
                saved: round2(d.saved),
            })
            .collect(),
        provider_breakdown: report
            .provider_breakdown
            .into_iter()
            .map(|p| ProviderRow {
                provider: p.provider,
                cost: round2(p.cost),
                requests: p.requests,
            })
            .collect(),
        top_users: report
            .top_users
            .into_iter()
            .map(|u| UserRow {
                user_id: u.user_id,
                cost: round2(u.cost),
                requests: u.requests,
            })
            .collect(),
    }))
}

/// Create summary routes
pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/v1/summary", get(get_summary))
}

//! Usage logging endpoint
//!
//! POST /v1/log — append a usage event to the ledger. Cost is computed
//! from the pricing table at write time. Logging is deliberately a
//! separate call from /v1/optimize; callers invoke either or both.

use crate::api::{round4, ApiError};
use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use pennywise_core::{Error, NewUsage};
use serde::{Deserialize, Serialize};

/// Request body for POST /v1/log.
///
/// Token counts are unsigned; negative values fail deserialization
/// before reaching core logic.
#[derive(Debug, Deserialize)]
pub struct LogUsageRequest {
    pub user_id: String,
    pub provider: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    #[serde(default)]
    pub feature: Option<String>,
}

/// Response for POST /v1/log.
#[derive(Debug, Serialize)]
pub struct LogUsageResponse {
    pub status: &'static str,
    pub cost: f64,
    pub timestamp: String,
}

/// POST /v1/log handler.
async fn log_usage(
    State(state): State<AppState>,
    Json(req): Json<LogUsageRequest>,
) -> Result<Json<LogUsageResponse>, ApiError> {
    if req.user_id.trim().is_empty() {
        return Err(Error::InvalidInput("user_id must not be empty".to_string()).into());
    }

    let mut usage = NewUsage::new(
        req.user_id,
        req.provider,
        req.model,
        req.prompt_tokens,
        req.completion_tokens,
    );
    usage.feature = req.feature;

    let record = state.ledger.append(usage).await?;

    Ok(Json(LogUsageResponse {
        status: "logged",
        cost: round4(record.cost),
        timestamp: record.timestamp.to_rfc3339(),
    }))
}

/// Create usage routes
pub fn usage_routes() -> Router<AppState> {
    Router::new().route("/v1/log", post(log_usage))
}

//! Optimization endpoint
//!
//! POST /v1/optimize — run the cost-optimization decision path: cache
//! lookup, model routing, response synthesis. Does not write the ledger.

use crate::api::{round4, ApiError};
use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use pennywise_core::Error;
use serde::{Deserialize, Serialize};

/// Request body for POST /v1/optimize.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub prompt: String,
    pub model: String,
    pub provider: String,
    pub user_id: String,
}

/// Response for POST /v1/optimize.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub response: String,
    pub optimized: bool,
    pub cache_hit: bool,
    pub original_model: String,
    pub routed_model: String,
    pub cost_saved: f64,
}

/// POST /v1/optimize handler.
async fn optimize(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    if req.user_id.trim().is_empty() {
        return Err(Error::InvalidInput("user_id must not be empty".to_string()).into());
    }

    let decision = state
        .engine
        .optimize(&req.prompt, &req.model, &req.provider, &req.user_id)
        .await?;

    Ok(Json(OptimizeResponse {
        response: decision.response,
        optimized: true,
        cache_hit: decision.cache_hit,
        original_model: decision.original_model,
        routed_model: decision.routed_model,
        cost_saved: round4(decision.cost_saved),
    }))
}

/// Create optimize routes
pub fn optimize_routes() -> Router<AppState> {
    Router::new().route("/v1/optimize", post(optimize))
}

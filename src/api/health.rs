//! Health check endpoint
//!
//! Reports service status, the current time and the ledger row count,
//! which doubles as a cheap durable-storage connectivity probe.

use crate::api::ApiError;
use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub total_logs: u64,
}

/// GET /health handler.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let total_logs = state.ledger.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        total_logs,
    }))
}

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

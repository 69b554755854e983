//! Web API module for PennyWise
//!
//! Provides REST API endpoints for:
//! - Usage logging
//! - Request optimization (cache + model routing)
//! - Spend summaries
//! - Demo-data seeding
//!
//! Monetary values are rounded here, at the presentation boundary; the
//! core exposes full precision.

pub mod demo;
pub mod error;
pub mod health;
pub mod optimize;
pub mod summary;
pub mod usage;

use crate::server::AppState;
use axum::routing::get;
use axum::{Json, Router};

pub use error::ApiError;

/// Service banner for the root path.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "PennyWise API",
        "health": "/health",
        "endpoints": ["/v1/log", "/v1/optimize", "/v1/summary", "/v1/demo-data"],
    }))
}

/// Create the API router with all endpoints.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(health::health_routes())
        .merge(usage::usage_routes())
        .merge(optimize::optimize_routes())
        .merge(summary::summary_routes())
        .merge(demo::demo_routes())
        .with_state(state)
}

/// Round to 2 decimal places (display money).
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal place (display rates).
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to 4 decimal places (display per-call cost).
pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round2(1.005), 1.0); // f64 repr of 1.005 is just below
        assert_eq!(round2(0.068), 0.07);
        assert_eq!(round1(86.666), 86.7);
        assert_eq!(round4(0.028_49), 0.0285);
    }
}

//! Demo-data endpoint
//!
//! POST /v1/demo-data — destructively reseeds the ledger with synthetic
//! usage records. Not part of the production request flow.

use crate::api::ApiError;
use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

fn default_count() -> u32 {
    1000
}

fn default_day_span() -> u32 {
    30
}

/// Request body for POST /v1/demo-data (all fields optional).
#[derive(Debug, Deserialize)]
pub struct DemoDataRequest {
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_day_span")]
    pub day_span: u32,
}

/// Response for POST /v1/demo-data.
#[derive(Debug, Serialize)]
pub struct DemoDataResponse {
    pub status: &'static str,
    pub message: String,
}

/// POST /v1/demo-data handler.
async fn generate_demo_data(
    State(state): State<AppState>,
    body: Option<Json<DemoDataRequest>>,
) -> Result<Json<DemoDataResponse>, ApiError> {
    let req = body.map(|Json(r)| r).unwrap_or(DemoDataRequest {
        count: default_count(),
        day_span: default_day_span(),
    });

    state.ledger.seed_demo(req.count, req.day_span).await?;

    Ok(Json(DemoDataResponse {
        status: "success",
        message: format!(
            "Generated {} demo logs covering last {} days",
            req.count, req.day_span
        ),
    }))
}

/// Create demo routes
pub fn demo_routes() -> Router<AppState> {
    Router::new().route("/v1/demo-data", post(generate_demo_data))
}

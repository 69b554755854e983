//! End-to-end API tests driving the composed router in-process.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use pennywise_core::{CoreConfig, PricingTable, UsageLedger};
use std::sync::Arc;
use tower::ServiceExt;

// Build the router the same way the server does, over an in-memory ledger.
mod helpers {
    use super::*;

    pub async fn test_router() -> axum::Router {
        let pricing = Arc::new(PricingTable::default());
        let ledger = UsageLedger::in_memory(Arc::clone(&pricing)).await.unwrap();
        let state = pennywise::server::AppState::new(ledger, pricing, CoreConfig::default());
        pennywise::server::build_router(state)
    }
}

use helpers::test_router;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_ledger_size() {
    let app = test_router().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["total_logs"], 0);
}

#[tokio::test]
async fn test_log_usage_returns_cost() {
    let app = test_router().await;
    let response = app
        .oneshot(post_json(
            "/v1/log",
            serde_json::json!({
                "user_id": "u1",
                "provider": "openai",
                "model": "gpt-4",
                "prompt_tokens": 1000,
                "completion_tokens": 500,
                "feature": "chatbot"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "logged");
    // 1500 tokens at $0.03/1K, rounded to 4dp
    assert_eq!(json["cost"], 0.045);
}

#[tokio::test]
async fn test_log_usage_rejects_empty_user() {
    let app = test_router().await;
    let response = app
        .oneshot(post_json(
            "/v1/log",
            serde_json::json!({
                "user_id": "",
                "provider": "openai",
                "model": "gpt-4",
                "prompt_tokens": 10,
                "completion_tokens": 10
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_usage_rejects_negative_tokens() {
    let app = test_router().await;
    let response = app
        .oneshot(post_json(
            "/v1/log",
            serde_json::json!({
                "user_id": "u1",
                "provider": "openai",
                "model": "gpt-4",
                "prompt_tokens": -5,
                "completion_tokens": 10
            }),
        ))
        .await
        .unwrap();

    // Unsigned field: rejected at deserialization, before core logic
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_optimize_cold_then_warm() {
    let app = test_router().await;
    let request = serde_json::json!({
        "prompt": "Hi",
        "model": "gpt-4",
        "provider": "openai",
        "user_id": "u1"
    });

    let cold = app
        .clone()
        .oneshot(post_json("/v1/optimize", request.clone()))
        .await
        .unwrap();
    assert_eq!(cold.status(), StatusCode::OK);
    let cold = body_json(cold).await;
    assert_eq!(cold["cache_hit"], false);
    assert_eq!(cold["original_model"], "gpt-4");
    assert_eq!(cold["routed_model"], "gpt-3.5-turbo");
    assert!(cold["cost_saved"].as_f64().unwrap() > 0.0);

    let warm = app
        .oneshot(post_json("/v1/optimize", request))
        .await
        .unwrap();
    let warm = body_json(warm).await;
    assert_eq!(warm["cache_hit"], true);
    assert_eq!(warm["routed_model"], "gpt-4");
    assert_eq!(warm["cost_saved"], 0.03);
}

#[tokio::test]
async fn test_summary_after_seeding() {
    let app = test_router().await;

    let seeded = app
        .clone()
        .oneshot(post_json(
            "/v1/demo-data",
            serde_json::json!({"count": 100, "day_span": 7}),
        ))
        .await
        .unwrap();
    assert_eq!(seeded.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/summary?days=7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["total_requests"], 100);
    let daily_sum: u64 = json["daily_breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["requests"].as_u64().unwrap())
        .sum();
    assert_eq!(daily_sum, 100);
    assert!(json["top_users"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
async fn test_summary_empty_ledger() {
    let app = test_router().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/summary")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_requests"], 0);
    assert_eq!(json["cache_hit_rate"], 0.0);
    assert!(json["daily_breakdown"].as_array().unwrap().is_empty());
}

//! Server initialization and runtime
//!
//! Wires the core services (ledger, cache, router, engine, aggregator)
//! together, builds the axum router and serves it. All request/response
//! concerns live in `crate::api`; the core stays transport-agnostic.

use crate::cli::ServeArgs;
use anyhow::{Context, Result};
use pennywise_core::{
    Aggregator, CoreConfig, MemoryCache, ModelRouter, OptimizationEngine, PricingTable,
    TemplateProvider, UsageLedger,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Durable usage ledger
    pub ledger: UsageLedger,
    /// Cost-optimization decision engine
    pub engine: Arc<OptimizationEngine>,
    /// Spend summary builder
    pub aggregator: Aggregator,
}

impl AppState {
    /// Build the full service graph over an already-open ledger.
    pub fn new(ledger: UsageLedger, pricing: Arc<PricingTable>, config: CoreConfig) -> Self {
        let engine = OptimizationEngine::new(
            Arc::new(MemoryCache::new()),
            ModelRouter::new(config.router),
            pricing,
            // Demo collaborator; a real deployment substitutes a live
            // provider client behind the same trait.
            Arc::new(TemplateProvider),
            config.optimizer.clone(),
        );
        let aggregator = Aggregator::new(ledger.clone(), config.optimizer.savings_ratio);
        Self {
            ledger,
            engine: Arc::new(engine),
            aggregator,
        }
    }
}

/// Build the complete application router.
pub fn build_router(state: AppState) -> axum::Router {
    crate::api::api_router(state)
        // Demo configuration is intentionally permissive, as the
        // dashboard is served from a different origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the server and block until shutdown.
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => CoreConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CoreConfig::default(),
    };

    let pricing = Arc::new(PricingTable::default());
    let ledger = UsageLedger::from_path(&args.db, Arc::clone(&pricing))
        .await
        .context("opening usage ledger")?;

    let state = AppState::new(ledger, pricing, config);
    let app = build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("PennyWise API listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

//! PennyWise - LLM Cost Optimizer
//!
//! CLI entry point for the PennyWise server.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pennywise::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pennywise=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PennyWise v{}", env!("CARGO_PKG_VERSION"));

    let cli = cli::Cli::parse();
    cli::run(cli).await
}

//! CLI module for PennyWise

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// PennyWise LLM Cost Optimizer CLI
#[derive(Parser, Debug)]
#[command(name = "pennywise")]
#[command(about = "LLM cost tracking and optimization service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve(ServeArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Path to the SQLite usage ledger
    #[arg(long, env = "PENNYWISE_DB", default_value = "pennywise.db")]
    pub db: PathBuf,

    /// Optional TOML config file for routing/savings policy
    #[arg(long, env = "PENNYWISE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: 8000,
            db: PathBuf::from("pennywise.db"),
            config: None,
        }
    }
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => crate::server::run(args).await,
        None => crate::server::run(ServeArgs::default()).await,
    }
}

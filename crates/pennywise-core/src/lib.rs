//! PennyWise Core — LLM cost tracking and optimization
//!
//! Tracks per-request spend against third-party LLM providers, reduces
//! it via response caching and complexity-based model downgrading, and
//! aggregates spend analytics over a durable usage ledger.
//!
//! # Architecture
//!
//! ```text
//! request ──► OptimizationEngine ──► OptimizationDecision
//!               │          │
//!        ResponseCache  ModelRouter
//!               │
//!        CompletionProvider (swappable collaborator)
//!
//! logUsage ──► UsageLedger (SQLite) ◄── Aggregator ──► SummaryReport
//!                     │
//!               PricingTable
//! ```
//!
//! The engine and the ledger are decoupled: `optimize` never writes the
//! ledger, and a storage failure never blocks the decision path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analytics;
pub mod cache;
pub mod completion;
pub mod config;
pub mod error;
pub mod ledger;
pub mod optimizer;
pub mod pricing;
pub mod record;
pub mod router;

pub use analytics::{Aggregator, DailyUsage, ProviderUsage, SummaryReport, UserUsage};
pub use cache::{fingerprint, MemoryCache, ResponseCache};
pub use completion::{CompletionProvider, TemplateProvider};
pub use config::{CoreConfig, OptimizerConfig};
pub use error::{Error, Result};
pub use ledger::UsageLedger;
pub use optimizer::{OptimizationDecision, OptimizationEngine};
pub use pricing::{PricingEntry, PricingTable, DEFAULT_PRICE_PER_1K};
pub use record::{NewUsage, UsageRecord};
pub use router::{DowngradeRule, ModelRouter, RouterConfig};

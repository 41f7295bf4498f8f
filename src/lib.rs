//! DeFi Score Library
//!
//! Scores how broadly a wallet uses DeFi, from four on-chain pillars:
//! - P1 transaction volume over the trailing window
//! - P2 diversity of activity types (lending, staking, trading, ...)
//! - P3 number of distinct protocols used
//! - P4 number of distinct assets held
//!
//! The pillars are averaged and mapped onto a 25-100 display range.

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::engine::{DefiScorer, ScoreOutcome};
pub use crate::core::orchestrator::{FetchKind, GatheredMetrics};
pub use models::config::{ApiServerConfig, FetchSettings, ScorerConfig};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{ScoreReport, WalletAddress};
pub use providers::bitquery::BitqueryClient;
pub use providers::graphql::{Endpoint, GraphQlQuery, QueryExecutor};

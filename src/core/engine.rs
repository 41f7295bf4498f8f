//! Scoring Engine
//!
//! Entry point of the core: shortcut check, concurrent fetch, pillar
//! scoring and composition. Address syntax is checked by the callers
//! (API handler, CLI); the engine only rejects a blank address.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use super::composer::ScoreReportBuilder;
use super::orchestrator::{gather, GatheredMetrics};
use super::sample::{is_sample_address, sample_report};
use crate::models::config::{FetchSettings, ScorerConfig};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ScoreReport, WalletAddress};
use crate::providers::bitquery::BitqueryClient;
use crate::providers::graphql::QueryExecutor;

/// A report plus how it was produced
#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub report: ScoreReport,
    /// `None` when the sample shortcut answered
    pub metrics: Option<GatheredMetrics>,
    pub elapsed: Duration,
}

impl ScoreOutcome {
    pub fn from_sample(&self) -> bool {
        self.metrics.is_none()
    }
}

/// DeFi Strategy Score engine
#[derive(Clone)]
pub struct DefiScorer {
    executor: Arc<dyn QueryExecutor>,
    settings: FetchSettings,
}

impl DefiScorer {
    pub fn new(executor: Arc<dyn QueryExecutor>, settings: FetchSettings) -> Self {
        Self { executor, settings }
    }

    /// Engine backed by the Bitquery transport
    pub fn from_config(config: &ScorerConfig) -> AppResult<Self> {
        let client = BitqueryClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.fetch.clone()))
    }

    /// Score one address
    pub async fn score(&self, address: &str) -> AppResult<ScoreReport> {
        Ok(self.score_detailed(address).await?.report)
    }

    /// Score one address, keeping fetch timings and failures
    pub async fn score_detailed(&self, address: &str) -> AppResult<ScoreOutcome> {
        let start = Instant::now();
        let input = address.trim();
        if input.is_empty() {
            return Err(AppError::missing_address());
        }

        if is_sample_address(input) {
            info!("📌 Sample wallet requested, returning recorded report");
            return Ok(ScoreOutcome {
                report: sample_report(),
                metrics: None,
                elapsed: start.elapsed(),
            });
        }

        let normalized = WalletAddress::normalize(input);
        info!("🔍 Scoring {}", normalized);

        let metrics = gather(Arc::clone(&self.executor), &normalized, &self.settings).await;
        let report = ScoreReportBuilder::from_inputs(&metrics.merge()).build(input);

        info!(
            "✅ {} scored {} (avg pillar {:.2})",
            normalized, report.final_score_rounded, report.average_pillar_score
        );

        Ok(ScoreOutcome {
            report,
            metrics: Some(metrics),
            elapsed: start.elapsed(),
        })
    }
}

//! Fetch Orchestrator
//!
//! Runs the four metric fetchers as concurrent tokio tasks and waits for
//! all of them. A fetcher that errors or panics contributes its default
//! (0 transactions, empty sets, no trades, 0 assets) and is recorded in
//! `failures`; the request itself never fails here.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

use super::fetchers::{
    fetch_asset_holdings, fetch_protocol_activity, fetch_trade_activity, fetch_transaction_count,
};
use crate::models::config::FetchSettings;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AssetHoldings, PillarInputs, ProtocolActivity, TradeActivity};
use crate::providers::graphql::QueryExecutor;

/// Identifies one fetcher in timings and failure lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FetchKind {
    TransactionCount,
    ProtocolActivity,
    TradeActivity,
    AssetHoldings,
}

impl FetchKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TransactionCount => "P1 transactions",
            Self::ProtocolActivity => "P2/P3 protocols",
            Self::TradeActivity => "DEX/NFT & governance",
            Self::AssetHoldings => "P4 assets",
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the fetchers produced for one address
#[derive(Debug, Clone, Default)]
pub struct GatheredMetrics {
    pub p1: u64,
    pub p2_3: ProtocolActivity,
    pub trades: TradeActivity,
    pub p4: AssetHoldings,
    /// Wall time per fetcher
    pub timings: BTreeMap<FetchKind, Duration>,
    /// Fetchers that fell back to their default
    pub failures: Vec<FetchKind>,
}

impl GatheredMetrics {
    /// Combine fetcher outputs into the four pillar inputs
    pub fn merge(&self) -> PillarInputs {
        let mut activity_types = self.p2_3.activity_types.clone();
        activity_types.extend(self.trades.activity_types());

        // venues and contract addresses are disjoint, so the counts add up
        let unique_protocols =
            (self.p2_3.protocols.len() as u64).saturating_add(self.trades.venue_count());

        PillarInputs {
            tx_count: self.p1,
            activity_types,
            unique_protocols,
            unique_assets: self.p4.total(),
        }
    }
}

type Timed<T> = (AppResult<T>, Duration);

fn spawn_fetch<T, F, Fut>(
    executor: &Arc<dyn QueryExecutor>,
    address: &str,
    settings: &FetchSettings,
    fetch: F,
) -> JoinHandle<Timed<T>>
where
    T: Send + 'static,
    F: FnOnce(Arc<dyn QueryExecutor>, String, FetchSettings) -> Fut,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
{
    let fut = fetch(Arc::clone(executor), address.to_string(), settings.clone());
    tokio::spawn(async move {
        let start = Instant::now();
        let result = fut.await;
        (result, start.elapsed())
    })
}

fn settle<T: Default>(
    kind: FetchKind,
    joined: Result<Timed<T>, JoinError>,
    address: &str,
    metrics: &mut GatheredMetrics,
) -> T {
    let (result, elapsed) = match joined {
        Ok(timed) => timed,
        Err(e) => (Err(AppError::from(e)), Duration::ZERO),
    };
    metrics.timings.insert(kind, elapsed);

    result.unwrap_or_else(|e| {
        warn!("⚠️ {} fetch failed for {}, using default: {}", kind, address, e);
        metrics.failures.push(kind);
        T::default()
    })
}

/// Fetch every raw measurement for `address` concurrently
pub async fn gather(
    executor: Arc<dyn QueryExecutor>,
    address: &str,
    settings: &FetchSettings,
) -> GatheredMetrics {
    let start = Instant::now();

    let p1 = spawn_fetch(&executor, address, settings, |ex, addr, s| async move {
        fetch_transaction_count(ex.as_ref(), &addr, &s).await
    });
    let p2_3 = spawn_fetch(&executor, address, settings, |ex, addr, s| async move {
        fetch_protocol_activity(ex.as_ref(), &addr, &s).await
    });
    let trades = spawn_fetch(&executor, address, settings, |ex, addr, s| async move {
        fetch_trade_activity(ex.as_ref(), &addr, &s).await
    });
    let p4 = spawn_fetch(&executor, address, settings, |ex, addr, s| async move {
        fetch_asset_holdings(ex.as_ref(), &addr, &s).await
    });

    let (p1, p2_3, trades, p4) = tokio::join!(p1, p2_3, trades, p4);

    let mut metrics = GatheredMetrics::default();
    let p1 = settle(FetchKind::TransactionCount, p1, address, &mut metrics);
    let p2_3 = settle(FetchKind::ProtocolActivity, p2_3, address, &mut metrics);
    let trades = settle(FetchKind::TradeActivity, trades, address, &mut metrics);
    let p4 = settle(FetchKind::AssetHoldings, p4, address, &mut metrics);
    metrics.p1 = p1;
    metrics.p2_3 = p2_3;
    metrics.trades = trades;
    metrics.p4 = p4;

    info!(
        "⏱️ Gathered metrics for {} in {}ms ({} fetcher(s) degraded)",
        address,
        start.elapsed().as_millis(),
        metrics.failures.len()
    );
    metrics
}

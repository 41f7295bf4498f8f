//! API Request Handlers

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use super::history::RecentScores;
use super::types::*;
use crate::core::engine::DefiScorer;
use crate::models::errors::AppError;
use crate::models::types::WalletAddress;
use crate::utils::constants::APP_VERSION;

type ErrorReply = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
pub struct AppState {
    /// `None` when no Bitquery key was configured; calculate then answers 500
    pub scorer: Option<DefiScorer>,
    pub recent: RwLock<RecentScores>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(scorer: Option<DefiScorer>) -> Self {
        Self {
            scorer,
            recent: RwLock::new(RecentScores::default()),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn latency_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn reject(err: &AppError, start: Instant) -> ErrorReply {
    let status = StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::error(ApiError::from(err), latency_ms(start))))
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: APP_VERSION.to_string(),
        uptime_seconds: state.uptime_seconds(),
        scorer_configured: state.scorer.is_some(),
    };

    Json(ApiResponse::success(data, latency_ms(start)))
}

// ============================================
// Score Calculation
// ============================================

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<ApiResponse<CalculateData>>, ErrorReply> {
    let start = Instant::now();

    let address = req.address.unwrap_or_default();
    let address = address.trim();
    WalletAddress::parse(address).map_err(|e| {
        warn!("Rejected address '{}': {}", address, e);
        reject(&e, start)
    })?;

    let scorer = state.scorer.as_ref().ok_or_else(|| {
        error!("❌ Calculate called without BITQUERY_API_KEY configured");
        reject(&AppError::missing_api_key("BITQUERY_API_KEY"), start)
    })?;

    let report = scorer.score(address).await.map_err(|e| {
        if e.is_fatal() {
            error!("❌ Scoring failed for {}: {}", address, e);
        } else {
            warn!("⚠️ Scoring degraded to an error for {}: {}", address, e);
        }
        reject(&e, start)
    })?;

    state.recent.write().await.push(RecentEntry::from(&report));
    info!(
        "📈 {} -> {} in {:.0}ms",
        report.address,
        report.final_score_rounded,
        latency_ms(start)
    );

    Ok(Json(ApiResponse::success(report, latency_ms(start))))
}

// ============================================
// Recent Results
// ============================================

pub async fn recent(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<RecentEntry>>> {
    let start = Instant::now();
    let entries = state.recent.read().await.list();
    Json(ApiResponse::success(entries, latency_ms(start)))
}

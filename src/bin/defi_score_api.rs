//! DeFi Score API Server
//!
//! REST API around the scoring engine
//!
//! Usage:
//!   cargo run --bin defi_score_api
//!
//! Environment:
//!   BITQUERY_API_KEY - Bitquery key (without it /api/calculate answers 500)
//!   PORT / DEFI_API_PORT - Server port (default: 5001)
//!   DEFI_API_HOST - Server host (default: 0.0.0.0)
//!   RUST_LOG - Log filter (default: info)

use defi_score::api::{create_router, AppState};
use defi_score::{ApiServerConfig, DefiScorer, ErrorCode, ScorerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let scorer = match ScorerConfig::from_env().and_then(|config| DefiScorer::from_config(&config)) {
        Ok(scorer) => Some(scorer),
        Err(e) if e.code == ErrorCode::MissingApiKey => {
            warn!("⚠️ BITQUERY_API_KEY not set, score calculation is disabled");
            None
        }
        Err(e) => {
            error!("❌ Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(scorer));
    let app = create_router(state);

    let server = ApiServerConfig::from_env()?;
    let addr: SocketAddr = server.bind_addr().parse()?;

    info!("🚀 DeFi Score API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /api/calculate  - Score a wallet");
    info!("  GET  /api/recent     - Last 5 scored wallets");
    info!("  GET  /health         - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("👋 DeFi Score API shutdown complete");
    Ok(())
}

//! DeFi Score CLI
//!
//! Scores one wallet and prints the pillar breakdown plus per-fetcher timings.
//!
//! Usage:
//!   defi_score 0x6979B914f3A1d8C0fec2C1FD602f0e674cdf9862
//!   defi_score --json <address>
//!
//! Environment (also read from `.env`):
//!   BITQUERY_API_KEY - required
//!   RUST_LOG         - log filter (default: info, logs go to stderr)

use clap::Parser;
use defi_score::{AppError, DefiScorer, ErrorCode, FetchKind, ScoreOutcome, ScorerConfig, WalletAddress};
use eyre::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const RULE: &str = "============================================================";

#[derive(Parser)]
#[command(name = "defi_score")]
#[command(version)]
#[command(about = "Calculate the DeFi Strategy Score for an Ethereum address", long_about = None)]
struct Cli {
    /// Ethereum address to analyze
    address: String,

    /// Print the report as JSON instead of the text breakdown
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let address = cli.address.trim().to_string();

    if let Err(e) = WalletAddress::parse(&address) {
        eprintln!("Error: {}", e.message);
        std::process::exit(1);
    }

    let config = match ScorerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.message);
            if let Some(hint) = config_hint(&e) {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        }
    };

    let scorer = DefiScorer::from_config(&config)?;
    let outcome = scorer.score_detailed(&address).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    } else {
        print_timings(&outcome);
        print_report(&outcome);
    }

    Ok(())
}

/// Setup hint for config errors a `.env` file fixes
fn config_hint(err: &AppError) -> Option<&'static str> {
    (err.code == ErrorCode::MissingApiKey)
        .then_some("Please create a .env file with: BITQUERY_API_KEY=your_api_key")
}

fn print_timings(outcome: &ScoreOutcome) {
    let Some(metrics) = &outcome.metrics else {
        return;
    };

    println!("\n  {}", RULE);
    println!("  Query Timing Summary:");
    println!("  {}", RULE);
    for kind in [
        FetchKind::TransactionCount,
        FetchKind::ProtocolActivity,
        FetchKind::TradeActivity,
        FetchKind::AssetHoldings,
    ] {
        let secs = metrics
            .timings
            .get(&kind)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        let note = if metrics.failures.contains(&kind) { "  (failed, default used)" } else { "" };
        println!("  {:<28}{:.2}s{}", format!("{}:", kind), secs, note);
    }
    println!("  {}", RULE);
    println!("  {:<28}{:.2}s", "Total Time:", outcome.elapsed.as_secs_f64());
    println!("  {}\n", RULE);
}

fn print_report(outcome: &ScoreOutcome) {
    let report = &outcome.report;

    println!("\n{}", RULE);
    println!("DEFI STRATEGY SCORE RESULTS");
    println!("{}", RULE);
    println!("Address: {}", report.address);
    println!("\nPillar Scores:");
    println!(
        "  P1 (Transaction Count): {:.2} points ({} transactions)",
        report.p1.score, report.p1.tx_count
    );
    println!(
        "  P2 (Transaction Types): {:.2} points ({} types)",
        report.p2.score, report.p2.unique_types
    );
    println!(
        "  P3 (Protocols Used): {:.2} points ({} protocols)",
        report.p3.score, report.p3.unique_protocols
    );
    println!(
        "  P4 (Assets Held): {:.2} points ({} assets)",
        report.p4.score, report.p4.unique_assets
    );
    println!("\nAverage Pillar Score: {:.2}", report.average_pillar_score);
    println!("\nFinal DeFi Strategy Score: {}", report.final_score_rounded);
    println!("{}", RULE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_hint_only_for_missing_key() {
        assert!(config_hint(&AppError::missing_api_key("BITQUERY_API_KEY")).is_some());
        assert!(config_hint(&AppError::invalid_config("DEFI_LOOKBACK_YEARS must be between 1 and 50")).is_none());
        assert!(config_hint(&AppError::invalid_config("Invalid value for BITQUERY_TIMEOUT_SECS")).is_none());
    }
}

//! Score Composer
//!
//! Combines the four pillar results into the final report.
//! final = 25 + average * 0.75, so the displayed range is 25-100.

use super::pillars::{activity_score, asset_score, protocol_score, transaction_score};
use crate::models::types::{
    ActivityPillar, AssetPillar, PillarInputs, ProtocolPillar, ScoreReport, TransactionPillar,
};
use crate::utils::constants::{FINAL_SCORE_FLOOR, FINAL_SCORE_SCALE};

/// Map a 0-100 pillar average onto the 25-100 display range
pub fn scale_final(average: f64) -> f64 {
    FINAL_SCORE_FLOOR + average * FINAL_SCORE_SCALE
}

/// Nearest integer, exact halves go to the even neighbour (62.5 -> 62, 63.5 -> 64)
pub fn round_final(score: f64) -> i64 {
    score.round_ties_even() as i64
}

/// Builder for a [`ScoreReport`]; pillars left unset score as zero input
#[derive(Debug, Clone, Default)]
pub struct ScoreReportBuilder {
    tx_count: u64,
    unique_types: u64,
    unique_protocols: u64,
    unique_assets: u64,
}

impl ScoreReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled from merged fetcher output
    pub fn from_inputs(inputs: &PillarInputs) -> Self {
        Self::new()
            .with_transactions(inputs.tx_count)
            .with_activity_types(inputs.activity_types.len() as u64)
            .with_protocols(inputs.unique_protocols)
            .with_assets(inputs.unique_assets)
    }

    /// P1 raw input
    pub fn with_transactions(mut self, tx_count: u64) -> Self {
        self.tx_count = tx_count;
        self
    }

    /// P2 raw input
    pub fn with_activity_types(mut self, unique_types: u64) -> Self {
        self.unique_types = unique_types;
        self
    }

    /// P3 raw input
    pub fn with_protocols(mut self, unique_protocols: u64) -> Self {
        self.unique_protocols = unique_protocols;
        self
    }

    /// P4 raw input
    pub fn with_assets(mut self, unique_assets: u64) -> Self {
        self.unique_assets = unique_assets;
        self
    }

    pub fn build(self, address: impl Into<String>) -> ScoreReport {
        let p1 = TransactionPillar {
            tx_count: self.tx_count,
            score: transaction_score(self.tx_count),
        };
        let p2 = ActivityPillar {
            unique_types: self.unique_types,
            score: activity_score(self.unique_types),
        };
        let p3 = ProtocolPillar {
            unique_protocols: self.unique_protocols,
            score: protocol_score(self.unique_protocols),
        };
        let p4 = AssetPillar {
            unique_assets: self.unique_assets,
            score: asset_score(self.unique_assets),
        };

        let average = (p1.score + p2.score + p3.score + p4.score) / 4.0;
        let final_score = scale_final(average);

        ScoreReport {
            address: address.into(),
            p1,
            p2,
            p3,
            p4,
            average_pillar_score: average,
            final_score,
            final_score_rounded: round_final(final_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_full_breakdown() {
        let report = ScoreReportBuilder::new()
            .with_transactions(156)
            .with_activity_types(2)
            .with_protocols(3)
            .with_assets(29)
            .build(ADDR);

        assert_eq!(report.p1.score, 100.0);
        assert_eq!(report.p2.score, 25.0);
        assert!((report.p3.score - 28.5714).abs() < 1e-3);
        assert_eq!(report.p4.score, 100.0);
        assert!((report.average_pillar_score - 63.3929).abs() < 1e-3);
        assert!((report.final_score - 72.5446).abs() < 1e-3);
        assert_eq!(report.final_score_rounded, 73);
        assert_eq!(report.address, ADDR);
    }

    #[test]
    fn test_empty_wallet_scores_floor() {
        let report = ScoreReportBuilder::new().build(ADDR);
        assert_eq!(report.average_pillar_score, 0.0);
        assert_eq!(report.final_score, 25.0);
        assert_eq!(report.final_score_rounded, 25);
    }

    #[test]
    fn test_maxed_wallet_scores_ceiling() {
        let report = ScoreReportBuilder::new()
            .with_transactions(1_000)
            .with_activity_types(9)
            .with_protocols(40)
            .with_assets(100)
            .build(ADDR);
        assert_eq!(report.final_score, 100.0);
        assert_eq!(report.final_score_rounded, 100);
    }

    #[test]
    fn test_half_rounds_to_even() {
        assert_eq!(round_final(62.5), 62);
        assert_eq!(round_final(63.5), 64);
        assert_eq!(round_final(72.544375), 73);
        assert_eq!(round_final(25.0), 25);

        // average 50 -> final 62.5 exactly
        let report = ScoreReportBuilder::new()
            .with_transactions(55)
            .with_activity_types(3)
            .with_protocols(8)
            .with_assets(1)
            .build(ADDR);
        assert_eq!(report.average_pillar_score, 50.0);
        assert_eq!(report.final_score, 62.5);
        assert_eq!(report.final_score_rounded, 62);
    }

    #[test]
    fn test_final_always_in_range() {
        for tx in [0u64, 10, 40, 100, 500] {
            for n in 0..20u64 {
                let report = ScoreReportBuilder::new()
                    .with_transactions(tx)
                    .with_activity_types(n)
                    .with_protocols(n)
                    .with_assets(n)
                    .build(ADDR);
                assert!((25.0..=100.0).contains(&report.final_score));
                assert!((25..=100).contains(&report.final_score_rounded));
            }
        }
    }
}

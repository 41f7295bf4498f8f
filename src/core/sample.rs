//! Demo wallet answered from a fixed report
//!
//! Requests for the sample address skip every query and return the
//! recorded breakdown below.

use crate::models::types::{
    ActivityPillar, AssetPillar, ProtocolPillar, ScoreReport, TransactionPillar,
};
use crate::utils::constants::SAMPLE_WALLET_ADDRESS;

pub fn is_sample_address(address: &str) -> bool {
    address.trim().eq_ignore_ascii_case(SAMPLE_WALLET_ADDRESS)
}

pub fn sample_report() -> ScoreReport {
    ScoreReport {
        address: SAMPLE_WALLET_ADDRESS.to_string(),
        p1: TransactionPillar {
            tx_count: 156,
            score: 100.0,
        },
        p2: ActivityPillar {
            unique_types: 2,
            score: 25.0,
        },
        p3: ProtocolPillar {
            unique_protocols: 3,
            score: 28.57,
        },
        p4: AssetPillar {
            unique_assets: 29,
            score: 100.0,
        },
        average_pillar_score: 63.3925,
        final_score: 72.544375,
        final_score_rounded: 73,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_match_ignores_case() {
        assert!(is_sample_address("0x6979B914f3A1d8C0fec2C1FD602f0e674cdf9862"));
        assert!(is_sample_address("0x6979b914f3a1d8c0fec2c1fd602f0e674cdf9862"));
        assert!(is_sample_address("0X6979B914F3A1D8C0FEC2C1FD602F0E674CDF9862"));
        assert!(!is_sample_address("0x6979b914f3a1d8c0fec2c1fd602f0e674cdf9863"));
    }

    #[test]
    fn test_sample_report_is_consistent() {
        let report = sample_report();
        let average = (report.p1.score + report.p2.score + report.p3.score + report.p4.score) / 4.0;
        assert!((report.average_pillar_score - average).abs() < 1e-9);
        assert!((report.final_score - (25.0 + average * 0.75)).abs() < 1e-9);
        assert_eq!(report.final_score_rounded, 73);
    }
}

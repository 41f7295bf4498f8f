//! Pillar Scoring Functions
//!
//! Each pillar maps a raw count onto 0-100 with a linear ramp:
//! - count <= lo: 0
//! - count >= hi: 100
//! - otherwise: (count - lo) / (hi - lo) * 100

/// Ramp bounds for one pillar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarThresholds {
    pub lo: f64,
    pub hi: f64,
}

impl PillarThresholds {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn score(&self, value: u64) -> f64 {
        interpolate(value as f64, self.lo, self.hi)
    }
}

/// P1: transactions in the window
pub const TRANSACTION_THRESHOLDS: PillarThresholds = PillarThresholds::new(10.0, 100.0);
/// P2: distinct activity types
pub const ACTIVITY_THRESHOLDS: PillarThresholds = PillarThresholds::new(1.0, 5.0);
/// P3: distinct protocols
pub const PROTOCOL_THRESHOLDS: PillarThresholds = PillarThresholds::new(1.0, 8.0);
/// P4: distinct assets
pub const ASSET_THRESHOLDS: PillarThresholds = PillarThresholds::new(1.0, 15.0);

/// Linear ramp between `lo` and `hi`, clamped to [0, 100]
pub fn interpolate(value: f64, lo: f64, hi: f64) -> f64 {
    if value <= lo {
        return 0.0;
    }
    if value >= hi {
        return 100.0;
    }
    ((value - lo) / (hi - lo) * 100.0).min(100.0)
}

pub fn transaction_score(tx_count: u64) -> f64 {
    TRANSACTION_THRESHOLDS.score(tx_count)
}

pub fn activity_score(unique_types: u64) -> f64 {
    ACTIVITY_THRESHOLDS.score(unique_types)
}

pub fn protocol_score(unique_protocols: u64) -> f64 {
    PROTOCOL_THRESHOLDS.score(unique_protocols)
}

pub fn asset_score(unique_assets: u64) -> f64 {
    ASSET_THRESHOLDS.score(unique_assets)
}

//! Lenient value decoding for GraphQL responses.
//!
//! Bitquery returns aggregate counts and sums as JSON strings on some
//! datasets and as numbers on others. These helpers accept both and map
//! anything unusable to `None`, so callers pick the documented default.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Non-negative integer from a number or numeric string.
///
/// Fractional values are truncated; negatives and garbage yield `None`.
pub fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
        }
        _ => None,
    }
}

/// Float from a number or numeric string.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Same as [`as_u64`] for an optional field, defaulting to zero.
pub fn u64_or_zero(value: Option<&Value>) -> u64 {
    value.and_then(as_u64).unwrap_or(0)
}

/// Decode each record independently, dropping the ones that do not fit `T`.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>, what: &str) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect();

    if decoded.len() < total {
        debug!(
            "Skipped {} malformed {} record(s) out of {}",
            total - decoded.len(),
            what,
            total
        );
    }
    decoded
}

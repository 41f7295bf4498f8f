//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::errors::{AppError, ErrorCode};
use crate::models::types::ScoreReport;

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn address_required() -> Self {
        Self {
            code: "ADDRESS_REQUIRED".to_string(),
            message: "Address is required".to_string(),
            details: None,
        }
    }

    pub fn invalid_address(details: impl Into<String>) -> Self {
        Self {
            code: "INVALID_ADDRESS".to_string(),
            message: "Invalid Ethereum address format".to_string(),
            details: Some(details.into()),
        }
    }

    pub fn api_key_missing() -> Self {
        Self {
            code: "API_KEY_MISSING".to_string(),
            message: "API key not configured".to_string(),
            details: None,
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        match err.code {
            ErrorCode::MissingAddress => Self::address_required(),
            ErrorCode::InvalidAddress => Self::invalid_address(err.message.clone()),
            ErrorCode::MissingApiKey => Self::api_key_missing(),
            _ => Self {
                code: err.code_str().to_string(),
                message: err.message.clone(),
                details: None,
            },
        }
    }
}

// ============================================
// Score Calculation
// ============================================

#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub address: Option<String>,
}

pub type CalculateData = ScoreReport;

/// Compact row of the recent-results list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub address: String,
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    /// Rounded final score
    pub final_score: i64,
}

impl From<&ScoreReport> for RecentEntry {
    fn from(report: &ScoreReport) -> Self {
        Self {
            address: report.address.clone(),
            p1: report.p1.score,
            p2: report.p2.score,
            p3: report.p3.score,
            p4: report.p4.score,
            final_score: report.final_score_rounded,
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Whether a Bitquery key was loaded at startup
    pub scorer_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::sample_report;

    #[test]
    fn test_recent_entry_from_report() {
        let entry = RecentEntry::from(&sample_report());
        assert_eq!(entry.p2, 25.0);
        assert_eq!(entry.p3, 28.57);
        assert_eq!(entry.final_score, 73);
    }

    #[test]
    fn test_api_error_mapping() {
        assert_eq!(ApiError::from(&AppError::missing_address()).code, "ADDRESS_REQUIRED");
        assert_eq!(ApiError::from(&AppError::invalid_address("bad")).code, "INVALID_ADDRESS");
        assert_eq!(ApiError::from(&AppError::transport("down")).code, "TRANSPORT_FAILED");
    }

    #[test]
    fn test_error_response_skips_data() {
        let body = serde_json::to_value(ApiResponse::error(ApiError::address_required(), 1.0)).unwrap();
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
        assert_eq!(body["error"]["code"], "ADDRESS_REQUIRED");
    }
}

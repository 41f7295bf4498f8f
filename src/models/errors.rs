//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so that logs from the scoring
//! engine, the transport and the API can be correlated.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - TRANSPORT_xxx: GraphQL transport errors
//! - RESPONSE_xxx: unexpected response shapes
//! - INPUT_xxx: caller-supplied input errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Whether the scoring engine must stop instead of degrading to defaults
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Transport Errors
    // ============================================
    /// Connection or request failure
    TransportFailed,
    /// Request exceeded the transport timeout
    TransportTimeout,
    /// Non-success HTTP status
    TransportHttpStatus,
    /// GraphQL response carried an `errors` array
    GraphqlErrors,

    // ============================================
    // Response Errors
    // ============================================
    /// Response body did not match the expected shape
    MalformedResponse,

    // ============================================
    // Input Errors
    // ============================================
    /// Address failed the syntax check
    InvalidAddress,
    /// No address supplied at all
    MissingAddress,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing API key
    MissingApiKey,
    /// Invalid configuration value
    InvalidConfig,

    // ============================================
    // Runtime Errors
    // ============================================
    /// A spawned fetch task panicked or was cancelled
    TaskFailed,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransportFailed => "TRANSPORT_FAILED",
            Self::TransportTimeout => "TRANSPORT_TIMEOUT",
            Self::TransportHttpStatus => "TRANSPORT_HTTP_STATUS",
            Self::GraphqlErrors => "TRANSPORT_GRAPHQL_ERRORS",

            Self::MalformedResponse => "RESPONSE_MALFORMED",

            Self::InvalidAddress => "INPUT_INVALID_ADDRESS",
            Self::MissingAddress => "INPUT_MISSING_ADDRESS",

            Self::MissingApiKey => "CFG_MISSING_API_KEY",
            Self::InvalidConfig => "CFG_INVALID_VALUE",

            Self::TaskFailed => "TASK_FAILED",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidAddress | Self::MissingAddress => 400,
            Self::TransportTimeout => 504,
            Self::TransportFailed | Self::TransportHttpStatus | Self::GraphqlErrors => 502,
            _ => 500,
        }
    }

    /// Fatal errors abort a scoring request; everything else degrades a single pillar
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::MissingAddress | Self::InvalidConfig
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Transport request failed
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportFailed, msg)
    }

    /// Transport timed out
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportTimeout, msg)
    }

    /// GraphQL-level errors in an otherwise successful response
    pub fn graphql(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::GraphqlErrors, msg)
    }

    /// Response shape did not match the schema
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedResponse, msg)
    }

    /// Invalid address
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    /// No address given
    pub fn missing_address() -> Self {
        Self::new(ErrorCode::MissingAddress, "Address is required")
    }

    /// Missing API key
    pub fn missing_api_key(key_name: &str) -> Self {
        Self::new(
            ErrorCode::MissingApiKey,
            format!("Missing API key: {}", key_name),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    /// Fetch task could not be joined
    pub fn task_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TaskFailed, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("Request timeout")
        } else if err.is_connect() {
            Self::transport("Connection failed")
        } else if err.is_decode() {
            Self::malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::new(ErrorCode::TransportHttpStatus, format!("HTTP error: {}", status))
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::MalformedResponse, "JSON parse error", err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            Self::task_failed("Fetch task panicked")
        } else {
            Self::task_failed("Fetch task cancelled")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::timeout("Connection timed out");
        assert_eq!(err.code, ErrorCode::TransportTimeout);
        assert_eq!(err.code_str(), "TRANSPORT_TIMEOUT");
        assert_eq!(err.to_string(), "[TRANSPORT_TIMEOUT] Connection timed out");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppError::missing_api_key("BITQUERY_API_KEY").is_fatal());
        assert!(AppError::missing_address().is_fatal());
        assert!(!AppError::transport("boom").is_fatal());
        assert!(!AppError::malformed("bad shape").is_fatal());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::InvalidAddress.http_status(), 400);
        assert_eq!(ErrorCode::MissingAddress.http_status(), 400);
        assert_eq!(ErrorCode::TransportTimeout.http_status(), 504);
        assert_eq!(ErrorCode::MissingApiKey.http_status(), 500);
    }

    #[tokio::test]
    async fn test_panicked_task_maps_to_task_failed() {
        let err = tokio::spawn(async { panic!("fetch blew up") }).await.unwrap_err();
        let err = AppError::from(err);
        assert_eq!(err.code, ErrorCode::TaskFailed);
        assert_eq!(err.message, "Fetch task panicked");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::MalformedResponse);
        assert!(std::error::Error::source(&err).is_some());
    }
}

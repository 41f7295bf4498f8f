//! Configuration module for the DeFi score engine
//!
//! Uses constants from utils/constants.rs for every default.
//! The API key is NEVER logged.

use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    BITQUERY_NETWORK, BITQUERY_V1_ENDPOINT, BITQUERY_V2_ENDPOINT, DEFAULT_API_HOST,
    DEFAULT_API_PORT, DEFAULT_LOOKBACK_YEARS, DEFAULT_MIN_USD_BALANCE,
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_LOOKBACK_YEARS,
};

/// Settings the metric fetchers need for building queries
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Trailing window for activity queries
    pub lookback_years: u32,
    /// Minimum USD value for a fungible holding
    pub min_usd_balance: f64,
    /// Network name for v2 queries
    pub network: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            min_usd_balance: DEFAULT_MIN_USD_BALANCE,
            network: BITQUERY_NETWORK.to_string(),
        }
    }
}

/// Configuration for the scoring engine and its Bitquery transport
#[derive(Clone)]
pub struct ScorerConfig {
    /// Bitquery API key (bearer token)
    pub api_key: String,
    /// v1 endpoint (Ethereum dataset)
    pub v1_endpoint: String,
    /// v2 endpoint (EVM dataset)
    pub v2_endpoint: String,
    /// Per-request timeout, enforced by the transport
    pub request_timeout: Duration,
    /// Query settings
    pub fetch: FetchSettings,
}

impl std::fmt::Debug for ScorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerConfig")
            .field("api_key", &"***HIDDEN***")
            .field("v1_endpoint", &self.v1_endpoint)
            .field("v2_endpoint", &self.v2_endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("fetch", &self.fetch)
            .finish()
    }
}

impl ScorerConfig {
    /// Config with the given key and default everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            v1_endpoint: BITQUERY_V1_ENDPOINT.to_string(),
            v2_endpoint: BITQUERY_V2_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fetch: FetchSettings::default(),
        }
    }

    /// Load from process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("BITQUERY_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != "YOUR_API_KEY")
            .ok_or_else(|| AppError::missing_api_key("BITQUERY_API_KEY"))?;
        info!("🔑 BITQUERY_API_KEY configured (key hidden for security)");

        let mut config = Self::with_api_key(api_key);

        if let Some(url) = non_empty(lookup("BITQUERY_V1_ENDPOINT")) {
            config.v1_endpoint = url;
        }
        if let Some(url) = non_empty(lookup("BITQUERY_V2_ENDPOINT")) {
            config.v2_endpoint = url;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "BITQUERY_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::invalid_config("BITQUERY_TIMEOUT_SECS must be > 0"));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(years) = parse_var::<u32>(&lookup, "DEFI_LOOKBACK_YEARS")? {
            if years == 0 || years > MAX_LOOKBACK_YEARS {
                return Err(AppError::invalid_config(format!(
                    "DEFI_LOOKBACK_YEARS must be between 1 and {}",
                    MAX_LOOKBACK_YEARS
                )));
            }
            config.fetch.lookback_years = years;
        }
        if let Some(min_usd) = parse_var::<f64>(&lookup, "DEFI_MIN_USD_BALANCE")? {
            if !min_usd.is_finite() || min_usd < 0.0 {
                return Err(AppError::invalid_config(
                    "DEFI_MIN_USD_BALANCE must be a non-negative number",
                ));
            }
            config.fetch.min_usd_balance = min_usd;
        }

        Ok(config)
    }
}

/// HTTP server bind settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiServerConfig {
    pub host: String,
    pub port: u16,
}

impl ApiServerConfig {
    /// `PORT` (hosting platforms) wins over `DEFI_API_PORT`
    pub fn from_env() -> AppResult<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let host = non_empty(lookup("DEFI_API_HOST")).unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let port = match parse_var::<u16>(&lookup, "PORT")? {
            Some(port) => port,
            None => parse_var::<u16>(&lookup, "DEFI_API_PORT")?.unwrap_or(DEFAULT_API_PORT),
        };
        Ok(Self { host, port })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<Option<T>> {
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::invalid_config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

//! Bitquery GraphQL Client
//!
//! Single-attempt transport for the scoring engine:
//! 1. Bearer authentication from `BITQUERY_API_KEY`
//! 2. Separate v1 / v2 endpoints, chosen per query
//! 3. Per-request timeout set on the HTTP client
//! 4. Gzip compression for large balance responses
//! 5. GraphQL `errors` arrays surfaced as errors, never as partial data
//!
//! There is no retry or backoff here: a failed call degrades one pillar.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use super::graphql::{Endpoint, GraphQlQuery, QueryExecutor};
use crate::models::config::ScorerConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::USER_AGENT as USER_AGENT_CONST;

/// Request body
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// Response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Bitquery transport
#[derive(Clone)]
pub struct BitqueryClient {
    client: reqwest::Client,
    v1_endpoint: String,
    v2_endpoint: String,
}

impl BitqueryClient {
    /// Build a client from config; the key goes into the default headers only
    pub fn new(config: &ScorerConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::missing_api_key("BITQUERY_API_KEY"));
        }

        let client = Self::build_client(config)?;

        Ok(Self {
            client,
            v1_endpoint: config.v1_endpoint.clone(),
            v2_endpoint: config.v2_endpoint.clone(),
        })
    }

    fn build_client(config: &ScorerConfig) -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key.trim()))
            .map_err(|_| AppError::invalid_config("BITQUERY_API_KEY contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .gzip(true)
            .build()
            .map_err(|e| AppError::invalid_config(format!("Failed to build HTTP client: {}", e)))
    }

    fn url_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::V1 => &self.v1_endpoint,
            Endpoint::V2 => &self.v2_endpoint,
        }
    }

    /// Turn a response envelope into its `data` object
    fn unwrap_envelope(query: &GraphQlQuery, envelope: GraphQlResponse) -> AppResult<Value> {
        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::graphql(format!(
                "{}: GraphQL errors: {}",
                query.name,
                messages.join("; ")
            )));
        }
        Ok(envelope.data.unwrap_or_else(|| Value::Object(Default::default())))
    }
}

#[async_trait]
impl QueryExecutor for BitqueryClient {
    async fn execute(&self, query: &GraphQlQuery, variables: Value) -> AppResult<Value> {
        let url = self.url_for(query.endpoint);
        let body = GraphQlRequest {
            query: query.document,
            variables: &variables,
        };

        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(AppError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::new(
                ErrorCode::TransportHttpStatus,
                format!("{}: HTTP error: {}", query.name, status),
            ));
        }

        let envelope: GraphQlResponse = response.json().await.map_err(|e| {
            AppError::malformed(format!("{}: failed to parse response: {}", query.name, e))
        })?;

        debug!(
            query = query.name,
            elapsed_ms = %start.elapsed().as_millis(),
            "Bitquery response received"
        );

        Self::unwrap_envelope(query, envelope)
    }
}

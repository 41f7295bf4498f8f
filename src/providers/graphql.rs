//! GraphQL query-execution seam.
//!
//! The scoring core never talks HTTP. It hands a [`GraphQlQuery`] plus
//! variables to a [`QueryExecutor`] and parses whatever `data` object comes
//! back. The production executor is [`super::bitquery::BitqueryClient`];
//! tests plug in scripted executors.

use async_trait::async_trait;
use serde_json::Value;

use crate::models::errors::AppResult;

/// Which Bitquery API generation a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Ethereum dataset (`ethereum { ... }`)
    V1,
    /// EVM streaming dataset (`EVM { ... }`)
    V2,
}

/// A named, static GraphQL document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlQuery {
    /// Stable name used in logs and by test executors
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub document: &'static str,
}

/// Executes one GraphQL query and returns its `data` object.
///
/// Implementations make a single attempt and own their timeout.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &GraphQlQuery, variables: Value) -> AppResult<Value>;
}

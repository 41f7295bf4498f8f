//! Shared fixtures: an in-memory executor scripted per query name

#![allow(dead_code)]

use async_trait::async_trait;
use defi_score::{AppError, AppResult, GraphQlQuery, QueryExecutor};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub const WALLET: &str = "0x00000000219ab540356cBB839Cbe05303d7705Fa";

/// Answers each query from a script. Unscripted queries return an empty
/// `data` object; names marked failing return a transport error and names
/// marked panicking panic inside the fetch task.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<&'static str, Value>,
    failing: HashSet<&'static str>,
    panicking: HashSet<&'static str>,
    delays: HashMap<&'static str, Duration>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 156 tx, 5 activity types, 6 protocols, 7 assets
    pub fn rich_wallet() -> Self {
        Self::new()
            .with_response(
                "transaction_count",
                json!({"ethereum": {"transactions": [{"count": 156}]}}),
            )
            .with_response(
                "protocol_calls",
                json!({"ethereum": {"smartContractCalls": [
                    // Lido (staking)
                    {"smartContract": {"address": {"address": "0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84"}}, "txc": 12},
                    // Aave v3 (lending)
                    {"smartContract": {"address": {"address": "0x87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2"}}, "txc": 3},
                    // not in the registry
                    {"smartContract": {"address": {"address": "0x9999999999999999999999999999999999999999"}}, "txc": 1}
                ]}}),
            )
            .with_response(
                "dex_venues",
                json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "2", "dex_count_nonfungible": "1"}]}}),
            )
            .with_response("governance_calls", json!({"EVM": {"Calls": [{"count": "4"}]}}))
            .with_response(
                "fungible_balances",
                json!({"EVM": {"BalanceUpdates": [
                    {"Currency": {"SmartContract": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"}, "Balance_usd": "2500.12"},
                    {"Currency": {"SmartContract": "0xdac17f958d2ee523a2206206994597c13d831ec7"}, "Balance_usd": "180"},
                    {"Currency": {"SmartContract": "0x6b175474e89094c44da98b954eedeac495271d0f"}, "Balance_usd": 55.5},
                    {"Currency": {"SmartContract": "0x2260fac5e5542a773aa44fbcfedf7c193bc2c599"}, "Balance_usd": "10"},
                    {"Currency": {"SmartContract": "0x514910771af9ca656af840dff83e8264ecf986ca"}, "Balance_usd": null}
                ]}}),
            )
            .with_response(
                "nft_balances",
                json!({"EVM": {"BalanceUpdates": [{"balance": "2"}, {"balance": "1"}]}}),
            )
    }

    pub fn with_response(mut self, name: &'static str, data: Value) -> Self {
        self.responses.insert(name, data);
        self
    }

    pub fn failing(mut self, name: &'static str) -> Self {
        self.failing.insert(name);
        self
    }

    pub fn panicking(mut self, name: &'static str) -> Self {
        self.panicking.insert(name);
        self
    }

    pub fn with_delay(mut self, name: &'static str, delay: Duration) -> Self {
        self.delays.insert(name, delay);
        self
    }

    /// (query name, variables) in call order
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, query: &GraphQlQuery, variables: Value) -> AppResult<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((query.name.to_string(), variables));
        }
        if let Some(delay) = self.delays.get(query.name) {
            tokio::time::sleep(*delay).await;
        }
        if self.panicking.contains(query.name) {
            panic!("scripted panic in {}", query.name);
        }
        if self.failing.contains(query.name) {
            return Err(AppError::transport(format!("{} unavailable", query.name)));
        }
        Ok(self.responses.get(query.name).cloned().unwrap_or_else(|| json!({})))
    }
}

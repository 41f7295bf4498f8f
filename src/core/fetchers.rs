//! Metric Fetchers
//!
//! One async fetcher per raw measurement. Each builds its query variables,
//! runs the query through a [`QueryExecutor`] and parses the `data` object
//! through explicit optional-field schemas. Individual records that do not
//! fit the schema are skipped; missing aggregates read as zero.

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::registry;
use crate::models::config::FetchSettings;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ActivityType, AssetHoldings, ProtocolActivity, TradeActivity, WalletAddress};
use crate::providers::graphql::QueryExecutor;
use crate::providers::queries::{
    DEX_VENUES, FUNGIBLE_BALANCES, GOVERNANCE_CALLS, NFT_BALANCES, PROTOCOL_CALLS,
    TRANSACTION_COUNT,
};
use crate::utils::constants::{GOVERNANCE_SIGNATURE_MARKER, MAX_DEX_VENUES};
use crate::utils::lenient::{as_f64, as_u64, decode_records, u64_or_zero};

// ============================================
// Response schemas
// ============================================

/// v1 `data` object
#[derive(Debug, Default, Deserialize)]
struct V1Data {
    #[serde(default)]
    ethereum: Option<EthereumDataset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EthereumDataset {
    #[serde(default)]
    transactions: Option<Vec<Value>>,
    #[serde(default)]
    smart_contract_calls: Option<Vec<Value>>,
}

/// v2 `data` object
#[derive(Debug, Default, Deserialize)]
struct V2Data {
    #[serde(default, rename = "EVM")]
    evm: Option<EvmDataset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EvmDataset {
    #[serde(default, rename = "DEXTradeByTokens")]
    dex_trade_by_tokens: Option<Vec<Value>>,
    #[serde(default)]
    calls: Option<Vec<Value>>,
    #[serde(default)]
    balance_updates: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ContractCall {
    #[serde(rename = "smartContract")]
    smart_contract: ContractRef,
}

#[derive(Debug, Deserialize)]
struct ContractRef {
    address: AddressField,
}

#[derive(Debug, Deserialize)]
struct AddressField {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FungibleBalance {
    #[serde(default, rename = "Currency")]
    currency: Option<CurrencyRef>,
    #[serde(default, rename = "Balance_usd")]
    balance_usd: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CurrencyRef {
    #[serde(default, rename = "SmartContract")]
    smart_contract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NftBalance {
    #[serde(default)]
    balance: Option<Value>,
}

fn v1_dataset(data: Value) -> AppResult<EthereumDataset> {
    let parsed: V1Data = serde_json::from_value(data)?;
    Ok(parsed.ethereum.unwrap_or_default())
}

fn v2_dataset(data: Value) -> AppResult<EvmDataset> {
    let parsed: V2Data = serde_json::from_value(data)?;
    Ok(parsed.evm.unwrap_or_default())
}

/// First record's `field`, read leniently
fn first_count(records: Option<Vec<Value>>, field: &str) -> u64 {
    records
        .and_then(|rows| rows.into_iter().next())
        .map(|row| u64_or_zero(row.get(field)))
        .unwrap_or(0)
}

// ============================================
// Window
// ============================================

/// Start of the trailing window: `years` x 365 days before `now`, at midnight UTC
pub fn window_start(now: DateTime<Utc>, years: u32) -> AppResult<String> {
    let start = Duration::try_days(365 * i64::from(years))
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| {
            AppError::invalid_config(format!("Lookback of {} years is out of range", years))
        })?;
    Ok(start.format("%Y-%m-%dT00:00:00Z").to_string())
}

// ============================================
// Parsers
// ============================================

pub(crate) fn parse_transaction_count(data: Value) -> AppResult<u64> {
    Ok(first_count(v1_dataset(data)?.transactions, "count"))
}

pub(crate) fn parse_protocol_calls(data: Value) -> AppResult<ProtocolActivity> {
    let calls: Vec<ContractCall> = decode_records(
        v1_dataset(data)?.smart_contract_calls.unwrap_or_default(),
        "smart contract call",
    );

    let mut activity = ProtocolActivity::default();
    for call in calls {
        let Some(address) = call.smart_contract.address.address else {
            continue;
        };
        let address = WalletAddress::normalize(&address);
        if address.is_empty() {
            continue;
        }
        match registry::category_of(&address) {
            Some(category) => {
                activity.activity_types.insert(ActivityType::Protocol(category));
            }
            None => debug!("Uncategorized protocol interaction: {}", address),
        }
        activity.protocols.insert(address);
    }
    Ok(activity)
}

/// (fungible venues, NFT venues)
pub(crate) fn parse_dex_venues(data: Value) -> AppResult<(u64, u64)> {
    let row = v2_dataset(data)?
        .dex_trade_by_tokens
        .and_then(|rows| rows.into_iter().next());
    let (fungible, nft) = match row {
        Some(row) => (
            u64_or_zero(row.get("dex_count_fungible")),
            u64_or_zero(row.get("dex_count_nonfungible")),
        ),
        None => (0, 0),
    };

    if fungible > MAX_DEX_VENUES || nft > MAX_DEX_VENUES {
        return Err(AppError::malformed(format!(
            "Implausible DEX venue count ({} fungible, {} NFT)",
            fungible, nft
        )));
    }
    Ok((fungible, nft))
}

pub(crate) fn parse_governance(data: Value) -> AppResult<bool> {
    Ok(first_count(v2_dataset(data)?.calls, "count") > 0)
}

/// Distinct contracts (lowercase) whose USD value reaches `min_usd`
pub(crate) fn parse_fungible_balances(data: Value, min_usd: f64) -> AppResult<BTreeSet<String>> {
    let balances: Vec<FungibleBalance> = decode_records(
        v2_dataset(data)?.balance_updates.unwrap_or_default(),
        "fungible balance",
    );

    Ok(balances
        .into_iter()
        .filter(|b| {
            b.balance_usd
                .as_ref()
                .and_then(as_f64)
                .map_or(false, |usd| usd >= min_usd)
        })
        .filter_map(|b| b.currency.and_then(|c| c.smart_contract))
        .map(|contract| WalletAddress::normalize(&contract))
        .filter(|contract| !contract.is_empty())
        .collect())
}

/// Sum of whole NFT units across collections
pub(crate) fn parse_nft_balances(data: Value) -> AppResult<u64> {
    let balances: Vec<NftBalance> = decode_records(
        v2_dataset(data)?.balance_updates.unwrap_or_default(),
        "NFT balance",
    );

    Ok(balances
        .iter()
        .filter_map(|b| b.balance.as_ref().and_then(as_u64))
        .fold(0u64, |total, units| total.saturating_add(units)))
}

/// Keep a sub-query's result, or log and fall back to its default
fn part_or_default<T: Default>(result: AppResult<T>, part: &str, address: &str) -> T {
    result.unwrap_or_else(|e| {
        warn!("⚠️ {} sub-query failed for {}: {}", part, address, e);
        T::default()
    })
}

/// Both halves of a two-part fetcher failed
fn both_failed(first: AppError, second: AppError) -> AppError {
    AppError::new(first.code, format!("{}; {}", first.message, second.message))
}

// ============================================
// Fetchers
// ============================================

/// P1: transactions sent within the window
pub async fn fetch_transaction_count(
    executor: &dyn QueryExecutor,
    address: &str,
    settings: &FetchSettings,
) -> AppResult<u64> {
    let since = window_start(Utc::now(), settings.lookback_years)?;
    let variables = json!({
        "address": address,
        "since": since,
    });
    let data = executor.execute(&TRANSACTION_COUNT, variables).await?;
    let count = parse_transaction_count(data)?;
    info!("📊 {} sent {} transaction(s) in window", address, count);
    Ok(count)
}

/// P2/P3: registry protocols called within the window
pub async fn fetch_protocol_activity(
    executor: &dyn QueryExecutor,
    address: &str,
    settings: &FetchSettings,
) -> AppResult<ProtocolActivity> {
    let since = window_start(Utc::now(), settings.lookback_years)?;
    let variables = json!({
        "address": address,
        "protocols": registry::all_addresses(),
        "since": since,
    });
    let data = executor.execute(&PROTOCOL_CALLS, variables).await?;
    let activity = parse_protocol_calls(data)?;
    info!(
        "🏦 {} used {} protocol(s) across {} categor(ies)",
        address,
        activity.protocols.len(),
        activity.activity_types.len()
    );
    Ok(activity)
}

/// DEX venues and governance votes; either half may fail on its own
pub async fn fetch_trade_activity(
    executor: &dyn QueryExecutor,
    address: &str,
    settings: &FetchSettings,
) -> AppResult<TradeActivity> {
    let dex_vars = json!({
        "network": settings.network,
        "trader": address,
        "yearsAgo": settings.lookback_years,
    });
    let gov_vars = json!({
        "network": settings.network,
        "address": address,
        "marker": GOVERNANCE_SIGNATURE_MARKER,
        "yearsAgo": settings.lookback_years,
    });

    let (dex, gov) = join(
        executor.execute(&DEX_VENUES, dex_vars),
        executor.execute(&GOVERNANCE_CALLS, gov_vars),
    )
    .await;
    let dex = dex.and_then(parse_dex_venues);
    let gov = gov.and_then(parse_governance);

    let (dex, gov) = match (dex, gov) {
        (Err(d), Err(g)) => return Err(both_failed(d, g)),
        (dex, gov) => (
            part_or_default(dex, "DEX venues", address),
            part_or_default(gov, "Governance", address),
        ),
    };

    let trades = TradeActivity {
        fungible_venues: dex.0,
        nft_venues: dex.1,
        governance: gov,
    };
    info!(
        "🔄 {} traded on {} fungible / {} NFT venue(s), governance: {}",
        address, trades.fungible_venues, trades.nft_venues, trades.governance
    );
    Ok(trades)
}

/// P4: fungible contracts above the USD threshold plus NFT units
pub async fn fetch_asset_holdings(
    executor: &dyn QueryExecutor,
    address: &str,
    settings: &FetchSettings,
) -> AppResult<AssetHoldings> {
    let fungible_vars = json!({
        "network": settings.network,
        "address": address,
        "minUsd": settings.min_usd_balance.to_string(),
    });
    let nft_vars = json!({
        "network": settings.network,
        "address": address,
    });

    let (fungible, nft) = join(
        executor.execute(&FUNGIBLE_BALANCES, fungible_vars),
        executor.execute(&NFT_BALANCES, nft_vars),
    )
    .await;
    let fungible = fungible.and_then(|data| parse_fungible_balances(data, settings.min_usd_balance));
    let nft = nft.and_then(parse_nft_balances);

    let (fungible, nft_units) = match (fungible, nft) {
        (Err(f), Err(n)) => return Err(both_failed(f, n)),
        (fungible, nft) => (
            part_or_default(fungible, "Fungible balances", address),
            part_or_default(nft, "NFT balances", address),
        ),
    };

    let holdings = AssetHoldings {
        fungible_contracts: fungible.len() as u64,
        nft_units,
    };
    info!(
        "💰 {} holds {} token(s) >= ${} and {} NFT(s)",
        address, holdings.fungible_contracts, settings.min_usd_balance, holdings.nft_units
    );
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use crate::models::types::ProtocolCategory;
    use crate::providers::graphql::GraphQlQuery;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;

    /// Returns canned data per query name; unknown names fail
    struct Canned(HashMap<&'static str, Value>);

    #[async_trait]
    impl QueryExecutor for Canned {
        async fn execute(&self, query: &GraphQlQuery, _variables: Value) -> AppResult<Value> {
            self.0
                .get(query.name)
                .cloned()
                .ok_or_else(|| AppError::transport(format!("{} unavailable", query.name)))
        }
    }

    const ADDR: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

    #[test]
    fn test_window_start_format() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 10).unwrap();
        assert_eq!(window_start(now, 3).unwrap(), "2021-06-16T00:00:00Z");
        assert_eq!(window_start(now, 1).unwrap(), "2023-06-16T00:00:00Z");
    }

    #[test]
    fn test_window_start_out_of_range_is_error() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 10).unwrap();
        let err = window_start(now, u32::MAX).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_transaction_count_shapes() {
        let data = json!({"ethereum": {"transactions": [{"count": 156}]}});
        assert_eq!(parse_transaction_count(data).unwrap(), 156);
        let data = json!({"ethereum": {"transactions": [{"count": "42"}]}});
        assert_eq!(parse_transaction_count(data).unwrap(), 42);
        let data = json!({"ethereum": {"transactions": [{"count": null}]}});
        assert_eq!(parse_transaction_count(data).unwrap(), 0);
        assert_eq!(parse_transaction_count(json!({"ethereum": {"transactions": []}})).unwrap(), 0);
        assert_eq!(parse_transaction_count(json!({"ethereum": null})).unwrap(), 0);
        assert_eq!(parse_transaction_count(json!({})).unwrap(), 0);
    }

    #[test]
    fn test_transaction_count_wrong_shape_is_malformed() {
        let err = parse_transaction_count(json!({"ethereum": {"transactions": "nope"}})).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedResponse);
    }

    #[test]
    fn test_protocol_calls_classification() {
        let data = json!({"ethereum": {"smartContractCalls": [
            {"smartContract": {"address": {"address": "0xAE7AB96520DE3A18E5E111B5EAAB095312D7FE84"}}, "txc": 4},
            {"smartContract": {"address": {"address": "0x87870bca3f3fd6335c3f4ce8392d69350b4fa4e2"}}, "txc": 1},
            {"smartContract": {"address": {"address": "0x1234567890123456789012345678901234567890"}}, "txc": 9},
            {"smartContract": {"address": {"address": ""}}, "txc": 2},
            {"smartContract": null, "txc": 1},
            {"smartContract": {"address": {"address": "0x87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2"}}, "txc": 3}
        ]}});

        let activity = parse_protocol_calls(data).unwrap();
        assert_eq!(activity.protocols.len(), 3);
        assert!(activity.protocols.contains("0xae7ab96520de3a18e5e111b5eaab095312d7fe84"));
        assert!(activity.protocols.contains("0x1234567890123456789012345678901234567890"));
        assert_eq!(activity.activity_types.len(), 2);
        assert!(activity
            .activity_types
            .contains(&ActivityType::Protocol(ProtocolCategory::Staking)));
        assert!(activity
            .activity_types
            .contains(&ActivityType::Protocol(ProtocolCategory::Lending)));
    }

    #[test]
    fn test_dex_venue_counts() {
        let data = json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "3", "dex_count_nonfungible": 1}]}});
        assert_eq!(parse_dex_venues(data).unwrap(), (3, 1));
        let data = json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "x"}]}});
        assert_eq!(parse_dex_venues(data).unwrap(), (0, 0));
        assert_eq!(parse_dex_venues(json!({"EVM": {"DEXTradeByTokens": []}})).unwrap(), (0, 0));
    }

    #[test]
    fn test_dex_venue_count_above_cap_is_malformed() {
        let data = json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "1e12", "dex_count_nonfungible": "1"}]}});
        let err = parse_dex_venues(data).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedResponse);

        let data = json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": 2, "dex_count_nonfungible": u64::MAX}]}});
        assert!(parse_dex_venues(data).is_err());

        let data = json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": MAX_DEX_VENUES, "dex_count_nonfungible": 0}]}});
        assert_eq!(parse_dex_venues(data).unwrap(), (MAX_DEX_VENUES, 0));
    }

    #[tokio::test]
    async fn test_trade_fetcher_drops_implausible_venues_keeps_governance() {
        let executor = Canned(HashMap::from([
            (
                "dex_venues",
                json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "1e12", "dex_count_nonfungible": "1"}]}}),
            ),
            ("governance_calls", json!({"EVM": {"Calls": [{"count": "1"}]}})),
        ]));

        let trades = fetch_trade_activity(&executor, ADDR, &FetchSettings::default())
            .await
            .unwrap();
        assert_eq!(trades.venue_count(), 0);
        assert!(trades.governance);
    }

    #[test]
    fn test_governance_flag() {
        assert!(parse_governance(json!({"EVM": {"Calls": [{"count": "2"}]}})).unwrap());
        assert!(!parse_governance(json!({"EVM": {"Calls": [{"count": "0"}]}})).unwrap());
        assert!(!parse_governance(json!({"EVM": {"Calls": []}})).unwrap());
    }

    #[test]
    fn test_fungible_threshold_and_dedup() {
        let data = json!({"EVM": {"BalanceUpdates": [
            {"Currency": {"SmartContract": "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}, "Balance_usd": "1500.5"},
            {"Currency": {"SmartContract": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}, "Balance_usd": 20},
            {"Currency": {"SmartContract": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"}, "Balance_usd": "10"},
            {"Currency": {"SmartContract": "0xcccccccccccccccccccccccccccccccccccccccc"}, "Balance_usd": "9.99"},
            {"Currency": {"SmartContract": "0xdddddddddddddddddddddddddddddddddddddddd"}, "Balance_usd": null},
            {"Currency": {"SmartContract": ""}, "Balance_usd": "50"},
            {"Balance_usd": "50"}
        ]}});

        let contracts = parse_fungible_balances(data, 10.0).unwrap();
        assert_eq!(contracts.len(), 2);
        assert!(contracts.contains("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
        assert!(contracts.contains("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"));
    }

    #[test]
    fn test_nft_units_sum() {
        let data = json!({"EVM": {"BalanceUpdates": [
            {"balance": "3"},
            {"balance": "2.7"},
            {"balance": 4},
            {"balance": "garbage"},
            {"balance": "-5"},
            {}
        ]}});
        assert_eq!(parse_nft_balances(data).unwrap(), 9);
    }

    #[tokio::test]
    async fn test_trade_fetcher_keeps_working_half() {
        let executor = Canned(HashMap::from([(
            "dex_venues",
            json!({"EVM": {"DEXTradeByTokens": [{"dex_count_fungible": "2", "dex_count_nonfungible": "0"}]}}),
        )]));

        let trades = fetch_trade_activity(&executor, ADDR, &FetchSettings::default())
            .await
            .unwrap();
        assert_eq!(trades.fungible_venues, 2);
        assert_eq!(trades.nft_venues, 0);
        assert!(!trades.governance);
    }

    #[tokio::test]
    async fn test_trade_fetcher_fails_when_both_halves_fail() {
        let executor = Canned(HashMap::new());
        let err = fetch_trade_activity(&executor, ADDR, &FetchSettings::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TransportFailed);
        assert!(err.message.contains("dex_venues"));
        assert!(err.message.contains("governance_calls"));
    }

    #[tokio::test]
    async fn test_asset_fetcher_keeps_working_half() {
        let executor = Canned(HashMap::from([(
            "nft_balances",
            json!({"EVM": {"BalanceUpdates": [{"balance": "5"}]}}),
        )]));

        let holdings = fetch_asset_holdings(&executor, ADDR, &FetchSettings::default())
            .await
            .unwrap();
        assert_eq!(holdings.fungible_contracts, 0);
        assert_eq!(holdings.nft_units, 5);
    }

    #[tokio::test]
    async fn test_asset_fetcher_fails_when_both_halves_fail() {
        let executor = Canned(HashMap::new());
        assert!(fetch_asset_holdings(&executor, ADDR, &FetchSettings::default())
            .await
            .is_err());
    }
}

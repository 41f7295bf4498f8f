//! Core types for the DeFi Strategy Score

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::errors::{AppError, AppResult};

// ============================================
// Address
// ============================================

/// Account address in canonical form (lowercase, `0x` prefixed, 42 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Total length including the `0x` prefix
    pub const LEN: usize = 42;

    /// Validate syntax and normalize to lowercase
    pub fn parse(input: &str) -> AppResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::missing_address());
        }
        if !trimmed.starts_with("0x") || trimmed.len() != Self::LEN {
            return Err(AppError::invalid_address(format!(
                "Invalid Ethereum address format: {}",
                trimmed
            )));
        }
        if hex::decode(&trimmed[2..]).is_err() {
            return Err(AppError::invalid_address(format!(
                "Address is not valid hex: {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Lowercase form of any address-like string, without validation
    #[inline]
    pub fn normalize(address: &str) -> String {
        address.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================
// Protocol categories & activity labels
// ============================================

/// Category of a known protocol contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolCategory {
    Lending,
    Staking,
    Liquidity,
    Bridging,
    YieldFarming,
}

impl ProtocolCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lending => "Lending",
            Self::Staking => "Staking",
            Self::Liquidity => "Liquidity",
            Self::Bridging => "Bridging",
            Self::YieldFarming => "Yield Farming",
        }
    }
}

/// Label counted by the activity-diversity pillar (P2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityType {
    Protocol(ProtocolCategory),
    Erc20Trading,
    NftTrading,
    Governance,
}

impl ActivityType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Protocol(category) => category.label(),
            Self::Erc20Trading => "ERC-20 Trading",
            Self::NftTrading => "NFT Trading",
            Self::Governance => "Governance",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================
// Raw measurements (one per fetcher)
// ============================================

/// Output of the activity & protocol fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolActivity {
    /// Categories of registry protocols the wallet called
    pub activity_types: BTreeSet<ActivityType>,
    /// Every contract address matched by the query (lowercase)
    pub protocols: BTreeSet<String>,
}

/// Output of the trade & governance fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeActivity {
    /// Distinct venues used for fungible swaps
    pub fungible_venues: u64,
    /// Distinct venues used for NFT trades
    pub nft_venues: u64,
    /// Any call whose signature mentions "vote"
    pub governance: bool,
}

impl TradeActivity {
    /// Venues counted towards P3, one per distinct DEX used
    pub fn venue_count(&self) -> u64 {
        self.fungible_venues.saturating_add(self.nft_venues)
    }

    /// Activity labels contributed by trading and voting
    pub fn activity_types(&self) -> BTreeSet<ActivityType> {
        let mut types = BTreeSet::new();
        if self.fungible_venues > 0 {
            types.insert(ActivityType::Erc20Trading);
        }
        if self.nft_venues > 0 {
            types.insert(ActivityType::NftTrading);
        }
        if self.governance {
            types.insert(ActivityType::Governance);
        }
        types
    }
}

/// Output of the asset holding fetcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetHoldings {
    /// Distinct fungible contracts at or above the USD threshold
    pub fungible_contracts: u64,
    /// Sum of individual NFT units held
    pub nft_units: u64,
}

impl AssetHoldings {
    pub fn total(&self) -> u64 {
        self.fungible_contracts.saturating_add(self.nft_units)
    }
}

/// The four pillar inputs after merging all fetcher outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PillarInputs {
    pub tx_count: u64,
    pub activity_types: BTreeSet<ActivityType>,
    /// Contracts called plus DEX venues traded on
    pub unique_protocols: u64,
    pub unique_assets: u64,
}

// ============================================
// Score report
// ============================================

/// P1: transaction volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPillar {
    pub tx_count: u64,
    pub score: f64,
}

/// P2: activity diversity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPillar {
    pub unique_types: u64,
    pub score: f64,
}

/// P3: protocol diversity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPillar {
    pub unique_protocols: u64,
    pub score: f64,
}

/// P4: asset diversity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPillar {
    pub unique_assets: u64,
    pub score: f64,
}

/// Complete result of one scoring request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Address as supplied by the caller
    pub address: String,
    pub p1: TransactionPillar,
    pub p2: ActivityPillar,
    pub p3: ProtocolPillar,
    pub p4: AssetPillar,
    pub average_pillar_score: f64,
    pub final_score: f64,
    pub final_score_rounded: i64,
}

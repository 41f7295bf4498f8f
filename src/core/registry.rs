//! Protocol Registry
//!
//! Lookup table from known contract address to protocol category.
//! Built once from `PROTOCOL_ADDRESSES`; keys are stored lowercase so
//! lookups ignore the caller's casing.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::types::{ProtocolCategory, WalletAddress};
use crate::utils::constants::PROTOCOL_ADDRESSES;

lazy_static! {
    static ref REGISTRY: HashMap<String, ProtocolCategory> = {
        let mut map = HashMap::new();
        for (category, addresses) in PROTOCOL_ADDRESSES {
            for address in *addresses {
                map.insert(WalletAddress::normalize(address), *category);
            }
        }
        map
    };
}

/// Category of a known protocol contract, `None` for anything else
pub fn category_of(address: &str) -> Option<ProtocolCategory> {
    REGISTRY.get(&WalletAddress::normalize(address)).copied()
}

/// Every registered address in table order (used as the query allow-list)
pub fn all_addresses() -> Vec<&'static str> {
    PROTOCOL_ADDRESSES
        .iter()
        .flat_map(|(_, addresses)| addresses.iter().copied())
        .collect()
}

/// Number of distinct registered contracts
pub fn len() -> usize {
    REGISTRY.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mixed = category_of("0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84");
        let lower = category_of("0xae7ab96520de3a18e5e111b5eaab095312d7fe84");
        let upper = category_of("0xAE7AB96520DE3A18E5E111B5EAAB095312D7FE84");
        assert_eq!(mixed, Some(ProtocolCategory::Staking));
        assert_eq!(mixed, lower);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_known_categories() {
        assert_eq!(
            category_of("0x87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2"),
            Some(ProtocolCategory::Lending)
        );
        assert_eq!(
            category_of("0xC36442b4a4522E871399CD717aBDD847Ab11FE88"),
            Some(ProtocolCategory::Liquidity)
        );
        assert_eq!(
            category_of("0x8731d54E9D02c286767d56ac03e8037C07e01e98"),
            Some(ProtocolCategory::Bridging)
        );
        assert_eq!(
            category_of("0xF403C135812408BFbE8713b5A23a04b3D48AAE31"),
            Some(ProtocolCategory::YieldFarming)
        );
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(category_of("0x0000000000000000000000000000000000000001"), None);
        assert_eq!(category_of(""), None);
    }

    #[test]
    fn test_allow_list_covers_registry() {
        let all = all_addresses();
        assert!(!all.is_empty());
        assert!(all.len() >= len());
        assert!(all.iter().all(|a| category_of(a).is_some()));
    }
}

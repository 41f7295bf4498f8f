//! Bitquery documents used by the metric fetchers

use super::graphql::{Endpoint, GraphQlQuery};

/// P1: transactions sent by the address since `$since`
pub const TRANSACTION_COUNT: GraphQlQuery = GraphQlQuery {
    name: "transaction_count",
    endpoint: Endpoint::V1,
    document: r#"
query TransactionCount($address: String, $since: ISO8601DateTime) {
  ethereum {
    transactions(txSender: {is: $address}, time: {since: $since}) {
      count
    }
  }
}
"#,
};

/// P2/P3: calls from the address into any allow-listed protocol contract
pub const PROTOCOL_CALLS: GraphQlQuery = GraphQlQuery {
    name: "protocol_calls",
    endpoint: Endpoint::V1,
    document: r#"
query ProtocolCalls($address: String, $protocols: [String!], $since: ISO8601DateTime) {
  ethereum(network: ethereum) {
    smartContractCalls(
      txFrom: {is: $address}
      smartContractAddress: {in: $protocols}
      time: {since: $since}
    ) {
      smartContract {
        address {
          address
        }
      }
      txc: count
    }
  }
}
"#,
};

/// Distinct DEX venues traded on, split by fungibility
pub const DEX_VENUES: GraphQlQuery = GraphQlQuery {
    name: "dex_venues",
    endpoint: Endpoint::V2,
    document: r#"
query DexVenues($network: evm_network!, $trader: String!, $yearsAgo: Int!) {
  EVM(network: $network) {
    DEXTradeByTokens(
      where: {
        TransactionStatus: {Success: true}
        Block: {Time: {since_relative: {years_ago: $yearsAgo}}}
        any: [{Trade: {Seller: {is: $trader}}}, {Trade: {Buyer: {is: $trader}}}]
      }
    ) {
      dex_count_fungible: count(
        distinct: Trade_Dex_ProtocolName
        if: {Trade: {Currency: {Fungible: true}}}
      )
      dex_count_nonfungible: count(
        distinct: Trade_Dex_ProtocolName
        if: {Trade: {Currency: {Fungible: false}}}
      )
    }
  }
}
"#,
};

/// Successful calls from the address whose signature name contains "vote"
pub const GOVERNANCE_CALLS: GraphQlQuery = GraphQlQuery {
    name: "governance_calls",
    endpoint: Endpoint::V2,
    document: r#"
query GovernanceCalls($network: evm_network!, $address: String, $marker: String, $yearsAgo: Int!) {
  EVM(network: $network, dataset: combined) {
    Calls(
      where: {
        Block: {Time: {since_relative: {years_ago: $yearsAgo}}}
        Call: {Signature: {Name: {includesCaseInsensitive: $marker}}}
        Transaction: {From: {is: $address}}
        TransactionStatus: {Success: true}
      }
    ) {
      count
    }
  }
}
"#,
};

/// Fungible balances with their USD value (only sums at or above `$minUsd`)
pub const FUNGIBLE_BALANCES: GraphQlQuery = GraphQlQuery {
    name: "fungible_balances",
    endpoint: Endpoint::V2,
    document: r#"
query FungibleBalances($network: evm_network!, $address: String, $minUsd: String) {
  EVM(network: $network, dataset: combined) {
    BalanceUpdates(
      orderBy: {descendingByField: "Balance_usd"}
      where: {BalanceUpdate: {Address: {is: $address}}, Currency: {Fungible: true}}
    ) {
      Currency {
        Name
        Symbol
        SmartContract
      }
      Balance: sum(of: BalanceUpdate_Amount, selectWhere: {gt: "0"})
      Balance_usd: sum(of: BalanceUpdate_AmountInUSD, selectWhere: {ge: $minUsd})
    }
  }
}
"#,
};

/// Non-fungible balances per collection
pub const NFT_BALANCES: GraphQlQuery = GraphQlQuery {
    name: "nft_balances",
    endpoint: Endpoint::V2,
    document: r#"
query NftBalances($network: evm_network!, $address: String) {
  EVM(network: $network, dataset: combined) {
    BalanceUpdates(
      where: {BalanceUpdate: {Address: {is: $address}}, Currency: {Fungible: false}}
      orderBy: {descendingByField: "balance"}
    ) {
      Currency {
        Name
        Symbol
        SmartContract
      }
      balance: sum(of: BalanceUpdate_Amount)
    }
  }
}
"#,
};

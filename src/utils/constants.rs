//! Constants Module - Single Source of Truth
//!
//! Endpoints, thresholds and the known-protocol address table live here.
//! No other module hardcodes these values.

use crate::models::types::ProtocolCategory;

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("DeFiScore/", env!("CARGO_PKG_VERSION"));

// ============================================
// BITQUERY TRANSPORT
// ============================================

/// Bitquery v1 endpoint (Ethereum dataset)
pub const BITQUERY_V1_ENDPOINT: &str = "https://graphql.bitquery.io";

/// Bitquery v2 endpoint (EVM streaming dataset)
pub const BITQUERY_V2_ENDPOINT: &str = "https://streaming.bitquery.io/graphql";

/// Default per-request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 200;

/// Network name passed to v2 queries
pub const BITQUERY_NETWORK: &str = "eth";

// ============================================
// SCORING WINDOW & THRESHOLDS
// ============================================

/// Trailing window for activity queries (years)
pub const DEFAULT_LOOKBACK_YEARS: u32 = 3;

/// Longest accepted window (years); Ethereum itself is younger than this
pub const MAX_LOOKBACK_YEARS: u32 = 50;

/// Venue counts above this are treated as a malformed aggregate
pub const MAX_DEX_VENUES: u64 = 10_000;

/// Minimum USD value for a fungible holding to count towards P4
pub const DEFAULT_MIN_USD_BALANCE: f64 = 10.0;

/// Substring that marks a governance call signature
pub const GOVERNANCE_SIGNATURE_MARKER: &str = "vote";

/// Fixed offset of the displayed score range
pub const FINAL_SCORE_FLOOR: f64 = 25.0;

/// Scale applied to the pillar average (maps 0-100 onto 25-100)
pub const FINAL_SCORE_SCALE: f64 = 0.75;

// ============================================
// API SERVER
// ============================================

/// Default bind host
pub const DEFAULT_API_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_API_PORT: u16 = 5001;

/// Number of recent results kept by the API
pub const RECENT_RESULTS_CAPACITY: usize = 5;

// ============================================
// SAMPLE WALLET
// ============================================

/// Demo wallet answered from a fixed report, without any API calls
pub const SAMPLE_WALLET_ADDRESS: &str = "0x6979B914f3A1d8C0fec2C1FD602f0e674cdf9862";

// ============================================
// KNOWN PROTOCOL ADDRESSES (Ethereum mainnet)
// ============================================

/// Known protocol contracts grouped by category
pub const PROTOCOL_ADDRESSES: &[(ProtocolCategory, &[&str])] = &[
    (
        ProtocolCategory::Lending,
        &[
            // Aave v3
            "0xd01607c3C5eCABa394D8be377a08590149325722",
            "0x87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2",
            // Aave v2
            "0xa0d9C1E9E48Ca30c8d8C3B5D69FF5dc1f6DFfC24",
            "0x7d2768dE32b0b80b7a3454c06BdAc94A69DDc7A9",
            // Compound v2
            "0xe65cdB6479BaC1e22340E4E755fAE7E509EcD06c",
            "0x6C8c6b02E7b2BE14d4fA6022Dfd6d75921D90E4E",
            "0x70e36f6BF80a52b3B46b3aF8e106CC0ed743E8e4",
            "0x5d3a536E4D6DbD6114cc1Ead35777bAB948E3643",
            "0x4Ddc2D193948926D02f9B1fE9e1daa0718270ED5",
            "0x7713DD9Ca933848F6819F38B8352D9A15EA73F67",
            "0xFAce851a4921ce59e912d19329929CE6da6EB0c7",
            "0x95b4eF2869eBD94BEb4eEE400a99824BF5DC325b",
            "0x158079Ee67Fce2f58472A96584A73C7Ab9AC95c1",
            "0xF5DCe57282A584D2746FaF1593d3121Fcac444dC",
            "0x4B0181102A0112A2ef11AbEE5563bb4a3176c9d7",
            "0x12392F67bdf24faE0AF363c24aC620a2f67DAd86",
            "0x35A18000230DA775CAc24873d00Ff85BccdeD550",
            "0x39AA39c021dfbaE8faC545936693aC917d5E7563",
            "0x041171993284df560249B57358F931D9eB7b925D",
            "0xf650C3d88D12dB855b8bf7D11Be6C55A4e07dCC9",
            "0xC11b1268C1A384e55C48c2391d8d480264A3A7F4",
            "0xccF4429DB6322D5C611ee964527D42E5d685DD6a",
            "0x80a2AE356fc9ef4305676f7a3E2Ed04e12C33946",
            "0xB3319f5D18Bc0D84dD1b4825Dcde5d5f7266d407",
            "0xc00e94Cb662C3520282E6f5717214004A7f26888",
            "0x3d9819210A31b4961b30EF54bE2aeD79B9c9Cd3B",
            "0xc0Da02939E1441F497fd74F78cE7Decb17B66529",
            "0x6d903f6003cca6255D85CcA4D3B5E5146dC33925",
            // Compound v3
            "0xc3d688B66703497DAA19211EEdff47f25384cdc3",
            "0xA17581A9E3356d9A858b789D68B4d866e593aE94",
            "0x3Afdc9BCA9213A35503b077a6072F3D0d5AB0840",
            "0x3D0bb1ccaB520A66e607822fC55BC921738fAFE3",
            "0x5D409e56D886231aDAf00c8775665AD0f9897b56",
            // Sparklend
            "0xC13e21B648A5Ee794902342038FF3aDAB66BE987",
            // Morpho
            "0xBBBBBbbBBb9cC5e90e3b3Af64bdAF62C37EEFFCb",
        ],
    ),
    (
        ProtocolCategory::Staking,
        &[
            // Lido
            "0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84",
            "0x7f39C581F595B53c5cb19bD0b3f8dA6c935E2Ca0",
            // RocketPool
            "0xDD3f50F8A6CafbE9b31a427582963f465E745AF8",
        ],
    ),
    (
        ProtocolCategory::Liquidity,
        &[
            // Uniswap v3 positions
            "0xC36442b4a4522E871399CD717aBDD847Ab11FE88",
        ],
    ),
    (
        ProtocolCategory::Bridging,
        &[
            // Across
            "0x5c7BCd6E7De5423a257D81B442095A1a6ced35C5",
            // Stargate
            "0x8731d54E9D02c286767d56ac03e8037C07e01e98",
            "0x150f94B44927F078737562f0fcF3C95c01Cc2376",
        ],
    ),
    (
        ProtocolCategory::YieldFarming,
        &[
            // Yearn Finance
            "0xdA816459F1AB5631232FE5e97a05BBBb94970c95",
            "0x5f18C75AbDAe578b483E5F43f12a39cF75b973a9",
            "0x7Da96a3891Add058AdA2E826306D812C638D87A7",
            "0xa258C4606Ca8206D8aA700cE2143D7db854D168c",
            // Convex Finance
            "0xF403C135812408BFbE8713b5A23a04b3D48AAE31",
        ],
    ),
];

/// Application constants

// Block explorer (Etherscan API v2 unified multi-chain endpoint)
pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

// Supported chain ids
pub const CHAIN_ID_ETHEREUM: u64 = 1;
pub const CHAIN_ID_POLYGON: u64 = 137;

// Account-history query range: full history, newest first
pub const START_BLOCK: u64 = 0;
pub const END_BLOCK: u64 = 99_999_999;

// Native-coin sentinels used by the token tables
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
pub const NATIVE_PLACEHOLDER: &str = "0x";
pub const NATIVE_COIN_DECIMALS: u32 = 18;

// Outbound HTTP configuration
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 4;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 12;

// API version
pub const API_VERSION: &str = "v1";

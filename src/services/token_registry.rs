use crate::constants::{CHAIN_ID_ETHEREUM, CHAIN_ID_POLYGON, NATIVE_PLACEHOLDER, ZERO_ADDRESS};
use crate::models::SupportedToken;

/// Resolved token identity for one (network, fee-type code) pair.
///
/// `fee_type` is the binary classification used downstream: 0 = native/gas
/// asset, 1 = ERC20-style token. `contract_address` is the zero address for
/// native coins and `None` for the unknown identity (unsupported network or
/// unrecognized code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenIdentity {
    pub symbol: &'static str,
    pub fee_type: u8,
    pub contract_address: Option<&'static str>,
}

impl TokenIdentity {
    pub const UNKNOWN: TokenIdentity = TokenIdentity {
        symbol: "",
        fee_type: 0,
        contract_address: None,
    };

    /// True when the identity points at the chain's base asset rather than
    /// a contract.
    pub fn is_native_coin(&self) -> bool {
        matches!(
            self.contract_address,
            Some(addr) if addr == ZERO_ADDRESS || addr == NATIVE_PLACEHOLDER
        )
    }

    pub fn is_known(&self) -> bool {
        self.contract_address.is_some()
    }
}

struct TokenEntry {
    code: &'static str,
    symbol: &'static str,
    fee_type: u8,
    contract_address: &'static str,
}

// Fee-type code tables per network. Codes are the caller's numeric fee-type
// identifiers in string form.
const ETHEREUM_TOKENS: &[TokenEntry] = &[
    TokenEntry {
        code: "10",
        symbol: "ETH",
        fee_type: 0,
        contract_address: ZERO_ADDRESS,
    },
    TokenEntry {
        code: "1",
        symbol: "TTJP",
        fee_type: 1,
        contract_address: "0x7388B13D6A029c29463785b993b0BF5E1a48a848",
    },
    TokenEntry {
        code: "15",
        symbol: "JPYC",
        fee_type: 1,
        contract_address: "0xE7C3D8C9a439feDe00D2600032D5dB0Be71C3c29",
    },
    TokenEntry {
        code: "3",
        symbol: "JPYC_PREPAID",
        fee_type: 1,
        contract_address: "0x431D5dfF03120AFA4bDf332c61A6e1766eF37BDB",
    },
    TokenEntry {
        code: "5",
        symbol: "USDC",
        fee_type: 1,
        contract_address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
    },
    TokenEntry {
        code: "11",
        symbol: "USDT",
        fee_type: 1,
        contract_address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
    },
];

const POLYGON_TOKENS: &[TokenEntry] = &[
    TokenEntry {
        code: "1",
        symbol: "TTJP",
        fee_type: 1,
        contract_address: "0xa4c1168EC5883c5307419B2fC8D0683634d228fd",
    },
    TokenEntry {
        code: "2",
        symbol: "POL",
        fee_type: 0,
        contract_address: ZERO_ADDRESS,
    },
    TokenEntry {
        code: "3",
        symbol: "JPYC_PREPAID",
        fee_type: 1,
        contract_address: "0x431D5dfF03120AFA4bDf332c61A6e1766eF37BDB",
    },
    TokenEntry {
        code: "5",
        symbol: "USDC",
        fee_type: 1,
        contract_address: "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359",
    },
    TokenEntry {
        code: "11",
        symbol: "USDT",
        fee_type: 1,
        contract_address: "0xc2132D05D31c914a87C6611C10748AEb04B58e8F",
    },
    TokenEntry {
        code: "13",
        symbol: "SNPT",
        fee_type: 1,
        contract_address: "0x22737f5Bbb7C5b5BA407b0c1C9a9cdf66CF25D7d",
    },
    TokenEntry {
        code: "15",
        symbol: "JPYC",
        fee_type: 1,
        contract_address: "0xE7C3D8C9a439feDe00D2600032D5dB0Be71C3c29",
    },
];

fn network_table(network_id: u64) -> Option<&'static [TokenEntry]> {
    match network_id {
        CHAIN_ID_ETHEREUM => Some(ETHEREUM_TOKENS),
        CHAIN_ID_POLYGON => Some(POLYGON_TOKENS),
        _ => None,
    }
}

pub fn chain_name(network_id: u64) -> &'static str {
    match network_id {
        CHAIN_ID_ETHEREUM => "Ethereum",
        CHAIN_ID_POLYGON => "Polygon",
        _ => "unknown",
    }
}

/// Maps (network id, fee-type code) to a token identity.
///
/// Total: unsupported networks, absent codes and unrecognized codes all
/// resolve to `TokenIdentity::UNKNOWN`.
pub fn resolve_token(network_id: u64, type_code: Option<&str>) -> TokenIdentity {
    let Some(table) = network_table(network_id) else {
        return TokenIdentity::UNKNOWN;
    };
    let Some(code) = type_code else {
        return TokenIdentity::UNKNOWN;
    };

    table
        .iter()
        .find(|entry| entry.code == code.trim())
        .map(|entry| TokenIdentity {
            symbol: entry.symbol,
            fee_type: entry.fee_type,
            contract_address: Some(entry.contract_address),
        })
        .unwrap_or(TokenIdentity::UNKNOWN)
}

/// Full token table across supported networks, for the listing endpoint.
pub fn supported_tokens() -> Vec<SupportedToken> {
    let networks: [(u64, &'static [TokenEntry]); 2] = [
        (CHAIN_ID_ETHEREUM, ETHEREUM_TOKENS),
        (CHAIN_ID_POLYGON, POLYGON_TOKENS),
    ];

    networks
        .iter()
        .flat_map(|(network_id, table)| {
            table.iter().map(move |entry| SupportedToken {
                network_id: *network_id,
                chain: chain_name(*network_id).to_string(),
                code: entry.code.to_string(),
                symbol: entry.symbol.to_string(),
                fee_type: entry.fee_type,
                contract_address: entry.contract_address.to_string(),
            })
        })
        .collect()
}

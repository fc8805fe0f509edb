use serde::{Deserialize, Serialize};

// ==================== NORMALIZED HISTORY ====================

/// One wallet ledger entry after filtering and unit conversion. Field names
/// are the wire contract consumed downstream; `type` and `tokenName` keep
/// their original casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "tokenName")]
    pub token_name: String,
    pub gas: f64,
    pub status: u8,
    pub amount: f64,
    pub created_at: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub fee_type: u8,
    pub name: String,
}

// ==================== TOKEN LISTING ====================

/// One row of the supported-token table as exposed by the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SupportedToken {
    pub network_id: u64,
    pub chain: String,
    pub code: String,
    pub symbol: String,
    pub fee_type: u8,
    pub contract_address: String,
}

// ==================== API RESPONSE ====================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

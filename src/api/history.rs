use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::{
    error::{AppError, Result},
    integrations::EtherscanClient,
    models::{ApiResponse, SupportedToken, WalletTransaction},
    services::{token_registry, HistoryService},
};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub network_id: u64,
    #[serde(rename = "type")]
    pub type_code: Option<String>,
}

/// GET /api/v1/wallet/{address}/history
pub async fn get_wallet_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<WalletTransaction>>>> {
    let wallet_address = address.trim();
    if wallet_address.is_empty() {
        return Err(AppError::BadRequest(
            "Wallet address is required".to_string(),
        ));
    }

    let client = EtherscanClient::from_config(&state.config)?;
    let service = HistoryService::new(client);
    let history = service
        .wallet_history(wallet_address, query.network_id, query.type_code.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(history)))
}

/// GET /api/v1/wallet/tokens
pub async fn get_supported_tokens() -> Json<ApiResponse<Vec<SupportedToken>>> {
    Json(ApiResponse::success(token_registry::supported_tokens()))
}

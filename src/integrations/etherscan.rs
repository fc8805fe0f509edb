use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::constants::{END_BLOCK, HTTP_CONNECT_TIMEOUT_SECS, START_BLOCK};
use crate::error::{AppError, Result};

/// Client for the explorer's unified multi-chain account endpoint. One
/// instance serves both supported chains; the chain is a query parameter.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    api_url: String,
    api_key: String,
    client: Client,
}

impl EtherscanClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Explorer HTTP client init failed: {}", e))
            })?;

        Ok(Self {
            api_url: config.etherscan_api_url.clone(),
            api_key: config.etherscan_api_key.clone(),
            client,
        })
    }

    /// Normal (native-coin) transaction list for an address, newest first.
    pub async fn normal_transactions(
        &self,
        chain_id: u64,
        address: &str,
    ) -> Result<TxListResponse> {
        self.account_history(chain_id, address, "txlist").await
    }

    /// ERC20 token-transfer list for an address, newest first.
    pub async fn token_transfers(&self, chain_id: u64, address: &str) -> Result<TxListResponse> {
        self.account_history(chain_id, address, "tokentx").await
    }

    async fn account_history(
        &self,
        chain_id: u64,
        address: &str,
        action: &str,
    ) -> Result<TxListResponse> {
        let url = self.account_history_url(chain_id, address, action)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::ExternalAPI(format!("Explorer {} request failed: {}", action, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalAPI(format!(
                "Explorer {} request returned {}: {}",
                action,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<TxListResponse>()
            .await
            .map_err(|e| AppError::ExternalAPI(format!("Explorer {} parse failed: {}", action, e)))
    }

    fn account_history_url(&self, chain_id: u64, address: &str, action: &str) -> Result<Url> {
        let mut url = Url::parse(self.api_url.trim_end_matches('/'))
            .map_err(|e| AppError::Internal(format!("Invalid explorer URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("chainid", &chain_id.to_string())
            .append_pair("module", "account")
            .append_pair("action", action)
            .append_pair("address", address)
            .append_pair("startblock", &START_BLOCK.to_string())
            .append_pair("endblock", &END_BLOCK.to_string())
            .append_pair("sort", "desc")
            .append_pair("apikey", &self.api_key);
        Ok(url)
    }
}

/// Response envelope shared by `txlist` and `tokentx`. `result` is a
/// transaction array on success and a bare string on API-level errors
/// ("Max rate limit reached", "No transactions found", ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TxListResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: TxListResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TxListResult {
    Transactions(Vec<RawTransaction>),
    Message(String),
}

impl Default for TxListResult {
    fn default() -> Self {
        TxListResult::Transactions(Vec::new())
    }
}

impl TxListResponse {
    /// API-level error for this feed. Non-fatal: the feed is treated as
    /// empty and the other feed is still processed.
    pub fn is_api_error(&self) -> bool {
        self.status == "0"
    }

    pub fn result_note(&self) -> Option<&str> {
        match &self.result {
            TxListResult::Message(note) => Some(note),
            TxListResult::Transactions(_) => None,
        }
    }

    pub fn into_transactions(self) -> Vec<RawTransaction> {
        match self.result {
            TxListResult::Transactions(txs) => txs,
            TxListResult::Message(_) => Vec::new(),
        }
    }
}

/// One raw ledger entry as reported by the explorer. Untrusted input:
/// every field may be missing and defaults downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "timeStamp")]
    pub time_stamp: Option<String>,
    #[serde(default, rename = "gasUsed")]
    pub gas_used: Option<String>,
    #[serde(default, rename = "isError")]
    pub is_error: Option<String>,
    #[serde(default, rename = "txreceipt_status")]
    pub txreceipt_status: Option<String>,
    #[serde(default, rename = "contractAddress")]
    pub contract_address: Option<String>,
    #[serde(default, rename = "tokenName")]
    pub token_name: Option<String>,
    #[serde(default, rename = "tokenDecimal")]
    pub token_decimal: Option<String>,
}

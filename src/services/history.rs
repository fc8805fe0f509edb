use chrono::DateTime;

use crate::constants::NATIVE_COIN_DECIMALS;
use crate::error::Result;
use crate::integrations::etherscan::{EtherscanClient, RawTransaction, TxListResponse};
use crate::models::WalletTransaction;
use crate::services::token_registry::{chain_name, resolve_token, TokenIdentity};

/// Fetches a wallet's explorer history and normalizes it into
/// `WalletTransaction` records for one token or native coin.
pub struct HistoryService {
    client: EtherscanClient,
}

impl HistoryService {
    pub fn new(client: EtherscanClient) -> Self {
        Self { client }
    }

    /// Full filtered history of one wallet, newest first.
    ///
    /// Both explorer feeds are fetched concurrently; an API-level error on
    /// either feed empties that feed without failing the call. Transport
    /// errors propagate once both requests have settled.
    pub async fn wallet_history(
        &self,
        wallet_address: &str,
        network_id: u64,
        type_code: Option<&str>,
    ) -> Result<Vec<WalletTransaction>> {
        let identity = resolve_token(network_id, type_code);
        if !identity.is_known() {
            tracing::warn!(
                "No token mapping for network {} code {:?}; returning empty history",
                network_id,
                type_code
            );
            return Ok(Vec::new());
        }

        tracing::info!(
            "Fetching transactions for wallet {} on {} (chain id {})",
            wallet_address,
            chain_name(network_id),
            network_id
        );
        tracing::debug!(
            "Looking for {} {} ({})",
            if identity.is_native_coin() {
                "native coin"
            } else {
                "token"
            },
            identity.symbol,
            identity.contract_address.unwrap_or_default()
        );

        let (normal_res, token_res) = tokio::join!(
            self.client.normal_transactions(network_id, wallet_address),
            self.client.token_transfers(network_id, wallet_address),
        );
        let normal_txs = feed_transactions("normal transactions", normal_res?);
        let token_txs = feed_transactions("token transfers", token_res?);
        tracing::info!(
            "Found {} normal transactions and {} token transfers",
            normal_txs.len(),
            token_txs.len()
        );

        Ok(build_history(&identity, normal_txs, token_txs))
    }
}

/// Unwraps one feed. An API-level error status means "empty feed", not a
/// failure: the message and result note are logged and processing goes on
/// with whatever the other feed returned.
fn feed_transactions(label: &str, response: TxListResponse) -> Vec<RawTransaction> {
    if response.is_api_error() {
        tracing::error!(
            "Error fetching {}: {} {:?}",
            label,
            response.message,
            response.result_note()
        );
        return Vec::new();
    }
    response.into_transactions()
}

/// Filters the feed matching the resolved identity and normalizes every
/// surviving entry, preserving feed order (descending, as requested from
/// the explorer).
fn build_history(
    identity: &TokenIdentity,
    normal_txs: Vec<RawTransaction>,
    token_txs: Vec<RawTransaction>,
) -> Vec<WalletTransaction> {
    let is_native = identity.is_native_coin();
    let filtered = if is_native {
        filter_native_coin(normal_txs)
    } else {
        filter_token_transfers(token_txs, identity.contract_address.unwrap_or_default())
    };
    tracing::debug!(
        "Filtered {} {} entries",
        filtered.len(),
        if is_native { "native coin" } else { "token transfer" }
    );

    filtered
        .into_iter()
        .map(|tx| normalize(tx, identity, is_native))
        .collect()
}

// Native movements come from the normal feed; zero-value entries (contract
// calls, failed sends) are dropped.
fn filter_native_coin(txs: Vec<RawTransaction>) -> Vec<RawTransaction> {
    txs.into_iter()
        .filter(|tx| {
            tx.value
                .as_deref()
                .is_some_and(|value| !value.is_empty() && value != "0")
        })
        .collect()
}

fn filter_token_transfers(txs: Vec<RawTransaction>, contract_address: &str) -> Vec<RawTransaction> {
    txs.into_iter()
        .filter(|tx| {
            tx.contract_address
                .as_deref()
                .is_some_and(|addr| addr.eq_ignore_ascii_case(contract_address))
        })
        .collect()
}

fn normalize(tx: RawTransaction, identity: &TokenIdentity, is_native: bool) -> WalletTransaction {
    let decimals = if is_native {
        NATIVE_COIN_DECIMALS
    } else {
        tx.token_decimal
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(NATIVE_COIN_DECIMALS)
    };
    let amount = scale_amount(tx.value.as_deref().unwrap_or("0"), decimals);

    let raw_timestamp = tx.time_stamp.unwrap_or_default();
    let seconds = raw_timestamp.parse::<i64>().unwrap_or(0);

    WalletTransaction {
        hash: tx.hash,
        from: tx.from.to_lowercase(),
        to: tx.to.to_lowercase(),
        token_name: tx
            .token_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| identity.symbol.to_string()),
        gas: tx
            .gas_used
            .as_deref()
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(0.0),
        status: transfer_status(tx.is_error.as_deref(), tx.txreceipt_status.as_deref()),
        amount,
        created_at: format_created_at(seconds),
        timestamp: raw_timestamp,
        fee_type: identity.fee_type,
        name: identity.symbol.to_string(),
    }
}

// The normal feed reports `isError`, the token feed `txreceipt_status`;
// either positive signal marks the transfer as succeeded.
fn transfer_status(is_error: Option<&str>, txreceipt_status: Option<&str>) -> u8 {
    if is_error == Some("0") || txreceipt_status == Some("1") {
        1
    } else {
        0
    }
}

/// Integer ledger units scaled down to a decimal amount. f64 precision loss
/// for very large values is accepted.
fn scale_amount(raw_value: &str, decimals: u32) -> f64 {
    let units = raw_value.parse::<u128>().unwrap_or(0);
    (units as f64) / 10_f64.powi(decimals as i32)
}

fn format_created_at(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .unwrap_or_default()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::etherscan::TxListResult;

    const EPSILON: f64 = 1e-12;

    fn native_identity() -> TokenIdentity {
        resolve_token(1, Some("10"))
    }

    fn usdc_polygon_identity() -> TokenIdentity {
        resolve_token(137, Some("5"))
    }

    fn native_entry(value: &str) -> RawTransaction {
        RawTransaction {
            hash: "0xhash".to_string(),
            from: "0xFrom".to_string(),
            to: "0xTo".to_string(),
            value: Some(value.to_string()),
            time_stamp: Some("1700000000".to_string()),
            gas_used: Some("21000".to_string()),
            is_error: Some("0".to_string()),
            ..RawTransaction::default()
        }
    }

    fn token_entry(contract_address: &str) -> RawTransaction {
        RawTransaction {
            hash: "0xtoken".to_string(),
            from: "0xFrom".to_string(),
            to: "0xTo".to_string(),
            value: Some("2500000".to_string()),
            time_stamp: Some("1700000000".to_string()),
            gas_used: Some("65000".to_string()),
            txreceipt_status: Some("1".to_string()),
            contract_address: Some(contract_address.to_string()),
            token_name: Some("USD Coin".to_string()),
            token_decimal: Some("6".to_string()),
            ..RawTransaction::default()
        }
    }

    fn ok_response(txs: Vec<RawTransaction>) -> TxListResponse {
        TxListResponse {
            status: "1".to_string(),
            message: "OK".to_string(),
            result: TxListResult::Transactions(txs),
        }
    }

    fn error_response(note: &str) -> TxListResponse {
        TxListResponse {
            status: "0".to_string(),
            message: "NOTOK".to_string(),
            result: TxListResult::Message(note.to_string()),
        }
    }

    #[test]
    fn native_filter_drops_zero_and_missing_values() {
        let txs = vec![
            native_entry("500000000000000000"),
            native_entry("0"),
            RawTransaction::default(),
            native_entry(""),
        ];
        let kept = filter_native_coin(txs);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value.as_deref(), Some("500000000000000000"));
    }

    #[test]
    fn token_filter_matches_contract_case_insensitively() {
        let contract = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359";
        let txs = vec![
            token_entry(&contract.to_uppercase().replace("0X", "0x")),
            token_entry("0x0000000000000000000000000000000000000001"),
            RawTransaction::default(),
        ];
        let kept = filter_token_transfers(txs, &contract.to_lowercase());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn amount_scales_by_native_decimals() {
        assert!((scale_amount("1000000000000000000", 18) - 1.0).abs() < EPSILON);
        assert!((scale_amount("500000000000000000", 18) - 0.5).abs() < EPSILON);
        assert!((scale_amount("2500000", 6) - 2.5).abs() < EPSILON);
        assert_eq!(scale_amount("not-a-number", 18), 0.0);
        assert_eq!(scale_amount("0", 18), 0.0);
    }

    #[test]
    fn created_at_formats_unix_seconds_as_utc() {
        assert_eq!(format_created_at(1700000000), "2023-11-14 22:13:20");
        assert_eq!(format_created_at(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn transfer_status_truth_table() {
        assert_eq!(transfer_status(Some("0"), None), 1);
        assert_eq!(transfer_status(Some("1"), Some("0")), 0);
        assert_eq!(transfer_status(Some("1"), Some("1")), 1);
        assert_eq!(transfer_status(None, Some("1")), 1);
        assert_eq!(transfer_status(None, None), 0);
    }

    #[test]
    fn normalizes_token_entry_with_reported_decimals() {
        let identity = usdc_polygon_identity();
        let tx = normalize(
            token_entry("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
            &identity,
            false,
        );

        assert!((tx.amount - 2.5).abs() < EPSILON);
        assert_eq!(tx.status, 1);
        assert_eq!(tx.token_name, "USD Coin");
        assert_eq!(tx.name, "USDC");
        assert_eq!(tx.fee_type, 1);
        assert_eq!(tx.from, "0xfrom");
        assert_eq!(tx.to, "0xto");
        assert_eq!(tx.gas, 65000.0);
    }

    #[test]
    fn token_decimal_defaults_to_eighteen_when_absent() {
        let identity = usdc_polygon_identity();
        let mut entry = token_entry("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359");
        entry.value = Some("1000000000000000000".to_string());
        entry.token_decimal = None;
        entry.token_name = None;

        let tx = normalize(entry, &identity, false);
        assert!((tx.amount - 1.0).abs() < EPSILON);
        // With no reported name the resolved symbol is used.
        assert_eq!(tx.token_name, "USDC");
    }

    #[test]
    fn missing_fields_default_without_raising() {
        let identity = native_identity();
        let tx = normalize(RawTransaction::default(), &identity, true);

        assert_eq!(tx.amount, 0.0);
        assert_eq!(tx.gas, 0.0);
        assert_eq!(tx.status, 0);
        assert_eq!(tx.timestamp, "");
        assert_eq!(tx.created_at, "1970-01-01 00:00:00");
    }

    #[test]
    fn end_to_end_native_feed_normalizes_one_entry() {
        let identity = native_identity();
        let normal = feed_transactions(
            "normal transactions",
            ok_response(vec![native_entry("500000000000000000")]),
        );
        let token = feed_transactions("token transfers", ok_response(Vec::new()));

        let history = build_history(&identity, normal, token);
        assert_eq!(history.len(), 1);
        let tx = &history[0];
        assert!((tx.amount - 0.5).abs() < EPSILON);
        assert_eq!(tx.status, 1);
        assert_eq!(tx.created_at, "2023-11-14 22:13:20");
        assert_eq!(tx.timestamp, "1700000000");
        assert_eq!(tx.fee_type, 0);
        assert_eq!(tx.name, "ETH");
        assert_eq!(tx.token_name, "ETH");
    }

    #[test]
    fn feed_order_is_preserved() {
        let identity = native_identity();
        let mut first = native_entry("1000000000000000000");
        first.hash = "0xnewest".to_string();
        let mut second = native_entry("2000000000000000000");
        second.hash = "0xoldest".to_string();

        let history = build_history(&identity, vec![first, second], Vec::new());
        assert_eq!(history[0].hash, "0xnewest");
        assert_eq!(history[1].hash, "0xoldest");
    }

    #[test]
    fn api_error_on_both_feeds_yields_empty_history() {
        let identity = native_identity();
        let normal = feed_transactions(
            "normal transactions",
            error_response("No transactions found"),
        );
        let token = feed_transactions("token transfers", error_response("No transactions found"));

        assert!(build_history(&identity, normal, token).is_empty());
    }

    #[test]
    fn token_identity_ignores_normal_feed() {
        let identity = usdc_polygon_identity();
        let history = build_history(
            &identity,
            vec![native_entry("500000000000000000")],
            vec![token_entry("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359")],
        );
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].hash, "0xtoken");
    }
}

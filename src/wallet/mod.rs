//! JSON-RPC wallet client for an Ethereum-compatible node
//!
//! Talks to a local dev node (Ganache-style, chain id 1337 by default)
//! whose accounts are unlocked, so value transfers need no local signing:
//! `eth_sendTransaction` is submitted and the receipt is polled until the
//! transfer lands. Amounts are `u128` wei throughout.

use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::debug;

/// Wei per whole ETH
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Gas limit for a plain value transfer
const TRANSFER_GAS: u64 = 21_000;

/// How often to poll for a transaction receipt
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Wallet/payment failure
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet node unreachable: {0}")]
    Transport(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("connected to chain {actual}, expected {expected}; switch the node's network and reconnect")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("the node exposes no unlocked accounts")]
    NoAccounts,

    #[error("transaction {0} was rejected on chain")]
    TxFailed(String),

    #[error("timed out waiting for transaction {0} to confirm")]
    TxTimeout(String),

    #[error("malformed rpc response: {0}")]
    BadResponse(String),
}

/// JSON-RPC client bound to one node and one expected chain
pub struct WalletClient {
    rpc_url: String,
    expected_chain_id: u64,
}

impl WalletClient {
    pub fn new(rpc_url: impl Into<String>, expected_chain_id: u64) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            expected_chain_id,
        }
    }

    /// Verify the chain and return the node's first unlocked account.
    pub fn connect(&self) -> Result<String, WalletError> {
        self.ensure_network()?;

        let result = self.call("eth_accounts", json!([]))?;
        let account = result
            .as_array()
            .and_then(|accounts| accounts.first())
            .and_then(|a| a.as_str())
            .ok_or(WalletError::NoAccounts)?
            .to_string();
        if account.is_empty() {
            return Err(WalletError::NoAccounts);
        }

        debug!(account = %account, "wallet connected");
        Ok(account)
    }

    /// The chain id the node reports.
    pub fn chain_id(&self) -> Result<u64, WalletError> {
        let result = self.call("eth_chainId", json!([]))?;
        parse_hex_u64(result.as_str().unwrap_or_default())
    }

    /// Fail with `WrongNetwork` unless the node is on the expected chain.
    pub fn ensure_network(&self) -> Result<(), WalletError> {
        let actual = self.chain_id()?;
        if actual != self.expected_chain_id {
            return Err(WalletError::WrongNetwork {
                expected: self.expected_chain_id,
                actual,
            });
        }
        Ok(())
    }

    /// Balance of an address in wei.
    pub fn balance(&self, address: &str) -> Result<u128, WalletError> {
        let result = self.call("eth_getBalance", json!([address, "latest"]))?;
        parse_hex_u128(result.as_str().unwrap_or_default())
    }

    /// Submit a plain value transfer. Returns the transaction hash.
    pub fn send_value(&self, from: &str, to: &str, wei: u128) -> Result<String, WalletError> {
        let tx = json!({
            "from": from,
            "to": to,
            "value": to_hex(wei),
            "gas": format!("0x{TRANSFER_GAS:x}"),
        });
        let result = self.call("eth_sendTransaction", json!([tx]))?;
        let hash = result
            .as_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| WalletError::BadResponse("missing transaction hash".to_string()))?;

        debug!(tx = %hash, "transaction submitted");
        Ok(hash.to_string())
    }

    /// Poll until the transaction is mined and succeeded.
    pub fn wait_for_receipt(&self, tx_hash: &str, timeout: Duration) -> Result<(), WalletError> {
        let started = Instant::now();

        loop {
            let result = self.call("eth_getTransactionReceipt", json!([tx_hash]))?;
            if !result.is_null() {
                let status = result.get("status").and_then(|s| s.as_str()).unwrap_or("");
                return if status == "0x1" {
                    Ok(())
                } else {
                    Err(WalletError::TxFailed(tx_hash.to_string()))
                };
            }

            if started.elapsed() >= timeout {
                return Err(WalletError::TxTimeout(tx_hash.to_string()));
            }
            std::thread::sleep(RECEIPT_POLL_INTERVAL);
        }
    }

    /// One JSON-RPC round-trip, unwrapping the `result` field.
    fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let response = ureq::post(&self.rpc_url)
            .send_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let body = resp.into_string().unwrap_or_default();
                    WalletError::Rpc(format!("HTTP {code}: {}", body.trim()))
                }
                ureq::Error::Transport(t) => WalletError::Transport(t.to_string()),
            })?;

        let body: Value = response
            .into_json()
            .map_err(|e| WalletError::BadResponse(e.to_string()))?;

        if let Some(err) = body.get("error") {
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| err.to_string());
            return Err(WalletError::Rpc(message));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| WalletError::BadResponse("missing result field".to_string()))
    }
}

/// Format a wei amount as a hex quantity ("0x...")
pub fn to_hex(wei: u128) -> String {
    format!("0x{wei:x}")
}

/// Parse a hex quantity into a u64
pub fn parse_hex_u64(s: &str) -> Result<u64, WalletError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(digits, 16)
        .map_err(|_| WalletError::BadResponse(format!("not a hex quantity: {s:?}")))
}

/// Parse a hex quantity into a u128
pub fn parse_hex_u128(s: &str) -> Result<u128, WalletError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16)
        .map_err(|_| WalletError::BadResponse(format!("not a hex quantity: {s:?}")))
}

/// Render a wei amount as a decimal ETH string (e.g. "0.00013")
pub fn format_eth(wei: u128) -> String {
    let whole = wei / WEI_PER_ETH;
    let frac = wei % WEI_PER_ETH;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{frac:018}");
    format!("{whole}.{}", frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(to_hex(0), "0x0");
        assert_eq!(to_hex(130_000_000_000_000), "0x763bfbd22000");
        assert_eq!(parse_hex_u128("0x763bfbd22000").unwrap(), 130_000_000_000_000);
        assert_eq!(parse_hex_u64("0x539").unwrap(), 1337);
        assert!(parse_hex_u64("not-hex").is_err());
    }

    #[test]
    fn test_format_eth() {
        assert_eq!(format_eth(0), "0");
        assert_eq!(format_eth(WEI_PER_ETH), "1");
        assert_eq!(format_eth(130_000_000_000_000), "0.00013");
        assert_eq!(format_eth(13_000_000_000_000_000), "0.013");
        assert_eq!(format_eth(WEI_PER_ETH + WEI_PER_ETH / 2), "1.5");
    }
}

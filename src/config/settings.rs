//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the SQLite store (defaults to ~/.tokenverse/store.db)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Directory for submission attachments
    /// (defaults to ~/.tokenverse/attachments)
    #[serde(default)]
    pub attachment_dir: Option<PathBuf>,

    /// Base URL prepended to stored attachment paths; when unset,
    /// attachment URLs are local file paths
    #[serde(default)]
    pub attachment_base_url: Option<String>,

    /// JSON-RPC endpoint of the payment node
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Chain id purchases must settle on
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Address receiving token purchase payments
    #[serde(default = "default_treasury_address")]
    pub treasury_address: String,

    /// How long to wait for a purchase receipt, in seconds
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:7545".to_string()
}

fn default_chain_id() -> u64 {
    1337
}

fn default_treasury_address() -> String {
    "0x71F7E3701D8cf8719B69d51b7AeC0409210b6617".to_string()
}

fn default_receipt_timeout_secs() -> u64 {
    60
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            attachment_dir: None,
            attachment_base_url: None,
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            treasury_address: default_treasury_address(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
        }
    }
}

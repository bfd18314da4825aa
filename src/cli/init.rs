//! Init command implementation

use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use tokenverse::config::Config;

/// Default configuration content for tokenverse init
pub const DEFAULT_CONFIG: &str = r#"# Tokenverse Configuration
# ========================
#
# All values are optional; the defaults below are what the CLI uses when a
# key is absent.

[settings]
# Where durable state lives. Defaults to ~/.tokenverse/store.db
# store_path = "/path/to/store.db"

# Submission attachments land here. Defaults to ~/.tokenverse/attachments
# attachment_dir = "/path/to/attachments"

# When set, attachment URLs are built from this base instead of local paths
# attachment_base_url = "https://cdn.example.com/attachments"

# The payment node purchases settle against (a local dev chain by default)
rpc_url = "http://127.0.0.1:7545"
chain_id = 1337

# Address receiving token purchase payments
treasury_address = "0x71F7E3701D8cf8719B69d51b7AeC0409210b6617"

# How long `buy` waits for a transfer to confirm
receipt_timeout_secs = 60
"#;

/// Write the default config file
pub async fn init_command(config_override: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_override {
        Some(p) => p.to_path_buf(),
        None => Config::global_config_path(),
    };

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, DEFAULT_CONFIG)?;

    info!("wrote config to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}

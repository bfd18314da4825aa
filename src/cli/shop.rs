//! Token shop commands

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};

use tokenverse::shop::{self, TOKEN_PACKAGES, TokenPackage};
use tokenverse::wallet::{WalletClient, format_eth};

use super::open_app;

/// List the packages on sale
pub async fn shop_command() -> Result<()> {
    println!("Token packages:\n");
    for pkg in TOKEN_PACKAGES {
        println!("  {:>5} tokens - {} ETH", pkg.tokens, format_eth(pkg.price_wei));
    }
    println!("\nBuy one with `tokenverse buy <tokens>`.");
    Ok(())
}

/// Buy a package, settling the payment on chain before crediting
pub async fn buy_command(config: Option<&Path>, tokens: i64) -> Result<()> {
    let Some(package) = TokenPackage::by_tokens(tokens) else {
        bail!(
            "No package sells {tokens} tokens. Available: {}",
            TOKEN_PACKAGES
                .iter()
                .map(|p| p.tokens.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let app = open_app(config)?;
    let user = app.current_user()?;

    let wallet = WalletClient::new(
        app.config.settings.rpc_url.clone(),
        app.config.settings.chain_id,
    );
    let timeout = Duration::from_secs(app.config.settings.receipt_timeout_secs);

    println!(
        "Buying {} tokens for {} ETH...",
        package.tokens,
        format_eth(package.price_wei)
    );
    let receipt = shop::purchase(
        &app.ledger,
        &wallet,
        &user,
        package,
        &app.config.settings.treasury_address,
        timeout,
    )?;

    if receipt.credited {
        println!(
            "Purchase successful! {} tokens credited (tx {}).",
            receipt.tokens, receipt.tx_hash
        );
    } else {
        println!(
            "Transaction {} was already credited; balance unchanged.",
            receipt.tx_hash
        );
    }

    let profile = app.ledger.profile(&user.id)?;
    println!("Token balance: {}", profile.tokens_earned);
    Ok(())
}

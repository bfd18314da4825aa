//! Status command implementation

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use tokenverse::domain::RANKS;
use tokenverse::wallet::{WalletClient, format_eth};

use super::open_app;

/// Show the acting user's balances, streak and rank
pub async fn status_command(config: Option<&Path>) -> Result<()> {
    let app = open_app(config)?;
    let user = app.current_user()?;

    // Re-read the row so the numbers reflect the store, not the session
    let profile = app.ledger.profile(&user.id)?;
    let rank = profile.rank();
    let unread = app.ledger.unread_notifications(&profile.id)?;

    println!("{} ({}, {})", profile.name, profile.email, profile.role);
    println!();
    println!("  Points:  {}", profile.points);
    println!("  Tokens:  {}", profile.tokens_earned);
    println!("  Streak:  {} day(s)", profile.streak);
    println!("  Rank:    {}", rank.name);
    if let Some(address) = &profile.wallet {
        println!("  Wallet:  {}", address);

        let wallet = WalletClient::new(
            app.config.settings.rpc_url.clone(),
            app.config.settings.chain_id,
        );
        match wallet.balance(address) {
            Ok(wei) => println!("  ETH:     {}", format_eth(wei)),
            Err(e) => debug!("balance unavailable: {e}"),
        }
    }
    if unread > 0 {
        println!("  Unread notifications: {}", unread);
    }

    println!("\nRanks:");
    for tier in RANKS {
        let marker = if tier == rank { ">" } else { " " };
        println!(
            "  {} {:<9} {:>2} - {} day streak",
            marker, tier.name, tier.min_streak, tier.max_streak
        );
    }

    Ok(())
}

//! Notifications command implementation

use std::path::Path;

use anyhow::Result;
use chrono::DateTime;

use super::open_app;

/// Show the acting user's notifications, optionally marking them read
pub async fn notifications_command(config: Option<&Path>, mark_read: bool) -> Result<()> {
    let app = open_app(config)?;
    let user = app.current_user()?;

    let notifications = app.ledger.notifications(&user.id, 10)?;
    if notifications.is_empty() {
        println!("No notifications yet.");
        return Ok(());
    }

    for note in &notifications {
        let marker = if note.is_read { " " } else { "*" };
        let when = DateTime::from_timestamp_millis(note.created_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{marker} [{when}] {}", note.title);
        println!("    {}", note.message);
    }

    if mark_read {
        let flipped = app.ledger.mark_notifications_read(&user.id)?;
        if flipped > 0 {
            println!("\nMarked {flipped} notification(s) read.");
        }
    }

    Ok(())
}

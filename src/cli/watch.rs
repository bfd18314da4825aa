//! Watch command: stream change-feed events

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};

use tokenverse::feed::{ChangeOp, StorePoller, Table};

use super::open_app;

/// Poll the store and print committed changes until interrupted
pub async fn watch_command(config: Option<&Path>, table: Option<&str>) -> Result<()> {
    let filter = match table {
        Some(name) => match Table::from_str(name) {
            Some(t) => Some(t),
            None => bail!(
                "Unknown table: {name} (expected users, campaigns, submissions or notifications)"
            ),
        },
        None => None,
    };

    let app = open_app(config)?;
    let rx = app.store.subscribe(filter);

    // The poller feeds commits made by other processes into the feed
    let _poller = StorePoller::spawn(app.store.clone(), Duration::from_secs(1));

    match filter {
        Some(t) => println!("Watching {t} (ctrl-c to stop)..."),
        None => println!("Watching all tables (ctrl-c to stop)..."),
    }

    while let Ok(event) = rx.recv() {
        let op = match event.op {
            ChangeOp::Insert => "insert",
            ChangeOp::Update => "update",
        };
        println!("{:<14} {:<6} {}", event.table.to_string(), op, event.row_id);
    }

    Ok(())
}

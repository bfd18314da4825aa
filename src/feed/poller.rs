//! Bridges commits made by other processes into the change feed
//!
//! The in-process feed only sees writes that went through this process's
//! [`Store`](crate::store::Store). The poller watches the database file for
//! rows stamped after its high-water marks and publishes synthetic events
//! for them, so a `watch` client also observes foreign commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use super::{ChangeEvent, ChangeOp, Table};
use crate::store::Store;

/// Background poller publishing externally committed rows
pub struct StorePoller {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StorePoller {
    /// Start polling the store every `interval`.
    ///
    /// Only rows stamped after spawn time are reported; the feed has no
    /// replay.
    pub fn spawn(store: Store, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::spawn(move || {
            let mut created_mark = Utc::now().timestamp_millis();
            let mut reviewed_mark = created_mark;

            while !stop_flag.load(Ordering::Relaxed) {
                std::thread::sleep(interval);

                match poll_once(&store, created_mark, reviewed_mark) {
                    Ok((new_created, new_reviewed)) => {
                        created_mark = new_created;
                        reviewed_mark = new_reviewed;
                    }
                    Err(e) => warn!("change poll failed: {e}"),
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the poller and wait for the thread to exit.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StorePoller {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Scan all tables once and publish everything newer than the marks.
///
/// Returns the advanced `(created, reviewed)` high-water marks.
fn poll_once(
    store: &Store,
    created_mark: i64,
    reviewed_mark: i64,
) -> Result<(i64, i64), crate::store::StoreError> {
    let mut max_created = created_mark;
    let mut fresh = Vec::new();

    {
        let conn = store.conn();
        for table in Table::ALL {
            // Table names come from the fixed enum, never from input.
            let sql = format!(
                "SELECT id, created_at FROM {} WHERE created_at > ?1 ORDER BY created_at",
                table.as_str()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([created_mark], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;

            for row in rows {
                let (id, created_at) = row?;
                max_created = max_created.max(created_at);
                fresh.push(ChangeEvent {
                    table,
                    op: ChangeOp::Insert,
                    row_id: id,
                });
            }
        }
    }

    let mut max_reviewed = reviewed_mark;
    {
        let conn = store.conn();
        let mut stmt = conn.prepare(
            "SELECT id, reviewed_at FROM submissions
             WHERE reviewed_at IS NOT NULL AND reviewed_at > ?1
             ORDER BY reviewed_at",
        )?;
        let rows = stmt.query_map([reviewed_mark], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        for row in rows {
            let (id, reviewed_at) = row?;
            max_reviewed = max_reviewed.max(reviewed_at);
            fresh.push(ChangeEvent {
                table: Table::Submissions,
                op: ChangeOp::Update,
                row_id: id,
            });
        }
    }

    for event in fresh {
        store.feed().publish(event);
    }

    Ok((max_created, max_reviewed))
}

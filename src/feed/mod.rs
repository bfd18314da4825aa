//! In-process change feed over the record store
//!
//! Every committed write publishes a [`ChangeEvent`] naming the table, the
//! operation and the affected row id. Subscribers receive events through a
//! plain channel and are expected to refetch the rows they care about
//! rather than patch a local cache. A new subscription starts from "now";
//! there is no replay.

mod poller;

pub use poller::StorePoller;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Logical tables observable through the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Campaigns,
    Submissions,
    Notifications,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Users,
        Table::Campaigns,
        Table::Submissions,
        Table::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Campaigns => "campaigns",
            Table::Submissions => "submissions",
            Table::Notifications => "notifications",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Table::Users),
            "campaigns" => Some(Table::Campaigns),
            "submissions" => Some(Table::Submissions),
            "notifications" => Some(Table::Notifications),
            _ => None,
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOp {
    Insert,
    Update,
}

/// A committed row change
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub table: Table,
    pub op: ChangeOp,
    pub row_id: String,
}

/// Fan-out hub for change events
///
/// Cloning shares the subscriber list; publishing from any clone reaches
/// every live subscriber. Dropped receivers are pruned on the next publish.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

struct Subscriber {
    /// None subscribes to every table
    table: Option<Table>,
    tx: Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one table, or to all tables when `table` is `None`.
    pub fn subscribe(&self, table: Option<Table>) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .expect("feed lock poisoned")
            .push(Subscriber { table, tx });
        rx
    }

    /// Deliver an event to every matching subscriber.
    pub fn publish(&self, event: ChangeEvent) {
        let mut subs = self.subscribers.lock().expect("feed lock poisoned");
        subs.retain(|sub| {
            if sub.table.map_or(true, |t| t == event.table) {
                sub.tx.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_filters_by_table() {
        let feed = ChangeFeed::new();
        let users_rx = feed.subscribe(Some(Table::Users));
        let all_rx = feed.subscribe(None);

        feed.publish(ChangeEvent {
            table: Table::Campaigns,
            op: ChangeOp::Insert,
            row_id: "c1".to_string(),
        });
        feed.publish(ChangeEvent {
            table: Table::Users,
            op: ChangeOp::Update,
            row_id: "u1".to_string(),
        });

        let only = users_rx.try_recv().unwrap();
        assert_eq!(only.row_id, "u1");
        assert!(users_rx.try_recv().is_err());

        assert_eq!(all_rx.try_recv().unwrap().row_id, "c1");
        assert_eq!(all_rx.try_recv().unwrap().row_id, "u1");
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe(Some(Table::Users));
        drop(rx);

        feed.publish(ChangeEvent {
            table: Table::Users,
            op: ChangeOp::Insert,
            row_id: "u1".to_string(),
        });
        assert_eq!(feed.subscribers.lock().unwrap().len(), 0);
    }
}

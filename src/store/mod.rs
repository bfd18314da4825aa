//! Embedded record store
//!
//! All durable state lives in a single SQLite database: accounts,
//! campaigns, submissions, notifications, token purchase credits and
//! sessions. Table modules expose typed select/insert/update functions
//! over a borrowed connection so multi-step logical updates can share one
//! transaction; [`Store`] owns the serialized connection and the change
//! feed that announces committed writes.

mod db;
mod error;

pub mod campaigns;
pub mod notifications;
pub mod sessions;
pub mod submissions;
pub mod token_credits;
pub mod users;

pub use db::StoreDb;
pub use error::StoreError;

use std::path::Path;
use std::sync::MutexGuard;

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;

use crate::feed::{ChangeEvent, ChangeFeed, Table};

/// The record store plus its change feed
#[derive(Clone)]
pub struct Store {
    db: StoreDb,
    feed: ChangeFeed,
}

impl Store {
    /// Open or create the store at the default location
    /// (`~/.tokenverse/store.db`).
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self {
            db: StoreDb::open_default()?,
            feed: ChangeFeed::new(),
        })
    }

    /// Open or create the store at a specific path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            db: StoreDb::open(path)?,
            feed: ChangeFeed::new(),
        })
    }

    /// Get exclusive access to the connection.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.db.conn()
    }

    /// The change feed announcing committed writes.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Subscribe to committed changes on one table (or all, with `None`).
    pub fn subscribe(&self, table: Option<Table>) -> std::sync::mpsc::Receiver<ChangeEvent> {
        self.feed.subscribe(table)
    }
}

/// Current UNIX timestamp in milliseconds
pub(crate) fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a calendar date for TEXT storage ("YYYY-MM-DD")
pub(crate) fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a stored calendar date, tolerating unparsable values as absent
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Build a conversion error for a column holding an unexpected value
pub(crate) fn bad_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(fmt_date(date), "2024-01-02");
        assert_eq!(parse_date("2024-01-02"), Some(date));
        assert_eq!(parse_date("not-a-date"), None);
    }
}

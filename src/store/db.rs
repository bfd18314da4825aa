//! SQLite connection and schema management
//!
//! Manages the `~/.tokenverse/store.db` database with automatic schema
//! migration.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use super::StoreError;
use crate::config::Config;

/// Database wrapper sharing one serialized connection
#[derive(Clone)]
pub struct StoreDb {
    conn: Arc<Mutex<Connection>>,
}

impl StoreDb {
    /// Open or create the database at the default location
    /// (~/.tokenverse/store.db)
    pub fn open_default() -> Result<Self, StoreError> {
        let db_path = Config::global_config_dir().join("store.db");
        Self::open(&db_path)
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL so a watch process can read while a command writes
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get exclusive access to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("store lock poisoned")
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        // Migration 2: wallet addresses were added after launch
        if version < 2 {
            let has_wallet: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('users') WHERE name = 'wallet'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_wallet {
                conn.execute_batch("ALTER TABLE users ADD COLUMN wallet TEXT;")?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }
}

/// SQL schema for the store
const SCHEMA_SQL: &str = r#"
-- Accounts (both users and brands)
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL,
    points INTEGER NOT NULL DEFAULT 0,
    tokens_earned INTEGER NOT NULL DEFAULT 0,
    streak INTEGER NOT NULL DEFAULT 0,
    last_submission_date TEXT,
    wallet TEXT,
    created_at INTEGER NOT NULL
);

-- Brand campaigns
CREATE TABLE IF NOT EXISTS campaigns (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    description TEXT NOT NULL,
    points INTEGER NOT NULL,
    kind TEXT NOT NULL,
    num_applicants INTEGER NOT NULL DEFAULT 0,
    end_date TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_campaigns_company ON campaigns(company);
CREATE INDEX IF NOT EXISTS idx_campaigns_status ON campaigns(status);

-- Campaign entries
CREATE TABLE IF NOT EXISTS submissions (
    id TEXT PRIMARY KEY,
    campaign_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    content TEXT NOT NULL,
    kind TEXT NOT NULL,
    instagram_link TEXT,
    facebook_link TEXT,
    youtube_link TEXT,
    x_link TEXT,
    linkedin_link TEXT,
    attachment_url TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at INTEGER NOT NULL,
    reviewed_at INTEGER
);
CREATE INDEX IF NOT EXISTS idx_submissions_campaign ON submissions(campaign_id);
CREATE INDEX IF NOT EXISTS idx_submissions_user ON submissions(user_id);
CREATE INDEX IF NOT EXISTS idx_submissions_status ON submissions(status);

-- Per-user notification feed
CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    message TEXT NOT NULL,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id);

-- Purchase idempotency ledger: one credit per chain transaction
CREATE TABLE IF NOT EXISTS token_credits (
    tx_hash TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    amount INTEGER NOT NULL,
    credited_at INTEGER NOT NULL
);

-- Sign-in sessions
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (2);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_store.db");
        let db = StoreDb::open(&db_path).unwrap();

        let conn = db.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"campaigns".to_string()));
        assert!(tables.contains(&"submissions".to_string()));
        assert!(tables.contains(&"notifications".to_string()));
        assert!(tables.contains(&"token_credits".to_string()));
        assert!(tables.contains(&"sessions".to_string()));
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_store.db");
        StoreDb::open(&db_path).unwrap();
        StoreDb::open(&db_path).unwrap();
    }
}

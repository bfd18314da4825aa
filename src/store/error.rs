//! Store error type

/// Failure while talking to the record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare store directory: {0}")]
    Io(#[from] std::io::Error),
}

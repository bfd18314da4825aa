//! Ledger error taxonomy

use crate::domain::SubmissionStatus;
use crate::store::StoreError;

/// Failure of a single ledger operation
///
/// Every variant is scoped to the requested operation; none is fatal to
/// the process. Validation and transition errors block the operation with
/// no state change; store errors pass through for display.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A required field is missing or malformed; the message names it
    #[error("{0}")]
    Validation(String),

    /// Moderation was attempted on a submission that already left `pending`
    #[error("submission {id} has already been {status}")]
    InvalidTransition {
        id: String,
        status: SubmissionStatus,
    },

    /// A referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// The acting user does not hold the required role or ownership
    #[error("not permitted: {0}")]
    Forbidden(String),

    /// Collaborator failure, passed through unmodified
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for LedgerError {
    fn from(e: rusqlite::Error) -> Self {
        LedgerError::Store(StoreError::Sqlite(e))
    }
}

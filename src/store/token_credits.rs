//! Purchase idempotency ledger
//!
//! One row per settled chain transaction. The primary key on the
//! transaction hash is what makes token crediting safe against retried
//! payment confirmations.

use rusqlite::{Connection, params};

use super::StoreError;

/// Record a credit for a chain transaction.
///
/// Returns true when this call inserted the row; false when the
/// transaction was already credited.
pub fn try_insert(
    conn: &Connection,
    tx_hash: &str,
    user_id: &str,
    amount: i64,
    credited_at: i64,
) -> Result<bool, StoreError> {
    let affected = conn.execute(
        r#"INSERT OR IGNORE INTO token_credits (tx_hash, user_id, amount, credited_at)
           VALUES (?1, ?2, ?3, ?4)"#,
        params![tx_hash, user_id, amount, credited_at],
    )?;
    Ok(affected > 0)
}

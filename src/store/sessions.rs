//! Typed queries over the `sessions` table

use rusqlite::{Connection, OptionalExtension, params};

use super::StoreError;

pub fn insert(
    conn: &Connection,
    token: &str,
    user_id: &str,
    created_at: i64,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, created_at],
    )?;
    Ok(())
}

/// Resolve a session token to the owning user id.
pub fn user_id_for_token(conn: &Connection, token: &str) -> Result<Option<String>, StoreError> {
    let user_id = conn
        .query_row("SELECT user_id FROM sessions WHERE token = ?1", [token], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(user_id)
}

pub fn delete(conn: &Connection, token: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", [token])?;
    Ok(())
}

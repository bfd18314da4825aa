//! Typed queries over the `users` table

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{StoreError, bad_column, fmt_date, parse_date};
use crate::domain::{Role, User};

/// Insert a new account. The password hash is stored next to the row but
/// never leaves this module except through [`credentials`].
pub fn insert(conn: &Connection, user: &User, password_hash: &str) -> Result<(), StoreError> {
    conn.execute(
        r#"INSERT INTO users
           (id, email, password_hash, name, role, points, tokens_earned,
            streak, last_submission_date, wallet, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"#,
        params![
            user.id,
            user.email,
            password_hash,
            user.name,
            user.role.as_str(),
            user.points,
            user.tokens_earned,
            user.streak,
            user.last_submission_date.map(fmt_date),
            user.wallet,
            user.created_at,
        ],
    )?;
    Ok(())
}

/// Fetch an account by id.
pub fn get(conn: &Connection, id: &str) -> Result<Option<User>, StoreError> {
    let user = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE id = ?1"),
            [id],
            from_row,
        )
        .optional()?;
    Ok(user)
}

/// Fetch an account by sign-in email.
pub fn get_by_email(conn: &Connection, email: &str) -> Result<Option<User>, StoreError> {
    let user = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM users WHERE email = ?1"),
            [email],
            from_row,
        )
        .optional()?;
    Ok(user)
}

/// Look up the id and password hash for a sign-in attempt.
pub fn credentials(conn: &Connection, email: &str) -> Result<Option<(String, String)>, StoreError> {
    let creds = conn
        .query_row(
            "SELECT id, password_hash FROM users WHERE email = ?1",
            [email],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    Ok(creds)
}

/// Persist a recomputed streak together with its credit day.
pub fn update_streak(
    conn: &Connection,
    id: &str,
    streak: u32,
    last_submission_date: chrono::NaiveDate,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE users SET streak = ?1, last_submission_date = ?2 WHERE id = ?3",
        params![streak, fmt_date(last_submission_date), id],
    )?;
    Ok(())
}

/// Increase the token balance. Returns false when the account is missing.
pub fn add_tokens(conn: &Connection, id: &str, amount: i64) -> Result<bool, StoreError> {
    let affected = conn.execute(
        "UPDATE users SET tokens_earned = tokens_earned + ?1 WHERE id = ?2",
        params![amount, id],
    )?;
    Ok(affected > 0)
}

/// Record the wallet address an account pays from.
pub fn set_wallet(conn: &Connection, id: &str, address: &str) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE users SET wallet = ?1 WHERE id = ?2",
        params![address, id],
    )?;
    Ok(())
}

const COLUMNS: &str = "id, email, name, role, points, tokens_earned, streak, \
                       last_submission_date, wallet, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role_str: String = row.get(3)?;
    let role = Role::from_str(&role_str)
        .ok_or_else(|| bad_column(3, format!("unknown role: {role_str}")))?;

    let last_date: Option<String> = row.get(7)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        role,
        points: row.get(4)?,
        tokens_earned: row.get(5)?,
        streak: row.get(6)?,
        last_submission_date: last_date.as_deref().and_then(parse_date),
        wallet: row.get(8)?,
        created_at: row.get(9)?,
    })
}

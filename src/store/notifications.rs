//! Typed queries over the `notifications` table

use rusqlite::{Connection, Row, params};

use super::StoreError;
use crate::domain::Notification;

pub fn insert(conn: &Connection, notification: &Notification) -> Result<(), StoreError> {
    conn.execute(
        r#"INSERT INTO notifications (id, user_id, title, message, is_read, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
        params![
            notification.id,
            notification.user_id,
            notification.title,
            notification.message,
            notification.is_read as i32,
            notification.created_at,
        ],
    )?;
    Ok(())
}

/// A user's notifications, newest first.
pub fn list_for_user(
    conn: &Connection,
    user_id: &str,
    limit: u32,
) -> Result<Vec<Notification>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, message, is_read, created_at
         FROM notifications WHERE user_id = ?1
         ORDER BY created_at DESC LIMIT ?2",
    )?;
    let notifications = stmt
        .query_map(params![user_id, limit], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(notifications)
}

pub fn unread_count(conn: &Connection, user_id: &str) -> Result<i64, StoreError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND is_read = 0",
        [user_id],
        |r| r.get(0),
    )?;
    Ok(count)
}

/// Mark all of one user's notifications read. Returns how many flipped.
pub fn mark_all_read(conn: &Connection, user_id: &str) -> Result<usize, StoreError> {
    let affected = conn.execute(
        "UPDATE notifications SET is_read = 1 WHERE user_id = ?1 AND is_read = 0",
        [user_id],
    )?;
    Ok(affected)
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        message: row.get(3)?,
        is_read: row.get::<_, i32>(4)? != 0,
        created_at: row.get(5)?,
    })
}

//! Typed queries over the `submissions` table

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{StoreError, bad_column};
use crate::domain::{SocialLinks, Submission, SubmissionKind, SubmissionStatus};

pub fn insert(conn: &Connection, submission: &Submission) -> Result<(), StoreError> {
    conn.execute(
        r#"INSERT INTO submissions
           (id, campaign_id, user_id, content, kind,
            instagram_link, facebook_link, youtube_link, x_link, linkedin_link,
            attachment_url, status, created_at, reviewed_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"#,
        params![
            submission.id,
            submission.campaign_id,
            submission.user_id,
            submission.content,
            submission.kind.as_str(),
            submission.links.instagram,
            submission.links.facebook,
            submission.links.youtube,
            submission.links.x,
            submission.links.linkedin,
            submission.attachment_url,
            submission.status.as_str(),
            submission.created_at,
            submission.reviewed_at,
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Submission>, StoreError> {
    let submission = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM submissions WHERE id = ?1"),
            [id],
            from_row,
        )
        .optional()?;
    Ok(submission)
}

/// Entries against any of a brand's campaigns, newest first.
pub fn list_for_company(
    conn: &Connection,
    company: &str,
    pending_only: bool,
) -> Result<Vec<Submission>, StoreError> {
    let sql = format!(
        "SELECT {} FROM submissions s
         JOIN campaigns c ON c.id = s.campaign_id
         WHERE c.company = ?1 {}
         ORDER BY s.created_at DESC",
        PREFIXED_COLUMNS,
        if pending_only {
            "AND s.status = 'pending'"
        } else {
            ""
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let submissions = stmt
        .query_map([company], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(submissions)
}

/// A user's own entries, newest first.
pub fn list_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Submission>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM submissions WHERE user_id = ?1 ORDER BY created_at DESC"
    ))?;
    let submissions = stmt
        .query_map([user_id], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(submissions)
}

/// Flip a pending submission to its terminal status and stamp the review
/// time. The update is conditional on the row still being pending, so a
/// concurrent moderator cannot overwrite a decision; returns false when
/// the submission was not pending.
pub fn mark_reviewed(
    conn: &Connection,
    id: &str,
    status: SubmissionStatus,
    reviewed_at: i64,
) -> Result<bool, StoreError> {
    let affected = conn.execute(
        "UPDATE submissions SET status = ?1, reviewed_at = ?2
         WHERE id = ?3 AND status = 'pending'",
        params![status.as_str(), reviewed_at, id],
    )?;
    Ok(affected > 0)
}

const COLUMNS: &str = "id, campaign_id, user_id, content, kind, \
                       instagram_link, facebook_link, youtube_link, x_link, linkedin_link, \
                       attachment_url, status, created_at, reviewed_at";

const PREFIXED_COLUMNS: &str = "s.id, s.campaign_id, s.user_id, s.content, s.kind, \
                                s.instagram_link, s.facebook_link, s.youtube_link, s.x_link, \
                                s.linkedin_link, s.attachment_url, s.status, s.created_at, \
                                s.reviewed_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Submission> {
    let kind_str: String = row.get(4)?;
    let kind = SubmissionKind::from_str(&kind_str)
        .ok_or_else(|| bad_column(4, format!("unknown submission kind: {kind_str}")))?;

    let status_str: String = row.get(11)?;
    let status = SubmissionStatus::from_str(&status_str)
        .ok_or_else(|| bad_column(11, format!("unknown submission status: {status_str}")))?;

    Ok(Submission {
        id: row.get(0)?,
        campaign_id: row.get(1)?,
        user_id: row.get(2)?,
        content: row.get(3)?,
        kind,
        links: SocialLinks {
            instagram: row.get(5)?,
            facebook: row.get(6)?,
            youtube: row.get(7)?,
            x: row.get(8)?,
            linkedin: row.get(9)?,
        },
        attachment_url: row.get(10)?,
        status,
        created_at: row.get(12)?,
        reviewed_at: row.get(13)?,
    })
}

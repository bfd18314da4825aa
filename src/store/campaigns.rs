//! Typed queries over the `campaigns` table

use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{StoreError, bad_column, fmt_date, parse_date};
use crate::domain::{Campaign, CampaignStatus, SubmissionKind};

pub fn insert(conn: &Connection, campaign: &Campaign) -> Result<(), StoreError> {
    conn.execute(
        r#"INSERT INTO campaigns
           (id, title, company, description, points, kind, num_applicants,
            end_date, status, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
        params![
            campaign.id,
            campaign.title,
            campaign.company,
            campaign.description,
            campaign.points,
            campaign.kind.as_str(),
            campaign.num_applicants,
            campaign.end_date.map(fmt_date),
            campaign.status.as_str(),
            campaign.created_at,
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<Campaign>, StoreError> {
    let campaign = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM campaigns WHERE id = ?1"),
            [id],
            from_row,
        )
        .optional()?;
    Ok(campaign)
}

/// All campaigns, newest first.
pub fn list_all(conn: &Connection) -> Result<Vec<Campaign>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC"
    ))?;
    let campaigns = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(campaigns)
}

/// A brand's own campaigns, newest first.
pub fn list_by_company(conn: &Connection, company: &str) -> Result<Vec<Campaign>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM campaigns WHERE company = ?1 ORDER BY created_at DESC"
    ))?;
    let campaigns = stmt
        .query_map([company], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(campaigns)
}

/// Bump the applicant counter. Returns false when the campaign is missing.
pub fn increment_applicants(conn: &Connection, id: &str) -> Result<bool, StoreError> {
    let affected = conn.execute(
        "UPDATE campaigns SET num_applicants = num_applicants + 1 WHERE id = ?1",
        [id],
    )?;
    Ok(affected > 0)
}

const COLUMNS: &str = "id, title, company, description, points, kind, num_applicants, \
                       end_date, status, created_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    let kind_str: String = row.get(5)?;
    let kind = SubmissionKind::from_str(&kind_str)
        .ok_or_else(|| bad_column(5, format!("unknown campaign kind: {kind_str}")))?;

    let status_str: String = row.get(8)?;
    let status = CampaignStatus::from_str(&status_str)
        .ok_or_else(|| bad_column(8, format!("unknown campaign status: {status_str}")))?;

    let end_date: Option<String> = row.get(7)?;

    Ok(Campaign {
        id: row.get(0)?,
        title: row.get(1)?,
        company: row.get(2)?,
        description: row.get(3)?,
        points: row.get(4)?,
        kind,
        num_applicants: row.get(6)?,
        end_date: end_date.as_deref().and_then(parse_date),
        status,
        created_at: row.get(9)?,
    })
}

//! Campaign listing and authoring commands

use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use tokenverse::domain::SubmissionKind;
use tokenverse::ledger::CampaignDraft;

use super::open_app;

/// List campaigns, newest first
pub async fn campaigns_command(config: Option<&Path>, mine: bool) -> Result<()> {
    let app = open_app(config)?;

    let campaigns = if mine {
        let user = app.current_user()?;
        app.ledger.campaigns_for_company(&user.name)?
    } else {
        app.ledger.campaigns()?
    };

    if campaigns.is_empty() {
        println!("No campaigns found.");
        return Ok(());
    }

    println!("Campaigns ({}):\n", campaigns.len());
    for campaign in campaigns {
        println!(
            "  {} [{}] {} by {} - {} points",
            campaign.id, campaign.status, campaign.title, campaign.company, campaign.points
        );
        println!(
            "    kind: {}, applicants: {}, ends: {}",
            campaign.kind,
            campaign.num_applicants,
            campaign
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string())
        );
        println!("    {}", campaign.description);
        println!();
    }

    Ok(())
}

/// Launch a new campaign owned by the acting brand
pub async fn create_command(
    config: Option<&Path>,
    title: &str,
    description: &str,
    points: i64,
    kind: &str,
    end_date: &str,
) -> Result<()> {
    let Some(kind) = SubmissionKind::from_str(kind) else {
        bail!("Unknown campaign kind: {kind} (expected photo, video or text)");
    };
    let Ok(end_date) = NaiveDate::parse_from_str(end_date, "%Y-%m-%d") else {
        bail!("Invalid end date: {end_date} (expected YYYY-MM-DD)");
    };

    let app = open_app(config)?;
    let user = app.current_user()?;

    let campaign = app.ledger.create_campaign(
        &user,
        CampaignDraft {
            title: title.to_string(),
            description: description.to_string(),
            points,
            kind,
            end_date,
        },
    )?;

    println!("Campaign {} is now live!", campaign.id);
    Ok(())
}

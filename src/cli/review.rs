//! Moderation commands: the review queue and decisions

use std::path::Path;

use anyhow::{Result, bail};
use chrono::DateTime;

use tokenverse::domain::{Decision, Role};

use super::open_app;

/// List submissions: a brand's review queue, or a user's own entries
pub async fn submissions_command(config: Option<&Path>, all: bool) -> Result<()> {
    let app = open_app(config)?;
    let user = app.current_user()?;

    let submissions = match user.role {
        Role::Brand => app.ledger.submissions_for_brand(&user, !all)?,
        Role::User => app.ledger.my_submissions(&user)?,
    };
    if submissions.is_empty() {
        if user.role == Role::Brand && !all {
            println!("No pending submissions.");
        } else {
            println!("No submissions yet.");
        }
        return Ok(());
    }

    println!("Submissions ({}):\n", submissions.len());
    for submission in submissions {
        println!(
            "  {} [{}] campaign {} by {}",
            submission.id, submission.status, submission.campaign_id, submission.user_id
        );
        println!("    {}", submission.content);
        for (label, link) in [
            ("instagram", &submission.links.instagram),
            ("facebook", &submission.links.facebook),
            ("youtube", &submission.links.youtube),
            ("x", &submission.links.x),
            ("linkedin", &submission.links.linkedin),
        ] {
            if let Some(url) = link {
                println!("    {label}: {url}");
            }
        }
        if let Some(url) = &submission.attachment_url {
            println!("    attachment: {url}");
        }
        if let Some(ts) = submission.reviewed_at {
            if let Some(when) = DateTime::from_timestamp_millis(ts) {
                println!("    reviewed {}", when.format("%Y-%m-%d %H:%M"));
            }
        }
        println!();
    }

    Ok(())
}

/// Decide on a pending submission
pub async fn review_command(
    config: Option<&Path>,
    submission_id: &str,
    approve: bool,
    reject: bool,
) -> Result<()> {
    let decision = match (approve, reject) {
        (true, false) => Decision::Approve,
        (false, true) => Decision::Reject,
        _ => bail!("Pass exactly one of --approve or --reject"),
    };

    let app = open_app(config)?;
    let user = app.current_user()?;

    let reviewed = app.ledger.moderate(&user, submission_id, decision)?;
    println!("Submission {} is now {}.", reviewed.id, reviewed.status);
    Ok(())
}

//! Submit command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use tokenverse::domain::SocialLinks;
use tokenverse::ledger::SubmissionDraft;
use tokenverse::storage::ObjectStore;

use super::open_app;

/// Enter a campaign with content, social links and an optional attachment
pub async fn submit_command(
    config: Option<&Path>,
    campaign_id: &str,
    content: &str,
    links: SocialLinks,
    attachment: Option<&Path>,
) -> Result<()> {
    let app = open_app(config)?;
    let user = app.current_user()?;

    let attachment_url = match attachment {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read attachment: {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("attachment");

            let objects = ObjectStore::new(
                app.config.attachment_dir(),
                app.config.settings.attachment_base_url.clone(),
            );
            Some(objects.store_attachment(campaign_id, file_name, &bytes)?)
        }
        None => None,
    };

    let outcome = app.ledger.submit(
        &user,
        campaign_id,
        SubmissionDraft {
            content: content.to_string(),
            links,
            attachment_url,
        },
        Utc::now().date_naive(),
    )?;

    println!(
        "Submission {} sent for review.",
        outcome.submission.id
    );
    println!(
        "Streak: {} day(s) - rank {}",
        outcome.streak, outcome.rank.name
    );
    Ok(())
}

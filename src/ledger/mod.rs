//! The engagement ledger
//!
//! Owns every balance, streak and submission-state rule: entering a
//! campaign, moderating an entry, crediting purchased tokens and the
//! notification fan-out that follows. All multi-step updates run inside a
//! single store transaction, and every committed write is announced on the
//! change feed after the transaction lands.

mod error;

pub use error::LedgerError;

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    Campaign, CampaignStatus, Decision, Notification, Rank, Role, SocialLinks, Submission,
    SubmissionKind, SubmissionStatus, User, advance_streak,
};
use crate::feed::{ChangeEvent, ChangeOp, Table};
use crate::store::{Store, campaigns, notifications, now_ms, submissions, token_credits, users};

/// Fields a brand fills in to launch a campaign
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub points: i64,
    pub kind: SubmissionKind,
    pub end_date: NaiveDate,
}

/// Fields a user fills in to enter a campaign
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub content: String,
    pub links: SocialLinks,
    pub attachment_url: Option<String>,
}

/// What a successful entry produced
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub submission: Submission,
    pub streak: u32,
    pub rank: &'static Rank,
}

/// The engagement core, layered over the record store
#[derive(Clone)]
pub struct Ledger {
    store: Store,
}

impl Ledger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ========================================
    // CAMPAIGNS
    // ========================================

    /// Launch a new campaign owned by the acting brand.
    pub fn create_campaign(
        &self,
        actor: &User,
        draft: CampaignDraft,
    ) -> Result<Campaign, LedgerError> {
        if actor.role != Role::Brand {
            return Err(LedgerError::Forbidden(
                "only brands can create campaigns".to_string(),
            ));
        }
        if draft.title.trim().is_empty() {
            return Err(LedgerError::Validation(
                "a campaign title is required".to_string(),
            ));
        }
        if draft.description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "a campaign description is required".to_string(),
            ));
        }
        if draft.points <= 0 {
            return Err(LedgerError::Validation(
                "the point reward must be positive".to_string(),
            ));
        }

        let campaign = Campaign {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            company: actor.name.clone(),
            description: draft.description.trim().to_string(),
            points: draft.points,
            kind: draft.kind,
            num_applicants: 0,
            end_date: Some(draft.end_date),
            status: CampaignStatus::Active,
            created_at: now_ms(),
        };

        {
            let conn = self.store.conn();
            campaigns::insert(&conn, &campaign)?;
        }
        self.publish(Table::Campaigns, ChangeOp::Insert, &campaign.id);

        info!(
            campaign = %campaign.id,
            company = %campaign.company,
            "campaign created"
        );
        Ok(campaign)
    }

    /// All campaigns, newest first.
    pub fn campaigns(&self) -> Result<Vec<Campaign>, LedgerError> {
        let conn = self.store.conn();
        Ok(campaigns::list_all(&conn)?)
    }

    /// Campaigns owned by one brand, newest first.
    pub fn campaigns_for_company(&self, company: &str) -> Result<Vec<Campaign>, LedgerError> {
        let conn = self.store.conn();
        Ok(campaigns::list_by_company(&conn, company)?)
    }

    // ========================================
    // SUBMISSIONS
    // ========================================

    /// Enter a campaign.
    ///
    /// Validates the draft, then applies the streak update, inserts the
    /// pending submission and bumps the campaign's applicant count inside
    /// one transaction, so a crash cannot leave the streak credited
    /// without its submission.
    pub fn submit(
        &self,
        actor: &User,
        campaign_id: &str,
        draft: SubmissionDraft,
        today: NaiveDate,
    ) -> Result<SubmissionOutcome, LedgerError> {
        if actor.role != Role::User {
            return Err(LedgerError::Forbidden(
                "only users can enter campaigns".to_string(),
            ));
        }

        let content = draft.content.trim();
        if content.is_empty() {
            return Err(LedgerError::Validation(
                "a submission description is required".to_string(),
            ));
        }
        if !draft.links.has_any() {
            return Err(LedgerError::Validation(
                "at least one social media link is required".to_string(),
            ));
        }

        let (submission, update) = {
            let mut conn = self.store.conn();
            let tx = conn.transaction().map_err(LedgerError::from)?;

            let campaign =
                campaigns::get(&tx, campaign_id)?.ok_or_else(|| LedgerError::NotFound {
                    kind: "campaign",
                    id: campaign_id.to_string(),
                })?;
            if !campaign.is_open_on(today) {
                return Err(LedgerError::Validation(
                    "this campaign has ended".to_string(),
                ));
            }

            // Re-read the submitter inside the transaction; the streak
            // update must compute from the stored state, not the session's
            // possibly stale copy.
            let stored = users::get(&tx, &actor.id)?.ok_or_else(|| LedgerError::NotFound {
                kind: "user",
                id: actor.id.clone(),
            })?;

            let prior = stored.streak.max(0) as u32;
            let update = advance_streak(prior, stored.last_submission_date, today);
            if update.changed || prior != update.streak {
                users::update_streak(&tx, &stored.id, update.streak, update.last_submission_date)?;
            }

            let submission = Submission {
                id: Uuid::new_v4().to_string(),
                campaign_id: campaign.id.clone(),
                user_id: stored.id.clone(),
                content: content.to_string(),
                kind: campaign.kind,
                links: draft.links,
                attachment_url: draft.attachment_url,
                status: SubmissionStatus::Pending,
                created_at: now_ms(),
                reviewed_at: None,
            };
            submissions::insert(&tx, &submission)?;
            campaigns::increment_applicants(&tx, &campaign.id)?;

            tx.commit().map_err(LedgerError::from)?;
            (submission, update)
        };

        self.publish(Table::Submissions, ChangeOp::Insert, &submission.id);
        self.publish(Table::Campaigns, ChangeOp::Update, &submission.campaign_id);
        if update.changed {
            self.publish(Table::Users, ChangeOp::Update, &actor.id);
        }

        info!(
            submission = %submission.id,
            campaign = %submission.campaign_id,
            streak = update.streak,
            "submission created"
        );
        Ok(SubmissionOutcome {
            submission,
            streak: update.streak,
            rank: Rank::for_streak(update.streak),
        })
    }

    /// Approve or reject a pending submission.
    ///
    /// Only the brand owning the campaign may decide. The status flip is
    /// conditional on the row still being pending, so the second of two
    /// racing moderators gets `InvalidTransition` instead of overwriting
    /// the first decision. Approval flips status and notifies the
    /// submitter; it does not move the campaign's point reward into the
    /// user's balance.
    pub fn moderate(
        &self,
        actor: &User,
        submission_id: &str,
        decision: Decision,
    ) -> Result<Submission, LedgerError> {
        if actor.role != Role::Brand {
            return Err(LedgerError::Forbidden(
                "only brands can review submissions".to_string(),
            ));
        }

        let (reviewed, note_id) = {
            let mut conn = self.store.conn();
            let tx = conn.transaction().map_err(LedgerError::from)?;

            let submission =
                submissions::get(&tx, submission_id)?.ok_or_else(|| LedgerError::NotFound {
                    kind: "submission",
                    id: submission_id.to_string(),
                })?;
            let campaign =
                campaigns::get(&tx, &submission.campaign_id)?.ok_or_else(|| {
                    LedgerError::NotFound {
                        kind: "campaign",
                        id: submission.campaign_id.clone(),
                    }
                })?;
            if campaign.company != actor.name {
                return Err(LedgerError::Forbidden(
                    "this submission belongs to another brand's campaign".to_string(),
                ));
            }

            let reviewed_at = now_ms();
            let status = decision.status();
            if !submissions::mark_reviewed(&tx, submission_id, status, reviewed_at)? {
                return Err(LedgerError::InvalidTransition {
                    id: submission_id.to_string(),
                    status: submission.status,
                });
            }

            let note = outcome_notification(&submission, &campaign, decision, reviewed_at);
            notifications::insert(&tx, &note)?;

            tx.commit().map_err(LedgerError::from)?;

            let reviewed = Submission {
                status,
                reviewed_at: Some(reviewed_at),
                ..submission
            };
            (reviewed, note.id)
        };

        self.publish(Table::Submissions, ChangeOp::Update, &reviewed.id);
        self.publish(Table::Notifications, ChangeOp::Insert, &note_id);

        info!(
            submission = %reviewed.id,
            status = %reviewed.status,
            "submission reviewed"
        );
        Ok(reviewed)
    }

    /// Entries against the acting brand's campaigns.
    pub fn submissions_for_brand(
        &self,
        actor: &User,
        pending_only: bool,
    ) -> Result<Vec<Submission>, LedgerError> {
        if actor.role != Role::Brand {
            return Err(LedgerError::Forbidden(
                "only brands have a review queue".to_string(),
            ));
        }
        let conn = self.store.conn();
        Ok(submissions::list_for_company(
            &conn,
            &actor.name,
            pending_only,
        )?)
    }

    /// The acting user's own entries.
    pub fn my_submissions(&self, actor: &User) -> Result<Vec<Submission>, LedgerError> {
        let conn = self.store.conn();
        Ok(submissions::list_for_user(&conn, &actor.id)?)
    }

    // ========================================
    // TOKENS
    // ========================================

    /// Credit purchased tokens after a confirmed payment.
    ///
    /// `tx_hash` is the idempotency key: each chain transaction credits at
    /// most once, so a retried confirmation cannot double-credit. Returns
    /// whether this call performed the credit.
    pub fn credit_tokens(
        &self,
        user_id: &str,
        amount: i64,
        tx_hash: &str,
    ) -> Result<bool, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::Validation(
                "the token amount must be positive".to_string(),
            ));
        }
        if tx_hash.trim().is_empty() {
            return Err(LedgerError::Validation(
                "a transaction hash is required".to_string(),
            ));
        }

        let credited = {
            let mut conn = self.store.conn();
            let tx = conn.transaction().map_err(LedgerError::from)?;

            let fresh = token_credits::try_insert(&tx, tx_hash, user_id, amount, now_ms())?;
            if fresh && !users::add_tokens(&tx, user_id, amount)? {
                return Err(LedgerError::NotFound {
                    kind: "user",
                    id: user_id.to_string(),
                });
            }

            tx.commit().map_err(LedgerError::from)?;
            fresh
        };

        if credited {
            self.publish(Table::Users, ChangeOp::Update, user_id);
            info!(user = %user_id, amount, tx = %tx_hash, "tokens credited");
        } else {
            debug!(tx = %tx_hash, "transaction already credited; skipping");
        }
        Ok(credited)
    }

    /// Remember the wallet address an account pays from.
    pub fn link_wallet(&self, user_id: &str, address: &str) -> Result<(), LedgerError> {
        {
            let conn = self.store.conn();
            users::set_wallet(&conn, user_id, address)?;
        }
        self.publish(Table::Users, ChangeOp::Update, user_id);
        Ok(())
    }

    // ========================================
    // PROFILE & NOTIFICATIONS
    // ========================================

    /// The stored account row, refreshed from the store.
    pub fn profile(&self, user_id: &str) -> Result<User, LedgerError> {
        let conn = self.store.conn();
        users::get(&conn, user_id)?.ok_or_else(|| LedgerError::NotFound {
            kind: "user",
            id: user_id.to_string(),
        })
    }

    /// A user's notifications, newest first.
    pub fn notifications(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Notification>, LedgerError> {
        let conn = self.store.conn();
        Ok(notifications::list_for_user(&conn, user_id, limit)?)
    }

    pub fn unread_notifications(&self, user_id: &str) -> Result<i64, LedgerError> {
        let conn = self.store.conn();
        Ok(notifications::unread_count(&conn, user_id)?)
    }

    /// Mark all of one user's notifications read. Returns how many flipped.
    pub fn mark_notifications_read(&self, user_id: &str) -> Result<usize, LedgerError> {
        let conn = self.store.conn();
        Ok(notifications::mark_all_read(&conn, user_id)?)
    }

    fn publish(&self, table: Table, op: ChangeOp, row_id: &str) {
        self.store.feed().publish(ChangeEvent {
            table,
            op,
            row_id: row_id.to_string(),
        });
    }
}

/// Build the notification a moderation decision sends to the submitter.
fn outcome_notification(
    submission: &Submission,
    campaign: &Campaign,
    decision: Decision,
    created_at: i64,
) -> Notification {
    let (title, message) = match decision {
        Decision::Approve => (
            "Submission approved".to_string(),
            format!(
                "Your entry for \"{}\" was approved by {}.",
                campaign.title, campaign.company
            ),
        ),
        Decision::Reject => (
            "Submission rejected".to_string(),
            format!("Your entry for \"{}\" was not accepted.", campaign.title),
        ),
    };

    Notification {
        id: Uuid::new_v4().to_string(),
        user_id: submission.user_id.clone(),
        title,
        message,
        is_read: false,
        created_at,
    }
}

//! Core domain types for Tokenverse

mod campaign;
mod notification;
mod rank;
mod streak;
mod submission;
mod user;

pub use campaign::{Campaign, CampaignStatus, SubmissionKind};
pub use notification::Notification;
pub use rank::{RANKS, Rank};
pub use streak::{StreakUpdate, advance_streak};
pub use submission::{Decision, SocialLinks, Submission, SubmissionStatus};
pub use user::{Role, User};

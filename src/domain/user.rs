use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Rank;

/// Account role deciding which operations an actor may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Completes campaigns and earns points
    User,
    /// Authors campaigns and moderates submissions
    Brand,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Brand => "brand",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "brand" => Some(Role::Brand),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account
///
/// Credentials are not part of the domain record; the store keeps the
/// password hash alongside the row and only the identity layer reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Sign-in email (unique)
    pub email: String,

    /// Display name; for brands this is also the campaign owner key
    pub name: String,

    /// Account role
    pub role: Role,

    /// Campaign point balance
    pub points: i64,

    /// Purchased/redeemable token balance
    pub tokens_earned: i64,

    /// Consecutive-day submission streak
    pub streak: i64,

    /// Calendar day of the most recent streak credit
    pub last_submission_date: Option<NaiveDate>,

    /// Connected wallet address, recorded on first purchase
    pub wallet: Option<String>,

    /// When the account was created (UNIX millis)
    pub created_at: i64,
}

impl User {
    /// Current rank tier derived from the streak
    pub fn rank(&self) -> &'static Rank {
        Rank::for_streak(self.streak.max(0) as u32)
    }
}

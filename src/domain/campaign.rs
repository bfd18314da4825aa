use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What kind of content a campaign asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Photo,
    Video,
    Text,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Photo => "photo",
            SubmissionKind::Video => "video",
            SubmissionKind::Text => "text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "photo" => Some(SubmissionKind::Photo),
            "video" => Some(SubmissionKind::Video),
            "text" => Some(SubmissionKind::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a campaign still accepts entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Closed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CampaignStatus::Active),
            "closed" => Some(CampaignStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A brand-authored task carrying a point reward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique identifier
    pub id: String,

    /// Campaign headline shown to users
    pub title: String,

    /// Display name of the owning brand
    pub company: String,

    /// What participants are asked to do
    pub description: String,

    /// Point reward for an approved entry
    pub points: i64,

    /// Requested content kind
    pub kind: SubmissionKind,

    /// How many submissions have been made against this campaign
    pub num_applicants: i64,

    /// Last calendar day on which entries are accepted
    pub end_date: Option<NaiveDate>,

    /// Current lifecycle status
    pub status: CampaignStatus,

    /// When the campaign was created (UNIX millis)
    pub created_at: i64,
}

impl Campaign {
    /// Whether entries are accepted on the given calendar day
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.status == CampaignStatus::Active && self.end_date.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(end: Option<NaiveDate>, status: CampaignStatus) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            title: "Share Your Coffee Moment".to_string(),
            company: "Acme".to_string(),
            description: "Post a photo".to_string(),
            points: 50,
            kind: SubmissionKind::Photo,
            num_applicants: 0,
            end_date: end,
            status,
            created_at: 0,
        }
    }

    #[test]
    fn test_open_until_end_date_inclusive() {
        let end = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let c = campaign(Some(end), CampaignStatus::Active);

        assert!(c.is_open_on(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()));
        assert!(!c.is_open_on(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()));
    }

    #[test]
    fn test_no_end_date_stays_open() {
        let c = campaign(None, CampaignStatus::Active);
        assert!(c.is_open_on(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn test_closed_campaign_rejects_entries() {
        let c = campaign(None, CampaignStatus::Closed);
        assert!(!c.is_open_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    }
}

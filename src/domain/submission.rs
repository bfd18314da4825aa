use serde::{Deserialize, Serialize};

use super::SubmissionKind;

/// The status of a submission
///
/// `Pending` is the only non-terminal state; once a submission is approved
/// or rejected it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Waiting for the brand's review
    Pending,
    /// Accepted by the brand
    Approved,
    /// Declined by the brand
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SubmissionStatus::Pending),
            "approved" => Some(SubmissionStatus::Approved),
            "rejected" => Some(SubmissionStatus::Rejected),
            _ => None,
        }
    }

    /// Whether the submission can no longer be moderated
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Approved | SubmissionStatus::Rejected)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A brand's verdict on a pending submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// The terminal status this decision moves a submission to
    pub fn status(&self) -> SubmissionStatus {
        match self {
            Decision::Approve => SubmissionStatus::Approved,
            Decision::Reject => SubmissionStatus::Rejected,
        }
    }
}

/// Social-platform links attached to a submission
///
/// A valid submission carries at least one non-blank link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub x: Option<String>,
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// Whether at least one link is present and non-blank
    pub fn has_any(&self) -> bool {
        [
            &self.instagram,
            &self.facebook,
            &self.youtube,
            &self.x,
            &self.linkedin,
        ]
        .into_iter()
        .any(|l| l.as_deref().map_or(false, |s| !s.trim().is_empty()))
    }
}

/// A user's entry into a campaign, subject to brand moderation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier
    pub id: String,

    /// The campaign this entry answers
    pub campaign_id: String,

    /// The submitting user
    pub user_id: String,

    /// Free-text description of the entry
    pub content: String,

    /// Content kind, copied from the campaign at creation time
    pub kind: SubmissionKind,

    /// Social links backing the entry
    pub links: SocialLinks,

    /// Public URL of an uploaded attachment, if any
    pub attachment_url: Option<String>,

    /// Current lifecycle status
    pub status: SubmissionStatus,

    /// When the entry was created (UNIX millis)
    pub created_at: i64,

    /// When the entry was approved or rejected (UNIX millis)
    pub reviewed_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_has_any() {
        assert!(!SocialLinks::default().has_any());

        let blank = SocialLinks {
            instagram: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!blank.has_any());

        let one = SocialLinks {
            x: Some("https://x.com/someone".to_string()),
            ..Default::default()
        };
        assert!(one.has_any());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(SubmissionStatus::Approved.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
        ] {
            assert_eq!(SubmissionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(SubmissionStatus::from_str("deleted"), None);
    }
}

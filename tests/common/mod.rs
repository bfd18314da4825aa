//! Shared fixtures for integration tests

use chrono::NaiveDate;
use tempfile::TempDir;

use tokenverse::auth::Identity;
use tokenverse::domain::{Campaign, Role, SocialLinks, SubmissionKind, User};
use tokenverse::ledger::{CampaignDraft, Ledger, SubmissionDraft};
use tokenverse::store::Store;

/// A store, ledger and identity wired to a temp directory
pub struct TestApp {
    _dir: TempDir,
    pub store: Store,
    pub ledger: Ledger,
    pub identity: Identity,
}

pub fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("store.db")).unwrap();
    let ledger = Ledger::new(store.clone());
    let identity = Identity::new(store.clone(), dir.path().join("session"));
    TestApp {
        _dir: dir,
        store,
        ledger,
        identity,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A draft that passes validation: content plus one social link
pub fn valid_draft() -> SubmissionDraft {
    SubmissionDraft {
        content: "My coffee moment".to_string(),
        links: SocialLinks {
            instagram: Some("https://instagram.com/someone".to_string()),
            ..Default::default()
        },
        attachment_url: None,
    }
}

impl TestApp {
    pub fn signup_user(&self, email: &str, name: &str) -> User {
        self.identity
            .sign_up(email, "correct-horse-battery", Role::User, name)
            .unwrap()
    }

    pub fn signup_brand(&self, email: &str, name: &str) -> User {
        self.identity
            .sign_up(email, "correct-horse-battery", Role::Brand, name)
            .unwrap()
    }

    pub fn create_campaign(&self, brand: &User, title: &str, points: i64) -> Campaign {
        self.ledger
            .create_campaign(
                brand,
                CampaignDraft {
                    title: title.to_string(),
                    description: "Show us your best moment".to_string(),
                    points,
                    kind: SubmissionKind::Photo,
                    end_date: day(2099, 12, 31),
                },
            )
            .unwrap()
    }
}

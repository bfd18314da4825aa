//! End-to-end tests for the submission/streak/moderation flow

mod common;

use common::{day, test_app, valid_draft};

use tokenverse::domain::{Decision, SocialLinks, SubmissionStatus};
use tokenverse::ledger::{LedgerError, SubmissionDraft};

#[test]
fn test_submit_creates_pending_entry_and_starts_streak() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();

    assert_eq!(outcome.submission.status, SubmissionStatus::Pending);
    assert_eq!(outcome.submission.campaign_id, campaign.id);
    assert!(outcome.submission.reviewed_at.is_none());
    assert_eq!(outcome.streak, 1);
    assert_eq!(outcome.rank.name, "Bronze 1");

    let profile = app.ledger.profile(&user.id).unwrap();
    assert_eq!(profile.streak, 1);
    assert_eq!(profile.last_submission_date, Some(day(2024, 1, 1)));

    let refreshed = app.ledger.campaigns().unwrap();
    assert_eq!(refreshed[0].num_applicants, 1);

    let mine = app.ledger.my_submissions(&user).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, outcome.submission.id);
}

#[test]
fn test_streak_over_consecutive_days() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Daily Challenge", 25);

    for (date, expected) in [
        (day(2024, 1, 1), 1),
        (day(2024, 1, 2), 2),
        // same day again: no extra credit
        (day(2024, 1, 2), 2),
        (day(2024, 1, 3), 3),
        // three-day gap resets
        (day(2024, 1, 6), 1),
    ] {
        let outcome = app
            .ledger
            .submit(&user, &campaign.id, valid_draft(), date)
            .unwrap();
        assert_eq!(outcome.streak, expected, "streak after {date}");
    }

    let profile = app.ledger.profile(&user.id).unwrap();
    assert_eq!(profile.streak, 1);
    assert_eq!(profile.last_submission_date, Some(day(2024, 1, 6)));
}

#[test]
fn test_submit_rejects_blank_content() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let draft = SubmissionDraft {
        content: "   ".to_string(),
        ..valid_draft()
    };
    let err = app
        .ledger
        .submit(&user, &campaign.id, draft, day(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // Nothing was written: no streak credit, no applicant bump
    let profile = app.ledger.profile(&user.id).unwrap();
    assert_eq!(profile.streak, 0);
    assert_eq!(app.ledger.campaigns().unwrap()[0].num_applicants, 0);
}

#[test]
fn test_submit_rejects_missing_links() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let draft = SubmissionDraft {
        content: "My entry".to_string(),
        links: SocialLinks::default(),
        attachment_url: None,
    };
    let err = app
        .ledger
        .submit(&user, &campaign.id, draft, day(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    // Exactly one link is enough
    let draft = SubmissionDraft {
        content: "My entry".to_string(),
        links: SocialLinks {
            youtube: Some("https://youtube.com/c/someone".to_string()),
            ..Default::default()
        },
        attachment_url: None,
    };
    assert!(
        app.ledger
            .submit(&user, &campaign.id, draft, day(2024, 1, 1))
            .is_ok()
    );
}

#[test]
fn test_submit_requires_user_role() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let err = app
        .ledger
        .submit(&brand, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));
}

#[test]
fn test_submit_after_deadline_fails() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");

    let campaign = app
        .ledger
        .create_campaign(
            &brand,
            tokenverse::ledger::CampaignDraft {
                title: "Short Run".to_string(),
                description: "Quick campaign".to_string(),
                points: 10,
                kind: tokenverse::domain::SubmissionKind::Text,
                end_date: day(2024, 1, 31),
            },
        )
        .unwrap();

    // On the end date itself entries still count
    assert!(
        app.ledger
            .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 31))
            .is_ok()
    );

    let err = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 2, 1))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn test_submission_leaves_pending_exactly_once() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();

    let approved = app
        .ledger
        .moderate(&brand, &outcome.submission.id, Decision::Approve)
        .unwrap();
    assert_eq!(approved.status, SubmissionStatus::Approved);
    assert!(approved.reviewed_at.is_some());

    // A second decision fails and changes nothing
    let err = app
        .ledger
        .moderate(&brand, &outcome.submission.id, Decision::Reject)
        .unwrap_err();
    match err {
        LedgerError::InvalidTransition { status, .. } => {
            assert_eq!(status, SubmissionStatus::Approved);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    let queue = app.ledger.submissions_for_brand(&brand, false).unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].status, SubmissionStatus::Approved);
}

#[test]
fn test_rejection_is_terminal_too() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();
    let rejected = app
        .ledger
        .moderate(&brand, &outcome.submission.id, Decision::Reject)
        .unwrap();
    assert_eq!(rejected.status, SubmissionStatus::Rejected);

    let err = app
        .ledger
        .moderate(&brand, &outcome.submission.id, Decision::Approve)
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidTransition { .. }));
}

#[test]
fn test_moderation_requires_campaign_owner() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let other = app.signup_brand("rival@example.com", "Rival");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();

    let err = app
        .ledger
        .moderate(&other, &outcome.submission.id, Decision::Approve)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));

    let err = app
        .ledger
        .moderate(&user, &outcome.submission.id, Decision::Approve)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Forbidden(_)));
}

// Approval flips status and notifies, but the campaign reward does not
// move into the submitter's point balance.
#[test]
fn test_approval_does_not_credit_points() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let points_before = app.ledger.profile(&user.id).unwrap().points;
    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();
    app.ledger
        .moderate(&brand, &outcome.submission.id, Decision::Approve)
        .unwrap();

    assert_eq!(app.ledger.profile(&user.id).unwrap().points, points_before);
}

#[test]
fn test_moderation_notifies_submitter() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();
    app.ledger
        .moderate(&brand, &outcome.submission.id, Decision::Approve)
        .unwrap();

    assert_eq!(app.ledger.unread_notifications(&user.id).unwrap(), 1);
    let notes = app.ledger.notifications(&user.id, 10).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Submission approved");
    assert!(notes[0].message.contains("Coffee Moment"));

    // Bulk mark-read only touches this user's rows
    assert_eq!(app.ledger.mark_notifications_read(&user.id).unwrap(), 1);
    assert_eq!(app.ledger.unread_notifications(&user.id).unwrap(), 0);
    assert_eq!(app.ledger.mark_notifications_read(&user.id).unwrap(), 0);
}

#[test]
fn test_campaign_validation() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");

    let draft = |title: &str, points: i64| tokenverse::ledger::CampaignDraft {
        title: title.to_string(),
        description: "desc".to_string(),
        points,
        kind: tokenverse::domain::SubmissionKind::Photo,
        end_date: day(2099, 1, 1),
    };

    assert!(matches!(
        app.ledger.create_campaign(&brand, draft("", 50)),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        app.ledger.create_campaign(&brand, draft("Title", 0)),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        app.ledger.create_campaign(&user, draft("Title", 50)),
        Err(LedgerError::Forbidden(_))
    ));
}

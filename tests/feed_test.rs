//! Change feed delivery tests

mod common;

use std::time::Duration;

use common::{day, test_app, valid_draft};

use tokenverse::domain::Decision;
use tokenverse::feed::{ChangeOp, StorePoller, Table};
use tokenverse::ledger::Ledger;
use tokenverse::store::Store;

#[test]
fn test_submit_publishes_events() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);

    let submissions_rx = app.store.subscribe(Some(Table::Submissions));
    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();

    let event = submissions_rx.try_recv().unwrap();
    assert_eq!(event.op, ChangeOp::Insert);
    assert_eq!(event.row_id, outcome.submission.id);
}

#[test]
fn test_moderation_publishes_update_and_notification() {
    let app = test_app();
    let brand = app.signup_brand("acme@example.com", "Acme");
    let user = app.signup_user("ada@example.com", "Ada");
    let campaign = app.create_campaign(&brand, "Coffee Moment", 50);
    let outcome = app
        .ledger
        .submit(&user, &campaign.id, valid_draft(), day(2024, 1, 1))
        .unwrap();

    let all_rx = app.store.subscribe(None);
    app.ledger
        .moderate(&brand, &outcome.submission.id, Decision::Approve)
        .unwrap();

    let first = all_rx.try_recv().unwrap();
    assert_eq!(first.table, Table::Submissions);
    assert_eq!(first.op, ChangeOp::Update);
    assert_eq!(first.row_id, outcome.submission.id);

    let second = all_rx.try_recv().unwrap();
    assert_eq!(second.table, Table::Notifications);
    assert_eq!(second.op, ChangeOp::Insert);
}

// A second process writing the same database file is only visible through
// the poller bridge.
#[test]
fn test_poller_surfaces_foreign_commits() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("store.db");

    let writer_store = Store::open(&db_path).unwrap();
    let writer_ledger = Ledger::new(writer_store.clone());
    let writer_identity = tokenverse::auth::Identity::new(
        writer_store.clone(),
        dir.path().join("writer-session"),
    );

    let watcher_store = Store::open(&db_path).unwrap();
    let campaigns_rx = watcher_store.subscribe(Some(Table::Campaigns));
    let poller = StorePoller::spawn(watcher_store.clone(), Duration::from_millis(100));

    // Give the poller its starting high-water mark before writing
    std::thread::sleep(Duration::from_millis(50));

    let brand = writer_identity
        .sign_up(
            "acme@example.com",
            "correct-horse-battery",
            tokenverse::domain::Role::Brand,
            "Acme",
        )
        .unwrap();
    let campaign = writer_ledger
        .create_campaign(
            &brand,
            tokenverse::ledger::CampaignDraft {
                title: "Cross-process".to_string(),
                description: "Seen through the poller".to_string(),
                points: 10,
                kind: tokenverse::domain::SubmissionKind::Text,
                end_date: day(2099, 1, 1),
            },
        )
        .unwrap();

    let event = campaigns_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("poller should surface the foreign insert");
    assert_eq!(event.table, Table::Campaigns);
    assert_eq!(event.row_id, campaign.id);

    poller.stop();
}

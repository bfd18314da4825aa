//! Tests for token purchase crediting

mod common;

use common::test_app;

use tokenverse::ledger::LedgerError;

#[test]
fn test_credit_increases_balance_once() {
    let app = test_app();
    let user = app.signup_user("ada@example.com", "Ada");
    let before = app.ledger.profile(&user.id).unwrap().tokens_earned;

    let credited = app.ledger.credit_tokens(&user.id, 250, "0xabc123").unwrap();
    assert!(credited);
    assert_eq!(
        app.ledger.profile(&user.id).unwrap().tokens_earned,
        before + 250
    );
}

// A replayed payment confirmation must not double-credit.
#[test]
fn test_duplicate_tx_hash_is_ignored() {
    let app = test_app();
    let user = app.signup_user("ada@example.com", "Ada");

    assert!(app.ledger.credit_tokens(&user.id, 100, "0xdeadbeef").unwrap());
    let balance = app.ledger.profile(&user.id).unwrap().tokens_earned;

    assert!(!app.ledger.credit_tokens(&user.id, 100, "0xdeadbeef").unwrap());
    assert_eq!(app.ledger.profile(&user.id).unwrap().tokens_earned, balance);

    // A different transaction credits again
    assert!(app.ledger.credit_tokens(&user.id, 100, "0xfeedface").unwrap());
    assert_eq!(
        app.ledger.profile(&user.id).unwrap().tokens_earned,
        balance + 100
    );
}

#[test]
fn test_credit_validates_inputs() {
    let app = test_app();
    let user = app.signup_user("ada@example.com", "Ada");

    assert!(matches!(
        app.ledger.credit_tokens(&user.id, 0, "0xabc"),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        app.ledger.credit_tokens(&user.id, -5, "0xabc"),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        app.ledger.credit_tokens(&user.id, 10, "  "),
        Err(LedgerError::Validation(_))
    ));
}

#[test]
fn test_credit_unknown_user_fails_without_recording() {
    let app = test_app();

    assert!(matches!(
        app.ledger.credit_tokens("missing", 10, "0xabc"),
        Err(LedgerError::NotFound { .. })
    ));

    // The failed credit did not burn the idempotency key
    let user = app.signup_user("ada@example.com", "Ada");
    assert!(app.ledger.credit_tokens(&user.id, 10, "0xabc").unwrap());
}

#[test]
fn test_link_wallet() {
    let app = test_app();
    let user = app.signup_user("ada@example.com", "Ada");
    assert!(app.ledger.profile(&user.id).unwrap().wallet.is_none());

    app.ledger
        .link_wallet(&user.id, "0x71F7E3701D8cf8719B69d51b7AeC0409210b6617")
        .unwrap();
    assert_eq!(
        app.ledger.profile(&user.id).unwrap().wallet.as_deref(),
        Some("0x71F7E3701D8cf8719B69d51b7AeC0409210b6617")
    );
}

//! Integration tests for the custody transfer workflow.

mod helpers;

use std::time::Duration;

use helpers::{G1, G2, OWNER, TestApp, U1, U2, U3};
use unitrack_core::ErrorKind;
use unitrack_service::{Decision, TransferKey, TransferOutcome};

#[tokio::test]
async fn test_accept_moves_custody() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Mini").await;

    let requester = app.ctx(G1, U1).await;
    let pending = app
        .transfers
        .request(&requester, 2, U2)
        .await
        .expect("request");
    assert_eq!(pending.from, U1);
    assert_eq!(pending.to, U2);
    assert_eq!(app.pending.len(), 1);

    let recipient = app.ctx(G1, U2).await;
    let outcome = app
        .transfers
        .resolve(&recipient, 2, Decision::Accept, Some(pending.id))
        .await
        .expect("accept");

    match outcome {
        TransferOutcome::Committed { unicycle, .. } => assert_eq!(unicycle.custodian, U2),
        other => panic!("expected commit, got {other:?}"),
    }
    let stored = app.reload(G1, 2).await.expect("stored");
    assert_eq!(stored.custodian, U2);
    assert_eq!(stored.owner, unitrack_entity::Ownership::Member(U1));
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_decline_leaves_custody() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    let recipient = app.ctx(G1, U2).await;
    let outcome = app
        .transfers
        .resolve(&recipient, 1, Decision::Decline, None)
        .await
        .expect("decline");

    assert!(matches!(outcome, TransferOutcome::Declined { .. }));
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U1);
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_stranger_request_creates_nothing() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let stranger = app.ctx(G1, U3).await;
    let err = app
        .transfers
        .request(&stranger, 1, U3)
        .await
        .expect_err("not custodian");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_admin_can_request_for_others() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let admin = app.ctx(G1, OWNER).await;
    let pending = app.transfers.request(&admin, 1, U2).await.expect("request");
    assert_eq!(pending.from, OWNER);
}

#[tokio::test]
async fn test_request_to_current_custodian_is_rejected() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let requester = app.ctx(G1, U1).await;
    let err = app
        .transfers
        .request(&requester, 1, U1)
        .await
        .expect_err("already custodian");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_request_for_missing_unicycle() {
    let app = TestApp::new().await;
    let requester = app.ctx(G1, U1).await;
    let err = app
        .transfers
        .request(&requester, 7, U2)
        .await
        .expect_err("missing");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_resolving_twice_reports_absence() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    let recipient = app.ctx(G1, U2).await;
    app.transfers
        .resolve(&recipient, 1, Decision::Accept, None)
        .await
        .expect("first accept");

    let err = app
        .transfers
        .resolve(&recipient, 1, Decision::Decline, None)
        .await
        .expect_err("second resolve");
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U2);
}

#[tokio::test]
async fn test_wrong_actor_cannot_resolve() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    let bystander = app.ctx(G1, U3).await;
    let err = app
        .transfers
        .resolve(&bystander, 1, Decision::Accept, None)
        .await
        .expect_err("not recipient");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(app.pending.len(), 1);
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U1);

    let err = app
        .transfers
        .resolve(&requester, 1, Decision::Accept, None)
        .await
        .expect_err("requester is not recipient");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_admin_can_resolve_on_behalf_of_recipient() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    let admin = app.ctx(G1, OWNER).await;
    app.transfers
        .resolve(&admin, 1, Decision::Accept, None)
        .await
        .expect("admin accepts");
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U2);
}

#[tokio::test]
async fn test_expired_transfer_behaves_as_absent() {
    let app = TestApp::with_transfer_ttl(Duration::from_millis(50)).await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    tokio::time::sleep(Duration::from_millis(100)).await;

    let recipient = app.ctx(G1, U2).await;
    let err = app
        .transfers
        .resolve(&recipient, 1, Decision::Accept, None)
        .await
        .expect_err("expired");
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "There is no pending transfer for unicycle #1.");
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U1);
}

#[tokio::test]
async fn test_last_request_wins() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;

    let first = app.transfers.request(&requester, 1, U2).await.expect("first");
    let second = app.transfers.request(&requester, 1, U3).await.expect("second");
    assert_eq!(app.pending.len(), 1);

    let u2 = app.ctx(G1, U2).await;
    let err = app
        .transfers
        .resolve(&u2, 1, Decision::Accept, Some(first.id))
        .await
        .expect_err("superseded");
    assert_eq!(err.kind, ErrorKind::NotFound);

    let u3 = app.ctx(G1, U3).await;
    app.transfers
        .resolve(&u3, 1, Decision::Accept, Some(second.id))
        .await
        .expect("newest request");
    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U3);
}

#[tokio::test]
async fn test_same_number_in_two_guilds_is_independent() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G2, U1, "Big Wheel").await;

    let in_g1 = app.ctx(G1, U1).await;
    let in_g2 = app.ctx(G2, U1).await;
    app.transfers.request(&in_g1, 1, U2).await.expect("g1 request");
    app.transfers.request(&in_g2, 1, U3).await.expect("g2 request");
    assert_eq!(app.pending.len(), 2);

    let u2 = app.ctx(G1, U2).await;
    app.transfers
        .resolve(&u2, 1, Decision::Accept, None)
        .await
        .expect("g1 accept");

    assert_eq!(app.reload(G1, 1).await.expect("g1").custodian, U2);
    assert_eq!(app.reload(G2, 1).await.expect("g2").custodian, U1);
    assert!(app.pending.get_live(TransferKey::new(G2, 1)).is_some());
}

#[tokio::test]
async fn test_removing_unicycle_discards_pending_transfer() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;
    app.transfers.request(&requester, 1, U2).await.expect("request");

    app.unicycles
        .remove(&requester, 1, "confirm")
        .await
        .expect("remove");
    assert!(app.pending.is_empty());

    let recipient = app.ctx(G1, U2).await;
    let err = app
        .transfers
        .resolve(&recipient, 1, Decision::Accept, None)
        .await
        .expect_err("gone");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_expire_drops_only_matching_request() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let requester = app.ctx(G1, U1).await;

    let first = app.transfers.request(&requester, 1, U2).await.expect("first");
    let second = app.transfers.request(&requester, 1, U3).await.expect("second");

    assert!(!app.transfers.expire(first.key, first.id));
    assert_eq!(app.pending.len(), 1);
    assert!(app.transfers.expire(second.key, second.id));
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_failed_custody_write_keeps_transfer_pending() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let requester = app.ctx(G1, U1).await;
    let pending = app.transfers.request(&requester, 1, U2).await.expect("request");

    app.freeze_unicycles().await;

    let recipient = app.ctx(G1, U2).await;
    let err = app
        .transfers
        .resolve(&recipient, 1, Decision::Accept, Some(pending.id))
        .await
        .expect_err("write fails");
    assert_eq!(err.kind, ErrorKind::Database);
    assert!(!err.user_message().contains("frozen"));

    assert_eq!(app.reload(G1, 1).await.expect("stored").custodian, U1);
    let still_pending = app
        .pending
        .get_live(TransferKey::new(G1, 1))
        .expect("transfer restored");
    assert_eq!(still_pending.id, pending.id);
}

//! Integration tests for the unicycle lifecycle.

mod helpers;

use helpers::{G1, G2, MOD, OWNER, TestApp, U1, U2, U3};
use unitrack_core::ErrorKind;
use unitrack_entity::unicycle::Ownership;
use unitrack_service::unicycle::{MAX_DESCRIPTION_CHARS, MAX_LABEL_CHARS, MAX_NAME_CHARS};
use unitrack_service::{ListFilter, UnicycleEdit};

#[tokio::test]
async fn test_numbers_increase_and_are_never_reused() {
    let app = TestApp::new().await;

    let big_wheel = app.add(G1, U1, "Big Wheel").await;
    let mini = app.add(G1, U1, "Mini").await;
    assert_eq!(big_wheel.guild_specific_id, 1);
    assert_eq!(mini.guild_specific_id, 2);

    let ctx = app.ctx(G1, U1).await;
    app.unicycles
        .remove(&ctx, 1, "confirm")
        .await
        .expect("remove Big Wheel");

    let trainer = app.add(G1, U1, "Trainer").await;
    assert_eq!(trainer.guild_specific_id, 3);

    let counter = app.sequences.find(G1).await.expect("find").expect("counter");
    assert_eq!(counter.last_value, 3);
    assert!(app.sequences.find(G2).await.expect("find").is_none());
}

#[tokio::test]
async fn test_numbers_are_scoped_per_guild() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Mini").await;

    let other = app.add(G2, U1, "Big Wheel").await;
    assert_eq!(other.guild_specific_id, 1);
}

#[tokio::test]
async fn test_creator_is_owner_and_custodian() {
    let app = TestApp::new().await;
    let u = app.add(G1, U1, "Big Wheel").await;
    assert_eq!(u.owner, Ownership::Member(U1));
    assert_eq!(u.custodian, U1);
    assert_eq!(u.description.as_deref(), Some("Big Wheel description"));
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let ctx = app.ctx(G1, U2).await;
    let err = app
        .unicycles
        .create(&ctx, "  Big Wheel ", None)
        .await
        .expect_err("duplicate name");
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let app = TestApp::new().await;
    let ctx = app.ctx(G1, U1).await;
    let err = app.unicycles.create(&ctx, "   ", None).await.expect_err("empty");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_overlong_name_is_rejected_on_create_and_rename() {
    let app = TestApp::new().await;
    let ctx = app.ctx(G1, U1).await;

    let longest = "W".repeat(MAX_NAME_CHARS);
    let u = app
        .unicycles
        .create(&ctx, &longest, None)
        .await
        .expect("name at the limit");

    let err = app
        .unicycles
        .create(&ctx, &"W".repeat(300), None)
        .await
        .expect_err("300-character name");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .unicycles
        .edit(
            &ctx,
            u.guild_specific_id,
            UnicycleEdit {
                name: Some("é".repeat(MAX_NAME_CHARS + 1)),
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect_err("overlong rename");
    assert_eq!(err.kind, ErrorKind::Validation);
    let unchanged = app.reload(G1, u.guild_specific_id).await.expect("still there");
    assert_eq!(unchanged.name, longest);

    let suggestions = app.unicycles.suggest(G1, "").await.expect("suggest");
    assert!(suggestions[0].label.chars().count() <= MAX_LABEL_CHARS);
    assert_eq!(app.sequences.find(G1).await.expect("find").expect("counter").last_value, 1);
}

#[tokio::test]
async fn test_overlong_description_is_rejected() {
    let app = TestApp::new().await;
    let ctx = app.ctx(G1, U1).await;
    let err = app
        .unicycles
        .create(&ctx, "Big Wheel", Some("d".repeat(MAX_DESCRIPTION_CHARS + 1)))
        .await
        .expect_err("overlong description");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_stranger_cannot_remove() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Mini").await;

    let ctx = app.ctx(G1, U3).await;
    let err = app
        .unicycles
        .remove(&ctx, 2, "confirm")
        .await
        .expect_err("not owner");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(app.reload(G1, 2).await.is_some());
}

#[tokio::test]
async fn test_remove_requires_confirm_literal() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let ctx = app.ctx(G1, U1).await;

    let err = app
        .unicycles
        .remove(&ctx, 1, "yes")
        .await
        .expect_err("wrong literal");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.reload(G1, 1).await.is_some());

    app.unicycles
        .remove(&ctx, 1, "CONFIRM")
        .await
        .expect("case-insensitive literal");
    assert!(app.reload(G1, 1).await.is_none());
}

#[tokio::test]
async fn test_guild_owner_can_remove_any_unicycle() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let ctx = app.ctx(G1, OWNER).await;
    app.unicycles.remove(&ctx, 1, "confirm").await.expect("admin remove");
}

#[tokio::test]
async fn test_remove_missing_is_not_found() {
    let app = TestApp::new().await;
    let ctx = app.ctx(G1, OWNER).await;
    let err = app
        .unicycles
        .remove(&ctx, 9, "confirm")
        .await
        .expect_err("missing");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_collective_takes_custody_when_held_by_owner() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let ctx = app.ctx(G1, OWNER).await;
    let outcome = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("make collective");

    assert_eq!(outcome.unicycle.owner, Ownership::Collective);
    assert_eq!(outcome.unicycle.custodian, OWNER);
    let stored = app.reload(G1, 1).await.expect("stored");
    assert_eq!(stored.custodian, OWNER);
}

#[tokio::test]
async fn test_collective_leaves_custody_when_lent_out() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.unicycle_repo
        .set_custodian(G1, 1, U2)
        .await
        .expect("lend out");

    let ctx = app.ctx(G1, OWNER).await;
    let outcome = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("make collective");

    assert_eq!(outcome.unicycle.owner, Ownership::Collective);
    assert_eq!(outcome.unicycle.custodian, U2);
}

#[tokio::test]
async fn test_only_admins_make_unicycles_collective() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let ctx = app.ctx(G1, U1).await;
    let err = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect_err("owner is not admin");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(
        app.reload(G1, 1).await.expect("stored").owner,
        Ownership::Member(U1)
    );
}

#[tokio::test]
async fn test_new_owner_takes_custody_from_previous_owner() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let ctx = app.ctx(G1, U1).await;
    let outcome = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                owner: Some(U2),
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("give away");

    assert_eq!(outcome.unicycle.owner, Ownership::Member(U2));
    assert_eq!(outcome.unicycle.custodian, U2);
    assert_eq!(outcome.changes.len(), 2);
}

#[tokio::test]
async fn test_edit_validation() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Mini").await;
    let ctx = app.ctx(G1, OWNER).await;

    let err = app
        .unicycles
        .edit(&ctx, 1, UnicycleEdit::default())
        .await
        .expect_err("no changes");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "No changes were provided");

    let err = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                owner: Some(U2),
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect_err("owner and collective");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                name: Some("Mini".to_string()),
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect_err("name taken");
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_rename_and_describe() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    let ctx = app.ctx(G1, U1).await;

    let outcome = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                name: Some("Giraffe".to_string()),
                description: Some("Very tall".to_string()),
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("edit");

    assert_eq!(outcome.unicycle.name, "Giraffe");
    assert_eq!(outcome.unicycle.description.as_deref(), Some("Very tall"));
    assert_eq!(outcome.unicycle.guild_specific_id, 1);
}

#[tokio::test]
async fn test_custodian_who_is_not_owner_cannot_edit() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.unicycle_repo.set_custodian(G1, 1, U2).await.expect("lend");

    let ctx = app.ctx(G1, U2).await;
    let err = app
        .unicycles
        .edit(
            &ctx,
            1,
            UnicycleEdit {
                name: Some("Mine now".to_string()),
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect_err("custodian is not owner");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U2, "Mini").await;
    app.add(G1, U1, "Club Trainer").await;

    let admin = app.ctx(G1, OWNER).await;
    app.unicycles
        .edit(
            &admin,
            3,
            UnicycleEdit {
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("make collective");

    let member = app.ctx(G1, U3).await;
    let numbers = |result: &unitrack_service::ListResult| -> Vec<i64> {
        result.unicycles.iter().map(|u| u.guild_specific_id).collect()
    };

    let default = app
        .unicycles
        .list(&member, &ListFilter::default())
        .await
        .expect("list");
    assert_eq!(numbers(&default), vec![1, 2]);
    assert_eq!(default.title(), "Unicycles");

    let club = app
        .unicycles
        .list(
            &member,
            &ListFilter {
                collective_only: true,
                ..ListFilter::default()
            },
        )
        .await
        .expect("list club");
    assert_eq!(numbers(&club), vec![3]);

    let by_owner = app
        .unicycles
        .list(
            &member,
            &ListFilter {
                owner: Some(U1),
                ..ListFilter::default()
            },
        )
        .await
        .expect("list by owner");
    assert_eq!(numbers(&by_owner), vec![1]);

    let held_by_owner = app
        .unicycles
        .list(
            &member,
            &ListFilter {
                custodian: Some(OWNER),
                collective_only: true,
                ..ListFilter::default()
            },
        )
        .await
        .expect("list by custodian");
    assert_eq!(numbers(&held_by_owner), vec![3]);

    let search = app
        .unicycles
        .list(
            &member,
            &ListFilter {
                search_text: Some("mini".to_string()),
                ..ListFilter::default()
            },
        )
        .await
        .expect("search");
    assert_eq!(numbers(&search), vec![2]);
}

#[tokio::test]
async fn test_show_all_is_admin_only() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Club Trainer").await;
    let admin = app.ctx(G1, OWNER).await;
    app.unicycles
        .edit(
            &admin,
            2,
            UnicycleEdit {
                collective: true,
                ..UnicycleEdit::default()
            },
        )
        .await
        .expect("make collective");

    let show_all = ListFilter {
        show_all: true,
        search_text: Some("nothing matches this".to_string()),
        ..ListFilter::default()
    };

    let as_admin = app.unicycles.list(&admin, &show_all).await.expect("admin");
    assert_eq!(as_admin.unicycles.len(), 2);
    assert_eq!(as_admin.title(), "Unicycles (showing all)");

    let member = app.ctx(G1, U2).await;
    let as_member = app.unicycles.list(&member, &show_all).await.expect("member");
    assert!(as_member.unicycles.is_empty());
}

#[tokio::test]
async fn test_mod_role_admin_after_registration() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;

    let before = app.ctx(G1, MOD).await;
    assert!(!before.is_admin());

    app.grant_mod_role(G1).await;
    let after = app.ctx(G1, MOD).await;
    app.unicycles
        .remove(&after, 1, "confirm")
        .await
        .expect("admin role holder removes");
}

#[tokio::test]
async fn test_autocomplete_suggestions() {
    let app = TestApp::new().await;
    app.add(G1, U1, "Big Wheel").await;
    app.add(G1, U1, "Mini").await;
    app.add(G2, U1, "Other Guild Wheel").await;

    let suggestions = app.unicycles.suggest(G1, "WHEEL").await.expect("suggest");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].label, "#1: Big Wheel");
    assert_eq!(suggestions[0].number, 1);

    let all = app.unicycles.suggest(G1, "").await.expect("suggest all");
    assert_eq!(all.len(), 2);
}

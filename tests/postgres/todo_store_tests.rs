//! Persistence behaviour of the Diesel todo store.

use chrono::{TimeDelta, Utc};
use crosslist::todo::{
    domain::{
        AuditAction, AuditLog, Comment, CommentId, ForeignLink, Issue, IssueFields, IssueId, IssueReference,
        IssueStatus, ListKind, Priority,
    },
    ports::{AuditLedger, CommentLedger, IssueRegistry, ReferenceDirectory, StoreError},
};
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{Backend, backend, fresh_user};

fn ids(references: &[IssueReference]) -> Vec<IssueId> {
    references.iter().map(IssueReference::issue).collect()
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn issue_round_trips_with_its_link(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let bob = fresh_user("bob");
    let content = IssueFields::new("Ship release")
        .expect("valid fields")
        .with_description("Tag and publish")
        .with_due_at(Utc::now() + TimeDelta::days(2))
        .with_priority(Priority::new(3));
    let mut issue = Issue::new_pending(alice.clone(), bob.clone(), content, &DefaultClock);
    let mirror = IssueId::new();
    issue.link_foreign(ForeignLink::new(bob.clone(), mirror));

    db.todos.save_issue(&issue).await.expect("issue should save");
    let loaded = db.todos.issue(issue.id()).await.expect("issue should load");

    assert_eq!(loaded.id(), issue.id());
    assert_eq!(loaded.message(), "Ship release");
    assert_eq!(loaded.fields().description(), Some("Tag and publish"));
    assert_eq!(loaded.fields().priority(), Priority::new(3));
    assert!(loaded.fields().due_at().is_some());
    assert_eq!(loaded.creator(), &alice);
    assert_eq!(loaded.assignee(), &bob);
    assert_eq!(loaded.status(), IssueStatus::Pending);
    assert_eq!(
        loaded.foreign().map(|link| (link.user().clone(), link.issue())),
        Some((bob, mirror))
    );
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn saving_again_updates_the_record(#[from(backend)] db: Backend) {
    let mut issue = Issue::new_owned(
        fresh_user("alice"),
        IssueFields::new("Draft").expect("valid fields"),
        &DefaultClock,
    );
    db.todos.save_issue(&issue).await.expect("issue should save");

    issue.transition_to(IssueStatus::Completed, &DefaultClock);
    db.todos.save_issue(&issue).await.expect("issue should update");

    let loaded = db.todos.issue(issue.id()).await.expect("issue should load");
    assert_eq!(loaded.status(), IssueStatus::Completed);
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn take_issue_returns_and_deletes(#[from(backend)] db: Backend) {
    let issue = Issue::new_owned(
        fresh_user("alice"),
        IssueFields::new("Temporary").expect("valid fields"),
        &DefaultClock,
    );
    db.todos.save_issue(&issue).await.expect("issue should save");

    let taken = db.todos.take_issue(issue.id()).await.expect("issue should be taken");

    assert_eq!(taken.id(), issue.id());
    assert!(matches!(
        db.todos.issue(issue.id()).await,
        Err(StoreError::IssueNotFound(_))
    ));
    assert!(matches!(
        db.todos.remove_issue(issue.id()).await,
        Err(StoreError::IssueNotFound(_))
    ));
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn references_are_ordered_front_first(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let (first, second, third) = (IssueId::new(), IssueId::new(), IssueId::new());
    for id in [first, second, third] {
        db.todos
            .add_reference(&alice, ListKind::Own, IssueReference::local(id))
            .await
            .expect("reference should be added");
    }

    let listed = db.todos.list(&alice, ListKind::Own).await.expect("list should load");
    assert_eq!(ids(&listed), vec![third, second, first]);

    let found = db
        .todos
        .find_reference(&alice, first, ListKind::Own)
        .await
        .expect("lookup should succeed")
        .expect("reference should exist");
    assert_eq!(found.position, 2);
    assert!(
        db.todos
            .find_reference(&alice, first, ListKind::Incoming)
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_reference_is_rejected(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let id = IssueId::new();
    db.todos
        .add_reference(&alice, ListKind::Own, IssueReference::local(id))
        .await
        .expect("reference should be added");

    let err = db
        .todos
        .add_reference(&alice, ListKind::Own, IssueReference::local(id))
        .await
        .expect_err("duplicate should fail");

    assert!(matches!(err, StoreError::DuplicateReference { .. }));
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn pop_takes_the_front_and_reports_empty_lists(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let bob = fresh_user("bob");
    let (older, newer) = (IssueId::new(), IssueId::new());
    db.todos
        .add_reference(&alice, ListKind::Own, IssueReference::local(older))
        .await
        .expect("reference should be added");
    db.todos
        .add_reference(
            &alice,
            ListKind::Own,
            IssueReference::linked(newer, ForeignLink::new(bob.clone(), IssueId::new())),
        )
        .await
        .expect("reference should be added");

    let popped = db
        .todos
        .pop_reference(&alice, ListKind::Own)
        .await
        .expect("pop should succeed");
    assert_eq!(popped.issue(), newer);
    assert_eq!(popped.foreign().map(ForeignLink::user), Some(&bob));

    let err = db
        .todos
        .pop_reference(&bob, ListKind::Own)
        .await
        .expect_err("pop on empty list should fail");
    assert!(matches!(err, StoreError::EmptyList { .. }));
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn bump_moves_reference_to_front(#[from(backend)] db: Backend) {
    let bob = fresh_user("bob");
    let (first, second, third) = (IssueId::new(), IssueId::new(), IssueId::new());
    for id in [first, second, third] {
        db.todos
            .add_reference(&bob, ListKind::Incoming, IssueReference::local(id))
            .await
            .expect("reference should be added");
    }

    db.todos
        .bump_reference(&bob, first, ListKind::Incoming)
        .await
        .expect("bump should succeed");

    let listed = db
        .todos
        .list(&bob, ListKind::Incoming)
        .await
        .expect("list should load");
    assert_eq!(ids(&listed), vec![first, third, second]);
    let err = db
        .todos
        .bump_reference(&bob, IssueId::new(), ListKind::Incoming)
        .await
        .expect_err("bump of unknown issue should fail");
    assert!(err.is_not_found());
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn locate_finds_the_holding_list(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let id = IssueId::new();
    db.todos
        .add_reference(&alice, ListKind::Outgoing, IssueReference::local(id))
        .await
        .expect("reference should be added");

    let located = db
        .todos
        .locate_reference(&alice, id)
        .await
        .expect("lookup should succeed")
        .expect("reference should exist");
    assert_eq!(located.list, ListKind::Outgoing);

    db.todos
        .remove_reference(&alice, id, ListKind::Outgoing)
        .await
        .expect("reference should be removed");
    assert!(
        db.todos
            .locate_reference(&alice, id)
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn comments_persist_in_creation_order(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let issue = IssueId::new();
    let earlier = Comment::from_persisted(
        CommentId::new(),
        issue,
        alice.clone(),
        "First".to_owned(),
        Utc::now() - TimeDelta::minutes(5),
    );
    let later = Comment::new(issue, alice, "Second", &DefaultClock).expect("valid comment");
    db.todos.save_comment(&later).await.expect("comment should save");
    db.todos.save_comment(&earlier).await.expect("comment should save");

    let comments = db.todos.comments(issue).await.expect("comments should load");
    let messages: Vec<&str> = comments.iter().map(Comment::message).collect();
    assert_eq!(messages, vec!["First", "Second"]);

    db.todos
        .delete_comment(earlier.id())
        .await
        .expect("comment should delete");
    assert!(matches!(
        db.todos.comment(earlier.id()).await,
        Err(StoreError::CommentNotFound(_))
    ));
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn audit_log_reads_newest_first(#[from(backend)] db: Backend) {
    let alice = fresh_user("alice");
    let issue = IssueId::new();
    let mut created = AuditLog::record(issue, alice.clone(), AuditAction::Create, None, &DefaultClock);
    created.created_at = Utc::now() - TimeDelta::minutes(1);
    let sent = AuditLog::record(
        issue,
        alice,
        AuditAction::Send,
        Some("bob".to_owned()),
        &DefaultClock,
    );
    db.todos.append_audit_log(&sent).await.expect("entry should save");
    db.todos.append_audit_log(&created).await.expect("entry should save");

    let trail = db.todos.audit_logs(issue).await.expect("trail should load");

    let actions: Vec<AuditAction> = trail.iter().map(|entry| entry.action).collect();
    assert_eq!(actions, vec![AuditAction::Send, AuditAction::Create]);
    assert_eq!(
        trail.first().and_then(|entry| entry.metadata.as_deref()),
        Some("bob")
    );
}

//! Multi-user flows through the public list services.

use std::sync::Arc;

use crosslist::todo::{
    domain::{IssueStatus, ListKind},
    ports::{IssueRegistry, ReferenceDirectory},
};
use rstest::rstest;

use super::helpers::{Workspace, fields, user, workspace};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_senders_all_reach_the_receiver(workspace: Workspace) {
    let Workspace { store, lists, .. } = workspace;
    let shared = Arc::new(lists);
    let dave = user("dave");
    let mut handles = Vec::new();
    for sender in ["alice", "bob", "carol"] {
        let service = Arc::clone(&shared);
        let receiver = dave.clone();
        handles.push(tokio::spawn(async move {
            service
                .send_issue(&user(sender), &receiver, fields("Review the plan"))
                .await
        }));
    }

    let mut received = Vec::new();
    for handle in handles {
        let outcome = handle
            .await
            .expect("send task should join")
            .expect("send should succeed");
        received.push(outcome.receiver_issue.id());
    }

    let incoming = store
        .list(&dave, ListKind::Incoming)
        .await
        .expect("incoming list should load");
    assert_eq!(incoming.len(), 3);
    for id in received {
        assert!(
            incoming.iter().any(|reference| reference.issue() == id),
            "missing {id} in incoming list"
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigned_issue_completes_back_to_the_sender(workspace: Workspace) {
    let alice = user("alice");
    let bob = user("bob");
    let carol = user("carol");
    let sent = workspace
        .lists
        .send_issue(&alice, &bob, fields("Prepare slides"))
        .await
        .expect("send should succeed");
    let sender_id = sent.sender_issue.id();

    let reassigned = workspace
        .lists
        .change_assignment(sender_id, &alice, &carol)
        .await
        .expect("reassignment should succeed");
    let carol_copy = reassigned
        .receiver_issue
        .expect("carol should get a copy")
        .id();
    workspace
        .lists
        .accept_issue(&carol, carol_copy)
        .await
        .expect("accept should succeed");
    workspace
        .lists
        .complete_issue(&carol, carol_copy)
        .await
        .expect("complete should succeed");

    assert!(workspace.ids(&bob, ListKind::Incoming).await.is_empty());
    assert!(workspace.ids(&alice, ListKind::Outgoing).await.is_empty());
    let sender_copy = workspace
        .store
        .issue(sender_id)
        .await
        .expect("sender copy should load");
    assert_eq!(sender_copy.status(), IssueStatus::Completed);
    assert_eq!(sender_copy.assignee(), &carol);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sender_sees_where_the_receiver_keeps_the_issue(workspace: Workspace) {
    let alice = user("alice");
    let bob = user("bob");
    workspace
        .lists
        .add_issue(&bob, fields("Fix bike"))
        .await
        .expect("add should succeed");
    let sent = workspace
        .lists
        .send_issue(&alice, &bob, fields("Call the bank"))
        .await
        .expect("send should succeed");
    workspace
        .lists
        .accept_issue(&bob, sent.receiver_issue.id())
        .await
        .expect("accept should succeed");

    let lists = workspace
        .lists
        .all_lists(&alice)
        .await
        .expect("lists should load");

    let outgoing = lists.outgoing.first().expect("outgoing issue");
    assert_eq!(outgoing.foreign_user.as_deref(), Some("Bob"));
    assert_eq!(outgoing.foreign_list, Some(ListKind::Own));
    assert_eq!(outgoing.foreign_position, Some(0));
    assert!(lists.own.is_empty());
    assert!(lists.incoming.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discussion_and_history_follow_one_copy(workspace: Workspace) {
    let alice = user("alice");
    let bob = user("bob");
    let sent = workspace
        .lists
        .send_issue(&alice, &bob, fields("Book venue"))
        .await
        .expect("send should succeed");
    let receiver_id = sent.receiver_issue.id();
    workspace
        .ledger
        .add_comment(receiver_id, &bob, "On it")
        .await
        .expect("comment should be added");
    workspace
        .lists
        .bump_issue(&alice, sent.sender_issue.id())
        .await
        .expect("bump should succeed");

    let comments = workspace
        .ledger
        .issue_comments(receiver_id)
        .await
        .expect("comments should load");
    let trail = workspace
        .ledger
        .audit_trail(receiver_id)
        .await
        .expect("audit trail should load");

    assert_eq!(comments.len(), 1);
    assert_eq!(
        comments.first().map(|entry| entry.user_name.as_str()),
        Some("Bob")
    );
    let actions: Vec<&str> = trail.iter().map(|entry| entry.action.as_str()).collect();
    assert_eq!(actions, vec!["bump_by", "add_comment", "receive"]);
}

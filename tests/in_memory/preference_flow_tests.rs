//! Reminders and incoming gating next to the lists.

use crosslist::todo::{domain::ListKind, services::Dispatch};
use rstest::rstest;

use super::helpers::{Workspace, fields, user, workspace};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn receiver_who_refuses_incoming_leaves_issue_with_sender(workspace: Workspace) {
    let alice = user("alice");
    let bob = user("bob");
    workspace
        .preferences
        .set_accepts_incoming(&bob, false)
        .await
        .expect("preference should be stored");

    let assignee = if workspace.preferences.accepts_incoming(&bob).await {
        Some(&bob)
    } else {
        None
    };
    let dispatched = workspace
        .lists
        .dispatch_issue(&alice, assignee, fields("Sign contract"))
        .await
        .expect("dispatch should succeed");

    assert!(matches!(dispatched, Dispatch::Added(_)));
    assert_eq!(workspace.ids(&alice, ListKind::Own).await.len(), 1);
    assert!(workspace.ids(&bob, ListKind::Incoming).await.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reminder_goes_out_once_per_day_for_non_empty_lists(workspace: Workspace) {
    let alice = user("alice");
    let bob = user("bob");
    workspace
        .lists
        .add_issue(&alice, fields("Buy milk"))
        .await
        .expect("add should succeed");

    let own_items = workspace.ids(&alice, ListKind::Own).await.len();
    let first = workspace
        .preferences
        .reminder_due(&alice, own_items, 60)
        .await
        .expect("reminder check should succeed");
    assert!(first);

    workspace
        .preferences
        .record_reminder(&alice)
        .await
        .expect("reminder should be recorded");
    let again = workspace
        .preferences
        .reminder_due(&alice, own_items, 60)
        .await
        .expect("reminder check should succeed");
    assert!(!again);

    let empty_items = workspace.ids(&bob, ListKind::Own).await.len();
    let for_bob = workspace
        .preferences
        .reminder_due(&bob, empty_items, 60)
        .await
        .expect("reminder check should succeed");
    assert!(!for_bob);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_reminders_stay_quiet(workspace: Workspace) {
    let carol = user("carol");
    workspace
        .preferences
        .set_reminder_enabled(&carol, false)
        .await
        .expect("preference should be stored");

    let due = workspace
        .preferences
        .reminder_due(&carol, 5, 0)
        .await
        .expect("reminder check should succeed");
    assert!(!due);
}

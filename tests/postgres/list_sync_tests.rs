//! The list engine over the Diesel adapter.

use std::sync::Arc;

use crosslist::todo::{
    adapters::{memory::InMemoryUserDirectory, postgres::PostgresTodoStore},
    domain::{IssueFields, IssueReference, IssueStatus, ListKind},
    ports::{IssueRegistry, ReferenceDirectory},
    services::ListSyncService,
};
use diesel::sql_types::{BigInt, Text};
use diesel::{QueryableByName, RunQueryDsl};
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{Backend, backend, fresh_user};

fn fields(message: &str) -> IssueFields {
    IssueFields::new(message).expect("valid issue fields")
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn hand_off_completes_on_both_sides(#[from(backend)] db: Backend) {
    let store = Arc::new(db.todos);
    let alice = fresh_user("alice");
    let bob = fresh_user("bob");
    let service = ListSyncService::new(
        Arc::clone(&store),
        Arc::new(
            InMemoryUserDirectory::new()
                .with_user(alice.clone(), "Alice")
                .with_user(bob.clone(), "Bob"),
        ),
        Arc::new(DefaultClock),
    );

    let sent = service
        .send_issue(&alice, &bob, fields("Renew lease"))
        .await
        .expect("send should succeed");
    let receiver_id = sent.receiver_issue.id();
    service
        .accept_issue(&bob, receiver_id)
        .await
        .expect("accept should succeed");
    let outgoing = service
        .issue_list(&alice, ListKind::Outgoing)
        .await
        .expect("outgoing list should load");
    assert_eq!(
        outgoing.first().and_then(|entry| entry.foreign_list),
        Some(ListKind::Own)
    );

    service
        .complete_issue(&bob, receiver_id)
        .await
        .expect("complete should succeed");

    assert!(
        store
            .list(&alice, ListKind::Outgoing)
            .await
            .expect("list should load")
            .is_empty()
    );
    let sender_copy = store
        .issue(sent.sender_issue.id())
        .await
        .expect("sender copy should load");
    assert_eq!(sender_copy.status(), IssueStatus::Completed);
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn pop_and_bump_follow_list_order(#[from(backend)] db: Backend) {
    let store: Arc<PostgresTodoStore> = Arc::new(db.todos);
    let alice = fresh_user("alice");
    let bob = fresh_user("bob");
    let service = ListSyncService::new(
        Arc::clone(&store),
        Arc::new(InMemoryUserDirectory::new()),
        Arc::new(DefaultClock),
    );
    let first = service
        .send_issue(&alice, &bob, fields("First"))
        .await
        .expect("send should succeed");
    let second = service
        .send_issue(&alice, &bob, fields("Second"))
        .await
        .expect("send should succeed");

    service
        .bump_issue(&alice, first.sender_issue.id())
        .await
        .expect("bump should succeed");
    let incoming: Vec<_> = store
        .list(&bob, ListKind::Incoming)
        .await
        .expect("list should load")
        .iter()
        .map(IssueReference::issue)
        .collect();
    assert_eq!(
        incoming,
        vec![first.receiver_issue.id(), second.receiver_issue.id()]
    );

    service
        .accept_issue(&bob, second.receiver_issue.id())
        .await
        .expect("accept should succeed");
    let popped = service.pop_issue(&bob).await.expect("pop should succeed");
    assert_eq!(popped.issue.id(), second.receiver_issue.id());
    assert_eq!(popped.foreign_user, Some(alice));
}

#[derive(QueryableByName)]
struct RankCount {
    #[diesel(sql_type = BigInt)]
    ranks: i64,
}

#[rstest]
#[ignore = "needs CROSSLIST_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_sends_keep_a_strict_incoming_order(#[from(backend)] db: Backend) {
    const SENDERS: usize = 16;
    let store = Arc::new(db.todos);
    let bob = fresh_user("bob");
    let service = Arc::new(ListSyncService::new(
        Arc::clone(&store),
        Arc::new(InMemoryUserDirectory::new()),
        Arc::new(DefaultClock),
    ));

    let handles: Vec<_> = (0..SENDERS)
        .map(|n| {
            let engine = Arc::clone(&service);
            let sender = fresh_user("sender");
            let receiver = bob.clone();
            tokio::spawn(async move {
                engine
                    .send_issue(&sender, &receiver, fields(&format!("Request {n}")))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle
            .await
            .expect("send task should join")
            .expect("send should succeed");
    }

    let mut connection = db.pool.get().expect("test database connection");
    let counted = diesel::sql_query(
        "SELECT COUNT(DISTINCT rank) AS ranks FROM todo_references \
         WHERE user_id = $1 AND list = 'incoming'",
    )
    .bind::<Text, _>(bob.as_str())
    .get_result::<RankCount>(&mut connection)
    .expect("ranks should count");
    assert_eq!(counted.ranks, i64::try_from(SENDERS).expect("small count"));

    let listed: Vec<_> = store
        .list(&bob, ListKind::Incoming)
        .await
        .expect("list should load")
        .iter()
        .map(IssueReference::issue)
        .collect();
    let mut popped = Vec::with_capacity(SENDERS);
    for _ in 0..SENDERS {
        let reference = store
            .pop_reference(&bob, ListKind::Incoming)
            .await
            .expect("pop should succeed");
        popped.push(reference.issue());
    }
    assert_eq!(popped, listed);
}

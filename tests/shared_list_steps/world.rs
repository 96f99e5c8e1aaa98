//! Shared world state for shared list BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crosslist::todo::{
    adapters::memory::{InMemoryTodoStore, InMemoryUserDirectory},
    domain::{IssueId, UserId},
    services::{ListSyncError, ListSyncService, RemovalOutcome, SendOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestListService =
    ListSyncService<InMemoryTodoStore, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for shared list behaviour tests.
pub struct ListWorld {
    pub store: Arc<InMemoryTodoStore>,
    pub service: TestListService,
    pub sent: HashMap<String, SendOutcome>,
    pub last_error: Option<ListSyncError>,
    pub last_removal: Option<RemovalOutcome>,
}

impl ListWorld {
    /// Creates a world with three registered users and no issues.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTodoStore::new());
        let mut users = InMemoryUserDirectory::new();
        for name in ["alice", "bob", "carol"] {
            if let Ok(id) = UserId::new(name) {
                users = users.with_user(id, name);
            }
        }
        let service =
            ListSyncService::new(Arc::clone(&store), Arc::new(users), Arc::new(DefaultClock));
        Self {
            store,
            service,
            sent: HashMap::new(),
            last_error: None,
            last_removal: None,
        }
    }

    /// Returns the copy of a sent issue held by `user`.
    ///
    /// # Errors
    ///
    /// Fails when no issue with that message was sent in this scenario.
    pub fn copy_of(&self, user: &UserId, message: &str) -> Result<IssueId, eyre::Report> {
        let outcome = self
            .sent
            .get(message)
            .ok_or_else(|| eyre::eyre!("no issue \"{message}\" was sent in this scenario"))?;
        if outcome.sender_issue.creator() == user {
            Ok(outcome.sender_issue.id())
        } else {
            Ok(outcome.receiver_issue.id())
        }
    }
}

impl Default for ListWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ListWorld {
    ListWorld::default()
}

/// Parses a user name captured from a step.
///
/// # Errors
///
/// Fails when the name is blank.
pub fn user(name: &str) -> Result<UserId, eyre::Report> {
    UserId::new(name).map_err(|err| eyre::eyre!("invalid user {name:?}: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

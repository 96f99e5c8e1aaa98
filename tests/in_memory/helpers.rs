//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use crosslist::preferences::{adapters::memory::InMemoryPreferenceStore, services::PreferenceService};
use crosslist::todo::{
    adapters::memory::{InMemoryTodoStore, InMemoryUserDirectory},
    domain::{IssueFields, IssueId, ListKind, UserId},
    ports::ReferenceDirectory,
    services::{LedgerService, ListSyncService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// List service over the in-memory adapters.
pub type Lists = ListSyncService<InMemoryTodoStore, InMemoryUserDirectory, DefaultClock>;

/// Ledger service over the in-memory adapters.
pub type Ledger = LedgerService<InMemoryTodoStore, InMemoryUserDirectory, DefaultClock>;

/// Preference service over the in-memory adapter.
pub type Preferences = PreferenceService<InMemoryPreferenceStore, DefaultClock>;

/// Services wired to one shared in-memory backend.
pub struct Workspace {
    /// Backing store, for inspecting list contents.
    pub store: Arc<InMemoryTodoStore>,
    /// List synchronisation service.
    pub lists: Lists,
    /// Comment and audit service.
    pub ledger: Ledger,
    /// Reminder and incoming preferences.
    pub preferences: Preferences,
}

impl Workspace {
    /// Returns the issue identifiers of one list, front first.
    ///
    /// # Panics
    ///
    /// Panics when the list cannot be read.
    pub async fn ids(&self, owner: &UserId, list: ListKind) -> Vec<IssueId> {
        self.store
            .list(owner, list)
            .await
            .expect("list should load")
            .iter()
            .map(crosslist::todo::domain::IssueReference::issue)
            .collect()
    }
}

/// Builds a user identifier.
///
/// # Panics
///
/// Panics on a blank name.
pub fn user(name: &str) -> UserId {
    UserId::new(name).expect("valid user id")
}

/// Builds issue content with only a message.
///
/// # Panics
///
/// Panics on a blank message.
pub fn fields(message: &str) -> IssueFields {
    IssueFields::new(message).expect("valid issue fields")
}

/// Provides services over a fresh backend with four registered users.
#[fixture]
pub fn workspace() -> Workspace {
    let store = Arc::new(InMemoryTodoStore::new());
    let users = Arc::new(
        InMemoryUserDirectory::new()
            .with_user(user("alice"), "Alice")
            .with_user(user("bob"), "Bob")
            .with_user(user("carol"), "Carol")
            .with_user(user("dave"), "Dave"),
    );
    let clock = Arc::new(DefaultClock);
    Workspace {
        lists: ListSyncService::new(Arc::clone(&store), Arc::clone(&users), Arc::clone(&clock)),
        ledger: LedgerService::new(Arc::clone(&store), users, Arc::clone(&clock)),
        preferences: PreferenceService::new(Arc::new(InMemoryPreferenceStore::new()), clock),
        store,
    }
}

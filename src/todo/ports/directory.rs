//! Reference directory port: ordered per-user list membership.

use super::StoreResult;
use crate::todo::domain::{IssueId, IssueReference, ListKind, ListedReference, UserId};
use async_trait::async_trait;

/// Per-user, per-list ordered membership of issues.
///
/// Lists are ordered front first. New entries and bumped entries go to the
/// front. Lookups report absence as `Ok(None)`; `Err` is reserved for
/// storage failures.
#[async_trait]
pub trait ReferenceDirectory: Send + Sync {
    /// Inserts `reference` at the front of `list` for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::DuplicateReference`] when the issue is
    /// already in that list.
    async fn add_reference(
        &self,
        user: &UserId,
        list: ListKind,
        reference: IssueReference,
    ) -> StoreResult<()>;

    /// Removes the reference to `issue` from `list` for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::ReferenceNotFound`] when absent.
    async fn remove_reference(&self, user: &UserId, issue: IssueId, list: ListKind)
    -> StoreResult<()>;

    /// Removes and returns the front reference of `list` for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::EmptyList`] when the list has no entries.
    async fn pop_reference(&self, user: &UserId, list: ListKind) -> StoreResult<IssueReference>;

    /// Moves the reference to `issue` to the front of `list` for `user`.
    ///
    /// List length and the relative order of the other entries are kept.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::ReferenceNotFound`] when absent.
    async fn bump_reference(&self, user: &UserId, issue: IssueId, list: ListKind)
    -> StoreResult<()>;

    /// Finds the reference to `issue` in exactly `list` for `user`.
    async fn find_reference(
        &self,
        user: &UserId,
        issue: IssueId,
        list: ListKind,
    ) -> StoreResult<Option<ListedReference>>;

    /// Finds which of the user's lists holds `issue`.
    ///
    /// Lists are searched in [`ListKind::ALL`] order.
    async fn locate_reference(
        &self,
        user: &UserId,
        issue: IssueId,
    ) -> StoreResult<Option<ListedReference>>;

    /// Returns the ordered entries of `list` for `user`.
    async fn list(&self, user: &UserId, list: ListKind) -> StoreResult<Vec<IssueReference>>;
}

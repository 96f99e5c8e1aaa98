//! Issue registry port: single-record issue persistence.

use super::StoreResult;
use crate::todo::domain::{Issue, IssueId};
use async_trait::async_trait;

/// Create/read/update/delete of individual issue records.
///
/// Each call touches exactly one issue. The registry knows nothing about
/// lists or mirror pairing.
#[async_trait]
pub trait IssueRegistry: Send + Sync {
    /// Inserts or replaces the issue with the same identifier.
    async fn save_issue(&self, issue: &Issue) -> StoreResult<()>;

    /// Loads an issue.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::IssueNotFound`] when the issue does not
    /// exist.
    async fn issue(&self, id: IssueId) -> StoreResult<Issue>;

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::IssueNotFound`] when the issue does not
    /// exist.
    async fn remove_issue(&self, id: IssueId) -> StoreResult<()>;

    /// Deletes an issue and returns the value it held.
    ///
    /// No observer sees the deletion without the read that precedes it.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::IssueNotFound`] when the issue does not
    /// exist.
    async fn take_issue(&self, id: IssueId) -> StoreResult<Issue>;
}

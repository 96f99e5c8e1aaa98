//! Errors shared by every storage port.

use crate::todo::domain::{CommentId, IssueId, ListKind, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage port operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by storage port implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The issue does not exist.
    #[error("issue not found: {0}")]
    IssueNotFound(IssueId),

    /// The issue is not in the given list of the given user.
    #[error("issue {issue} not found in {list} list of user {user}")]
    ReferenceNotFound {
        /// Owner of the list.
        user: UserId,
        /// Issue that was looked up.
        issue: IssueId,
        /// List that was searched.
        list: ListKind,
    },

    /// The issue is already in the given list of the given user.
    #[error("issue {issue} already present in {list} list of user {user}")]
    DuplicateReference {
        /// Owner of the list.
        user: UserId,
        /// Issue that was added twice.
        issue: IssueId,
        /// List holding the existing reference.
        list: ListKind,
    },

    /// A pop found nothing to remove.
    #[error("{list} list of user {user} is empty")]
    EmptyList {
        /// Owner of the list.
        user: UserId,
        /// The empty list.
        list: ListKind,
    },

    /// The comment does not exist.
    #[error("comment not found: {0}")]
    CommentNotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns whether the error reports an absent record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::IssueNotFound(_) | Self::ReferenceNotFound { .. } | Self::CommentNotFound(_)
        )
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        // Lets adapters use `?` inside Diesel transactions.
        Self::persistence(err)
    }
}

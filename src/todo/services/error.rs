//! Service-level errors for list synchronisation and the ledger.

use crate::todo::{
    domain::{CommentId, IssueId, ListKind, TodoDomainError, UserId},
    ports::StoreError,
};
use thiserror::Error;

/// Errors returned by the todo services.
#[derive(Debug, Error)]
pub enum ListSyncError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),

    /// Storage failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The issue is not in any list of the user, or not in the list the
    /// operation requires. Operations stop here rather than retry.
    #[error("issue {issue} has no reference for user {user}")]
    ReferenceNotFound {
        /// User whose lists were searched.
        user: UserId,
        /// Issue that was looked up.
        issue: IssueId,
    },

    /// The user holds the issue but does not own it.
    #[error("user {user} cannot reassign issue {issue} held in the {list} list")]
    NotOwner {
        /// Acting user.
        user: UserId,
        /// Issue the user tried to reassign.
        issue: IssueId,
        /// List holding the issue.
        list: ListKind,
    },

    /// Only the author may delete a comment.
    #[error("user {user} is not the author of comment {comment}")]
    NotCommentAuthor {
        /// Acting user.
        user: UserId,
        /// Comment the user tried to delete.
        comment: CommentId,
    },

    /// The operation needs a shared issue but the reference has no mirror.
    #[error("issue {0} is not linked to another user")]
    MissingForeignLink(IssueId),

    /// A user tried to send an issue to themselves.
    #[error("user {0} cannot send an issue to themselves")]
    SelfAssignment(UserId),
}

impl ListSyncError {
    pub(crate) fn reference_not_found(user: &UserId, issue: IssueId) -> Self {
        Self::ReferenceNotFound {
            user: user.clone(),
            issue,
        }
    }

    /// Returns whether the error reports something absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Store(err) => err.is_not_found(),
            Self::ReferenceNotFound { .. } => true,
            _ => false,
        }
    }

    /// Returns whether the error is a pop on an empty list.
    #[must_use]
    pub const fn is_empty_list(&self) -> bool {
        matches!(self, Self::Store(StoreError::EmptyList { .. }))
    }

    /// Returns whether the action was not permitted for the user.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotOwner { .. } | Self::NotCommentAuthor { .. })
    }
}

/// Result type for todo service operations.
pub type ListSyncResult<T> = Result<T, ListSyncError>;

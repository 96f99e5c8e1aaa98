//! Comment and audit trail ports.

use super::StoreResult;
use crate::todo::domain::{AuditLog, Comment, CommentId, IssueId};
use async_trait::async_trait;

/// Append-only audit trail storage.
#[async_trait]
pub trait AuditLedger: Send + Sync {
    /// Appends an entry.
    async fn append_audit_log(&self, entry: &AuditLog) -> StoreResult<()>;

    /// Returns the entries of an issue, newest first.
    async fn audit_logs(&self, issue: IssueId) -> StoreResult<Vec<AuditLog>>;
}

/// Comment storage.
#[async_trait]
pub trait CommentLedger: Send + Sync {
    /// Stores a new comment.
    async fn save_comment(&self, comment: &Comment) -> StoreResult<()>;

    /// Returns the comments of an issue, oldest first.
    async fn comments(&self, issue: IssueId) -> StoreResult<Vec<Comment>>;

    /// Loads a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::CommentNotFound`] when absent.
    async fn comment(&self, id: CommentId) -> StoreResult<Comment>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::CommentNotFound`] when absent.
    async fn delete_comment(&self, id: CommentId) -> StoreResult<()>;
}

//! Comments and audit trail of individual issues.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, instrument, warn};

use super::{ListSyncError, ListSyncResult, audit, projection::UNKNOWN_USER_NAME};
use crate::todo::{
    domain::{AuditAction, AuditLog, Comment, CommentId, ExtendedComment, IssueId, UserId},
    ports::{TodoStore, UserDirectory},
};

/// Adds, lists and deletes comments and exposes the audit trail.
#[derive(Clone)]
pub struct LedgerService<S, U, C>
where
    S: TodoStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<S, U, C> LedgerService<S, U, C>
where
    S: TodoStore,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(store: Arc<S>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    /// Adds a comment to an existing issue.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Domain`] for a blank message, or
    /// [`ListSyncError::Store`] when the issue does not exist or the comment
    /// cannot be stored.
    #[instrument(skip_all, fields(user = %author, issue = %issue_id))]
    pub async fn add_comment(
        &self,
        issue_id: IssueId,
        author: &UserId,
        message: impl Into<String> + Send,
    ) -> ListSyncResult<Comment> {
        self.store.issue(issue_id).await?;
        let comment = Comment::new(issue_id, author.clone(), message, &*self.clock)?;
        self.store.save_comment(&comment).await?;

        audit::record(
            &*self.store,
            &*self.clock,
            issue_id,
            author,
            AuditAction::AddComment,
            Some(comment.id().to_string()),
        )
        .await;
        info!(comment = %comment.id(), "comment added");
        Ok(comment)
    }

    /// Returns the comments of an issue, oldest first, with author names.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Store`] when the comments cannot be read.
    pub async fn issue_comments(&self, issue_id: IssueId) -> ListSyncResult<Vec<ExtendedComment>> {
        let comments = self.store.comments(issue_id).await?;
        let mut extended = Vec::with_capacity(comments.len());
        for comment in comments {
            let user_name = match self.users.display_name(comment.author()).await {
                Ok(name) => name,
                Err(err) => {
                    warn!(user = %comment.author(), error = %err, "cannot resolve comment author");
                    UNKNOWN_USER_NAME.to_owned()
                }
            };
            extended.push(ExtendedComment { comment, user_name });
        }
        Ok(extended)
    }

    /// Deletes a comment written by `user`.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::NotCommentAuthor`] when somebody else wrote
    /// the comment, or [`ListSyncError::Store`] when it does not exist or
    /// cannot be deleted.
    #[instrument(skip_all, fields(user = %user, comment = %comment_id))]
    pub async fn delete_comment(
        &self,
        comment_id: CommentId,
        user: &UserId,
    ) -> ListSyncResult<Comment> {
        let comment = self.store.comment(comment_id).await?;
        if comment.author() != user {
            return Err(ListSyncError::NotCommentAuthor {
                user: user.clone(),
                comment: comment_id,
            });
        }
        self.store.delete_comment(comment_id).await?;

        audit::record(
            &*self.store,
            &*self.clock,
            comment.issue(),
            user,
            AuditAction::DeleteComment,
            Some(comment_id.to_string()),
        )
        .await;
        info!("comment deleted");
        Ok(comment)
    }

    /// Returns the audit trail of an issue, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ListSyncError::Store`] when the trail cannot be read.
    pub async fn audit_trail(&self, issue_id: IssueId) -> ListSyncResult<Vec<AuditLog>> {
        Ok(self.store.audit_logs(issue_id).await?)
    }
}

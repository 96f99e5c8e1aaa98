//! Comment and audit trail records.

use super::{AuditLogId, CommentId, IssueId, ParseAuditActionError, TodoDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Comment left on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    issue: IssueId,
    author: UserId,
    message: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment authored by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyComment`] when the message is blank.
    pub fn new(
        issue: IssueId,
        author: UserId,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TodoDomainError> {
        let raw = message.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyComment);
        }
        Ok(Self {
            id: CommentId::new(),
            issue,
            author,
            message: trimmed.to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: CommentId,
        issue: IssueId,
        author: UserId,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            issue,
            author,
            message,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the issue the comment belongs to.
    #[must_use]
    pub const fn issue(&self) -> IssueId {
        self.issue
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Issue created in the owner's own list.
    Create,
    /// Issue sent to another user.
    Send,
    /// Issue received from another user.
    Receive,
    /// Incoming issue accepted.
    Accept,
    /// Issue handed to a different receiver.
    Reassign,
    /// Issue completed.
    Complete,
    /// Issue removed or declined.
    Remove,
    /// Incoming issue nudged by its sender.
    BumpBy,
    /// Issue content edited.
    Edit,
    /// Comment added.
    AddComment,
    /// Comment deleted.
    DeleteComment,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Send => "send",
            Self::Receive => "receive",
            Self::Accept => "accept",
            Self::Reassign => "reassign",
            Self::Complete => "complete",
            Self::Remove => "remove",
            Self::BumpBy => "bump_by",
            Self::Edit => "edit",
            Self::AddComment => "add_comment",
            Self::DeleteComment => "delete_comment",
        }
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "create" => Ok(Self::Create),
            "send" => Ok(Self::Send),
            "receive" => Ok(Self::Receive),
            "accept" => Ok(Self::Accept),
            "reassign" => Ok(Self::Reassign),
            "complete" => Ok(Self::Complete),
            "remove" => Ok(Self::Remove),
            "bump_by" => Ok(Self::BumpBy),
            "edit" => Ok(Self::Edit),
            "add_comment" => Ok(Self::AddComment),
            "delete_comment" => Ok(Self::DeleteComment),
            _ => Err(ParseAuditActionError(value.to_owned())),
        }
    }
}

/// Append-only audit trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Entry identifier.
    pub id: AuditLogId,
    /// Issue the entry belongs to.
    pub issue: IssueId,
    /// User who performed the action.
    pub user: UserId,
    /// Action performed.
    pub action: AuditAction,
    /// Free-form context such as the other party or a comment identifier.
    pub metadata: Option<String>,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Creates an entry stamped with the clock's current time.
    #[must_use]
    pub fn record(
        issue: IssueId,
        user: UserId,
        action: AuditAction,
        metadata: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            issue,
            user,
            action,
            metadata,
            created_at: clock.utc(),
        }
    }
}

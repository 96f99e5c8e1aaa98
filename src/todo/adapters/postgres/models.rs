//! Diesel row models for todo persistence.

use super::schema::{todo_audit_log, todo_comments, todo_references, todos};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row of the `todos` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct IssueRow {
    /// Issue identifier.
    pub id: uuid::Uuid,
    /// Short message.
    pub message: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional link to the source post.
    pub permalink: Option<String>,
    /// Optional due time.
    pub due_at: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: i16,
    /// Creator user identifier.
    pub creator_id: String,
    /// Assignee user identifier.
    pub assignee_id: String,
    /// User holding the mirror record.
    pub foreign_user_id: Option<String>,
    /// Mirror record identifier.
    pub foreign_issue_id: Option<uuid::Uuid>,
    /// Issue status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row of the `todo_references` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_references)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReferenceRow {
    /// List owner.
    pub user_id: String,
    /// List kind.
    pub list: String,
    /// Listed issue.
    pub issue_id: uuid::Uuid,
    /// User holding the mirror record.
    pub foreign_user_id: Option<String>,
    /// Mirror record identifier.
    pub foreign_issue_id: Option<uuid::Uuid>,
    /// Ordering key, highest first.
    pub rank: i64,
}

/// Row of the `todo_comments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Commented issue.
    pub issue_id: uuid::Uuid,
    /// Author user identifier.
    pub author_id: String,
    /// Comment text.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row of the `todo_audit_log` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_audit_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Issue the entry belongs to.
    pub issue_id: uuid::Uuid,
    /// Acting user identifier.
    pub user_id: String,
    /// Recorded action.
    pub action: String,
    /// Free-form context.
    pub metadata: Option<String>,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

//! Domain model for todo lists shared between users.
//!
//! Issues, list references, comments and audit entries are plain values.
//! Everything that touches storage lives behind the ports.

mod error;
mod ids;
mod issue;
mod ledger;
mod projection;
mod reference;

pub use error::{
    ParseAuditActionError, ParseIssueStatusError, ParseListKindError, TodoDomainError,
};
pub use ids::{AuditLogId, CommentId, IssueId, UserId};
pub use issue::{ForeignLink, Issue, IssueFields, IssueStatus, PersistedIssueData, Priority};
pub use ledger::{AuditAction, AuditLog, Comment};
pub use projection::{ExtendedComment, ExtendedIssue, ListsIssue};
pub use reference::{IssueReference, ListKind, ListedReference};

//! Error types for todo domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The issue message is empty after trimming.
    #[error("issue message must not be empty")]
    EmptyMessage,

    /// The comment message is empty after trimming.
    #[error("comment message must not be empty")]
    EmptyComment,
}

/// Error returned while parsing issue statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);

/// Error returned while parsing list kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown list: {0}")]
pub struct ParseListKindError(pub String);

/// Error returned while parsing audit actions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);

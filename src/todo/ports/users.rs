//! Port onto the platform's user directory.

use crate::todo::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory lookups.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only view of platform users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the display name of a user.
    async fn display_name(&self, user: &UserId) -> UserDirectoryResult<String>;

    /// Returns whether the user administers the platform.
    async fn is_admin(&self, user: &UserId) -> UserDirectoryResult<bool>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// The user is unknown to the platform.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The directory could not be queried.
    #[error("user directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a lookup failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

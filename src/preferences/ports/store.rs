//! Preference storage port.

use crate::preferences::domain::UserPreferences;
use crate::todo::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for preference store operations.
pub type PreferenceStoreResult<T> = Result<T, PreferenceStoreError>;

/// Per-user preference persistence.
///
/// Users with nothing stored get [`UserPreferences::default`]. Each setter
/// changes one preference and leaves the others as they were.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Loads the preferences of `user`.
    async fn preferences(&self, user: &UserId) -> PreferenceStoreResult<UserPreferences>;

    /// Turns the daily reminder on or off.
    async fn set_reminder_enabled(&self, user: &UserId, enabled: bool)
    -> PreferenceStoreResult<()>;

    /// Stores when the last reminder went out.
    async fn set_last_reminder_at(
        &self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> PreferenceStoreResult<()>;

    /// Allows or blocks issues sent by other users.
    async fn set_accepts_incoming(&self, user: &UserId, enabled: bool)
    -> PreferenceStoreResult<()>;
}

/// Errors returned by preference store implementations.
#[derive(Debug, Clone, Error)]
pub enum PreferenceStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PreferenceStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

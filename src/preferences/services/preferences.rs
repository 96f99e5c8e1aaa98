//! Reminder scheduling and incoming-request gating.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::preferences::{
    domain::{PreferenceDomainError, UserPreferences, reminder_due, utc_offset},
    ports::{PreferenceStore, PreferenceStoreError},
};
use crate::todo::domain::UserId;

/// Service-level errors for preference operations.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PreferenceDomainError),
    /// Storage failed.
    #[error(transparent)]
    Store(#[from] PreferenceStoreError),
}

/// Result type for preference service operations.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Reads and updates per-user preferences.
#[derive(Clone)]
pub struct PreferenceService<P, C>
where
    P: PreferenceStore,
    C: Clock + Send + Sync,
{
    store: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> PreferenceService<P, C>
where
    P: PreferenceStore,
    C: Clock + Send + Sync,
{
    /// Creates a new preference service.
    #[must_use]
    pub const fn new(store: Arc<P>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the stored preferences of `user`.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Store`] when the preferences cannot be read.
    pub async fn preferences(&self, user: &UserId) -> PreferenceResult<UserPreferences> {
        Ok(self.store.preferences(user).await?)
    }

    /// Returns whether the daily reminder should be sent to `user` now.
    ///
    /// Users with an empty own list are never reminded. `utc_offset_minutes`
    /// is the user's offset east of UTC and decides where the day boundary
    /// falls.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Domain`] for an out-of-range offset, or
    /// [`PreferenceError::Store`] when the preferences cannot be read.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn reminder_due(
        &self,
        user: &UserId,
        own_items: usize,
        utc_offset_minutes: i32,
    ) -> PreferenceResult<bool> {
        if own_items == 0 {
            return Ok(false);
        }
        let offset = utc_offset(utc_offset_minutes)?;
        let prefs = self.store.preferences(user).await?;
        if !prefs.reminder_enabled {
            debug!("reminders disabled");
            return Ok(false);
        }
        Ok(reminder_due(prefs.last_reminder_at, self.clock.utc(), offset))
    }

    /// Records that a reminder went out now and returns the time stored.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Store`] when the time cannot be stored.
    #[instrument(skip_all, fields(user = %user))]
    pub async fn record_reminder(&self, user: &UserId) -> PreferenceResult<DateTime<Utc>> {
        let now = self.clock.utc();
        self.store.set_last_reminder_at(user, now).await?;
        info!("reminder recorded");
        Ok(now)
    }

    /// Returns whether `user` accepts issues from other users.
    ///
    /// A failed lookup is logged and treated as "accepts".
    pub async fn accepts_incoming(&self, user: &UserId) -> bool {
        match self.store.preferences(user).await {
            Ok(prefs) => prefs.accepts_incoming,
            Err(err) => {
                warn!(%user, error = %err, "cannot read incoming preference, allowing");
                true
            }
        }
    }

    /// Turns the daily reminder on or off.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Store`] when the preference cannot be
    /// stored.
    pub async fn set_reminder_enabled(&self, user: &UserId, enabled: bool) -> PreferenceResult<()> {
        self.store.set_reminder_enabled(user, enabled).await?;
        info!(%user, enabled, "reminder preference updated");
        Ok(())
    }

    /// Allows or blocks issues sent by other users.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Store`] when the preference cannot be
    /// stored.
    pub async fn set_accepts_incoming(&self, user: &UserId, enabled: bool) -> PreferenceResult<()> {
        self.store.set_accepts_incoming(user, enabled).await?;
        info!(%user, enabled, "incoming preference updated");
        Ok(())
    }
}

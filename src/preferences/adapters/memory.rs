//! In-memory preference store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::preferences::{
    domain::UserPreferences,
    ports::{PreferenceStore, PreferenceStoreError, PreferenceStoreResult},
};
use crate::todo::domain::UserId;

/// Thread-safe in-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    state: Arc<RwLock<HashMap<UserId, UserPreferences>>>,
}

impl InMemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn update(
        &self,
        user: &UserId,
        change: impl FnOnce(&mut UserPreferences),
    ) -> PreferenceStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PreferenceStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        change(state.entry(user.clone()).or_default());
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn preferences(&self, user: &UserId) -> PreferenceStoreResult<UserPreferences> {
        let state = self.state.read().map_err(|err| {
            PreferenceStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(user).copied().unwrap_or_default())
    }

    async fn set_reminder_enabled(
        &self,
        user: &UserId,
        enabled: bool,
    ) -> PreferenceStoreResult<()> {
        self.update(user, |prefs| prefs.reminder_enabled = enabled)
    }

    async fn set_last_reminder_at(
        &self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> PreferenceStoreResult<()> {
        self.update(user, |prefs| prefs.last_reminder_at = Some(at))
    }

    async fn set_accepts_incoming(
        &self,
        user: &UserId,
        enabled: bool,
    ) -> PreferenceStoreResult<()> {
        self.update(user, |prefs| prefs.accepts_incoming = enabled)
    }
}

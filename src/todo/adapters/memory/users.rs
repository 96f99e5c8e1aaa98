//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::todo::{
    domain::UserId,
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

#[derive(Debug, Clone)]
struct UserRecord {
    display_name: String,
    admin: bool,
}

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a regular user.
    #[must_use]
    pub fn with_user(self, user: UserId, display_name: impl Into<String>) -> Self {
        self.insert(user, display_name.into(), false);
        self
    }

    /// Registers a platform administrator.
    #[must_use]
    pub fn with_admin(self, user: UserId, display_name: impl Into<String>) -> Self {
        self.insert(user, display_name.into(), true);
        self
    }

    fn insert(&self, user: UserId, display_name: String, admin: bool) {
        if let Ok(mut users) = self.users.write() {
            users.insert(
                user,
                UserRecord {
                    display_name,
                    admin,
                },
            );
        }
    }

    fn record(&self, user: &UserId) -> UserDirectoryResult<UserRecord> {
        let users = self.users.read().map_err(|err| {
            UserDirectoryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        users
            .get(user)
            .cloned()
            .ok_or_else(|| UserDirectoryError::NotFound(user.clone()))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn display_name(&self, user: &UserId) -> UserDirectoryResult<String> {
        self.record(user).map(|record| record.display_name)
    }

    async fn is_admin(&self, user: &UserId) -> UserDirectoryResult<bool> {
        self.record(user).map(|record| record.admin)
    }
}

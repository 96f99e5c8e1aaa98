//! `PostgreSQL` implementation of [`PreferenceStore`].

use super::{models::PreferenceRow, schema::todo_preferences};
use crate::preferences::{
    domain::UserPreferences,
    ports::{PreferenceStore, PreferenceStoreError, PreferenceStoreResult},
};
use crate::todo::{adapters::postgres::TodoPgPool, domain::UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed preference store.
///
/// Setters upsert a row seeded with the defaults, so a user's first change
/// never clobbers the other preferences.
#[derive(Debug, Clone)]
pub struct PostgresPreferenceStore {
    pool: TodoPgPool,
}

impl PostgresPreferenceStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PreferenceStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PreferenceStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PreferenceStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PreferenceStoreError::persistence)?
    }
}

fn seed_row(user: &UserId) -> PreferenceRow {
    let defaults = UserPreferences::default();
    PreferenceRow {
        user_id: user.as_str().to_owned(),
        reminder_enabled: defaults.reminder_enabled,
        last_reminder_at: defaults.last_reminder_at,
        accepts_incoming: defaults.accepts_incoming,
    }
}

#[async_trait]
impl PreferenceStore for PostgresPreferenceStore {
    async fn preferences(&self, user: &UserId) -> PreferenceStoreResult<UserPreferences> {
        let owner = user.clone();
        self.run_blocking(move |connection| {
            let row = todo_preferences::table
                .filter(todo_preferences::user_id.eq(owner.as_str()))
                .select(PreferenceRow::as_select())
                .first::<PreferenceRow>(connection)
                .optional()
                .map_err(PreferenceStoreError::persistence)?;
            Ok(row.map_or_else(UserPreferences::default, |found| UserPreferences {
                reminder_enabled: found.reminder_enabled,
                last_reminder_at: found.last_reminder_at,
                accepts_incoming: found.accepts_incoming,
            }))
        })
        .await
    }

    async fn set_reminder_enabled(
        &self,
        user: &UserId,
        enabled: bool,
    ) -> PreferenceStoreResult<()> {
        let mut row = seed_row(user);
        row.reminder_enabled = enabled;
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_preferences::table)
                .values(&row)
                .on_conflict(todo_preferences::user_id)
                .do_update()
                .set(todo_preferences::reminder_enabled.eq(enabled))
                .execute(connection)
                .map_err(PreferenceStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn set_last_reminder_at(
        &self,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> PreferenceStoreResult<()> {
        let mut row = seed_row(user);
        row.last_reminder_at = Some(at);
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_preferences::table)
                .values(&row)
                .on_conflict(todo_preferences::user_id)
                .do_update()
                .set(todo_preferences::last_reminder_at.eq(Some(at)))
                .execute(connection)
                .map_err(PreferenceStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn set_accepts_incoming(
        &self,
        user: &UserId,
        enabled: bool,
    ) -> PreferenceStoreResult<()> {
        let mut row = seed_row(user);
        row.accepts_incoming = enabled;
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_preferences::table)
                .values(&row)
                .on_conflict(todo_preferences::user_id)
                .do_update()
                .set(todo_preferences::accepts_incoming.eq(enabled))
                .execute(connection)
                .map_err(PreferenceStoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

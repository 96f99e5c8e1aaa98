//! Diesel row model for preference persistence.

use super::schema::todo_preferences;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row of the `todo_preferences` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = todo_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PreferenceRow {
    /// User identifier.
    pub user_id: String,
    /// Whether the daily reminder is wanted.
    pub reminder_enabled: bool,
    /// When the last reminder went out.
    pub last_reminder_at: Option<DateTime<Utc>>,
    /// Whether other users may send issues.
    pub accepts_incoming: bool,
}

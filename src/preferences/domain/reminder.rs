//! Per-user preferences and the daily reminder rule.

use super::PreferenceDomainError;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Minimum spacing between two reminders.
pub const REMINDER_SPACING: TimeDelta = TimeDelta::hours(1);

/// Stored preferences of one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Whether the daily reminder is wanted.
    pub reminder_enabled: bool,
    /// When the last reminder went out, if ever.
    pub last_reminder_at: Option<DateTime<Utc>>,
    /// Whether other users may send issues to this user.
    pub accepts_incoming: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            reminder_enabled: true,
            last_reminder_at: None,
            accepts_incoming: true,
        }
    }
}

/// Converts a client offset in minutes east of UTC into a fixed offset.
///
/// # Errors
///
/// Returns [`PreferenceDomainError::InvalidUtcOffset`] when the offset is a
/// day or more away from UTC.
pub fn utc_offset(minutes_east: i32) -> Result<FixedOffset, PreferenceDomainError> {
    minutes_east
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(PreferenceDomainError::InvalidUtcOffset(minutes_east))
}

/// Returns whether a reminder should go out at `now`.
///
/// A reminder is due when at least [`REMINDER_SPACING`] has passed since the
/// last one and `now` falls on a different calendar day in `offset`. A user
/// never reminded before is always due.
#[must_use]
pub fn reminder_due(
    last_reminder_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> bool {
    let Some(last) = last_reminder_at else {
        return true;
    };
    let local_now = now.with_timezone(&offset).date_naive();
    let local_last = last.with_timezone(&offset).date_naive();
    now.signed_duration_since(last) >= REMINDER_SPACING && local_now != local_last
}

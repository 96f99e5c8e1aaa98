//! Domain model for user preferences.

mod error;
mod reminder;

pub use error::PreferenceDomainError;
pub use reminder::{REMINDER_SPACING, UserPreferences, reminder_due, utc_offset};

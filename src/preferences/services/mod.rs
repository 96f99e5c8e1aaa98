//! Application services for user preferences.

mod preferences;

pub use preferences::{PreferenceError, PreferenceResult, PreferenceService};

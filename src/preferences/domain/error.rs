//! Error types for preference validation.

use thiserror::Error;

/// Errors returned while constructing preference values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreferenceDomainError {
    /// The UTC offset lies outside a day in either direction.
    #[error("UTC offset of {0} minutes is out of range")]
    InvalidUtcOffset(i32),
}

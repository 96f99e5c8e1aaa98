//! Unit tests for user preferences.

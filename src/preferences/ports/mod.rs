//! Port contracts for preference storage.

mod store;

pub use store::{PreferenceStore, PreferenceStoreError, PreferenceStoreResult};

//! `PostgreSQL` adapter for preference storage.

mod models;
mod schema;
mod store;

pub use store::PostgresPreferenceStore;

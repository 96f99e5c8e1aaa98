//! `PostgreSQL` adapters for shared todo list persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresTodoStore, TodoPgPool};

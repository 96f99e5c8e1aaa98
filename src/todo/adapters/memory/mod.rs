//! In-memory adapters for shared todo lists.

mod faults;
mod store;
mod users;

#[cfg(any(test, feature = "test-support"))]
pub use faults::{InjectedFault, StoreOperation};
pub use store::InMemoryTodoStore;
pub use users::InMemoryUserDirectory;

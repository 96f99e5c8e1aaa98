//! Port contracts for shared todo lists.
//!
//! Ports define infrastructure-agnostic interfaces used by the services.
//! [`TodoStore`] bundles the storage ports one backend provides together.

mod directory;
mod error;
mod ledger;
mod registry;
mod users;

pub use directory::ReferenceDirectory;
pub use error::{StoreError, StoreResult};
pub use ledger::{AuditLedger, CommentLedger};
pub use registry::IssueRegistry;
pub use users::{UserDirectory, UserDirectoryError, UserDirectoryResult};

/// Every storage capability the list synchronisation engine needs.
pub trait TodoStore: IssueRegistry + ReferenceDirectory + AuditLedger + CommentLedger {}

impl<T> TodoStore for T where T: IssueRegistry + ReferenceDirectory + AuditLedger + CommentLedger {}

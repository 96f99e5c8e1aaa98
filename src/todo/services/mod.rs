//! Application services for shared todo lists.

mod audit;
mod error;
mod ledger;
mod outcomes;
mod projection;
mod saga;
mod sync;

pub use error::{ListSyncError, ListSyncResult};
pub use ledger::LedgerService;
pub use outcomes::{
    AcceptOutcome, BumpOutcome, CompletionOutcome, EditOutcome, PopOutcome, ReassignOutcome,
    RemovalOutcome, SendOutcome,
};
pub use projection::UNKNOWN_USER_NAME;
pub use sync::{Dispatch, ListSyncService};

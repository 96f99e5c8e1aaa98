//! Shared todo lists.
//!
//! An issue lives in exactly one list of each user who can see it. When two
//! users share an item each holds a separate issue record, and the two
//! records point at each other through a [`domain::ForeignLink`]. The
//! [`services::ListSyncService`] keeps both sides consistent without
//! cross-record transactions: paired steps are undone on failure, and
//! updates to the other user's copy are best-effort.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Crosslist: todo lists shared between users.
//!
//! Every user has three ordered lists. The own list holds their own items,
//! the incoming list holds items other users sent them, and the outgoing list
//! holds items they sent and are waiting on. Sending an item creates two
//! linked records, one per side, and the engine keeps both sides in step as
//! items are accepted, completed, removed, edited or reassigned.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and the user directory
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over the ports
//!
//! # Modules
//!
//! - [`todo`]: Issues, list synchronisation, comments and the audit trail
//! - [`preferences`]: Daily reminder and incoming-request preferences
//! - [`config`]: Environment-driven settings
//! - [`telemetry`]: Structured logging setup
//! - [`schema`]: Embedded SQL schema

pub mod config;
pub mod preferences;
pub mod schema;
pub mod telemetry;
pub mod todo;

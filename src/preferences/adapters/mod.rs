//! Adapter implementations for preference storage.

pub mod memory;
pub mod postgres;

//! Per-user preferences: the daily reminder and incoming-request gating.
//!
//! Laid out like [`crate::todo`]: domain values, a storage port, memory and
//! `PostgreSQL` adapters, and a service.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

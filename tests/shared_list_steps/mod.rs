//! Step definitions for shared list BDD scenarios.

pub mod world;

mod given;
mod then;

//! Configuration types
//!
//! Describes which inputs exist, how they are wired and how many
//! consistent ticks each needs before a new level is accepted.

pub mod types;

pub use types::*;

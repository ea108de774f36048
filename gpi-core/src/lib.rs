//! Board-agnostic core logic for interrupt-driven input debouncing
//!
//! This crate contains everything that does not depend on a specific
//! chip:
//!
//! - Per-input channel state (configuration, counters, debounced output)
//! - The timer arbiter that multiplexes one tick source across channels
//! - The two-phase debounce engine (edge interrupt, timer tick)
//! - A fixed-capacity channel bank addressed by small handles
//! - A lock-guarded bank for use from interrupt contexts
//! - Configuration type definitions
//!
//! # Flow
//!
//! ```text
//!  edge IRQ ──► on_edge_interrupt ──► arbiter: start timer on 0 → 1
//!                                            │
//!  tick IRQ ──► on_timer_tick ──► on_tick per debouncing channel
//!                                            │
//!                      threshold reached ──► commit, arbiter: stop on 1 → 0
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod arbiter;
pub mod bank;
pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod shared;

pub use arbiter::{Activation, Release, TimerArbiter};
pub use bank::DebounceBank;
pub use channel::{Channel, ChannelConfig, ChannelHandle, ChannelRuntime, Edge};
pub use error::RegisterError;
pub use shared::SharedBank;

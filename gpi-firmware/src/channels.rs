//! Inter-task signals
//!
//! Uses embassy-sync primitives for communication between the tick task
//! and the reporting task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// At least one input committed a new level on the last tick
pub static EDGES_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

//! GPI Debouncer Hardware Abstraction Layer
//!
//! This crate defines the two hardware collaborators the debounce core
//! depends on. Chip-specific HALs implement them; the core never touches
//! registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (gpi-firmware, etc.)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gpi-core (channels, arbiter, engine)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gpi-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  gpi-drivers  │       │ gpi-hal-      │
//! │ (embedded-hal)│       │    rp2040     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinAccess`] - Level reads addressed by input identity
//! - [`timer::TimerControl`] - The single shared periodic tick source

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::PinAccess;
pub use timer::TimerControl;

//! RP2040-specific HAL for the GPI debouncer
//!
//! This crate provides RP2040 implementations of the `gpi-hal` traits,
//! plus RP2040-specific helpers:
//!
//! - GPIO allocation and pin-string parsing for config-driven setup
//! - Bank-wide input reads through the SIO block (implements
//!   `gpi_hal::PinAccess`)
//!
//! The edge interrupt side stays with `embassy_rp::gpio::Input`, which
//! owns each pin for `wait_for_any_edge`; level reads go through SIO so
//! the tick handler never needs the `Input` itself.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod inputs;

pub use gpio::{parse_pin_string, GpioAllocator, PinError, PinSpec, GPIO_COUNT};
pub use inputs::SioInputs;

// Re-export shared traits from gpi-hal for convenience
pub use gpi_hal::{PinAccess, TimerControl};

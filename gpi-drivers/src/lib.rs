//! Platform adapters
//!
//! Concrete implementations of the `gpi-hal` traits that are not tied to
//! a specific chip:
//!
//! - [`inputs::HalInputs`] - any `embedded-hal` input pins as `PinAccess`
//! - [`tick::TickGate`] - an atomic run flag implementing `TimerControl`
//!   for software tick loops

#![no_std]
#![deny(unsafe_code)]

pub mod inputs;
pub mod tick;

pub use inputs::HalInputs;
pub use tick::TickGate;

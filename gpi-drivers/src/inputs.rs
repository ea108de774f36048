//! `embedded-hal` input adapter
//!
//! Wraps a fixed array of `embedded_hal::digital::InputPin`s so the
//! debounce core can read them by index. Active-low pins are inverted
//! here, so the core only ever sees logical levels.

use core::cell::RefCell;

use embedded_hal::digital::InputPin;
use gpi_hal::PinAccess;

/// Array of `embedded-hal` input pins addressed by index
///
/// `embedded-hal` reads take `&mut self`; the pins sit in a `RefCell`
/// because the bank reads them through a shared reference while it
/// already holds its own lock.
pub struct HalInputs<P, const N: usize> {
    pins: RefCell<[P; N]>,
    /// If true, the input is asserted when the pin is LOW
    active_low: [bool; N],
}

impl<P: InputPin, const N: usize> HalInputs<P, N> {
    /// Wrap pins that are all active-high
    pub fn new(pins: [P; N]) -> Self {
        Self::with_polarity(pins, [false; N])
    }

    /// Wrap pins with per-pin polarity
    pub fn with_polarity(pins: [P; N], active_low: [bool; N]) -> Self {
        Self {
            pins: RefCell::new(pins),
            active_low,
        }
    }

    /// Release the pins
    pub fn into_inner(self) -> [P; N] {
        self.pins.into_inner()
    }
}

impl<P: InputPin, const N: usize> PinAccess for HalInputs<P, N> {
    type Id = usize;

    /// Read the logical level of pin `id`
    ///
    /// A failed read, or an index out of range, reads as deasserted.
    fn read_level(&self, id: usize) -> bool {
        let mut pins = self.pins.borrow_mut();
        let Some(pin) = pins.get_mut(id) else {
            return false;
        };

        match pin.is_high() {
            Ok(high) => high != self.active_low[id],
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("input {} read failed", id);
                false
            }
        }
    }
}

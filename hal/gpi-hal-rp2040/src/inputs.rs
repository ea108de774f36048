//! Bank-wide input reads through SIO
//!
//! All 30 user GPIO levels are visible in one SIO register, so a single
//! read serves any pin. Inputs are addressed by GPIO number.

use embassy_rp::pac;
use gpi_core::config::DebounceConfig;
use gpi_hal::PinAccess;

use crate::gpio::GPIO_COUNT;

/// `PinAccess` over the RP2040 SIO input register
///
/// Reads do not need ownership of the pins, so each pin's
/// `embassy_rp::gpio::Input` can stay with the task that waits on its
/// edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct SioInputs {
    /// Bit n set: GPIO n is active-low
    active_low: u32,
}

impl SioInputs {
    /// All inputs active-high
    pub const fn new() -> Self {
        Self { active_low: 0 }
    }

    /// Take polarities from a debounce configuration
    pub fn from_config(config: &DebounceConfig) -> Self {
        let active_low = config
            .inputs
            .iter()
            .filter(|i| i.active_low && (i.pin as usize) < GPIO_COUNT)
            .fold(0, |mask, i| mask | (1 << i.pin));
        Self { active_low }
    }
}

impl PinAccess for SioInputs {
    type Id = u8;

    fn read_level(&self, pin: u8) -> bool {
        if pin as usize >= GPIO_COUNT {
            return false;
        }
        let raw = pac::SIO.gpio_in(0).read() ^ self.active_low;
        raw & (1 << pin) != 0
    }
}

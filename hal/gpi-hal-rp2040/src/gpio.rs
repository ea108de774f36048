//! GPIO allocation and pin-string parsing
//!
//! Tracks which GPIO pins are claimed by debounced inputs and parses the
//! pin strings used in board descriptions.

use heapless::FnvIndexSet;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when claiming or parsing a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid) or malformed pin string
    InvalidPin,
    /// Pin already claimed by another input
    AlreadyAllocated,
}

/// Parsed pin string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    /// GPIO number
    pub pin: u8,
    /// Input is asserted when the pin reads LOW
    pub active_low: bool,
    /// Enable the internal pull-up
    pub pull_up: bool,
}

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    /// Set of allocated GPIO pins
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    /// Create a new GPIO allocator
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        match self.allocated.insert(pin) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PinError::AlreadyAllocated),
            Err(_) => Err(PinError::InvalidPin),
        }
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// Parse a pin string from a board description
///
/// Supports formats:
/// - "gpio11" -> pin 11, active-high, no pull
/// - "!gpio12" -> pin 12, active-low
/// - "^gpio4" -> pin 4 with pull-up
/// - "!^gpio5" -> pin 5, active-low with pull-up (typical button to GND)
pub fn parse_pin_string(s: &str) -> Result<PinSpec, PinError> {
    let s = s.trim();

    let (s, active_low) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s
        .strip_prefix("gpio")
        .and_then(|n| n.parse().ok())
        .ok_or(PinError::InvalidPin)?;

    if pin as usize >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }

    Ok(PinSpec {
        pin,
        active_low,
        pull_up,
    })
}

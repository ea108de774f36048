//! Board description
//!
//! Lists the debounced inputs of this board and turns them into a
//! validated [`DebounceConfig`]. Pin strings use the `gpi-hal-rp2040`
//! format (`!` active-low, `^` pull-up).

use embassy_rp::gpio::Pull;
use gpi_core::config::{ConfigError, DebounceConfig, InputConfig};
use gpi_hal_rp2040::{parse_pin_string, GpioAllocator, PinError};

/// Number of debounced inputs on this board
pub const INPUT_COUNT: usize = 4;

/// Shared tick period
pub const TICK_INTERVAL_MS: u32 = 2;

/// (label, pin, threshold in ticks)
///
/// Order must match the pins taken in `main`.
const INPUTS: [(&str, &str, u16); INPUT_COUNT] = [
    ("start", "!^gpio11", 5),
    ("stop", "!^gpio12", 5),
    ("door", "^gpio13", 10),
    ("limit", "gpio14", 3),
];

/// Errors in the board description
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// Malformed or conflicting pin
    Pin(PinError),
    /// Invalid debounce configuration
    Config(ConfigError),
}

impl From<PinError> for BoardError {
    fn from(e: PinError) -> Self {
        BoardError::Pin(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Config(e)
    }
}

/// Parsed board description
pub struct Board {
    /// Debounce configuration, in the same order as `pulls`
    pub config: DebounceConfig,
    /// Pull setting for each input
    pub pulls: [Pull; INPUT_COUNT],
}

/// Parse and validate the board's inputs
pub fn load() -> Result<Board, BoardError> {
    let mut allocator = GpioAllocator::new();
    let mut config = DebounceConfig {
        tick_interval_ms: TICK_INTERVAL_MS,
        ..Default::default()
    };
    let mut pulls = [Pull::None; INPUT_COUNT];

    for (pull, (label, pin, threshold)) in pulls.iter_mut().zip(INPUTS) {
        let spec = parse_pin_string(pin)?;
        allocator.allocate(spec.pin)?;

        let mut input = InputConfig::new(label, spec.pin).with_threshold(threshold);
        input.active_low = spec.active_low;
        config.add_input(input)?;

        if spec.pull_up {
            *pull = Pull::Up;
        }
    }

    config.validate()?;
    Ok(Board { config, pulls })
}

//! Configuration type definitions
//!
//! These types describe the board's debounced inputs. With the `serde`
//! feature they can be stored in flash as postcard-serialized binary data.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum debounced inputs per config
pub const MAX_INPUTS: usize = 16;

/// Default number of consistent ticks before a level is accepted
pub const DEFAULT_THRESHOLD: u16 = 5;

/// Default tick period of the shared timer
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 2;

/// Configuration validation and persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An input has a threshold of zero
    ZeroThreshold,
    /// More inputs than [`MAX_INPUTS`]
    TooManyInputs,
    /// Two inputs use the same pin
    DuplicatePin,
    /// Tick interval of zero
    InvalidTickInterval,
    /// Serialization failed (buffer too small)
    Encode,
    /// Deserialization failed
    Decode,
}

/// One debounced input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Display label
    pub label: String<MAX_LABEL_LEN>,
    /// Physical pin number
    pub pin: u8,
    /// Input reads low when asserted
    pub active_low: bool,
    /// Consecutive consistent ticks needed to accept a new level
    pub threshold: u16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            pin: 0,
            active_low: false,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl InputConfig {
    /// Create an input with the default threshold
    ///
    /// Labels longer than [`MAX_LABEL_LEN`] are truncated.
    pub fn new(label: &str, pin: u8) -> Self {
        let mut l = String::new();
        for c in label.chars() {
            if l.push(c).is_err() {
                break;
            }
        }
        Self {
            label: l,
            pin,
            ..Default::default()
        }
    }

    /// Mark the input as active-low
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    /// Override the debounce threshold
    pub fn with_threshold(mut self, threshold: u16) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Complete debouncer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebounceConfig {
    /// Period of the shared tick timer in milliseconds
    pub tick_interval_ms: u32,
    /// Debounced inputs
    pub inputs: Vec<InputConfig, MAX_INPUTS>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            inputs: Vec::new(),
        }
    }
}

impl DebounceConfig {
    /// Add an input
    pub fn add_input(&mut self, input: InputConfig) -> Result<(), ConfigError> {
        self.inputs.push(input).map_err(|_| ConfigError::TooManyInputs)
    }

    /// Find an input by label
    pub fn find_input(&self, label: &str) -> Option<&InputConfig> {
        self.inputs.iter().find(|i| i.label.as_str() == label)
    }

    /// Check the configuration for errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }

        for (i, input) in self.inputs.iter().enumerate() {
            if input.threshold == 0 {
                return Err(ConfigError::ZeroThreshold);
            }
            if self.inputs[..i].iter().any(|other| other.pin == input.pin) {
                return Err(ConfigError::DuplicatePin);
            }
        }

        Ok(())
    }

    /// Worst-case debounce latency of an input, in milliseconds
    ///
    /// This is the time a perfectly clean edge needs to commit. Noisy
    /// inputs take longer, without bound.
    pub fn settle_time_ms(&self, input: &InputConfig) -> u32 {
        self.tick_interval_ms.saturating_mul(input.threshold as u32)
    }

    /// Serialize to postcard bytes
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize from postcard bytes and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}

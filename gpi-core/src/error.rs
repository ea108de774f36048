//! Registration errors
//!
//! The steady-state entry points never fail; misconfiguration is caught
//! once, when a channel is registered during initialization.

/// Errors returned when registering a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Threshold of zero would commit without any confirming sample
    ZeroThreshold,
    /// All statically reserved channel slots are taken
    BankFull,
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegisterError::ZeroThreshold => f.write_str("debounce threshold must be at least 1"),
            RegisterError::BankFull => f.write_str("no free channel slots"),
        }
    }
}

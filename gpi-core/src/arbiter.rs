//! Shared tick timer arbitration
//!
//! One physical timer serves every channel. The arbiter counts how many
//! channels are mid-debounce and keeps the timer running exactly while
//! that count is non-zero.

use gpi_hal::TimerControl;

/// Outcome of a channel becoming active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activation {
    /// First active channel; the timer was started
    Started,
    /// Timer was already running for other channels
    Joined,
    /// Count was already at capacity and was held there
    ///
    /// Only reachable when the arbiter is driven directly, bypassing
    /// the per-channel debouncing gate.
    Saturated,
}

/// Outcome of a channel becoming inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// Last active channel; the timer was stopped
    Stopped,
    /// Other channels still need the timer
    StillRunning,
    /// Count was already zero; it stays zero and the timer is stopped
    Underflow,
}

/// Reference-counting owner of the shared tick timer
///
/// `capacity` grows by one per registered channel and never shrinks.
/// `active` is kept within `0..=capacity`, and the timer is running if
/// and only if `active > 0`.
#[derive(Debug)]
pub struct TimerArbiter<T> {
    timer: T,
    /// Number of registered channels
    capacity: u16,
    /// Number of channels currently debouncing
    active: u16,
}

impl<T: TimerControl> TimerArbiter<T> {
    /// Create an arbiter around the platform timer
    ///
    /// The timer is stopped so that it starts out consistent with an
    /// active count of zero.
    pub fn new(mut timer: T) -> Self {
        timer.stop();
        Self {
            timer,
            capacity: 0,
            active: 0,
        }
    }

    /// Reserve room for one more channel
    ///
    /// Called once per channel at registration.
    pub fn reserve(&mut self) {
        self.capacity = self.capacity.saturating_add(1);
    }

    /// A channel has started a confidence run
    ///
    /// Starts the timer on the transition from zero, then increments the
    /// active count. The count never exceeds capacity; an increment that
    /// would is dropped and reported as [`Activation::Saturated`].
    pub fn note_channel_became_active(&mut self) -> Activation {
        let was_idle = self.active == 0;
        if was_idle && self.capacity > 0 {
            self.timer.start();
        }

        if self.active >= self.capacity {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "arbiter saturated: active={} capacity={}",
                self.active,
                self.capacity
            );
            return Activation::Saturated;
        }

        self.active += 1;
        if was_idle {
            Activation::Started
        } else {
            Activation::Joined
        }
    }

    /// A channel has committed and no longer needs ticks
    ///
    /// Decrements the active count, floored at zero, and stops the timer
    /// once nothing is left.
    pub fn note_channel_became_inactive(&mut self) -> Release {
        match self.active {
            0 => {
                #[cfg(feature = "defmt")]
                defmt::warn!("arbiter release with no active channels");
                self.timer.stop();
                Release::Underflow
            }
            1 => {
                self.active = 0;
                self.timer.stop();
                Release::Stopped
            }
            _ => {
                self.active -= 1;
                Release::StillRunning
            }
        }
    }

    /// Number of channels currently holding the timer
    pub fn active_count(&self) -> u16 {
        self.active
    }

    /// Number of registered channels
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    /// Whether the timer should currently be delivering ticks
    pub fn is_running(&self) -> bool {
        self.active > 0
    }

    /// Borrow the platform timer
    pub fn timer(&self) -> &T {
        &self.timer
    }
}

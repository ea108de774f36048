//! Per-input debounce channel
//!
//! A channel holds the immutable configuration of one physical input and
//! the runtime state the engine drives through Idle → Debouncing → Idle.

use gpi_hal::{PinAccess, TimerControl};

use crate::arbiter::TimerArbiter;
use crate::error::RegisterError;

/// Committed level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low → high
    Rising,
    /// High → low
    Falling,
}

impl Edge {
    /// Edge that commits the given level
    pub fn committing(level: bool) -> Self {
        if level {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// Handle to a registered channel
///
/// Handles are small indices into a fixed-capacity bank, tagged with the
/// issuing bank, and stay valid for the life of that bank. Any other bank
/// treats them as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelHandle {
    pub(crate) bank: u16,
    pub(crate) index: u8,
}

impl ChannelHandle {
    /// Index of the channel within its bank
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Immutable channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig<Id> {
    /// Identity of the physical input
    pub id: Id,
    /// Consecutive consistent tick samples needed to accept a new level
    pub threshold: u16,
}

/// Mutable channel state, written only by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRuntime {
    /// Most recent level seen by the edge handler
    pub raw_state: bool,
    /// Level seen by the edge handler before `raw_state`
    pub prev_raw_state: bool,
    /// Consecutive high tick samples
    pub high_count: u16,
    /// Consecutive low tick samples
    pub low_count: u16,
    /// A confidence run is in progress (holds one arbiter unit)
    pub debouncing: bool,
    /// Last accepted stable level
    pub debounced_state: bool,
    /// Edge committed since the consumer last took it
    pub edge: Option<Edge>,
}

impl ChannelRuntime {
    /// Runtime seeded from an initial level, with nothing pending
    pub fn seeded(level: bool) -> Self {
        Self {
            raw_state: level,
            prev_raw_state: level,
            debounced_state: level,
            ..Self::default()
        }
    }
}

/// A registered input channel
#[derive(Debug, Clone)]
pub struct Channel<Id> {
    config: ChannelConfig<Id>,
    pub(crate) runtime: ChannelRuntime,
}

impl<Id: Copy> Channel<Id> {
    /// Register a new channel
    ///
    /// Reads the input once so that the first report is a real
    /// transition, and reserves one unit of arbiter capacity.
    pub fn register<P, T>(
        id: Id,
        threshold: u16,
        pins: &P,
        arbiter: &mut TimerArbiter<T>,
    ) -> Result<Self, RegisterError>
    where
        P: PinAccess<Id = Id>,
        T: TimerControl,
    {
        if threshold == 0 {
            return Err(RegisterError::ZeroThreshold);
        }

        let level = pins.read_level(id);
        arbiter.reserve();

        Ok(Self {
            config: ChannelConfig { id, threshold },
            runtime: ChannelRuntime::seeded(level),
        })
    }

    /// Channel configuration
    pub fn config(&self) -> &ChannelConfig<Id> {
        &self.config
    }

    /// Snapshot of the runtime state
    pub fn runtime(&self) -> &ChannelRuntime {
        &self.runtime
    }

    /// Identity of the physical input
    pub fn id(&self) -> Id {
        self.config.id
    }

    /// Last accepted stable level
    pub fn debounced_state(&self) -> bool {
        self.runtime.debounced_state
    }

    /// Whether a confidence run is in progress
    pub fn is_debouncing(&self) -> bool {
        self.runtime.debouncing
    }

    /// Pending edge, left in place
    pub fn peek_edge(&self) -> Option<Edge> {
        self.runtime.edge
    }

    /// Pending edge, cleared so it is reported once
    pub fn take_edge(&mut self) -> Option<Edge> {
        self.runtime.edge.take()
    }
}

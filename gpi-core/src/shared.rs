//! Lock-guarded bank for interrupt contexts
//!
//! Edge interrupts and timer ticks may preempt one another. Channel state
//! and the arbiter's count must change together, so every entry point
//! here runs its whole critical section inside one mutex lock. The lock
//! is closure-scoped and released on every exit path.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;
use gpi_hal::{PinAccess, TimerControl};

use crate::bank::DebounceBank;
use crate::channel::{ChannelHandle, Edge};
use crate::error::RegisterError;

/// A [`DebounceBank`] behind a blocking mutex
///
/// With [`CriticalSectionRawMutex`] (the default for [`SharedBank::new`])
/// the lock disables interrupts, which makes it safe to call from any
/// interrupt priority and from thread mode.
pub struct SharedBank<M: RawMutex, P: PinAccess, T, const N: usize> {
    inner: Mutex<M, RefCell<DebounceBank<P, T, N>>>,
}

impl<P: PinAccess, T: TimerControl, const N: usize> SharedBank<CriticalSectionRawMutex, P, T, N> {
    /// Wrap a bank in a critical-section lock
    pub const fn new(bank: DebounceBank<P, T, N>) -> Self {
        Self::with_mutex(CriticalSectionRawMutex::new(), bank)
    }
}

impl<M: RawMutex, P: PinAccess, T: TimerControl, const N: usize> SharedBank<M, P, T, N> {
    /// Wrap a bank in the given raw mutex
    pub const fn with_mutex(raw: M, bank: DebounceBank<P, T, N>) -> Self {
        Self {
            inner: Mutex::const_new(raw, RefCell::new(bank)),
        }
    }

    /// Run `f` with exclusive access to the bank
    ///
    /// `f` must not call back into this `SharedBank`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut DebounceBank<P, T, N>) -> R) -> R {
        self.inner.lock(|bank| f(&mut bank.borrow_mut()))
    }

    /// Register an input (initialization only)
    pub fn register(&self, id: P::Id, threshold: u16) -> Result<ChannelHandle, RegisterError> {
        self.lock(|bank| bank.register(id, threshold))
    }

    /// Edge interrupt entry point
    pub fn on_edge_interrupt(&self, handle: ChannelHandle) -> bool {
        self.lock(|bank| bank.on_edge_interrupt(handle))
    }

    /// Timer tick entry point for one channel
    pub fn on_tick(&self, handle: ChannelHandle) -> Option<Edge> {
        self.lock(|bank| bank.on_tick(handle))
    }

    /// Timer tick entry point for every debouncing channel
    pub fn on_timer_tick(&self) -> usize {
        self.lock(|bank| bank.on_timer_tick())
    }

    /// Last accepted stable level of a channel
    pub fn debounced_state(&self, handle: ChannelHandle) -> Option<bool> {
        self.lock(|bank| bank.debounced_state(handle))
    }

    /// Pending edge of a channel, cleared so it is reported once
    pub fn take_edge(&self, handle: ChannelHandle) -> Option<Edge> {
        self.lock(|bank| bank.take_edge(handle))
    }

    /// Whether the shared timer should be delivering ticks
    pub fn timer_running(&self) -> bool {
        self.lock(|bank| bank.arbiter().is_running())
    }
}

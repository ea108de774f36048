//! Software tick gate
//!
//! On targets where the shared tick comes from a software loop (an async
//! ticker task rather than a dedicated hardware timer), "starting" the
//! timer means letting that loop run. The gate holds the run flag and
//! wakes the loop when the arbiter starts it.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use gpi_hal::TimerControl;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Run flag for a software tick loop
pub struct TickGate {
    running: AtomicBool,
    /// Number of stopped → running transitions
    starts: AtomicU32,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new()
    }
}

impl TickGate {
    /// Create a stopped gate
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            starts: AtomicU32::new(0),
            wake: Signal::new(),
        }
    }

    /// Whether the tick loop should be running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of times the gate has been opened
    pub fn start_count(&self) -> u32 {
        self.starts.load(Ordering::Relaxed)
    }

    /// Wait until the gate is open
    ///
    /// Returns immediately if it already is.
    pub async fn wait_running(&self) {
        while !self.is_running() {
            self.wake.wait().await;
        }
    }

    fn open(&self) {
        if !self.running.swap(true, Ordering::AcqRel) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }
        self.wake.signal(());
    }

    fn close(&self) {
        self.running.store(false, Ordering::Release);
    }
}

impl TimerControl for &TickGate {
    fn start(&mut self) {
        self.open();
    }

    fn stop(&mut self) {
        self.close();
    }
}

impl TimerControl for TickGate {
    fn start(&mut self) {
        self.open();
    }

    fn stop(&mut self) {
        self.close();
    }
}

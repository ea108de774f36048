//! Shared tick task
//!
//! Runs only while the arbiter holds the tick gate open. Each tick
//! advances every debouncing input by one sample.

use defmt::*;
use embassy_time::{Duration, Ticker};
use gpi_drivers::TickGate;

use crate::channels::EDGES_READY;
use crate::Bank;

/// Tick task - drives confidence counting while any input is debouncing
#[embassy_executor::task]
pub async fn tick_task(bank: &'static Bank, gate: &'static TickGate, interval_ms: u32) {
    info!("Tick task started ({} ms period)", interval_ms);

    loop {
        gate.wait_running().await;

        let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));
        while gate.is_running() {
            ticker.next().await;

            if bank.on_timer_tick() > 0 {
                EDGES_READY.signal(());
            }
        }

        trace!("Tick source idle");
    }
}

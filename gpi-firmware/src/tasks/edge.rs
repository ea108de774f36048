//! Edge interrupt task
//!
//! One instance per input. Waits for any edge on its pin and hands the
//! event to the shared bank.

use defmt::*;
use embassy_rp::gpio::Input;
use gpi_core::ChannelHandle;

use crate::board::INPUT_COUNT;
use crate::Bank;

/// Edge task - one per debounced input
#[embassy_executor::task(pool_size = INPUT_COUNT)]
pub async fn edge_task(mut input: Input<'static>, handle: ChannelHandle, bank: &'static Bank) {
    debug!("Edge task started for input {}", handle.index());

    loop {
        input.wait_for_any_edge().await;

        if bank.on_edge_interrupt(handle) {
            trace!("Input {} debouncing", handle.index());
        }
    }
}

//! Edge reporting task
//!
//! Consumes committed edges, once each, and logs them by input label.

use defmt::*;
use gpi_core::config::{DebounceConfig, MAX_INPUTS};
use gpi_core::{ChannelHandle, Edge};
use heapless::Vec;

use crate::channels::EDGES_READY;
use crate::Bank;

/// Report task - reads and clears pending edges after each commit
#[embassy_executor::task]
pub async fn report_task(
    bank: &'static Bank,
    handles: Vec<ChannelHandle, MAX_INPUTS>,
    config: &'static DebounceConfig,
) {
    info!("Report task started");

    loop {
        EDGES_READY.wait().await;

        for (&handle, input) in handles.iter().zip(config.inputs.iter()) {
            match bank.take_edge(handle) {
                Some(Edge::Rising) => info!("{}: asserted", input.label.as_str()),
                Some(Edge::Falling) => info!("{}: released", input.label.as_str()),
                None => {}
            }
        }
    }
}

//! GPI Debouncer - RP2040 firmware
//!
//! Debounces the board's inputs with one edge task per pin and a single
//! shared tick that only runs while some input is settling.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{AnyPin, Input};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Vec;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gpi_core::config::DebounceConfig;
use gpi_core::{DebounceBank, SharedBank};
use gpi_drivers::TickGate;
use gpi_hal_rp2040::SioInputs;

use crate::board::INPUT_COUNT;

mod board;
mod channels;
mod tasks;

/// The board's debounce bank, shared between edge and tick tasks
pub type Bank = SharedBank<CriticalSectionRawMutex, SioInputs, &'static TickGate, INPUT_COUNT>;

/// Run flag of the shared tick source
static TICK_GATE: TickGate = TickGate::new();

// Static cells (must live forever for task references)
static BANK: StaticCell<Bank> = StaticCell::new();
static CONFIG: StaticCell<DebounceConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("GPI debouncer starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = match board::load() {
        Ok(board) => board,
        Err(e) => {
            error!("Invalid board description: {:?}", e);
            panic!("cannot start without a valid board description");
        }
    };
    let config: &'static DebounceConfig = CONFIG.init(board.config);

    // Order and numbers match board::INPUTS
    let pins: [Peri<'static, AnyPin>; INPUT_COUNT] = [
        p.PIN_11.into(),
        p.PIN_12.into(),
        p.PIN_13.into(),
        p.PIN_14.into(),
    ];

    // Configure pulls before registration so the seeding read is settled
    let inputs: Vec<Input<'static>, INPUT_COUNT> = pins
        .into_iter()
        .zip(board.pulls)
        .map(|(pin, pull)| Input::new(pin, pull))
        .collect();

    let mut bank = DebounceBank::new(SioInputs::from_config(config), &TICK_GATE);
    let handles = match bank.register_inputs(config, |input| input.pin) {
        Ok(handles) => handles,
        Err(e) => {
            error!("Input registration failed: {:?}", e);
            panic!("cannot register inputs");
        }
    };
    for (&handle, input) in handles.iter().zip(config.inputs.iter()) {
        info!(
            "Input '{}' on gpio{} (threshold {}, settles in {} ms)",
            input.label.as_str(),
            input.pin,
            input.threshold,
            config.settle_time_ms(input)
        );
        debug!("  handle {}", handle.index());
    }
    let bank: &'static Bank = BANK.init(SharedBank::new(bank));

    // Spawn tasks - edge tasks last, once the bank is complete
    spawner
        .spawn(tasks::tick_task(bank, &TICK_GATE, config.tick_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::report_task(bank, handles.clone(), config))
        .unwrap();
    for (input, &handle) in inputs.into_iter().zip(handles.iter()) {
        spawner.spawn(tasks::edge_task(input, handle, bank)).unwrap();
    }

    info!("All tasks spawned, debouncer running");
}

//! Fixed-capacity channel bank
//!
//! Channels are registered once at boot and never removed, so they live
//! in a pre-sized arena and are addressed by small integer handles. The
//! bank owns the pin access, the timer arbiter and every channel, which
//! keeps one bank's state fully independent of any other.

use gpi_hal::{PinAccess, TimerControl};
use heapless::Vec;
use portable_atomic::{AtomicU16, Ordering};

use crate::arbiter::TimerArbiter;
use crate::channel::{Channel, ChannelHandle, Edge};
use crate::config::{DebounceConfig, InputConfig, MAX_INPUTS};
use crate::engine;
use crate::error::RegisterError;

/// Tag for the next bank created
static NEXT_BANK_ID: AtomicU16 = AtomicU16::new(0);

/// A set of up to `N` debounced inputs sharing one tick timer
pub struct DebounceBank<P: PinAccess, T, const N: usize> {
    id: u16,
    pins: P,
    arbiter: TimerArbiter<T>,
    channels: Vec<Channel<P::Id>, N>,
}

impl<P: PinAccess, T: TimerControl, const N: usize> DebounceBank<P, T, N> {
    /// Create an empty bank
    pub fn new(pins: P, timer: T) -> Self {
        Self {
            id: NEXT_BANK_ID.fetch_add(1, Ordering::Relaxed),
            pins,
            arbiter: TimerArbiter::new(timer),
            channels: Vec::new(),
        }
    }

    /// Register an input
    ///
    /// Must be called during initialization, before the input's edge
    /// interrupt is enabled.
    pub fn register(
        &mut self,
        id: P::Id,
        threshold: u16,
    ) -> Result<ChannelHandle, RegisterError> {
        // Handles are u8, so at most 255 channels per bank
        let index = u8::try_from(self.channels.len())
            .ok()
            .filter(|&i| i < u8::MAX && !self.channels.is_full())
            .ok_or(RegisterError::BankFull)?;

        let channel = Channel::register(id, threshold, &self.pins, &mut self.arbiter)?;
        self.channels.push(channel).map_err(|_| RegisterError::BankFull)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("registered channel {} (threshold {})", index, threshold);

        Ok(ChannelHandle {
            bank: self.id,
            index,
        })
    }

    /// Register every input of a configuration, in order
    ///
    /// `id` maps an input entry to the platform's pin identity.
    pub fn register_inputs<F>(
        &mut self,
        config: &DebounceConfig,
        mut id: F,
    ) -> Result<Vec<ChannelHandle, MAX_INPUTS>, RegisterError>
    where
        F: FnMut(&InputConfig) -> P::Id,
    {
        let mut handles = Vec::new();
        for input in &config.inputs {
            let handle = self.register(id(input), input.threshold)?;
            handles.push(handle).map_err(|_| RegisterError::BankFull)?;
        }
        Ok(handles)
    }

    /// Edge interrupt entry point for one channel
    ///
    /// Unknown handles are ignored.
    pub fn on_edge_interrupt(&mut self, handle: ChannelHandle) -> bool {
        let Some(index) = self.slot(handle) else {
            return false;
        };
        engine::on_edge_interrupt(&mut self.channels[index], &self.pins, &mut self.arbiter)
    }

    /// Timer tick entry point for one channel
    ///
    /// Unknown handles and idle channels are ignored.
    pub fn on_tick(&mut self, handle: ChannelHandle) -> Option<Edge> {
        let index = self.slot(handle)?;
        engine::on_tick(&mut self.channels[index], &self.pins, &mut self.arbiter)
    }

    /// Run one tick for every debouncing channel
    ///
    /// This is the body of the shared timer's tick handler. Returns the
    /// number of channels that committed on this tick.
    pub fn on_timer_tick(&mut self) -> usize {
        let mut committed = 0;
        for channel in self.channels.iter_mut().filter(|c| c.is_debouncing()) {
            if engine::on_tick(channel, &self.pins, &mut self.arbiter).is_some() {
                committed += 1;
            }
        }
        committed
    }

    /// Look up a channel
    pub fn channel(&self, handle: ChannelHandle) -> Option<&Channel<P::Id>> {
        self.channels.get(self.slot(handle)?)
    }

    /// Last accepted stable level of a channel
    pub fn debounced_state(&self, handle: ChannelHandle) -> Option<bool> {
        self.channel(handle).map(Channel::debounced_state)
    }

    /// Whether a channel is mid-debounce
    pub fn is_debouncing(&self, handle: ChannelHandle) -> bool {
        self.channel(handle).is_some_and(Channel::is_debouncing)
    }

    /// Pending edge of a channel, left in place
    pub fn peek_edge(&self, handle: ChannelHandle) -> Option<Edge> {
        self.channel(handle).and_then(Channel::peek_edge)
    }

    /// Pending edge of a channel, cleared so it is reported once
    pub fn take_edge(&mut self, handle: ChannelHandle) -> Option<Edge> {
        let index = self.slot(handle)?;
        self.channels[index].take_edge()
    }

    /// Configured threshold of a channel
    pub fn threshold(&self, handle: ChannelHandle) -> Option<u16> {
        self.channel(handle).map(|c| c.config().threshold)
    }

    /// Handles of all registered channels
    pub fn handles(&self) -> impl Iterator<Item = ChannelHandle> {
        let bank = self.id;
        (0..self.channels.len() as u8).map(move |index| ChannelHandle { bank, index })
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel is registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// The shared timer arbiter
    pub fn arbiter(&self) -> &TimerArbiter<T> {
        &self.arbiter
    }

    /// The platform pin access
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Arena index of a handle issued by this bank
    fn slot(&self, handle: ChannelHandle) -> Option<usize> {
        (handle.bank == self.id && handle.index() < self.channels.len()).then_some(handle.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockPins {
        levels: [Cell<bool>; 4],
    }

    impl MockPins {
        fn new() -> Self {
            Self {
                levels: Default::default(),
            }
        }
    }

    impl PinAccess for MockPins {
        type Id = u8;

        fn read_level(&self, id: u8) -> bool {
            self.levels
                .get(id as usize)
                .map(Cell::get)
                .unwrap_or(false)
        }
    }

    #[derive(Default)]
    struct MockTimer {
        running: bool,
        starts: u32,
    }

    impl TimerControl for MockTimer {
        fn start(&mut self) {
            self.running = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.running = false;
        }
    }

    type Bank = DebounceBank<MockPins, MockTimer, 2>;

    fn bank() -> Bank {
        DebounceBank::new(MockPins::new(), MockTimer::default())
    }

    fn set(bank: &Bank, id: u8, level: bool) {
        bank.pins().levels[id as usize].set(level);
    }

    #[test]
    fn test_register_handles() {
        let mut bank = bank();

        let a = bank.register(0, 3).unwrap();
        let b = bank.register(1, 5).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.threshold(b), Some(5));
        assert_eq!(bank.arbiter().capacity(), 2);
    }

    #[test]
    fn test_bank_full() {
        let mut bank = bank();
        bank.register(0, 1).unwrap();
        bank.register(1, 1).unwrap();

        assert_eq!(bank.register(2, 1), Err(RegisterError::BankFull));
        assert_eq!(bank.arbiter().capacity(), 2);
    }

    #[test]
    fn test_zero_threshold() {
        let mut bank = bank();
        assert_eq!(bank.register(0, 0), Err(RegisterError::ZeroThreshold));
        assert!(bank.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_noop() {
        let mut bank = bank();
        let stray = ChannelHandle {
            bank: bank.id,
            index: 1,
        };

        assert!(!bank.on_edge_interrupt(stray));
        assert_eq!(bank.on_tick(stray), None);
        assert_eq!(bank.debounced_state(stray), None);
        assert_eq!(bank.take_edge(stray), None);
        assert!(!bank.is_debouncing(stray));
    }

    #[test]
    fn test_handle_from_other_bank_is_noop() {
        let mut first = bank();
        let mut second = bank();
        let theirs = first.register(0, 1).unwrap();
        let ours = second.register(0, 1).unwrap();
        assert_eq!(theirs.index(), ours.index());

        set(&second, 0, true);
        assert!(!second.on_edge_interrupt(theirs));
        assert_eq!(second.on_tick(theirs), None);
        assert_eq!(second.debounced_state(theirs), None);
        assert_eq!(second.take_edge(theirs), None);
        assert_eq!(second.threshold(theirs), None);
        assert_eq!(second.arbiter().active_count(), 0);
        assert!(!second.arbiter().timer().running);

        // The bank's own handle still works
        assert!(second.on_edge_interrupt(ours));
        assert_eq!(second.arbiter().active_count(), 1);
        assert!(!first.is_debouncing(theirs));
    }

    #[test]
    fn test_timer_tick_drives_all_debouncing() {
        let mut bank = bank();
        let a = bank.register(0, 2).unwrap();
        let b = bank.register(1, 3).unwrap();

        set(&bank, 0, true);
        bank.on_edge_interrupt(a);
        set(&bank, 1, true);
        bank.on_edge_interrupt(b);
        assert_eq!(bank.arbiter().active_count(), 2);

        assert_eq!(bank.on_timer_tick(), 0);
        assert_eq!(bank.on_timer_tick(), 1);
        assert_eq!(bank.take_edge(a), Some(Edge::Rising));
        assert!(bank.arbiter().timer().running);

        assert_eq!(bank.on_timer_tick(), 1);
        assert_eq!(bank.take_edge(b), Some(Edge::Rising));
        assert!(!bank.arbiter().timer().running);

        // Nothing debouncing: ticks do nothing
        assert_eq!(bank.on_timer_tick(), 0);
    }

    #[test]
    fn test_register_inputs_from_config() {
        let mut config = DebounceConfig::default();
        config.add_input(InputConfig::new("start", 0)).unwrap();
        config.add_input(InputConfig::new("stop", 1).with_threshold(9)).unwrap();

        let mut bank = bank();
        let handles = bank.register_inputs(&config, |i| i.pin).unwrap();

        assert_eq!(handles.len(), 2);
        assert_eq!(bank.threshold(handles[1]), Some(9));
        assert_eq!(bank.handles().count(), 2);
    }

    #[test]
    fn test_initial_state_seeded() {
        let pins = MockPins::new();
        pins.levels[1].set(true);
        let mut bank: Bank = DebounceBank::new(pins, MockTimer::default());

        let a = bank.register(0, 1).unwrap();
        let b = bank.register(1, 1).unwrap();

        assert_eq!(bank.debounced_state(a), Some(false));
        assert_eq!(bank.debounced_state(b), Some(true));
        assert_eq!(bank.peek_edge(b), None);
    }
}

//! Two-phase debounce engine
//!
//! Phase one runs from the input's edge interrupt: it notices that the
//! raw level moved and latches the channel into debouncing, taking one
//! unit of the shared timer. Phase two runs from the timer tick: it
//! samples the level and commits once `threshold` consecutive samples
//! agree, handing the timer unit back.
//!
//! Callers must hold the channel and the arbiter in the same critical
//! section for the duration of either call. [`crate::SharedBank`] does
//! this.

use gpi_hal::{PinAccess, TimerControl};

use crate::arbiter::TimerArbiter;
use crate::channel::{Channel, Edge};

/// Edge interrupt entry point
///
/// Returns `true` if this call moved the channel from idle into
/// debouncing. A second edge during a confidence run, or a call that
/// sees no level change, leaves the arbiter untouched.
pub fn on_edge_interrupt<P, T>(
    channel: &mut Channel<P::Id>,
    pins: &P,
    arbiter: &mut TimerArbiter<T>,
) -> bool
where
    P: PinAccess,
    T: TimerControl,
{
    let level = pins.read_level(channel.config().id);
    let rt = &mut channel.runtime;
    rt.prev_raw_state = rt.raw_state;
    rt.raw_state = level;

    if rt.raw_state == rt.prev_raw_state || rt.debouncing {
        return false;
    }

    arbiter.note_channel_became_active();
    rt.debouncing = true;
    true
}

/// Timer tick entry point
///
/// Idle channels are skipped without reading the pin. Returns the edge
/// committed on this tick, if any.
pub fn on_tick<P, T>(
    channel: &mut Channel<P::Id>,
    pins: &P,
    arbiter: &mut TimerArbiter<T>,
) -> Option<Edge>
where
    P: PinAccess,
    T: TimerControl,
{
    if !channel.runtime.debouncing {
        return None;
    }

    let threshold = channel.config().threshold;
    let level = pins.read_level(channel.config().id);
    let rt = &mut channel.runtime;

    let count = if level {
        rt.low_count = 0;
        rt.high_count = rt.high_count.saturating_add(1);
        &mut rt.high_count
    } else {
        rt.high_count = 0;
        rt.low_count = rt.low_count.saturating_add(1);
        &mut rt.low_count
    };

    if *count < threshold {
        return None;
    }

    *count = 0;
    let edge = Edge::committing(level);
    rt.debounced_state = level;
    rt.edge = Some(edge);
    rt.debouncing = false;
    arbiter.note_channel_became_inactive();

    #[cfg(feature = "defmt")]
    defmt::trace!("debounce commit: {}", edge);

    Some(edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::Activation;
    use core::cell::Cell;

    struct MockPins {
        levels: [Cell<bool>; 2],
        reads: Cell<u32>,
    }

    impl MockPins {
        fn new() -> Self {
            Self {
                levels: [Cell::new(false), Cell::new(false)],
                reads: Cell::new(0),
            }
        }

        fn set(&self, id: usize, level: bool) {
            self.levels[id].set(level);
        }
    }

    impl PinAccess for MockPins {
        type Id = usize;

        fn read_level(&self, id: usize) -> bool {
            self.reads.set(self.reads.get() + 1);
            self.levels[id].get()
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

    fn setup(threshold: u16) -> (MockPins, TimerArbiter<MockTimer>, Channel<usize>) {
        let pins = MockPins::new();
        let mut arbiter = TimerArbiter::new(MockTimer::default());
        let channel = Channel::register(0, threshold, &pins, &mut arbiter).unwrap();
        (pins, arbiter, channel)
    }

    /// Apply a sequence of tick levels, returning the tick index that committed
    fn run_ticks(
        levels: &[bool],
        pins: &MockPins,
        arbiter: &mut TimerArbiter<MockTimer>,
        channel: &mut Channel<usize>,
    ) -> Option<(usize, Edge)> {
        for (i, &level) in levels.iter().enumerate() {
            pins.set(0, level);
            if let Some(edge) = on_tick(channel, pins, arbiter) {
                return Some((i, edge));
            }
        }
        None
    }

    #[test]
    fn test_edge_starts_debouncing() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        assert!(on_edge_interrupt(&mut channel, &pins, &mut arbiter));

        assert!(channel.is_debouncing());
        assert!(arbiter.timer().running);
        assert_eq!(arbiter.active_count(), 1);
    }

    #[test]
    fn test_edge_without_change_is_noop() {
        let (pins, mut arbiter, mut channel) = setup(3);

        assert!(!on_edge_interrupt(&mut channel, &pins, &mut arbiter));
        assert!(!channel.is_debouncing());
        assert_eq!(arbiter.timer().starts, 0);
    }

    #[test]
    fn test_repeated_edge_is_idempotent() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);
        let before = *channel.runtime();

        // Second call only catches prev_raw_state up with raw_state
        assert!(!on_edge_interrupt(&mut channel, &pins, &mut arbiter));
        let after = *channel.runtime();
        assert_eq!(after.prev_raw_state, after.raw_state);
        assert_eq!(after.raw_state, before.raw_state);
        assert!(after.debouncing);
        assert_eq!(after.high_count, before.high_count);
        assert_eq!(after.low_count, before.low_count);
        assert_eq!(after.debounced_state, before.debounced_state);
        assert_eq!(after.edge, before.edge);
        assert_eq!(arbiter.active_count(), 1);
        assert_eq!(arbiter.timer().starts, 1);

        // From here on nothing moves at all
        assert!(!on_edge_interrupt(&mut channel, &pins, &mut arbiter));
        assert_eq!(*channel.runtime(), after);
        assert_eq!(arbiter.active_count(), 1);
        assert_eq!(arbiter.timer().starts, 1);
    }

    #[test]
    fn test_bounce_mid_run_does_not_double_count() {
        let (pins, mut arbiter, mut channel) = setup(3);

        for level in [true, false, true, false] {
            pins.set(0, level);
            on_edge_interrupt(&mut channel, &pins, &mut arbiter);
        }

        assert_eq!(arbiter.active_count(), 1);
        assert_eq!(arbiter.timer().starts, 1);
    }

    #[test]
    fn test_commit_on_threshold_tick() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        let committed = run_ticks(&[true, true, true], &pins, &mut arbiter, &mut channel);
        assert_eq!(committed, Some((2, Edge::Rising)));

        assert!(channel.debounced_state());
        assert_eq!(channel.peek_edge(), Some(Edge::Rising));
        assert!(!channel.is_debouncing());
        assert_eq!(channel.runtime().high_count, 0);
        assert_eq!(arbiter.active_count(), 0);
        assert!(!arbiter.timer().running);
    }

    #[test]
    fn test_no_commit_before_threshold() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        assert_eq!(
            run_ticks(&[true, true], &pins, &mut arbiter, &mut channel),
            None
        );
        assert!(channel.is_debouncing());
        assert!(!channel.debounced_state());
        assert_eq!(channel.runtime().high_count, 2);
    }

    #[test]
    fn test_bounce_never_commits() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        let committed = run_ticks(
            &[true, false, true, false, true],
            &pins,
            &mut arbiter,
            &mut channel,
        );
        assert_eq!(committed, None);
        assert!(channel.is_debouncing());
        assert_eq!(channel.runtime().high_count, 1);
        assert_eq!(channel.runtime().low_count, 0);
        assert!(arbiter.timer().running);
    }

    #[test]
    fn test_counters_mutually_exclusive() {
        let (pins, mut arbiter, mut channel) = setup(10);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        for level in [true, true, false, false, false, true] {
            pins.set(0, level);
            on_tick(&mut channel, &pins, &mut arbiter);
            let rt = channel.runtime();
            assert!(rt.high_count == 0 || rt.low_count == 0);
        }
    }

    #[test]
    fn test_idle_tick_skips_read() {
        let (pins, mut arbiter, mut channel) = setup(3);
        let reads = pins.reads.get();

        assert_eq!(on_tick(&mut channel, &pins, &mut arbiter), None);
        assert_eq!(pins.reads.get(), reads);
    }

    #[test]
    fn test_commit_to_same_level_after_glitch() {
        // Glitch high then back low: commit reports the settled level
        let (pins, mut arbiter, mut channel) = setup(2);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        let committed = run_ticks(&[false, false], &pins, &mut arbiter, &mut channel);
        assert_eq!(committed, Some((1, Edge::Falling)));
        assert!(!channel.debounced_state());
    }

    #[test]
    fn test_round_trip() {
        let (pins, mut arbiter, mut channel) = setup(3);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);
        let first = run_ticks(&[true, true, true], &pins, &mut arbiter, &mut channel);
        assert_eq!(first, Some((2, Edge::Rising)));
        assert_eq!(channel.take_edge(), Some(Edge::Rising));
        assert!(channel.debounced_state());

        pins.set(0, false);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);
        let second = run_ticks(
            &[false, true, false, false, false],
            &pins,
            &mut arbiter,
            &mut channel,
        );
        assert_eq!(second, Some((4, Edge::Falling)));
        assert_eq!(channel.take_edge(), Some(Edge::Falling));
        assert!(!channel.debounced_state());

        assert_eq!(channel.take_edge(), None);
        assert_eq!(arbiter.timer().starts, 2);
        assert!(!arbiter.timer().running);
    }

    #[test]
    fn test_two_channels_share_timer() {
        let pins = MockPins::new();
        let mut arbiter = TimerArbiter::new(MockTimer::default());
        let mut a = Channel::register(0, 2, &pins, &mut arbiter).unwrap();
        let mut b = Channel::register(1, 2, &pins, &mut arbiter).unwrap();

        pins.set(0, true);
        on_edge_interrupt(&mut a, &pins, &mut arbiter);
        assert!(arbiter.timer().running);
        assert_eq!(arbiter.active_count(), 1);

        pins.set(1, true);
        on_edge_interrupt(&mut b, &pins, &mut arbiter);
        assert_eq!(arbiter.active_count(), 2);

        // A settles first while B keeps bouncing
        on_tick(&mut a, &pins, &mut arbiter);
        pins.set(1, false);
        on_tick(&mut b, &pins, &mut arbiter);
        assert_eq!(on_tick(&mut a, &pins, &mut arbiter), Some(Edge::Rising));
        assert_eq!(arbiter.active_count(), 1);
        assert!(arbiter.timer().running);

        pins.set(1, true);
        assert_eq!(on_tick(&mut b, &pins, &mut arbiter), None);
        assert_eq!(on_tick(&mut b, &pins, &mut arbiter), Some(Edge::Rising));
        assert_eq!(arbiter.active_count(), 0);
        assert!(!arbiter.timer().running);
        assert_eq!(arbiter.timer().starts, 1);
    }

    #[test]
    fn test_activation_outcome_visible_to_arbiter() {
        let (pins, mut arbiter, mut channel) = setup(1);

        pins.set(0, true);
        on_edge_interrupt(&mut channel, &pins, &mut arbiter);

        // The channel already holds the only unit of capacity
        assert_eq!(arbiter.note_channel_became_active(), Activation::Saturated);
        assert_eq!(arbiter.active_count(), 1);
    }
}

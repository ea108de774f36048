//! Shared tick timer abstraction

/// The single shared periodic tick source
///
/// The debounce core owns exactly one implementation of this trait and
/// only ever calls it through its timer arbiter. Both calls must be
/// non-blocking. The tick period itself is configured by the platform.
pub trait TimerControl {
    /// Start delivering periodic ticks
    fn start(&mut self);

    /// Stop delivering ticks
    fn stop(&mut self);
}

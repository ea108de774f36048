//! GPIO input abstraction
//!
//! Chip-specific HALs and pin adapters implement [`PinAccess`]; the debounce
//! core only ever asks it for a level.

/// Level reads addressed by input identity
///
/// The debounce core stores only an identity per channel and asks the
/// platform for the level when it needs one. This keeps pin ownership
/// with the platform layer. Reads must be instantaneous and non-blocking,
/// since they are issued from interrupt context.
pub trait PinAccess {
    /// Identity of a physical input (pin number, port/pin pair, ...)
    type Id: Copy;

    /// Read the instantaneous logical level of `id`
    ///
    /// Identities the platform does not know read as low.
    fn read_level(&self, id: Self::Id) -> bool;
}

//! Hardware abstraction for the transmit path.
//!
//! The engine depends on three primitives and nothing else: a data pin
//! (`embedded_hal::digital::OutputPin`), a cycle-accurate delay, and an
//! optional free-running timer for the inter-frame gap. Implement these for
//! a target and the rest of the crate is platform-independent.

/// Cycle-accurate busy-wait.
///
/// One cycle is one instruction cycle of the configured [`ClockRate`]
/// (`Fosc/4` on the reference targets). Implementations must consume
/// exactly the requested number of cycles, after subtracting their own
/// fixed call overhead and the pin-toggle instructions around them: the
/// transmit loop hands the *remaining* cycles of each pulse phase to this
/// trait and budgets nothing for slack.
///
/// That contract is only satisfiable on targets with deterministic,
/// documented instruction costs (or by delegating pulse generation to a
/// PWM/DMA peripheral configured from the same budget). Pure software
/// timing on a multitasking or virtualized host cannot meet it and is
/// unsupported.
///
/// [`ClockRate`]: crate::config::ClockRate
pub trait CycleDelay {
    /// Busy-wait for `cycles` instruction cycles.
    fn delay_cycles(&mut self, cycles: u32);
}

/// Free-running timer used to overlap the latch gap with caller work.
///
/// Restarted right after a frame; the next transmit polls [`expired`]
/// instead of burning the 50 µs in a busy-wait. Mirrors the classic
/// "timer 2 overflow flag" arrangement on 8-bit controllers.
///
/// [`expired`]: FrameTimer::expired
pub trait FrameTimer {
    /// Has the latch gap elapsed since the last [`restart`]?
    ///
    /// [`restart`]: FrameTimer::restart
    fn expired(&self) -> bool;

    /// Zero the counter and clear the expiry flag.
    fn restart(&mut self);
}

/// Placeholder timer for busy-wait gap mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTimer;

impl FrameTimer for NoTimer {
    fn expired(&self) -> bool {
        true
    }

    fn restart(&mut self) {}
}

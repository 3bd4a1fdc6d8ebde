//! The transmission engine: buffer bytes to line pulses.
//!
//! One generic bit-emission routine, driven by the [`BitBudget`] row picked
//! at construction, replaces per-frequency unrolled transmit code. Per bit:
//! drive the line high, hold for the budgeted high phase, drive low for the
//! remainder of the bit period. Bits go out most-significant first, bytes in
//! buffer order, and the frame ends with the mandatory latch gap.
//!
//! The whole frame runs inside a critical section: an interruption longer
//! than the tolerance window corrupts the in-flight bit and desynchronizes
//! every LED downstream. `critical_section::with` restores the caller's
//! interrupt state exactly as found on every exit path.

use embedded_hal::digital::OutputPin;

use crate::config::{ClockRate, ConfigError, LineRate};
use crate::driver::{CycleDelay, FrameTimer, NoTimer};
use crate::timing::{BitBudget, reset_cycles};

/// Blocking pulse-train transmitter for one data line.
///
/// `transmit` occupies the processor for the full frame duration
/// (`bytes * 8 * bit period + 50 µs` in busy-wait gap mode) and cannot be
/// cancelled. Exclusive `&mut self` access is what makes "no buffer
/// mutation during transmit" hold on any host.
pub struct BitTransmitter<P, D, T = NoTimer> {
    pin: P,
    delay: D,
    /// `Some` overlaps the latch gap with caller work, `None` busy-waits it
    timer: Option<T>,
    budget: BitBudget,
    reset_cycles: u32,
}

impl<P, D> BitTransmitter<P, D, NoTimer>
where
    P: OutputPin,
    D: CycleDelay,
{
    /// Transmitter with a busy-wait latch gap.
    ///
    /// Rejects (clock, rate) pairs with no valid cycle budget; the line is
    /// driven low so the first frame starts from a known level.
    pub fn new(pin: P, delay: D, clock: ClockRate, rate: LineRate) -> Result<Self, ConfigError> {
        Self::build(pin, delay, None, clock, rate)
    }
}

impl<P, D, T> BitTransmitter<P, D, T>
where
    P: OutputPin,
    D: CycleDelay,
    T: FrameTimer,
{
    /// Transmitter that paces frames with a free-running timer instead of
    /// busy-waiting the latch gap.
    pub fn with_frame_timer(
        pin: P,
        delay: D,
        timer: T,
        clock: ClockRate,
        rate: LineRate,
    ) -> Result<Self, ConfigError> {
        Self::build(pin, delay, Some(timer), clock, rate)
    }

    fn build(
        mut pin: P,
        delay: D,
        timer: Option<T>,
        clock: ClockRate,
        rate: LineRate,
    ) -> Result<Self, ConfigError> {
        let budget = BitBudget::lookup(clock, rate)?;
        pin.set_low().ok();
        Ok(Self {
            pin,
            delay,
            timer,
            budget,
            reset_cycles: reset_cycles(clock),
        })
    }

    /// Emit `bytes` on the line, then enforce the latch gap.
    ///
    /// Runs with interrupts disabled for the entire frame and restores the
    /// previous interrupt state afterwards. In timer gap mode the call
    /// first waits out whatever remains of the previous frame's gap.
    ///
    /// Pin errors are discarded: nothing can be reported or retried
    /// mid-frame, and a corrupted frame is only observable as wrong colors
    /// downstream. Correctness is guaranteed by the validated budget, not
    /// checked at run time.
    pub fn transmit(&mut self, bytes: &[u8]) {
        critical_section::with(|_| {
            if let Some(timer) = &self.timer {
                while !timer.expired() {}
            }

            self.pin.set_low().ok();
            for &byte in bytes {
                self.send_byte(byte);
            }
            self.pin.set_low().ok();

            match &mut self.timer {
                Some(timer) => timer.restart(),
                None => self.delay.delay_cycles(self.reset_cycles),
            }
        });
    }

    /// One byte, MSB first.
    ///
    /// Both branches run the identical operation sequence (set high, one
    /// delay, set low, one delay); only the budgeted cycle counts differ,
    /// so neither bit value costs a data-dependent extra cycle.
    fn send_byte(&mut self, byte: u8) {
        let mut mask = 0x80u8;
        while mask != 0 {
            let (high, total) = if byte & mask != 0 {
                (self.budget.one_high, self.budget.one_total)
            } else {
                (self.budget.zero_high, self.budget.zero_total)
            };
            self.pin.set_high().ok();
            self.delay.delay_cycles(u32::from(high));
            self.pin.set_low().ok();
            self.delay.delay_cycles(u32::from(total - high));
            mask >>= 1;
        }
    }
}

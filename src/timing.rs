//! Cycle budgets for the single-wire pulse encoding.
//!
//! Every bit is one high pulse followed by low for the rest of the bit
//! period; a logical 1 holds the line high longer than a 0. The achievable
//! pulse widths depend on the instruction rate, so each supported
//! (clock, rate) pair gets its own budget row. One table replaces the
//! hand-unrolled per-frequency transmit routines of older drivers.
//!
//! The 32 MHz rows are field-proven on 8-bit targets; the 24/48 MHz rows
//! are centered on the chip datasheet windows. 24 MHz cannot hit the
//! nominal 1.25 µs period at 800 kHz with integer cycles (7.5), so that
//! row runs 8 cycles (1.33 µs), inside the chip's period tolerance.

use crate::config::{ClockRate, ConfigError, LineRate};

/// Mandatory idle-low period after a frame; commits the colors on the chips.
pub const RESET_GAP_US: u32 = 50;

/// Per-bit pulse budget in instruction cycles.
///
/// `*_high` is the length of the high phase, `*_total` the full bit period.
/// The transmit loop spends exactly the budgeted cycles on each branch, so
/// a row is only valid if both bit values share the same fixed overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitBudget {
    pub zero_high: u8,
    pub zero_total: u8,
    pub one_high: u8,
    pub one_total: u8,
}

impl BitBudget {
    const fn row(zero_high: u8, one_high: u8, total: u8) -> Self {
        Self {
            zero_high,
            zero_total: total,
            one_high,
            one_total: total,
        }
    }

    /// Budget for a (clock, rate) pair.
    ///
    /// 800 kHz on a 16 MHz clock is rejected: 4 MIPS leaves 5 cycles per
    /// bit, not enough to shape two distinguishable pulses.
    pub const fn lookup(clock: ClockRate, rate: LineRate) -> Result<Self, ConfigError> {
        match (clock, rate) {
            (ClockRate::Mhz16, LineRate::Khz800) => {
                Err(ConfigError::UnsupportedTiming { clock, rate })
            }
            (ClockRate::Mhz16, LineRate::Khz400) => Ok(Self::row(2, 5, 10)),
            (ClockRate::Mhz24, LineRate::Khz800) => Ok(Self::row(2, 5, 8)),
            (ClockRate::Mhz24, LineRate::Khz400) => Ok(Self::row(3, 7, 15)),
            (ClockRate::Mhz32, LineRate::Khz800) => Ok(Self::row(2, 7, 10)),
            (ClockRate::Mhz32, LineRate::Khz400) => Ok(Self::row(4, 10, 20)),
            (ClockRate::Mhz48, LineRate::Khz800) => Ok(Self::row(5, 10, 15)),
            (ClockRate::Mhz48, LineRate::Khz400) => Ok(Self::row(6, 15, 30)),
        }
    }
}

/// Instruction cycles covering the full latch gap on this clock.
pub const fn reset_cycles(clock: ClockRate) -> u32 {
    RESET_GAP_US * (clock.instruction_hz() / 1_000_000)
}

/// Duration of `cycles` instruction cycles in nanoseconds.
///
/// Used to check budget rows against the chip's tolerance windows without
/// wall-clock measurement.
#[allow(clippy::cast_lossless)]
pub const fn cycles_to_ns(cycles: u32, clock: ClockRate) -> u64 {
    cycles as u64 * 1_000_000_000 / clock.instruction_hz() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CLOCKS: [ClockRate; 4] = [
        ClockRate::Mhz16,
        ClockRate::Mhz24,
        ClockRate::Mhz32,
        ClockRate::Mhz48,
    ];

    fn supported() -> impl Iterator<Item = (ClockRate, LineRate, BitBudget)> {
        ALL_CLOCKS.into_iter().flat_map(|clock| {
            [LineRate::Khz400, LineRate::Khz800]
                .into_iter()
                .filter_map(move |rate| {
                    BitBudget::lookup(clock, rate)
                        .ok()
                        .map(|budget| (clock, rate, budget))
                })
        })
    }

    #[test]
    fn slow_clock_rejects_fast_rate() {
        assert_eq!(
            BitBudget::lookup(ClockRate::Mhz16, LineRate::Khz800),
            Err(ConfigError::UnsupportedTiming {
                clock: ClockRate::Mhz16,
                rate: LineRate::Khz800,
            })
        );
    }

    #[test]
    fn every_other_pair_has_a_budget() {
        assert_eq!(supported().count(), 7);
    }

    #[test]
    fn high_phases_stay_within_chip_tolerance() {
        // Nominal pulse widths in ns per rate; the chips accept +-150ns
        // around them.
        for (clock, rate, budget) in supported() {
            let (zero_nominal, one_nominal) = match rate {
                LineRate::Khz800 => (400, 800),
                LineRate::Khz400 => (500, 1250),
            };
            let zero_high = cycles_to_ns(u32::from(budget.zero_high), clock);
            let one_high = cycles_to_ns(u32::from(budget.one_high), clock);
            assert!(
                zero_high.abs_diff(zero_nominal) <= 150,
                "0-bit high {zero_high}ns off nominal {zero_nominal}ns for {clock:?}/{rate:?}"
            );
            assert!(
                one_high.abs_diff(one_nominal) <= 150,
                "1-bit high {one_high}ns off nominal {one_nominal}ns for {clock:?}/{rate:?}"
            );
        }
    }

    #[test]
    fn bit_periods_match_line_rate() {
        for (clock, rate, budget) in supported() {
            let nominal = match rate {
                LineRate::Khz800 => 1_250,
                LineRate::Khz400 => 2_500,
            };
            for total in [budget.zero_total, budget.one_total] {
                let period = cycles_to_ns(u32::from(total), clock);
                assert!(
                    period.abs_diff(nominal) <= 600,
                    "period {period}ns off nominal {nominal}ns for {clock:?}/{rate:?}"
                );
            }
        }
    }

    #[test]
    fn high_phase_always_shorter_than_period() {
        for (_, _, budget) in supported() {
            assert!(budget.zero_high < budget.zero_total);
            assert!(budget.one_high < budget.one_total);
            assert!(budget.zero_high < budget.one_high);
        }
    }

    #[test]
    fn reset_gap_covers_latch_time() {
        for clock in ALL_CLOCKS {
            let gap = cycles_to_ns(reset_cycles(clock), clock);
            assert!(gap >= 50_000, "latch gap {gap}ns below 50us on {clock:?}");
        }
    }
}

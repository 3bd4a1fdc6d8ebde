//! Strip configuration and construction-time validation.
//!
//! Everything here is decided once, before the first frame: wire byte order,
//! line rate, host clock. Invalid combinations are rejected with a
//! [`ConfigError`] instead of degrading into an out-of-tolerance waveform.

/// Maximum number of LEDs on one strip.
///
/// The byte counter in the transmit loop is 8-bit addressable (255 bytes)
/// and each LED consumes 3 bytes, so 85 is the hardware-derived ceiling.
pub const MAX_PIXELS: usize = 85;

/// Byte order the strip expects on the wire.
///
/// Independent of packed `0xRRGGBB` values, which always carry the canonical
/// channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorOrder {
    /// Red, green, blue (older WS2811 modules)
    Rgb,
    /// Green, red, blue (WS2812/WS2812B default)
    #[default]
    Grb,
}

/// Line bit rate.
///
/// Old strips only accept 400 kHz; everything current runs at 800 kHz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineRate {
    Khz400,
    #[default]
    Khz800,
}

/// Host oscillator frequency.
///
/// Cycle budgets are expressed in instruction cycles, one quarter of the
/// oscillator rate on the reference 8-bit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockRate {
    Mhz16,
    Mhz24,
    Mhz32,
    Mhz48,
}

impl ClockRate {
    /// Instruction cycles per second (Fosc/4)
    pub const fn instruction_hz(self) -> u32 {
        match self {
            ClockRate::Mhz16 => 4_000_000,
            ClockRate::Mhz24 => 6_000_000,
            ClockRate::Mhz32 => 8_000_000,
            ClockRate::Mhz48 => 12_000_000,
        }
    }
}

/// Build-time configuration for one LED string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripConfig {
    pub color_order: ColorOrder,
    pub rate: LineRate,
    pub clock: ClockRate,
}

impl StripConfig {
    /// Configuration with the defaults of the reference hardware:
    /// GRB byte order at 800 kHz.
    pub const fn new(clock: ClockRate) -> Self {
        Self {
            color_order: ColorOrder::Grb,
            rate: LineRate::Khz800,
            clock,
        }
    }

    /// Set the wire byte order
    #[must_use]
    pub const fn with_color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    /// Set the line bit rate
    #[must_use]
    pub const fn with_rate(mut self, rate: LineRate) -> Self {
        self.rate = rate;
        self
    }
}

/// Rejected configuration. Raised at construction, never at transmit time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Strip length is zero or above [`MAX_PIXELS`]
    InvalidLedCount { leds: usize },
    /// No cycle budget meets the chip's tolerances for this pair
    /// (e.g. 800 kHz on a 16 MHz clock)
    UnsupportedTiming { clock: ClockRate, rate: LineRate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_hardware() {
        let config = StripConfig::new(ClockRate::Mhz32);
        assert_eq!(config.color_order, ColorOrder::Grb);
        assert_eq!(config.rate, LineRate::Khz800);
    }

    #[test]
    fn builders_override_defaults() {
        let config = StripConfig::new(ClockRate::Mhz16)
            .with_color_order(ColorOrder::Rgb)
            .with_rate(LineRate::Khz400);
        assert_eq!(config.color_order, ColorOrder::Rgb);
        assert_eq!(config.rate, LineRate::Khz400);
    }
}

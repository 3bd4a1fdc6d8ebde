//! Strip facade: one owned object per LED string.
//!
//! Ties a [`PixelStore`] to a [`BitTransmitter`]. Color and brightness
//! mutations only touch RAM; nothing reaches the LEDs until [`show`] walks
//! the buffer and drives the line.
//!
//! [`show`]: LedStrip::show

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use smart_leds::SmartLedsWrite;

use crate::color::Rgb;
use crate::config::{ConfigError, MAX_PIXELS, StripConfig};
use crate::driver::{CycleDelay, FrameTimer, NoTimer};
use crate::store::PixelStore;
use crate::transmit::BitTransmitter;

/// A string of `N` addressable LEDs on one data line.
pub struct LedStrip<P, D, const N: usize, T = NoTimer> {
    store: PixelStore<N>,
    transmitter: BitTransmitter<P, D, T>,
}

impl<P, D, const N: usize> LedStrip<P, D, N, NoTimer>
where
    P: OutputPin,
    D: CycleDelay,
{
    /// Strip with a busy-wait latch gap.
    ///
    /// Validates the LED count and the clock/rate pair, drives the line
    /// low and leaves the buffer all-black.
    pub fn new(pin: P, delay: D, config: StripConfig) -> Result<Self, ConfigError> {
        Self::check_len()?;
        let transmitter = BitTransmitter::new(pin, delay, config.clock, config.rate)?;
        Self::build(transmitter, config)
    }
}

impl<P, D, const N: usize, T> LedStrip<P, D, N, T>
where
    P: OutputPin,
    D: CycleDelay,
    T: FrameTimer,
{
    /// Strip that paces frames with a free-running timer, letting the
    /// caller do other work during the latch gap.
    pub fn with_frame_timer(
        pin: P,
        delay: D,
        timer: T,
        config: StripConfig,
    ) -> Result<Self, ConfigError> {
        Self::check_len()?;
        let transmitter =
            BitTransmitter::with_frame_timer(pin, delay, timer, config.clock, config.rate)?;
        Self::build(transmitter, config)
    }

    const fn check_len() -> Result<(), ConfigError> {
        if N == 0 || N > MAX_PIXELS {
            Err(ConfigError::InvalidLedCount { leds: N })
        } else {
            Ok(())
        }
    }

    fn build(
        transmitter: BitTransmitter<P, D, T>,
        config: StripConfig,
    ) -> Result<Self, ConfigError> {
        #[cfg(feature = "log")]
        log::debug!(
            "strip up: {} leds, {:?} on the wire, {:?} at {:?}",
            N,
            config.color_order,
            config.rate,
            config.clock
        );
        Ok(Self {
            store: PixelStore::new(config.color_order),
            transmitter,
        })
    }

    /// Number of LEDs
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Write one LED's color; see [`PixelStore::set_rgb`].
    pub fn set_rgb(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.store.set_rgb(index, r, g, b);
    }

    /// Write one LED's color from a packed `0xRRGGBB` value.
    pub fn set_packed(&mut self, index: usize, color: u32) {
        self.store.set_packed(index, color);
    }

    /// Stored color of one LED as packed `0xRRGGBB`.
    pub fn pixel(&self, index: usize) -> u32 {
        self.store.pixel(index)
    }

    /// Fill `from..=to` with one packed color.
    pub fn fill(&mut self, from: usize, to: usize, color: u32) {
        self.store.fill(from, to, color);
    }

    /// Change global brightness; see [`PixelStore::set_brightness`].
    pub fn set_brightness(&mut self, level: u8) {
        self.store.set_brightness(level);
    }

    /// Transmit the buffer to the LEDs.
    ///
    /// Blocks for the whole frame with interrupts disabled, then enforces
    /// the latch gap.
    pub fn show(&mut self) {
        self.transmitter.transmit(self.store.as_bytes());
    }
}

impl<P, D, const N: usize, T> SmartLedsWrite for LedStrip<P, D, N, T>
where
    P: OutputPin,
    D: CycleDelay,
    T: FrameTimer,
{
    type Error = Infallible;
    type Color = Rgb;

    /// Write an iterator of colors starting at LED 0, then show.
    ///
    /// Colors pass through the store, so the current brightness applies;
    /// anything beyond the strip length is dropped.
    fn write<It, I>(&mut self, iterator: It) -> Result<(), Self::Error>
    where
        It: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (index, color) in iterator.into_iter().enumerate() {
            let color: Rgb = color.into();
            self.store.set_rgb(index, color.r, color.g, color.b);
        }
        self.show();
        Ok(())
    }
}

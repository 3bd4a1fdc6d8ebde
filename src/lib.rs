#![no_std]

//! Driver for single-wire addressable LED strings (WS2811/WS2812 class).
//!
//! An in-memory pixel buffer is mutated freely, then transmitted as a
//! precisely timed pulse train over one GPIO line. Every bit is a high
//! pulse whose width, within ~±150 ns, tells the chip whether it is a 0
//! or a 1, so the transmit path is budgeted in instruction cycles and
//! runs uninterruptible.
//!
//! Architecture layers:
//! - `color` - packed-color helpers, palette, color wheel
//! - `config` - build-time strip configuration and validation
//! - `driver` - hardware abstraction (cycle delay, frame timer; the data
//!   line is any `embedded_hal` output pin)
//! - `store` - pixel buffer and brightness state (no timing constraints)
//! - `timing` - per-(clock, rate) cycle-budget table
//! - `transmit` - the bit-emission engine
//! - `strip` - facade owning one store and one transmitter
//!
//! The store and the engine are independently usable; [`LedStrip`] is the
//! typical entry point:
//!
//! ```ignore
//! let config = StripConfig::new(ClockRate::Mhz32);
//! let mut strip: LedStrip<_, _, 24> = LedStrip::new(pin, delay, config)?;
//! strip.fill(0, 23, wheel(128));
//! strip.set_brightness(64);
//! strip.show();
//! ```

pub mod color;
pub mod config;
pub mod driver;
pub mod store;
pub mod strip;
pub mod timing;
pub mod transmit;

pub use color::{Rgb, pack, rgb_from_u32, wheel};
pub use config::{ClockRate, ColorOrder, ConfigError, LineRate, MAX_PIXELS, StripConfig};
pub use driver::{CycleDelay, FrameTimer, NoTimer};
pub use store::PixelStore;
pub use strip::LedStrip;
pub use timing::{BitBudget, RESET_GAP_US, reset_cycles};
pub use transmit::BitTransmitter;

//! Pixel store: the color buffer and brightness state.
//!
//! Pure data manipulation, no timing constraints. Bytes are kept in wire
//! order with brightness already applied, because the transmit loop has no
//! spare cycles to scale or reorder on the fly — it streams the buffer
//! exactly as stored.
//!
//! All operations are total: out-of-range indices are absorbed as no-ops
//! (reads return black), matching the no-fault discipline of the hot path.

use crate::color::pack;
use crate::config::ColorOrder;

/// Color and brightness state for a strip of `N` LEDs.
///
/// Index 0 is the LED nearest the controller. The buffer length is fixed at
/// initialization; there is no allocation.
pub struct PixelStore<const N: usize> {
    /// Wire-order bytes, one triple per LED, brightness pre-applied
    bytes: [[u8; 3]; N],
    /// Brightness biased by +1 (`level + 1`, so 1-256); 0 until the first
    /// `set_brightness` call. The bias keeps the rescale formula free of a
    /// zero special case and makes "changed" a plain inequality.
    brightness: u16,
    order: ColorOrder,
}

impl<const N: usize> PixelStore<N> {
    /// All-black store with no brightness scaling.
    pub const fn new(order: ColorOrder) -> Self {
        Self {
            bytes: [[0; 3]; N],
            brightness: 0,
            order,
        }
    }

    /// Number of LEDs
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Flat wire-order view of the buffer, ready for transmission.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_flattened()
    }

    /// Write one LED's color, scaled by the current brightness.
    ///
    /// Ignored when `index` is out of range.
    pub fn set_rgb(&mut self, index: usize, r: u8, g: u8, b: u8) {
        if index >= N {
            return;
        }
        let r = self.scaled(r);
        let g = self.scaled(g);
        let b = self.scaled(b);
        self.bytes[index] = match self.order {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Grb => [g, r, b],
        };
    }

    /// Write one LED's color from a packed `0xRRGGBB` value.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_packed(&mut self, index: usize, color: u32) {
        self.set_rgb(
            index,
            (color >> 16) as u8,
            (color >> 8) as u8,
            color as u8,
        );
    }

    /// Stored (post-scaling) color of one LED, repacked into canonical
    /// `0xRRGGBB` order regardless of the wire order. Black when `index`
    /// is out of range.
    pub fn pixel(&self, index: usize) -> u32 {
        if index >= N {
            return 0;
        }
        let [b0, b1, b2] = self.bytes[index];
        match self.order {
            ColorOrder::Rgb => pack(b0, b1, b2),
            ColorOrder::Grb => pack(b1, b0, b2),
        }
    }

    /// Write every LED in `from..=to` (inclusive) with one packed color.
    ///
    /// The caller keeps `from <= to` and both in range; an inverted range
    /// performs zero iterations and out-of-range indices are skipped by
    /// [`set_packed`](Self::set_packed) like anywhere else.
    pub fn fill(&mut self, from: usize, to: usize, color: u32) {
        for index in from..=to {
            self.set_packed(index, color);
        }
    }

    /// Change the global brightness (0-255) for all future writes and
    /// rescale the stored bytes in place.
    ///
    /// The rescale is destructive: bytes are overwritten with the scaled
    /// values, and repeated brightness changes progressively lose color
    /// resolution. Level 0 turns scaling off for subsequent writes (full
    /// resolution) without restoring bytes already scaled down.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_brightness(&mut self, level: u8) {
        let new_biased = u16::from(level) + 1;
        if new_biased == self.brightness {
            return;
        }

        // Previous real brightness, 0 if never set.
        let old_real = u32::from(self.brightness.saturating_sub(1));
        let scale = if old_real == 0 {
            0
        } else if level == 255 {
            65_535 / old_real
        } else {
            ((u32::from(new_biased) << 8) - 1) / old_real
        };

        for byte in self.bytes.as_flattened_mut() {
            *byte = ((u32::from(*byte) * scale) >> 8) as u8;
        }

        self.brightness = new_biased;
    }

    /// Apply the current scale to one channel value.
    ///
    /// Biased 0 (never set) and 1 (level 0) pass the value through
    /// unchanged; biased 256 (level 255) scales by exactly 1.
    #[allow(clippy::cast_possible_truncation)]
    fn scaled(&self, value: u8) -> u8 {
        if self.brightness > 1 {
            ((u32::from(value) * u32::from(self.brightness)) >> 8) as u8
        } else {
            value
        }
    }
}

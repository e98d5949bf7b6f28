//! Iteration-count colouring.

use bytemuck::{Pod, Zeroable};

/// 16-bit colour, 5 bits red, 6 bits green, 5 bits blue, high to low.
#[repr(transparent)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Rgb565(0x0000);
    pub const WHITE: Self = Rgb565(0xffff);

    /// Pack 5/6/5-bit channels; excess high bits are dropped.
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        let (red, green, blue) = (red as u16 & 0x1f, green as u16 & 0x3f, blue as u16 & 0x1f);
        Rgb565((red << 11) | (green << 5) | blue)
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1f
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3f
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8 & 0x1f
    }

    /// Wire bytes of one pixel, in the order they are pushed to the panel.
    pub const fn to_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Rgb565(u16::from_le_bytes(bytes))
    }

    /// Expand to 8 bits per channel, replicating the high bits into the low ones.
    pub const fn to_rgb888(self) -> [u8; 3] {
        let (r, g, b) = (self.red(), self.green(), self.blue());
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }
}

/// Palette of the reference render, indexed by escape count for a bound of 50.
/// Runs from the brown of quickly escaping points through teal and violet
/// and back to brown for the interior.
pub const REFERENCE_PALETTE: [Rgb565; 51] = [
    Rgb565(0x91e7),
    Rgb565(0x7ca7),
    Rgb565(0x5ca7),
    Rgb565(0x44a7),
    Rgb565(0x3ca9),
    Rgb565(0x3cab),
    Rgb565(0x3cad),
    Rgb565(0x3caf),
    Rgb565(0x3cb1),
    Rgb565(0x3cb2),
    Rgb565(0x3c52),
    Rgb565(0x3bf2),
    Rgb565(0x3b92),
    Rgb565(0x3b52),
    Rgb565(0x3b12),
    Rgb565(0x3ab2),
    Rgb565(0x3a72),
    Rgb565(0x3a32),
    Rgb565(0x39f2),
    Rgb565(0x41f2),
    Rgb565(0x49f2),
    Rgb565(0x51f2),
    Rgb565(0x59f2),
    Rgb565(0x59f2),
    Rgb565(0x61f2),
    Rgb565(0x69f2),
    Rgb565(0x71f2),
    Rgb565(0x79f2),
    Rgb565(0x79f2),
    Rgb565(0x81f2),
    Rgb565(0x89f2),
    Rgb565(0x91f2),
    Rgb565(0x91f2),
    Rgb565(0x91f1),
    Rgb565(0x91f1),
    Rgb565(0x91f0),
    Rgb565(0x91ef),
    Rgb565(0x91ef),
    Rgb565(0x91ee),
    Rgb565(0x91ed),
    Rgb565(0x91ed),
    Rgb565(0x91ec),
    Rgb565(0x91eb),
    Rgb565(0x91eb),
    Rgb565(0x91ea),
    Rgb565(0x91ea),
    Rgb565(0x91e9),
    Rgb565(0x91e9),
    Rgb565(0x91e8),
    Rgb565(0x91e7),
    Rgb565(0x91e7),
];

/// Fixed lookup table from escape count to colour.
///
/// A palette with `n` entries serves an iteration bound of `n - 1`; a render
/// must take its bound from [`Palette::max_iterations`] so every escape count
/// has an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [Rgb565],
}

impl Palette {
    pub const REFERENCE: Palette = Palette::new(&REFERENCE_PALETTE);

    /// Panics if `entries` is empty.
    pub const fn new(entries: &'static [Rgb565]) -> Self {
        assert!(!entries.is_empty(), "a palette needs at least one colour");
        Palette { entries }
    }

    pub const fn max_iterations(&self) -> u32 {
        (self.entries.len() - 1) as u32
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &'static [Rgb565] {
        self.entries
    }

    /// `iterations` must be at most [`max_iterations`](Self::max_iterations).
    #[inline]
    pub fn colour_for(&self, iterations: u32) -> Rgb565 {
        self.entries[iterations as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::REFERENCE
    }
}

use crate::{
    colour::Palette,
    display::Rectangle,
    fixed::{Fixed, FRACTIONAL_BITS},
    pixel::Complex,
};

/// What to render and where: the panel window, the point of the complex plane
/// under its top-left pixel, the distance between neighbouring pixels, and the
/// palette. Columns advance the real axis, rows the imaginary axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View {
    pub window: Rectangle,
    pub start: Complex,
    pub step: Fixed,
    pub palette: Palette,
}

impl View {
    /// 128x128 pixels centred on the 160-pixel-wide panel, covering
    /// `[-2, 2)` on both axes in steps of 1/32, 50 iterations.
    pub const REFERENCE: View = View {
        window: Rectangle::new(16, 0, 128, 128),
        start: Complex::from_ints(-2, -2),
        step: Fixed::from_raw(1 << (FRACTIONAL_BITS - 5)),
        palette: Palette::REFERENCE,
    };

    /// The iteration bound is tied to the palette so every count has a colour.
    pub const fn max_iterations(&self) -> u32 {
        self.palette.max_iterations()
    }

    /// Point under the pixel at `column`, `row` of the window.
    pub fn point(&self, column: u16, row: u16) -> Complex {
        let offset = |origin: Fixed, n: u16| {
            Fixed::saturate(origin.raw() as i64 + self.step.raw() as i64 * n as i64)
        };
        Complex::new(offset(self.start.real, column), offset(self.start.imaginary, row))
    }
}

impl Default for View {
    fn default() -> Self {
        Self::REFERENCE
    }
}

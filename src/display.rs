/// A pixel position in the panel's current orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// A pixel window. Pixels streamed into it fill it row by row, left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub origin: Point,
    pub width: u16,
    pub height: u16,
}

impl Rectangle {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rectangle {
            origin: Point { x, y },
            width,
            height,
        }
    }

    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// One past the last column.
    pub const fn right(&self) -> u32 {
        self.origin.x as u32 + self.width as u32
    }

    /// One past the last row.
    pub const fn bottom(&self) -> u32 {
        self.origin.y as u32 + self.height as u32
    }
}

/// The panel a render streams into. It should hide the transport details so
/// an SPI panel, a simulator, or a recording mock all work.
///
/// Calls are blocking: when `push` returns, the bytes have been accepted and
/// the next pixel may follow.
pub trait Display {
    type Error;

    /// Blank the whole panel.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Declare the window that the following pixels go to.
    fn begin(&mut self, window: Rectangle) -> Result<(), Self::Error>;

    /// Stream the encoded bytes of the next pixel(s).
    fn push(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Close the window opened by `begin`.
    fn end(&mut self) -> Result<(), Self::Error>;
}

impl<D: Display + ?Sized> Display for &mut D {
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        (**self).clear()
    }

    fn begin(&mut self, window: Rectangle) -> Result<(), Self::Error> {
        (**self).begin(window)
    }

    fn push(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).push(bytes)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        (**self).end()
    }
}

/// Blocking wait. Nothing else runs while it waits.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

/// Spins on the host clock for the requested time.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinDelay;

#[cfg(feature = "std")]
impl Delay for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        spin_sleep::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

//! In-memory ST7735-style panel, for running renders on a host.
//!
//! It checks the streaming protocol strictly; a window has to be filled with
//! exactly as many pixels as it holds before it is closed.

use log::{debug, trace};
use thiserror::Error;

use crate::{
    colour::Rgb565,
    display::{Delay, Display, Point, Rectangle},
};

/// Physical panel size in the default (landscape) orientation.
pub const PANEL_WIDTH: u16 = 160;
pub const PANEL_HEIGHT: u16 = 128;

/// Length of the reset pulse, in milliseconds.
pub const RESET_PULSE_MS: u32 = 150;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameBufferError {
    #[error("window {window:?} does not fit a {width}x{height} panel")]
    WindowOutOfBounds {
        window: Rectangle,
        width: u16,
        height: u16,
    },
    #[error("a window is already open")]
    WindowAlreadyOpen,
    #[error("no window is open")]
    NoWindow,
    #[error("{0} bytes is not a whole number of RGB565 pixels")]
    OddByteCount(usize),
    #[error("more pixels than the {0:?} window holds")]
    WindowOverflow(Rectangle),
    #[error("window expected {expected} pixels but received {pushed}")]
    PixelCountMismatch { expected: usize, pushed: usize },
}

struct Window {
    area: Rectangle,
    pushed: usize,
}

pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    orientation: Orientation,
    window: Option<Window>,
}

impl FrameBuffer {
    /// A panel after power-up: black, normal orientation.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; PANEL_WIDTH as usize * PANEL_HEIGHT as usize],
            orientation: Orientation::Normal,
            window: None,
        }
    }

    /// Pulse reset, dropping any open window and blanking RAM.
    pub fn reset(&mut self, delay: &mut impl Delay) {
        debug!("resetting panel");
        self.window = None;
        delay.delay_ms(RESET_PULSE_MS);
        self.pixels.fill(Rgb565::BLACK);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Logical width in the current orientation.
    pub fn width(&self) -> u16 {
        match self.orientation {
            Orientation::Normal | Orientation::Rotate180 => PANEL_WIDTH,
            Orientation::Rotate90 | Orientation::Rotate270 => PANEL_HEIGHT,
        }
    }

    /// Logical height in the current orientation.
    pub fn height(&self) -> u16 {
        match self.orientation {
            Orientation::Normal | Orientation::Rotate180 => PANEL_HEIGHT,
            Orientation::Rotate90 | Orientation::Rotate270 => PANEL_WIDTH,
        }
    }

    /// Colour at logical (`x`, `y`), or `None` off the panel.
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.pixels[self.ram_index(Point { x, y })])
    }

    /// Panel RAM in physical row-major order.
    pub fn ram(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Panel RAM as the raw bytes stored in it.
    pub fn ram_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Binary PPM of the logical view.
    pub fn to_ppm(&self) -> Vec<u8> {
        let (width, height) = (self.width(), self.height());
        let mut ppm = format!("P6\n{} {}\n255\n", width, height).into_bytes();
        ppm.reserve(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                ppm.extend_from_slice(&self.pixels[self.ram_index(Point { x, y })].to_rgb888());
            }
        }
        ppm
    }

    fn ram_index(&self, logical: Point) -> usize {
        let (x, y) = (logical.x as usize, logical.y as usize);
        let (w, h) = (PANEL_WIDTH as usize, PANEL_HEIGHT as usize);
        let (px, py) = match self.orientation {
            Orientation::Normal => (x, y),
            Orientation::Rotate90 => (w - 1 - y, x),
            Orientation::Rotate180 => (w - 1 - x, h - 1 - y),
            Orientation::Rotate270 => (y, h - 1 - x),
        };
        py * w + px
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FrameBuffer {
    type Error = FrameBufferError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        trace!("clear");
        self.pixels.fill(Rgb565::WHITE);
        Ok(())
    }

    fn begin(&mut self, window: Rectangle) -> Result<(), Self::Error> {
        if self.window.is_some() {
            return Err(FrameBufferError::WindowAlreadyOpen);
        }
        let (width, height) = (self.width(), self.height());
        if window.right() > width as u32 || window.bottom() > height as u32 {
            return Err(FrameBufferError::WindowOutOfBounds {
                window,
                width,
                height,
            });
        }
        self.window = Some(Window {
            area: window,
            pushed: 0,
        });
        Ok(())
    }

    fn push(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if bytes.len() % 2 != 0 {
            return Err(FrameBufferError::OddByteCount(bytes.len()));
        }
        let mut window = self.window.take().ok_or(FrameBufferError::NoWindow)?;
        let area = window.area;
        let result = bytes.chunks_exact(2).try_for_each(|chunk| {
            if window.pushed >= area.pixel_count() {
                return Err(FrameBufferError::WindowOverflow(area));
            }
            let logical = Point {
                x: area.origin.x + (window.pushed % area.width as usize) as u16,
                y: area.origin.y + (window.pushed / area.width as usize) as u16,
            };
            let index = self.ram_index(logical);
            self.pixels[index] = Rgb565::from_bytes([chunk[0], chunk[1]]);
            window.pushed += 1;
            Ok(())
        });
        self.window = Some(window);
        result
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        let window = self.window.take().ok_or(FrameBufferError::NoWindow)?;
        let expected = window.area.pixel_count();
        if window.pushed != expected {
            return Err(FrameBufferError::PixelCountMismatch {
                expected,
                pushed: window.pushed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingDelay(u32);

    impl Delay for CountingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0 += ms;
        }
    }

    fn fill(panel: &mut FrameBuffer, window: Rectangle, colours: &[Rgb565]) {
        panel.begin(window).unwrap();
        for colour in colours {
            panel.push(&colour.to_bytes()).unwrap();
        }
        panel.end().unwrap();
    }

    #[test]
    fn window_fills_row_major() {
        let mut panel = FrameBuffer::new();
        let colours = [Rgb565(1), Rgb565(2), Rgb565(3), Rgb565(4), Rgb565(5), Rgb565(6)];
        fill(&mut panel, Rectangle::new(10, 20, 3, 2), &colours);
        assert_eq!(panel.pixel(10, 20), Some(Rgb565(1)));
        assert_eq!(panel.pixel(12, 20), Some(Rgb565(3)));
        assert_eq!(panel.pixel(10, 21), Some(Rgb565(4)));
        assert_eq!(panel.pixel(12, 21), Some(Rgb565(6)));
        assert_eq!(panel.pixel(13, 21), Some(Rgb565::BLACK));
    }

    #[test]
    fn rotation_maps_to_ram() {
        let mut panel = FrameBuffer::new();
        panel.set_orientation(Orientation::Rotate180);
        fill(&mut panel, Rectangle::new(0, 0, 1, 1), &[Rgb565(7)]);
        assert_eq!(panel.pixel(0, 0), Some(Rgb565(7)));
        assert_eq!(panel.ram()[panel.ram().len() - 1], Rgb565(7));

        let mut panel = FrameBuffer::new();
        panel.set_orientation(Orientation::Rotate90);
        assert_eq!((panel.width(), panel.height()), (128, 160));
        fill(&mut panel, Rectangle::new(0, 159, 1, 1), &[Rgb565(9)]);
        assert_eq!(panel.pixel(0, 159), Some(Rgb565(9)));
        assert_eq!(panel.ram()[0], Rgb565(9));
    }

    #[test]
    fn multi_pixel_push() {
        let mut panel = FrameBuffer::new();
        panel.begin(Rectangle::new(0, 0, 2, 1)).unwrap();
        panel.push(&[0x01, 0x00, 0x02, 0x00]).unwrap();
        panel.end().unwrap();
        assert_eq!(panel.pixel(1, 0), Some(Rgb565(2)));
        assert_eq!(&panel.ram_bytes()[..4], &[0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn protocol_violations() {
        let mut panel = FrameBuffer::new();
        assert_eq!(panel.push(&[0, 0]), Err(FrameBufferError::NoWindow));
        assert_eq!(panel.end(), Err(FrameBufferError::NoWindow));
        assert!(matches!(
            panel.begin(Rectangle::new(100, 0, 128, 128)),
            Err(FrameBufferError::WindowOutOfBounds { .. })
        ));

        let window = Rectangle::new(0, 0, 1, 2);
        panel.begin(window).unwrap();
        assert_eq!(panel.begin(window), Err(FrameBufferError::WindowAlreadyOpen));
        assert_eq!(panel.push(&[0]), Err(FrameBufferError::OddByteCount(1)));
        panel.push(&[0, 0]).unwrap();
        assert_eq!(
            panel.end(),
            Err(FrameBufferError::PixelCountMismatch {
                expected: 2,
                pushed: 1
            })
        );

        panel.begin(window).unwrap();
        assert_eq!(
            panel.push(&[0, 0, 0, 0, 0, 0]),
            Err(FrameBufferError::WindowOverflow(window))
        );
    }

    #[test]
    fn clear_and_reset() {
        let mut panel = FrameBuffer::new();
        panel.clear().unwrap();
        assert!(panel.ram().iter().all(|&pixel| pixel == Rgb565::WHITE));

        let mut delay = CountingDelay(0);
        panel.begin(Rectangle::new(0, 0, 1, 1)).unwrap();
        panel.reset(&mut delay);
        assert_eq!(delay.0, RESET_PULSE_MS);
        assert!(panel.ram().iter().all(|&pixel| pixel == Rgb565::BLACK));
        assert_eq!(panel.end(), Err(FrameBufferError::NoWindow));
    }

    #[test]
    fn ppm_header_and_size() {
        let mut panel = FrameBuffer::new();
        panel.clear().unwrap();
        let ppm = panel.to_ppm();
        let header = b"P6\n160 128\n255\n";
        assert_eq!(&ppm[..header.len()], header);
        assert_eq!(ppm.len(), header.len() + 160 * 128 * 3);
        assert!(ppm[header.len()..].iter().all(|&byte| byte == 0xff));
    }
}

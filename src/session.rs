use log::{trace, warn};

use crate::{
    colour::Rgb565,
    display::{Display, Rectangle},
};

/// An open pixel window on a [`Display`].
///
/// Exactly `window.pixel_count()` colours have to be pushed, in row-major
/// order, before [`finish`](Self::finish). Nothing is buffered; each colour
/// goes straight to the panel. Debug builds assert the pixel count.
///
/// A session that is dropped without `finish` (say, because a push failed)
/// still closes the window.
pub struct RasterSession<'a, D: Display + ?Sized> {
    display: &'a mut D,
    window: Rectangle,
    open: bool,
    #[cfg(debug_assertions)]
    pushed: usize,
}

impl<'a, D: Display + ?Sized> RasterSession<'a, D> {
    pub fn begin(display: &'a mut D, window: Rectangle) -> Result<Self, D::Error> {
        trace!("begin raster session {:?}", window);
        display.begin(window)?;
        Ok(RasterSession {
            display,
            window,
            open: true,
            #[cfg(debug_assertions)]
            pushed: 0,
        })
    }

    pub fn window(&self) -> Rectangle {
        self.window
    }

    #[inline]
    pub fn push(&mut self, colour: Rgb565) -> Result<(), D::Error> {
        #[cfg(debug_assertions)]
        {
            debug_assert!(
                self.pushed < self.window.pixel_count(),
                "pushed more than {} pixels into {:?}",
                self.window.pixel_count(),
                self.window
            );
            self.pushed += 1;
        }
        self.display.push(&colour.to_bytes())
    }

    pub fn finish(mut self) -> Result<(), D::Error> {
        #[cfg(debug_assertions)]
        debug_assert_eq!(
            self.pushed,
            self.window.pixel_count(),
            "raster session closed early"
        );
        self.open = false;
        trace!("end raster session {:?}", self.window);
        self.display.end()
    }
}

impl<'a, D: Display + ?Sized> Drop for RasterSession<'a, D> {
    fn drop(&mut self) {
        if self.open {
            warn!("raster session {:?} dropped without finish", self.window);
            let _ = self.display.end();
        }
    }
}

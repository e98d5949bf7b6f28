/*!
Fixed-point Mandelbrot rendering for small RGB565 panels.

Every pixel is computed with saturating Q3.12 arithmetic and streamed to the
panel as soon as it is known, so no frame buffer is needed on the device.
Complex arithmetic goes through a [`ComplexBackend`]: the portable
[`Software`](backend::Software) backend, or on RISC-V cores with the packed
complex `CUSTOM_0` instruction (feature `custom-insn`), a hardware one.

```no_run
# fn main() -> Result<(), lcd_mandelbrot::framebuffer::FrameBufferError> {
use lcd_mandelbrot::{framebuffer::FrameBuffer, render_fractal};

let mut panel = FrameBuffer::new();
render_fractal(&mut panel)?;
# Ok(())
# }
```
*/

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod backend;
pub mod colour;
pub mod display;
pub mod escape;
pub mod fixed;
pub mod pixel;
pub mod render;
pub mod session;
pub mod view;

#[cfg(feature = "std")]
pub mod framebuffer;
#[cfg(feature = "std")]
pub mod stats;

pub use backend::{ComplexBackend, DefaultBackend};
pub use colour::{Palette, Rgb565};
pub use display::{Delay, Display, Point, Rectangle};
pub use escape::escape_time;
pub use fixed::Fixed;
pub use pixel::{Complex, PackedComplex};
pub use render::{render_fractal, render_with};
pub use session::RasterSession;
pub use view::View;

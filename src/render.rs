use log::{debug, trace};

use crate::{
    backend::{ComplexBackend, DefaultBackend},
    display::Display,
    escape::escape_time,
    pixel::Complex,
    session::RasterSession,
    view::View,
};

/// Clear `display` and draw the reference view with the build's default
/// arithmetic backend.
pub fn render_fractal<D: Display + ?Sized>(display: &mut D) -> Result<(), D::Error> {
    render_with(display, &DefaultBackend::default(), &View::REFERENCE)
}

/// Clear `display` and stream `view` into it one pixel at a time.
///
/// The window is closed before returning, also when the display reports an
/// error part-way through; the first error is returned.
pub fn render_with<D, B>(display: &mut D, backend: &B, view: &View) -> Result<(), D::Error>
where
    D: Display + ?Sized,
    B: ComplexBackend + ?Sized,
{
    trace!("begin render_with");
    debug!(
        "rendering {:?} from {:?} step {} using the {} backend",
        view.window,
        view.start,
        view.step,
        backend.name()
    );

    display.clear()?;

    let max_iterations = view.max_iterations();
    let mut session = RasterSession::begin(display, view.window)?;
    let mut imaginary = view.start.imaginary;
    for _ in 0..view.window.height {
        let mut real = view.start.real;
        for _ in 0..view.window.width {
            let iterations = escape_time(backend, Complex::new(real, imaginary), max_iterations);
            session.push(view.palette.colour_for(iterations))?;
            real = real + view.step;
        }
        imaginary = imaginary + view.step;
    }
    session.finish()?;

    trace!("end render_with");
    Ok(())
}

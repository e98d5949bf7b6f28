use std::{error::Error, fs};

use log::{debug, info, warn};

use lcd_mandelbrot::{
    backend::{first_mismatch, representative_inputs, Software},
    display::SpinDelay,
    framebuffer::{FrameBuffer, Orientation},
    render_fractal,
    stats::{escape_grid, IterationHistogram},
    ComplexBackend, DefaultBackend, View,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let backend = DefaultBackend::default();
    match first_mismatch(&Software, &backend, representative_inputs()) {
        None => debug!("the {} backend matches the software backend", backend.name()),
        Some(mismatch) => warn!(
            "the {} backend disagrees with the software backend: {:?}",
            backend.name(),
            mismatch
        ),
    }

    let mut panel = FrameBuffer::new();
    panel.reset(&mut SpinDelay);
    panel.set_orientation(Orientation::Rotate180);

    render_fractal(&mut panel)?;
    info!("rendered {:?}", View::REFERENCE.window);

    let view = View::REFERENCE;
    let counts = escape_grid(&backend, &view);
    let histogram = IterationHistogram::new(view.max_iterations(), &counts);
    info!(
        "{} pixels escaped, {} stayed bounded",
        histogram.escaped(),
        histogram.interior()
    );
    for (iterations, pixels) in histogram.buckets() {
        debug!("{:>2} iterations: {} pixels", iterations, pixels);
    }

    if let Some(path) = std::env::args().nth(1) {
        fs::write(&path, panel.to_ppm())?;
        info!("wrote {}", path);
    }

    Ok(())
}

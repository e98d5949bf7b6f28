use crate::{backend::ComplexBackend, fixed::Fixed, pixel::Complex};

/// Escape radius 2, squared.
pub const BAILOUT: Fixed = Fixed::from_int(4);

/// Iterate `z <- z^2 + c` starting from `z = c` and return the step at which
/// `|z|^2` first exceeds [`BAILOUT`], or `max_iterations` if it never does.
///
/// The result is always in `0..=max_iterations`.
pub fn escape_time<B: ComplexBackend + ?Sized>(
    backend: &B,
    c: Complex,
    max_iterations: u32,
) -> u32 {
    let c = c.pack();
    let mut z = c;
    for iteration in 0..max_iterations {
        z = backend.add(backend.multiply(z, z), c);
        if backend.magnitude_squared(z) > BAILOUT.raw() {
            return iteration;
        }
    }
    max_iterations
}

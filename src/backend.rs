/*!
Complex arithmetic on packed operands.

Every operation has a software implementation, built from the saturating
scalar primitives in [`fixed`](crate::fixed), and an optional hardware one
using the `CUSTOM_0` R-type instruction some RISC-V cores expose:

| funct3 | operation                       |
|--------|---------------------------------|
| 0      | complex multiply `rs1 * rs2`    |
| 1      | complex add `rs1 + rs2`         |
| 2      | magnitude squared of `rs1`      |

[`Software`] is the reference. The hardware semantics at the 16-bit boundary
are not documented anywhere we can check, so an `Accelerated` backend should
be validated against [`Software`] with [`first_mismatch`] before it is trusted.
*/

use crate::{
    fixed::Fixed,
    pixel::{Complex, PackedComplex},
};

pub trait ComplexBackend {
    fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex;

    fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex;

    /// Raw Q3.12 word of `|a|^2`, exactly as the backend produced it.
    fn magnitude_squared(&self, a: PackedComplex) -> i32;

    fn name(&self) -> &'static str;
}

impl<B: ComplexBackend + ?Sized> ComplexBackend for &B {
    fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
        (**self).multiply(a, b)
    }

    fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
        (**self).add(a, b)
    }

    fn magnitude_squared(&self, a: PackedComplex) -> i32 {
        (**self).magnitude_squared(a)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// `c * c`, with the imaginary part computed as `2 * (re * im)`.
pub fn square(c: Complex) -> Complex {
    Complex {
        real: c.real * c.real - c.imaginary * c.imaginary,
        imaginary: Fixed::from_int(2) * (c.real * c.imaginary),
    }
}

pub fn multiply(a: Complex, b: Complex) -> Complex {
    if a == b {
        return square(a);
    }
    Complex {
        real: a.real * b.real - a.imaginary * b.imaginary,
        imaginary: a.real * b.imaginary + a.imaginary * b.real,
    }
}

pub fn add(a: Complex, b: Complex) -> Complex {
    Complex {
        real: a.real + b.real,
        imaginary: a.imaginary + b.imaginary,
    }
}

pub fn magnitude_squared(c: Complex) -> Fixed {
    c.real * c.real + c.imaginary * c.imaginary
}

/// Portable implementation; unpacks, computes with saturating scalars, repacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Software;

impl ComplexBackend for Software {
    fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
        multiply(a.unpack(), b.unpack()).pack()
    }

    fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
        add(a.unpack(), b.unpack()).pack()
    }

    fn magnitude_squared(&self, a: PackedComplex) -> i32 {
        magnitude_squared(a.unpack()).raw()
    }

    fn name(&self) -> &'static str {
        "software"
    }
}

#[cfg(all(feature = "custom-insn", target_arch = "riscv32"))]
pub use accelerated::Accelerated;

#[cfg(all(feature = "custom-insn", target_arch = "riscv32"))]
mod accelerated {
    use core::arch::asm;

    use super::ComplexBackend;
    use crate::pixel::PackedComplex;

    /// Backend issuing one `CUSTOM_0` instruction per operation.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Accelerated;

    impl ComplexBackend for Accelerated {
        #[inline]
        fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            let result: u32;
            unsafe {
                asm!(
                    ".insn r CUSTOM_0, 0, 0, {0}, {1}, {2}",
                    out(reg) result,
                    in(reg) a.0,
                    in(reg) b.0,
                    options(pure, nomem, nostack),
                );
            }
            PackedComplex(result)
        }

        #[inline]
        fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            let result: u32;
            unsafe {
                asm!(
                    ".insn r CUSTOM_0, 1, 0, {0}, {1}, {2}",
                    out(reg) result,
                    in(reg) a.0,
                    in(reg) b.0,
                    options(pure, nomem, nostack),
                );
            }
            PackedComplex(result)
        }

        #[inline]
        fn magnitude_squared(&self, a: PackedComplex) -> i32 {
            let result: i32;
            unsafe {
                asm!(
                    ".insn r CUSTOM_0, 2, 0, {0}, {1}, x0",
                    out(reg) result,
                    in(reg) a.0,
                    options(pure, nomem, nostack),
                );
            }
            result
        }

        fn name(&self) -> &'static str {
            "custom-insn"
        }
    }
}

/// Backend selected at build time.
#[cfg(all(feature = "custom-insn", target_arch = "riscv32"))]
pub type DefaultBackend = Accelerated;

/// Backend selected at build time.
#[cfg(not(all(feature = "custom-insn", target_arch = "riscv32")))]
pub type DefaultBackend = Software;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Multiply,
    Add,
    MagnitudeSquared,
}

/// First input on which two backends disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub operation: Operation,
    pub a: PackedComplex,
    pub b: PackedComplex,
    pub expected: u32,
    pub actual: u32,
}

/// Run every operation on every input pair through both backends and report
/// the first result that differs in any bit.
pub fn first_mismatch<R, C, I>(reference: &R, candidate: &C, inputs: I) -> Option<Mismatch>
where
    R: ComplexBackend + ?Sized,
    C: ComplexBackend + ?Sized,
    I: IntoIterator<Item = (PackedComplex, PackedComplex)>,
{
    for (a, b) in inputs {
        let checks = [
            (
                Operation::Multiply,
                reference.multiply(a, b).0,
                candidate.multiply(a, b).0,
            ),
            (
                Operation::Add,
                reference.add(a, b).0,
                candidate.add(a, b).0,
            ),
            (
                Operation::MagnitudeSquared,
                reference.magnitude_squared(a) as u32,
                candidate.magnitude_squared(a) as u32,
            ),
        ];
        for (operation, expected, actual) in checks {
            if expected != actual {
                return Some(Mismatch {
                    operation,
                    a,
                    b,
                    expected,
                    actual,
                });
            }
        }
    }
    None
}

static SAMPLE_RAWS: [i32; 13] = [
    -32768, -16384, -8192, -4096, -1, 0, 1, 128, 4096, 8192, 16384, 24575, 32767,
];

/// Operand pairs covering both saturation bounds, the bailout region, signs,
/// and the smallest representable step, squared as well as mixed.
pub fn representative_inputs() -> impl Iterator<Item = (PackedComplex, PackedComplex)> {
    let values = || {
        SAMPLE_RAWS.iter().flat_map(|&real| {
            SAMPLE_RAWS.iter().map(move |&imaginary| {
                Complex::new(Fixed::from_raw(real), Fixed::from_raw(imaginary)).pack()
            })
        })
    };
    values()
        .flat_map(move |a| values().map(move |b| (a, b)))
        .chain(values().map(|a| (a, a)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(real: f32, imaginary: f32) -> Complex {
        let fixed = |value: f32| Fixed::from_raw((value * 4096.0) as i32);
        Complex::new(fixed(real), fixed(imaginary))
    }

    #[test]
    fn square_matches_closed_form() {
        // (1.5 + 0.5i)^2 = 2 + 1.5i
        assert_eq!(square(c(1.5, 0.5)), c(2.0, 1.5));
        // (-2 - 2i)^2 = 0 + 8i, imaginary saturates just below 8
        assert_eq!(
            square(Complex::from_ints(-2, -2)),
            Complex::new(Fixed::ZERO, Fixed::MAX)
        );
        // i^2 = -1
        assert_eq!(square(Complex::from_ints(0, 1)), Complex::from_ints(-1, 0));
    }

    #[test]
    fn square_agrees_with_general_multiply() {
        for (a, _) in representative_inputs() {
            let a = a.unpack();
            let general = Complex {
                real: a.real * a.real - a.imaginary * a.imaginary,
                imaginary: a.real * a.imaginary + a.imaginary * a.real,
            };
            assert_eq!(square(a), general, "{:?}", a);
        }
    }

    #[test]
    fn multiply_matches_closed_form() {
        // (1 + 2i)(3 - 1i) = 5 + 5i
        assert_eq!(
            multiply(Complex::from_ints(1, 2), Complex::from_ints(3, -1)),
            Complex::from_ints(5, 5)
        );
        assert_eq!(multiply(c(0.5, 0.0), c(0.0, 0.5)), c(0.0, 0.25));
    }

    #[test]
    fn add_matches_closed_form() {
        assert_eq!(add(c(1.25, -0.5), c(-0.25, 2.0)), c(1.0, 1.5));
        assert_eq!(
            add(Complex::from_ints(7, -7), Complex::from_ints(7, -7)),
            Complex::new(Fixed::MAX, Fixed::MIN)
        );
    }

    #[test]
    fn magnitude_squared_matches_closed_form() {
        assert_eq!(magnitude_squared(Complex::from_ints(1, 1)), Fixed::from_int(2));
        assert_eq!(magnitude_squared(c(0.5, -1.5)), c(2.5, 0.0).real);
        assert_eq!(magnitude_squared(Complex::from_ints(-2, -2)), Fixed::MAX);
    }

    #[test]
    fn software_backend_uses_packed_operands() {
        let a = Complex::from_ints(1, 2).pack();
        let b = Complex::from_ints(3, -1).pack();
        assert_eq!(Software.multiply(a, b), Complex::from_ints(5, 5).pack());
        assert_eq!(Software.add(a, b), Complex::from_ints(4, 1).pack());
        assert_eq!(Software.magnitude_squared(a), Fixed::from_int(5).raw());
    }

    #[test]
    fn software_agrees_with_itself() {
        assert_eq!(
            first_mismatch(&Software, &Software, representative_inputs()),
            None
        );
        assert_eq!(
            first_mismatch(&Software, &DefaultBackend::default(), representative_inputs()),
            None
        );
    }

    /// Packed add without saturation, as a carry-less lane adder would do it.
    struct WrappingAdd;

    impl ComplexBackend for WrappingAdd {
        fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            Software.multiply(a, b)
        }

        fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            let high = (a.0 >> 16).wrapping_add(b.0 >> 16) & 0xffff;
            let low = (a.0 & 0xffff).wrapping_add(b.0 & 0xffff) & 0xffff;
            PackedComplex(high << 16 | low)
        }

        fn magnitude_squared(&self, a: PackedComplex) -> i32 {
            Software.magnitude_squared(a)
        }

        fn name(&self) -> &'static str {
            "wrapping-add"
        }
    }

    #[test]
    fn mismatch_is_reported() {
        let mismatch = first_mismatch(&Software, &WrappingAdd, representative_inputs())
            .expect("wrapping add must diverge at the saturation bound");
        assert_eq!(mismatch.operation, Operation::Add);
        assert_ne!(mismatch.expected, mismatch.actual);
    }

    #[test]
    fn representative_inputs_cover_bounds() {
        let inputs: Vec<_> = representative_inputs().collect();
        assert_eq!(inputs.len(), 169 * 169 + 169);
        assert!(inputs.contains(&(PackedComplex(0x8000_8000), PackedComplex(0x7fff_7fff))));
    }

    /// Lane products summed at full width, with no clamp to the 16-bit range.
    struct UnclampedMagnitude;

    impl ComplexBackend for UnclampedMagnitude {
        fn multiply(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            Software.multiply(a, b)
        }

        fn add(&self, a: PackedComplex, b: PackedComplex) -> PackedComplex {
            Software.add(a, b)
        }

        fn magnitude_squared(&self, a: PackedComplex) -> i32 {
            let a = a.unpack();
            let (re, im) = (a.real.raw(), a.imaginary.raw());
            ((re * re) >> 12) + ((im * im) >> 12)
        }

        fn name(&self) -> &'static str {
            "unclamped-magnitude"
        }
    }

    #[test]
    fn unclamped_magnitude_is_reported() {
        let mismatch = first_mismatch(&Software, &UnclampedMagnitude, representative_inputs())
            .expect("an unclamped magnitude must diverge at the saturation bound");
        assert_eq!(mismatch.operation, Operation::MagnitudeSquared);
        // -8 - 8i: the software result clamps, the unclamped one is 128.0.
        assert_eq!(mismatch.a, PackedComplex(0x8000_8000));
        assert_eq!(mismatch.expected, 0x7fff);
        assert_eq!(mismatch.actual, 128 << 12);
    }
}

use bytemuck::{Pod, Zeroable};

use crate::fixed::Fixed;

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Complex {
    pub real: Fixed,
    pub imaginary: Fixed,
}

impl Complex {
    pub const ZERO: Self = Complex {
        real: Fixed::ZERO,
        imaginary: Fixed::ZERO,
    };

    pub const fn new(real: Fixed, imaginary: Fixed) -> Self {
        Complex { real, imaginary }
    }

    pub const fn from_ints(real: i32, imaginary: i32) -> Self {
        Complex {
            real: Fixed::from_int(real),
            imaginary: Fixed::from_int(imaginary),
        }
    }

    pub fn pack(self) -> PackedComplex {
        PackedComplex::pack(self)
    }
}

/// Two Q3.12 values in one word: real in bits 31..16, imaginary in bits 15..0.
///
/// This is the operand format of the `CUSTOM_0` complex instructions.
#[repr(transparent)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedComplex(pub u32);

impl PackedComplex {
    pub fn pack(value: Complex) -> Self {
        let real = value.real.raw() as u32 & 0xffff;
        let imaginary = value.imaginary.raw() as u32 & 0xffff;
        PackedComplex(real << 16 | imaginary)
    }

    pub fn unpack(self) -> Complex {
        // Sign-extend each half back to a full-width scalar.
        Complex {
            real: Fixed::from_raw((self.0 >> 16) as u16 as i16 as i32),
            imaginary: Fixed::from_raw(self.0 as u16 as i16 as i32),
        }
    }

    pub fn real(self) -> Fixed {
        self.unpack().real
    }

    pub fn imaginary(self) -> Fixed {
        self.unpack().imaginary
    }
}

impl From<Complex> for PackedComplex {
    fn from(value: Complex) -> Self {
        PackedComplex::pack(value)
    }
}

impl From<PackedComplex> for Complex {
    fn from(value: PackedComplex) -> Self {
        value.unpack()
    }
}

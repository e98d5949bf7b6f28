//! Saturating Q3.12 fixed-point scalars.
//!
//! Values live in a 32-bit word but are always clamped to the signed 16-bit
//! range, so a pair of them packs losslessly into one [`PackedComplex`](crate::pixel::PackedComplex).

use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use bytemuck::{Pod, Zeroable};

/// Number of fractional bits.
pub const FRACTIONAL_BITS: u32 = 12;

/// Number of magnitude bits; the clamp range is `[-2^15, 2^15 - 1]`.
pub const MANTISSA_BITS: u32 = 15;

const RAW_MIN: i32 = -(1 << MANTISSA_BITS);
const RAW_MAX: i32 = (1 << MANTISSA_BITS) - 1;

#[repr(transparent)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Self = Fixed(0);
    pub const ONE: Self = Fixed(1 << FRACTIONAL_BITS);
    pub const MIN: Self = Fixed(RAW_MIN);
    pub const MAX: Self = Fixed(RAW_MAX);

    /// Clamp a raw (already scaled) value into the representable range.
    pub const fn saturate(raw: i64) -> Self {
        if raw < RAW_MIN as i64 {
            Fixed(RAW_MIN)
        } else if raw > RAW_MAX as i64 {
            Fixed(RAW_MAX)
        } else {
            Fixed(raw as i32)
        }
    }

    /// Scale an integer up by [`FRACTIONAL_BITS`], then saturate.
    pub const fn from_int(value: i32) -> Self {
        Self::saturate((value as i64) << FRACTIONAL_BITS)
    }

    /// Reinterpret a raw Q3.12 value. Out-of-range input is clamped.
    pub const fn from_raw(raw: i32) -> Self {
        Self::saturate(raw as i64)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / (1 << FRACTIONAL_BITS) as f32
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self::saturate(self.0 as i64 + rhs.0 as i64)
    }

    /// Full-width product, arithmetic-shifted back down (rounds toward
    /// negative infinity), then saturated.
    pub const fn saturating_mul(self, rhs: Self) -> Self {
        Self::saturate((self.0 as i64 * rhs.0 as i64) >> FRACTIONAL_BITS)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_add(-rhs)
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Self) -> Self::Output {
        self.saturating_mul(rhs)
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Self::Output {
        Self::saturate(-(self.0 as i64))
    }
}

impl From<i32> for Fixed {
    fn from(value: i32) -> Self {
        Self::from_int(value)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

//! Q16.16 fixed-point scalar.
//!
//! Every quantity in the simulation (coordinates, distances, heights, trig
//! results) is a `Q`. Arithmetic wraps instead of trapping and division by
//! zero saturates, so the numeric core never panics.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Shl, Shr, ShrAssign, Sub, SubAssign};

use ::fixed::types::I16F16;
use fixed_sqrt::FixedSqrt;

/// Signed fixed-point real with 16 fractional bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Q(I16F16);

impl Q {
    /// Number of fractional bits.
    pub const FRACTION_BITS: u32 = 16;

    pub const ZERO: Q = Q(I16F16::ZERO);
    pub const ONE: Q = Q(I16F16::ONE);
    pub const MAX: Q = Q(I16F16::MAX);
    pub const MIN: Q = Q(I16F16::MIN);

    /// Construct directly from raw Q16.16 bits.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(I16F16::from_bits(raw))
    }

    /// Return the raw Q16.16 representation.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0.to_bits()
    }

    /// Construct from an integer value (n << 16).
    #[must_use]
    pub const fn from_int(n: i32) -> Self {
        Self::from_raw(n << Self::FRACTION_BITS)
    }

    /// Convert a configuration value. Only used while building parameters,
    /// never inside the per-tick pipeline.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Self(I16F16::saturating_from_num(value))
    }

    /// Lossy conversion for logging and tests.
    #[must_use]
    pub fn to_f32(self) -> f32 {
        self.0.to_num::<f32>()
    }

    /// Integer part, rounding toward negative infinity (arithmetic shift).
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self.raw() >> Self::FRACTION_BITS
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.wrapping_abs())
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.raw() > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.raw() < 0
    }

    /// Square root. Negative inputs yield zero.
    #[must_use]
    pub fn sqrt(self) -> Self {
        if !self.is_positive() {
            return Self::ZERO;
        }
        Self(FixedSqrt::sqrt(self.0))
    }
}

impl fmt::Debug for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q({:.5} raw={})", self.to_f32(), self.raw())
    }
}

impl fmt::Display for Q {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f32())
    }
}

impl Add for Q {
    type Output = Q;

    fn add(self, rhs: Q) -> Q {
        Q(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Q {
    fn add_assign(&mut self, rhs: Q) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Q {
    type Output = Q;

    fn sub(self, rhs: Q) -> Q {
        Q(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Q {
    fn sub_assign(&mut self, rhs: Q) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Q {
    type Output = Q;

    fn neg(self) -> Q {
        Q(self.0.wrapping_neg())
    }
}

impl Mul for Q {
    type Output = Q;

    fn mul(self, rhs: Q) -> Q {
        Q(self.0.wrapping_mul(rhs.0))
    }
}

impl Div for Q {
    type Output = Q;

    /// Saturates to `MAX`/`MIN` on a zero denominator.
    fn div(self, rhs: Q) -> Q {
        if rhs == Q::ZERO {
            return if self.is_negative() { Q::MIN } else { Q::MAX };
        }
        Q(self.0.saturating_div(rhs.0))
    }
}

impl Shr<u32> for Q {
    type Output = Q;

    fn shr(self, rhs: u32) -> Q {
        Q(self.0 >> rhs)
    }
}

impl ShrAssign<u32> for Q {
    fn shr_assign(&mut self, rhs: u32) {
        self.0 >>= rhs;
    }
}

impl Shl<u32> for Q {
    type Output = Q;

    fn shl(self, rhs: u32) -> Q {
        Q(self.0.wrapping_shl(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_identities() {
        let a = Q::from_f32(3.25);
        assert_eq!(a * Q::ONE, a);
        assert_eq!(a / Q::ONE, a);
        assert_eq!(Q::from_int(6) / Q::from_int(4), Q::from_f32(1.5));
        assert_eq!(Q::from_int(-3) * Q::from_f32(0.5), Q::from_f32(-1.5));
    }

    #[test]
    fn test_div_by_zero_saturates() {
        assert_eq!(Q::ONE / Q::ZERO, Q::MAX);
        assert_eq!(-Q::ONE / Q::ZERO, Q::MIN);
        // Overflowing quotients clamp too
        assert_eq!(Q::from_int(20_000) / Q::from_raw(1), Q::MAX);
        assert_eq!(Q::from_int(-20_000) / Q::from_raw(1), Q::MIN);
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(Q::from_int(4).sqrt(), Q::from_int(2));
        assert_eq!(Q::from_int(9).sqrt(), Q::from_int(3));
        assert_eq!(Q::ZERO.sqrt(), Q::ZERO);
        assert_eq!(Q::from_int(-4).sqrt(), Q::ZERO);

        // sqrt(2) within one raw unit
        let root2 = Q::from_int(2).sqrt();
        assert!((root2.raw() - 92682).abs() <= 1);
    }

    #[test]
    fn test_to_int_truncates_down() {
        assert_eq!(Q::from_f32(2.9).to_int(), 2);
        assert_eq!(Q::from_f32(-0.5).to_int(), -1);
    }
}

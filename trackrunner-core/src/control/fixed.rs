//! Q16.16 fixed-point gains
//!
//! The control loop runs without an FPU; gains are configured as value × 100
//! integers and multiplied against integer errors in 64-bit intermediates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Q16.16 fixed-point number
///
/// Range: approximately -32768.0 to +32767.99998
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fixed32(pub i32);

impl Fixed32 {
    pub const ZERO: Self = Self(0);

    pub const ONE: Self = Self(1 << Self::FRAC_BITS);

    pub const FRAC_BITS: u32 = 16;

    /// Create from a whole integer
    #[inline]
    pub const fn from_int(n: i16) -> Self {
        Self((n as i32) << Self::FRAC_BITS)
    }

    /// Create from a scaled integer (value × 100), e.g. 150 for 1.5
    ///
    /// Uses a 64-bit intermediate so any value inside the Q16.16 range
    /// converts without overflow.
    #[inline]
    pub const fn from_scaled_100(n: i32) -> Self {
        Self((((n as i64) << Self::FRAC_BITS) / 100) as i32)
    }

    /// Convert back to value × 100 (truncating)
    #[inline]
    pub const fn to_scaled_100(self) -> i32 {
        (((self.0 as i64) * 100) >> Self::FRAC_BITS) as i32
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by an integer, keeping the full product in raw Q16.16 form
    ///
    /// The result has 16 fractional bits; sums of these products are exact,
    /// so sign-symmetric inputs give exactly negated sums.
    #[inline]
    pub const fn mul_int_raw(self, n: i32) -> i64 {
        (self.0 as i64) * (n as i64)
    }
}

/// Convert a non-negative raw Q16.16 wide value to a saturated integer magnitude
#[inline]
pub(crate) fn raw_to_magnitude(raw: i64) -> u16 {
    let whole = raw.unsigned_abs() >> Fixed32::FRAC_BITS;
    whole.min(u16::MAX as u64) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scaled_100() {
        assert_eq!(Fixed32::from_scaled_100(100), Fixed32::ONE);
        assert_eq!(Fixed32::from_scaled_100(250).raw(), 5 << 15);
        assert_eq!(Fixed32::from_scaled_100(150).to_scaled_100(), 150);
        assert_eq!(Fixed32::from_int(-3).to_scaled_100(), -300);
    }

    #[test]
    fn test_mul_int_raw_is_exactly_negated() {
        let gain = Fixed32::from_scaled_100(33);
        assert_eq!(gain.mul_int_raw(7), -gain.mul_int_raw(-7));
    }

    #[test]
    fn test_magnitude_truncates_and_saturates() {
        let half = Fixed32::from_scaled_100(50);
        assert_eq!(raw_to_magnitude(half.mul_int_raw(5)), 2);
        assert_eq!(raw_to_magnitude(half.mul_int_raw(-5)), 2);
        assert_eq!(raw_to_magnitude(Fixed32::from_int(30000).mul_int_raw(10)), u16::MAX);
    }
}

//! Physical pixel values used for measurement.
//!
//! Measurement works in whole device pixels, the same as the host's layout
//! pass; drawing geometry is derived from it in `f32`.

use std::ops::{Add, Sub};

use crate::dp::{Dp, scale_factor};

/// A physical pixel length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Largest representable length.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` instance from an i32 value.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts from density-independent pixels.
    pub fn from_dp(dp: Dp) -> Self {
        dp.to_px()
    }

    /// Converts to density-independent pixels.
    pub fn to_dp(self) -> Dp {
        Dp(self.0 as f64 / scale_factor())
    }

    /// Returns the value as `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, saturating at the numeric bounds
    /// instead of overflowing.
    pub fn saturating_from_f32(value: f32) -> Self {
        let clamped_value = value.clamp(i32::MIN as f32, i32::MAX as f32);
        Px(clamped_value as i32)
    }

    /// Negative lengths collapse to zero.
    pub fn non_negative(self) -> Self {
        Px(self.0.max(0))
    }
}

impl Add for Px {
    type Output = Px;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0.saturating_sub(rhs.0))
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxSize {
    /// The width in physical pixels
    pub width: Px,
    /// The height in physical pixels
    pub height: Px,
}

impl PxSize {
    /// A constant representing zero size (0×0).
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size from width and height.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// Square of the given side.
    pub const fn square(side: Px) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Converts the size to a 2D f32 array.
    pub fn to_f32_arr2(self) -> [f32; 2] {
        [self.width.0 as f32, self.height.0 as f32]
    }
}

impl From<[Px; 2]> for PxSize {
    fn from([width, height]: [Px; 2]) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_from_f32() {
        assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
        assert_eq!(Px::saturating_from_f32(f32::MIN), Px(i32::MIN));
        assert_eq!(Px::saturating_from_f32(100.5), Px(100));
    }

    #[test]
    fn test_px_arithmetic_saturates() {
        assert_eq!(Px(10) + Px(5), Px(15));
        assert_eq!(Px(10) - Px(5), Px(5));
        assert_eq!(Px::MAX + Px(1), Px::MAX);
        assert_eq!(Px(-3).non_negative(), Px::ZERO);
    }

    #[test]
    fn test_px_size() {
        let size = PxSize::square(Px(120));
        assert_eq!(size.to_f32_arr2(), [120.0, 120.0]);
        assert_eq!(PxSize::from([Px(3), Px(4)]), PxSize::new(Px(3), Px(4)));
    }
}

//! # Density-Independent Pixels (Dp)
//!
//! Stroke widths are configured in [`Dp`] so that a ring looks equally thick on
//! a low-density desktop monitor and a high-density phone. The conversion to
//! device pixels goes through the process-wide [`SCALE_FACTOR`].
//!
//! ```
//! use radial_progress::Dp;
//!
//! let stroke = Dp(4.0);
//! let pixels = stroke.to_pixels_f32();
//! assert!(pixels > 0.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The value is the number of physical pixels per dp: `1.0` for standard
/// density, `2.0` for a typical high-density screen. Unset means `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Installs the device density used by every [`Dp`] conversion.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

/// Returns the current scale factor, `1.0` when none was installed.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp) for UI scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`.
    pub fn to_pixels_f64(&self) -> f64 {
        self.0 * scale_factor()
    }

    /// Converts this dp value to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        self.to_pixels_f64() as f32
    }

    /// Creates a `Dp` value from physical pixels specified as an `f32`.
    pub fn from_pixels_f32(value: f32) -> Self {
        Dp(value as f64 / scale_factor())
    }

    /// Converts this `Dp` value to a [`Px`] value, truncating.
    pub fn to_px(&self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp::new(value as f64)
    }
}

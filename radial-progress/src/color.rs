//! Colors for the indicator and its track.

use bytemuck::{Pod, Zeroable};

/// A color with an alpha component.
///
/// Values are stored as `f32`s in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black, the default indicator color.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque mid gray (`#888888`), the default track color.
    pub const GRAY: Color = Color::new(136.0 / 255.0, 136.0 / 255.0, 136.0 / 255.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color` from three `f32` values.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new `Color` from four `u8` values (red, green, blue, alpha).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Creates a color from a packed `0xAARRGGBB` value.
    pub fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba_u8(r, g, b, a)
    }

    /// Packs the color into `0xAARRGGBB`, rounding every channel to 8 bits.
    pub fn to_argb_u32(self) -> u32 {
        let [r, g, b, a] = self.to_rgba_u8();
        u32::from_be_bytes([a, r, g, b])
    }

    /// Returns the channels as rounded bytes.
    pub fn to_rgba_u8(self) -> [u8; 4] {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`; the leading `#` is optional.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_argb_u32(0xFF00_0000 | value)),
            8 => Some(Self::from_argb_u32(value)),
            _ => None,
        }
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between `self` and `other`, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Converts the color to an array of `[f32; 4]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba_u8(r, g, b, a)
    }
}

/// Makes `color` more transparent by `factor` (`1.0` keeps it, `0.0` clears
/// it). The alpha is rounded to the nearest 8-bit step.
pub fn adjust_alpha(color: Color, factor: f32) -> Color {
    let alpha = (color.to_rgba_u8()[3] as f32 * factor).round().clamp(0.0, 255.0);
    color.with_alpha(alpha / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_round_trip_keeps_channel_order() {
        let color = Color::from_argb_u32(0x80FF_4000);
        assert_eq!(color.to_rgba_u8(), [0xFF, 0x40, 0x00, 0x80]);
        assert_eq!(color.to_argb_u32(), 0x80FF_4000);
    }

    #[test]
    fn parse_hex_accepts_both_lengths() {
        assert_eq!(Color::parse_hex("#000000"), Some(Color::BLACK));
        assert_eq!(Color::parse_hex("ff888888"), Some(Color::GRAY));
        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("#GG0000"), None);
        assert_eq!(Color::parse_hex("#+12345"), None);
    }

    #[test]
    fn adjust_alpha_scales_opacity_only() {
        let color = Color::from_argb_u32(0xFF33_6699);
        let faded = adjust_alpha(color, 0.3);
        assert_eq!(faded.to_argb_u32(), 0x4D33_6699);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 4.0), Color::WHITE);
    }
}

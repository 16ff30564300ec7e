//! Fill sources for the indicator and track strokes.
//!
//! A stroke is either painted with one color or with a two-stop linear
//! gradient laid across the widget's bounding box.

use glam::Vec2;

use crate::{Color, PxSize, error::RadialProgressError};

/// Axis along which a two-color gradient runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// Start color on the left edge.
    #[default]
    LeftToRight,
    /// Start color on the right edge.
    RightToLeft,
    /// Start color on the top edge.
    TopToBottom,
    /// Start color on the bottom edge.
    BottomToTop,
}

impl GradientDirection {
    /// Attribute code of this direction.
    pub fn code(self) -> i32 {
        match self {
            GradientDirection::LeftToRight => 1,
            GradientDirection::RightToLeft => 2,
            GradientDirection::TopToBottom => 3,
            GradientDirection::BottomToTop => 4,
        }
    }

    /// Gradient endpoints spanning a box of `size`.
    fn endpoints(self, size: PxSize) -> (Vec2, Vec2) {
        let [w, h] = size.to_f32_arr2();
        match self {
            GradientDirection::LeftToRight => (Vec2::ZERO, Vec2::new(w, 0.0)),
            GradientDirection::RightToLeft => (Vec2::new(w, 0.0), Vec2::ZERO),
            GradientDirection::TopToBottom => (Vec2::ZERO, Vec2::new(0.0, h)),
            GradientDirection::BottomToTop => (Vec2::new(0.0, h), Vec2::ZERO),
        }
    }
}

impl TryFrom<i32> for GradientDirection {
    type Error = RadialProgressError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(GradientDirection::LeftToRight),
            2 => Ok(GradientDirection::RightToLeft),
            3 => Ok(GradientDirection::TopToBottom),
            4 => Ok(GradientDirection::BottomToTop),
            other => Err(RadialProgressError::invalid(
                "gradient_direction",
                format!("unsupported gradient direction {other}"),
            )),
        }
    }
}

/// A clamped two-stop linear gradient in widget-local pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point painted with `start_color`.
    pub from: Vec2,
    /// Point painted with `end_color`.
    pub to: Vec2,
    /// Color at `from` and before it.
    pub start_color: Color,
    /// Color at `to` and beyond it.
    pub end_color: Color,
}

impl LinearGradient {
    /// Samples the gradient at a widget-local point.
    pub fn color_at(&self, point: Vec2) -> Color {
        let axis = self.to - self.from;
        let length_squared = axis.length_squared();
        if length_squared <= f32::EPSILON {
            return self.start_color;
        }
        let t = (point - self.from).dot(axis) / length_squared;
        self.start_color.lerp(self.end_color, t)
    }
}

/// What a stroke is filled with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Brush {
    /// A single color.
    Solid(Color),
    /// A two-stop gradient.
    LinearGradient(LinearGradient),
}

impl Brush {
    /// Samples the brush at a widget-local point.
    pub fn color_at(&self, point: Vec2) -> Color {
        match self {
            Brush::Solid(color) => *color,
            Brush::LinearGradient(gradient) => gradient.color_at(point),
        }
    }

    /// Returns the brush with every stop's alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let fade = |c: Color| c.with_alpha(c.a * opacity);
        match self {
            Brush::Solid(color) => Brush::Solid(fade(color)),
            Brush::LinearGradient(gradient) => Brush::LinearGradient(LinearGradient {
                start_color: fade(gradient.start_color),
                end_color: fade(gradient.end_color),
                ..gradient
            }),
        }
    }

    /// The two stop colors; a solid brush repeats its color.
    pub fn stops(&self) -> [Color; 2] {
        match self {
            Brush::Solid(color) => [*color, *color],
            Brush::LinearGradient(gradient) => [gradient.start_color, gradient.end_color],
        }
    }
}

/// Color configuration of one stroke.
///
/// `start` and `end` fall back to `color` when unset, so a spec without stops
/// paints solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSpec {
    /// Base color.
    pub color: Color,
    /// Gradient start stop.
    pub start: Option<Color>,
    /// Gradient end stop.
    pub end: Option<Color>,
    /// Gradient axis.
    pub direction: GradientDirection,
}

impl ColorSpec {
    /// Solid color spec.
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            start: None,
            end: None,
            direction: GradientDirection::LeftToRight,
        }
    }

    /// Builds the brush for a widget of `size`.
    pub fn brush(&self, size: PxSize) -> Brush {
        let start_color = self.start.unwrap_or(self.color);
        let end_color = self.end.unwrap_or(self.color);
        if start_color == end_color {
            return Brush::Solid(start_color);
        }
        let (from, to) = self.direction.endpoints(size);
        Brush::LinearGradient(LinearGradient {
            from,
            to,
            start_color,
            end_color,
        })
    }
}

/// A [`ColorSpec`] with its brush computed on demand and kept until the spec
/// or the widget size changes.
#[derive(Clone, Debug)]
pub(crate) struct Paint {
    spec: ColorSpec,
    cached: Option<Brush>,
}

impl Paint {
    pub(crate) fn new(spec: ColorSpec) -> Self {
        Self { spec, cached: None }
    }

    pub(crate) fn spec(&self) -> &ColorSpec {
        &self.spec
    }

    pub(crate) fn update(&mut self, f: impl FnOnce(&mut ColorSpec)) {
        f(&mut self.spec);
        self.cached = None;
    }

    pub(crate) fn invalidate(&mut self) {
        self.cached = None;
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    pub(crate) fn brush(&mut self, size: PxSize) -> Brush {
        let spec = self.spec;
        *self.cached.get_or_insert_with(|| spec.brush(size))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Px;

    const SIZE: PxSize = PxSize::square(Px(100));

    fn gradient(direction: GradientDirection) -> LinearGradient {
        let spec = ColorSpec {
            color: Color::BLACK,
            start: Some(Color::RED),
            end: Some(Color::BLUE),
            direction,
        };
        match spec.brush(SIZE) {
            Brush::LinearGradient(gradient) => gradient,
            Brush::Solid(_) => panic!("expected a gradient"),
        }
    }

    #[rstest]
    #[case(GradientDirection::LeftToRight, Vec2::new(0.0, 50.0), Vec2::new(100.0, 50.0))]
    #[case(GradientDirection::RightToLeft, Vec2::new(100.0, 50.0), Vec2::new(0.0, 50.0))]
    #[case(GradientDirection::TopToBottom, Vec2::new(50.0, 0.0), Vec2::new(50.0, 100.0))]
    #[case(GradientDirection::BottomToTop, Vec2::new(50.0, 100.0), Vec2::new(50.0, 0.0))]
    fn gradient_runs_along_direction(
        #[case] direction: GradientDirection,
        #[case] start_point: Vec2,
        #[case] end_point: Vec2,
    ) {
        let gradient = gradient(direction);
        assert_eq!(gradient.color_at(start_point), Color::RED);
        assert_eq!(gradient.color_at(end_point), Color::BLUE);
    }

    #[test]
    fn gradient_clamps_outside_axis() {
        let gradient = gradient(GradientDirection::LeftToRight);
        assert_eq!(gradient.color_at(Vec2::new(-40.0, 0.0)), Color::RED);
        assert_eq!(gradient.color_at(Vec2::new(400.0, 0.0)), Color::BLUE);
    }

    #[test]
    fn missing_stops_fall_back_to_base_color() {
        let spec = ColorSpec::solid(Color::GREEN);
        assert_eq!(spec.brush(SIZE), Brush::Solid(Color::GREEN));

        let half = ColorSpec {
            start: Some(Color::WHITE),
            ..ColorSpec::solid(Color::GREEN)
        };
        assert_eq!(half.brush(SIZE).stops(), [Color::WHITE, Color::GREEN]);
    }

    #[test]
    fn gradient_on_empty_box_degrades_to_start_color() {
        let spec = ColorSpec {
            color: Color::BLACK,
            start: Some(Color::RED),
            end: Some(Color::BLUE),
            direction: GradientDirection::TopToBottom,
        };
        let brush = spec.brush(PxSize::ZERO);
        assert_eq!(brush.color_at(Vec2::new(3.0, 3.0)), Color::RED);
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(-1)]
    fn unknown_direction_codes_are_rejected(#[case] code: i32) {
        assert!(GradientDirection::try_from(code).is_err());
    }

    #[test]
    fn direction_codes_round_trip() {
        for code in 1..=4 {
            let direction = GradientDirection::try_from(code).expect("known code");
            assert_eq!(direction.code(), code);
        }
    }

    #[test]
    fn paint_caches_until_invalidated() {
        let mut paint = Paint::new(ColorSpec::solid(Color::RED));
        assert!(!paint.is_cached());
        paint.brush(SIZE);
        assert!(paint.is_cached());
        paint.invalidate();
        assert!(!paint.is_cached());
        paint.brush(SIZE);
        paint.update(|spec| spec.color = Color::BLUE);
        assert!(!paint.is_cached());
        assert_eq!(paint.brush(SIZE), Brush::Solid(Color::BLUE));
    }
}

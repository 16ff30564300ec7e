//! Draw commands for the track ring and the progress arc.

use glam::Vec2;

use crate::paint::Brush;

/// Stroke cap used for arc ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressArcCap {
    /// Rounded stroke ends.
    Round,
    /// Flat stroke ends.
    #[default]
    Butt,
}

/// Axis-aligned rectangle the stroke centerline is inscribed in, in
/// widget-local physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl ArcRect {
    /// Creates a rectangle from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width, never negative.
    pub fn width(&self) -> f32 {
        (self.right - self.left).max(0.0)
    }

    /// Height, never negative.
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    /// Center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Point on the inscribed ellipse at `angle_degrees` (0° at 3 o'clock,
    /// growing clockwise in screen space).
    pub fn point_at(&self, angle_degrees: f32) -> Vec2 {
        let radians = angle_degrees.to_radians();
        self.center()
            + Vec2::new(
                self.width() * 0.5 * radians.cos(),
                self.height() * 0.5 * radians.sin(),
            )
    }
}

/// Draw command for the full track ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvalCommand {
    /// Rectangle the ring is inscribed in.
    pub bounds: ArcRect,
    /// Stroke fill.
    pub brush: Brush,
    /// Stroke width in physical pixels.
    pub stroke_width_px: f32,
}

/// Draw command for a circular arc stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArcCommand {
    /// Rectangle the arc is inscribed in.
    pub bounds: ArcRect,
    /// Stroke fill.
    pub brush: Brush,
    /// Stroke width in physical pixels.
    pub stroke_width_px: f32,
    /// Start angle in degrees, where 0° is at 3 o'clock.
    pub start_angle_degrees: f32,
    /// Signed sweep angle in degrees, positive is clockwise.
    pub sweep_angle_degrees: f32,
    /// Stroke cap applied to arc ends.
    pub cap: ProgressArcCap,
}

impl ProgressArcCommand {
    /// Angle where the arc ends.
    pub fn end_angle_degrees(&self) -> f32 {
        self.start_angle_degrees + self.sweep_angle_degrees
    }
}

/// One primitive of a rendered indicator frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialDrawCommand {
    /// Background track.
    Oval(OvalCommand),
    /// Foreground progress arc.
    Arc(ProgressArcCommand),
}

impl RadialDrawCommand {
    /// Multiplies the alpha of every color the command paints with.
    pub fn apply_opacity(&mut self, opacity: f32) {
        match self {
            RadialDrawCommand::Oval(oval) => oval.brush = oval.brush.with_opacity(opacity),
            RadialDrawCommand::Arc(arc) => arc.brush = arc.brush.with_opacity(opacity),
        }
    }

    /// Bounds of the stroke centerline.
    pub fn bounds(&self) -> ArcRect {
        match self {
            RadialDrawCommand::Oval(oval) => oval.bounds,
            RadialDrawCommand::Arc(arc) => arc.bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn point_at_follows_screen_orientation() {
        let rect = ArcRect::new(0.0, 0.0, 100.0, 100.0);
        let right = rect.point_at(0.0);
        let bottom = rect.point_at(90.0);
        let top = rect.point_at(270.0);
        assert!((right - Vec2::new(100.0, 50.0)).length() < 1e-3);
        assert!((bottom - Vec2::new(50.0, 100.0)).length() < 1e-3);
        assert!((top - Vec2::new(50.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn opacity_reaches_every_command() {
        let mut command = RadialDrawCommand::Oval(OvalCommand {
            bounds: ArcRect::default(),
            brush: Brush::Solid(Color::BLACK),
            stroke_width_px: 2.0,
        });
        command.apply_opacity(0.5);
        let RadialDrawCommand::Oval(oval) = command else {
            panic!("variant changed");
        };
        assert_eq!(oval.brush, Brush::Solid(Color::BLACK.with_alpha(0.5)));
    }
}

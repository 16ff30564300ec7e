//! GPU instance layout for arc draw commands.

use bytemuck::{Pod, Zeroable};

use super::command::{ProgressArcCap, RadialDrawCommand};
use crate::paint::Brush;

/// Per-instance data for an instanced arc shader.
///
/// Solid brushes repeat their color in both stops with a zero-length gradient
/// axis; ovals are emitted as 360° butt-capped arcs starting at 0°.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct ArcInstance {
    /// `left, top, right, bottom` of the stroke centerline bounds.
    pub bounds: [f32; 4],
    /// Gradient start stop, linear RGBA.
    pub start_color: [f32; 4],
    /// Gradient end stop, linear RGBA.
    pub end_color: [f32; 4],
    /// `from.x, from.y, to.x, to.y` of the gradient axis.
    pub gradient_axis: [f32; 4],
    /// Stroke width in physical pixels.
    pub stroke_width: f32,
    /// Start angle in degrees.
    pub start_angle_degrees: f32,
    /// Signed sweep in degrees.
    pub sweep_angle_degrees: f32,
    /// `1` for round caps, `0` for butt caps.
    pub cap: u32,
}

fn brush_fields(brush: &Brush) -> ([f32; 4], [f32; 4], [f32; 4]) {
    let [start, end] = brush.stops();
    let axis = match brush {
        Brush::Solid(_) => [0.0; 4],
        Brush::LinearGradient(gradient) => [
            gradient.from.x,
            gradient.from.y,
            gradient.to.x,
            gradient.to.y,
        ],
    };
    (start.to_array(), end.to_array(), axis)
}

/// Packs draw commands in order, skipping nothing.
pub fn build_instances(commands: &[RadialDrawCommand]) -> Vec<ArcInstance> {
    commands
        .iter()
        .map(|command| match command {
            RadialDrawCommand::Oval(oval) => {
                let (start_color, end_color, gradient_axis) = brush_fields(&oval.brush);
                ArcInstance {
                    bounds: [
                        oval.bounds.left,
                        oval.bounds.top,
                        oval.bounds.right,
                        oval.bounds.bottom,
                    ],
                    start_color,
                    end_color,
                    gradient_axis,
                    stroke_width: oval.stroke_width_px,
                    start_angle_degrees: 0.0,
                    sweep_angle_degrees: 360.0,
                    cap: 0,
                }
            }
            RadialDrawCommand::Arc(arc) => {
                let (start_color, end_color, gradient_axis) = brush_fields(&arc.brush);
                ArcInstance {
                    bounds: [
                        arc.bounds.left,
                        arc.bounds.top,
                        arc.bounds.right,
                        arc.bounds.bottom,
                    ],
                    start_color,
                    end_color,
                    gradient_axis,
                    stroke_width: arc.stroke_width_px,
                    start_angle_degrees: arc.start_angle_degrees,
                    sweep_angle_degrees: arc.sweep_angle_degrees,
                    cap: match arc.cap {
                        ProgressArcCap::Round => 1,
                        ProgressArcCap::Butt => 0,
                    },
                }
            }
        })
        .collect()
}

/// Raw bytes of the packed instances, ready for a buffer write.
pub fn instance_bytes(instances: &[ArcInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::{
        Color,
        paint::LinearGradient,
        pipelines::progress_arc::command::{ArcRect, OvalCommand, ProgressArcCommand},
    };

    #[test]
    fn packs_oval_and_arc() {
        let bounds = ArcRect::new(2.0, 2.0, 98.0, 98.0);
        let commands = [
            RadialDrawCommand::Oval(OvalCommand {
                bounds,
                brush: Brush::Solid(Color::GRAY),
                stroke_width_px: 2.0,
            }),
            RadialDrawCommand::Arc(ProgressArcCommand {
                bounds,
                brush: Brush::LinearGradient(LinearGradient {
                    from: Vec2::ZERO,
                    to: Vec2::new(100.0, 0.0),
                    start_color: Color::RED,
                    end_color: Color::BLUE,
                }),
                stroke_width_px: 4.0,
                start_angle_degrees: 270.0,
                sweep_angle_degrees: -90.0,
                cap: ProgressArcCap::Round,
            }),
        ];

        let instances = build_instances(&commands);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].sweep_angle_degrees, 360.0);
        assert_eq!(instances[0].start_color, instances[0].end_color);
        assert_eq!(instances[0].gradient_axis, [0.0; 4]);
        assert_eq!(instances[1].cap, 1);
        assert_eq!(instances[1].sweep_angle_degrees, -90.0);
        assert_eq!(instances[1].gradient_axis, [0.0, 0.0, 100.0, 0.0]);
        assert_eq!(
            instance_bytes(&instances).len(),
            2 * std::mem::size_of::<ArcInstance>()
        );
    }
}

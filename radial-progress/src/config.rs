//! Construction-time configuration.
//!
//! [`RadialProgressArgs`] is the typed form used from code. [`AttributeSet`] is
//! the declarative form a layout file supplies: every key optional, enums as
//! raw integer codes, colors as hex strings. Converting the latter into the
//! former is where bad codes are rejected.

use derive_setters::Setters;
use serde::Deserialize;

use crate::{
    Color, Dp,
    error::{RadialProgressError, Result},
    paint::{ColorSpec, GradientDirection},
    radial_progress::{ProgressDirection, RadialProgressDefaults},
};

/// Arguments for configuring a radial progress indicator.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct RadialProgressArgs {
    /// Initial progress, in the same units as `progress_max`.
    pub progress: f32,

    /// Value that fills the whole ring.
    pub progress_max: f32,

    /// Width of the progress arc.
    #[setters(into)]
    pub progressbar_width: Dp,

    /// Width of the background track.
    #[setters(into)]
    pub background_progressbar_width: Dp,

    /// Base color of the progress arc.
    pub progressbar_color: Color,

    /// Gradient start color of the progress arc.
    #[setters(strip_option)]
    pub progressbar_color_start: Option<Color>,

    /// Gradient end color of the progress arc.
    #[setters(strip_option)]
    pub progressbar_color_end: Option<Color>,

    /// Gradient axis of the progress arc.
    pub progressbar_color_direction: GradientDirection,

    /// Base color of the background track.
    pub background_progressbar_color: Color,

    /// Gradient start color of the background track.
    #[setters(strip_option)]
    pub background_progressbar_color_start: Option<Color>,

    /// Gradient end color of the background track.
    #[setters(strip_option)]
    pub background_progressbar_color_end: Option<Color>,

    /// Gradient axis of the background track.
    pub background_progressbar_color_direction: GradientDirection,

    /// Rounded arc ends instead of flat ones.
    pub round_border: bool,

    /// Offset added to the 12 o'clock origin, in degrees.
    pub start_angle: f32,

    /// Which way the arc grows.
    pub progress_direction: ProgressDirection,

    /// Start in indeterminate mode.
    pub indeterminate_mode: bool,
}

impl Default for RadialProgressArgs {
    fn default() -> Self {
        Self {
            progress: 0.0,
            progress_max: RadialProgressDefaults::PROGRESS_MAX,
            progressbar_width: RadialProgressDefaults::STROKE_WIDTH,
            background_progressbar_width: RadialProgressDefaults::BACKGROUND_STROKE_WIDTH,
            progressbar_color: RadialProgressDefaults::COLOR,
            progressbar_color_start: None,
            progressbar_color_end: None,
            progressbar_color_direction: GradientDirection::default(),
            background_progressbar_color: RadialProgressDefaults::BACKGROUND_COLOR,
            background_progressbar_color_start: None,
            background_progressbar_color_end: None,
            background_progressbar_color_direction: GradientDirection::default(),
            round_border: false,
            start_angle: 0.0,
            progress_direction: ProgressDirection::default(),
            indeterminate_mode: false,
        }
    }
}

impl RadialProgressArgs {
    pub(crate) fn foreground_spec(&self) -> ColorSpec {
        ColorSpec {
            color: self.progressbar_color,
            start: self.progressbar_color_start,
            end: self.progressbar_color_end,
            direction: self.progressbar_color_direction,
        }
    }

    pub(crate) fn background_spec(&self) -> ColorSpec {
        ColorSpec {
            color: self.background_progressbar_color,
            start: self.background_progressbar_color_start,
            end: self.background_progressbar_color_end,
            direction: self.background_progressbar_color_direction,
        }
    }
}

/// Declarative attribute table, keyed the way layout files spell them.
///
/// ```
/// use radial_progress::config::{AttributeSet, RadialProgressArgs};
///
/// let attributes = AttributeSet::from_toml_str(
///     r##"
///     progress = 65
///     progressbar_color = "#3F51B5"
///     progress_direction = 2
///     "##,
/// )
/// .unwrap();
/// let args = RadialProgressArgs::try_from(attributes).unwrap();
/// assert_eq!(args.progress, 65.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    /// `progress`
    pub progress: Option<f32>,
    /// `progress_max`
    pub progress_max: Option<f32>,
    /// `progressbar_width`, in dp.
    pub progressbar_width: Option<f64>,
    /// `background_progressbar_width`, in dp.
    pub background_progressbar_width: Option<f64>,
    /// `progressbar_color`
    pub progressbar_color: Option<String>,
    /// `progressbar_color_start`
    pub progressbar_color_start: Option<String>,
    /// `progressbar_color_end`
    pub progressbar_color_end: Option<String>,
    /// `progressbar_color_direction`, 1..=4.
    pub progressbar_color_direction: Option<i32>,
    /// `background_progressbar_color`
    pub background_progressbar_color: Option<String>,
    /// `background_progressbar_color_start`
    pub background_progressbar_color_start: Option<String>,
    /// `background_progressbar_color_end`
    pub background_progressbar_color_end: Option<String>,
    /// `background_progressbar_color_direction`, 1..=4.
    pub background_progressbar_color_direction: Option<i32>,
    /// `round_border`
    pub round_border: Option<bool>,
    /// `start_angle`
    pub start_angle: Option<f32>,
    /// `progress_direction`, 1 (clockwise) or 2 (counter-clockwise).
    pub progress_direction: Option<i32>,
    /// `indeterminate_mode`
    pub indeterminate_mode: Option<bool>,
}

impl AttributeSet {
    /// Parses a TOML document whose top-level keys are attribute names.
    /// Unknown keys are ignored.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

fn parse_color(key: &'static str, value: Option<&str>) -> Result<Option<Color>> {
    value
        .map(|text| {
            Color::parse_hex(text).ok_or_else(|| {
                RadialProgressError::invalid(key, format!("`{text}` is not a hex color"))
            })
        })
        .transpose()
}

/// Gradient stops treat a zero color as "not set".
fn parse_stop(key: &'static str, value: Option<&str>) -> Result<Option<Color>> {
    Ok(parse_color(key, value)?.filter(|color| color.to_argb_u32() != 0))
}

fn parse_gradient(key: &'static str, code: Option<i32>) -> Result<Option<GradientDirection>> {
    code.map(|code| {
        GradientDirection::try_from(code).map_err(|_| {
            RadialProgressError::invalid(key, format!("unsupported gradient direction {code}"))
        })
    })
    .transpose()
}

impl TryFrom<AttributeSet> for RadialProgressArgs {
    type Error = RadialProgressError;

    fn try_from(attributes: AttributeSet) -> Result<Self> {
        let defaults = RadialProgressArgs::default();
        let progress_direction = attributes
            .progress_direction
            .map(ProgressDirection::try_from)
            .transpose()?;

        Ok(Self {
            progress: attributes.progress.unwrap_or(defaults.progress),
            progress_max: attributes.progress_max.unwrap_or(defaults.progress_max),
            progressbar_width: attributes
                .progressbar_width
                .map(Dp)
                .unwrap_or(defaults.progressbar_width),
            background_progressbar_width: attributes
                .background_progressbar_width
                .map(Dp)
                .unwrap_or(defaults.background_progressbar_width),
            progressbar_color: parse_color(
                "progressbar_color",
                attributes.progressbar_color.as_deref(),
            )?
            .unwrap_or(defaults.progressbar_color),
            progressbar_color_start: parse_stop(
                "progressbar_color_start",
                attributes.progressbar_color_start.as_deref(),
            )?,
            progressbar_color_end: parse_stop(
                "progressbar_color_end",
                attributes.progressbar_color_end.as_deref(),
            )?,
            progressbar_color_direction: parse_gradient(
                "progressbar_color_direction",
                attributes.progressbar_color_direction,
            )?
            .unwrap_or(defaults.progressbar_color_direction),
            background_progressbar_color: parse_color(
                "background_progressbar_color",
                attributes.background_progressbar_color.as_deref(),
            )?
            .unwrap_or(defaults.background_progressbar_color),
            background_progressbar_color_start: parse_stop(
                "background_progressbar_color_start",
                attributes.background_progressbar_color_start.as_deref(),
            )?,
            background_progressbar_color_end: parse_stop(
                "background_progressbar_color_end",
                attributes.background_progressbar_color_end.as_deref(),
            )?,
            background_progressbar_color_direction: parse_gradient(
                "background_progressbar_color_direction",
                attributes.background_progressbar_color_direction,
            )?
            .unwrap_or(defaults.background_progressbar_color_direction),
            round_border: attributes.round_border.unwrap_or(defaults.round_border),
            start_angle: attributes.start_angle.unwrap_or(defaults.start_angle),
            progress_direction: progress_direction.unwrap_or(defaults.progress_direction),
            indeterminate_mode: attributes
                .indeterminate_mode
                .unwrap_or(defaults.indeterminate_mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn empty_attributes_yield_defaults() {
        let args = RadialProgressArgs::try_from(AttributeSet::default()).expect("defaults");
        assert_eq!(args, RadialProgressArgs::default());
        assert_eq!(args.progress_max, 100.0);
        assert_eq!(args.progressbar_color, Color::BLACK);
        assert_eq!(args.background_progressbar_color, Color::GRAY);
    }

    #[test]
    fn full_document_parses() {
        let attributes = AttributeSet::from_toml_str(
            r##"
            progress = 40
            progress_max = 80.0
            progressbar_width = 10
            background_progressbar_width = 5.5
            progressbar_color = "#FF0000"
            progressbar_color_start = "#FFFF0000"
            progressbar_color_end = "#0000FF"
            progressbar_color_direction = 3
            background_progressbar_color = "#80888888"
            background_progressbar_color_direction = 2
            round_border = true
            start_angle = 45
            progress_direction = 2
            indeterminate_mode = true
            unknown_key = "ignored"
            "##,
        )
        .expect("valid toml");
        let args = RadialProgressArgs::try_from(attributes).expect("valid attributes");

        assert_eq!(args.progress, 40.0);
        assert_eq!(args.progress_max, 80.0);
        assert_eq!(args.progressbar_width, Dp(10.0));
        assert_eq!(args.background_progressbar_width, Dp(5.5));
        assert_eq!(args.progressbar_color, Color::RED);
        assert_eq!(args.progressbar_color_start, Some(Color::RED));
        assert_eq!(args.progressbar_color_end, Some(Color::BLUE));
        assert_eq!(args.progressbar_color_direction, GradientDirection::TopToBottom);
        assert_eq!(
            args.background_progressbar_color.to_argb_u32(),
            0x8088_8888
        );
        assert_eq!(
            args.background_progressbar_color_direction,
            GradientDirection::RightToLeft
        );
        assert!(args.round_border);
        assert_eq!(args.start_angle, 45.0);
        assert_eq!(args.progress_direction, ProgressDirection::CounterClockwise);
        assert!(args.indeterminate_mode);
    }

    #[test]
    fn zero_gradient_stop_means_unset() {
        let attributes = AttributeSet {
            progressbar_color_start: Some("#00000000".into()),
            ..Default::default()
        };
        let args = RadialProgressArgs::try_from(attributes).expect("valid attributes");
        assert_eq!(args.progressbar_color_start, None);
    }

    #[rstest]
    #[case::progress_direction(AttributeSet { progress_direction: Some(3), ..Default::default() }, "progress_direction")]
    #[case::gradient(AttributeSet { progressbar_color_direction: Some(0), ..Default::default() }, "progressbar_color_direction")]
    #[case::background_gradient(AttributeSet { background_progressbar_color_direction: Some(9), ..Default::default() }, "background_progressbar_color_direction")]
    #[case::color(AttributeSet { background_progressbar_color: Some("grey".into()), ..Default::default() }, "background_progressbar_color")]
    fn invalid_codes_are_rejected(#[case] attributes: AttributeSet, #[case] expected_key: &str) {
        match RadialProgressArgs::try_from(attributes) {
            Err(RadialProgressError::InvalidConfiguration { key, .. }) => {
                assert_eq!(key, expected_key)
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(
            AttributeSet::from_toml_str("progress = ["),
            Err(RadialProgressError::Attributes(_))
        ));
    }

    #[test]
    fn setters_chain() {
        let args = RadialProgressArgs::default()
            .progress(65.0)
            .progressbar_width(Dp(8.0))
            .progressbar_color_start(Color::RED)
            .round_border(true);
        assert_eq!(args.progress, 65.0);
        assert_eq!(args.progressbar_width, Dp(8.0));
        assert_eq!(args.progressbar_color_start, Some(Color::RED));
        assert!(args.round_border);
    }
}

mod demo_screen;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;
use radial_progress::{
    Color, ProgressDirection, Px,
    clock::ManualClock,
    config::{AttributeSet, RadialProgressArgs},
    pipelines::progress_arc::{command::RadialDrawCommand, instance::build_instances},
};

pub use crate::demo_screen::{DemoScreen, FrameCounter};

/// Drives a radial progress indicator headlessly and logs what it draws.
#[derive(Debug, Parser)]
#[command(name = "radial-progress-example", version, long_about = None)]
pub struct Cli {
    /// TOML attribute file to build the indicator from
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of frames to run
    #[arg(long, default_value_t = 90)]
    pub frames: u32,
    /// Milliseconds between frames
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,
    /// Side of the square the indicator is measured into, in pixels
    #[arg(long, default_value_t = 256)]
    pub size: i32,
    /// Start in indeterminate mode
    #[arg(long)]
    pub indeterminate: bool,
    /// Initial progress
    #[arg(long)]
    pub progress: Option<f32>,
    /// Indicator color as #RRGGBB or #AARRGGBB; the track gets a faded copy
    #[arg(long)]
    pub color: Option<String>,
    /// Rounded arc ends
    #[arg(long)]
    pub round_border: bool,
    /// Grow counter-clockwise
    #[arg(long)]
    pub counter_clockwise: bool,
    /// Start angle relative to 12 o'clock, in degrees
    #[arg(long)]
    pub start_angle: Option<f32>,
    /// Arc width in dp
    #[arg(long)]
    pub stroke_width: Option<f32>,
    /// Track width in dp
    #[arg(long)]
    pub background_stroke_width: Option<f32>,
}

impl Cli {
    /// Resolves the attribute file, if any, and applies command line overrides.
    pub fn progress_args(&self) -> anyhow::Result<RadialProgressArgs> {
        let mut args = match &self.config {
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let attributes = AttributeSet::from_toml_str(&source)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                RadialProgressArgs::try_from(attributes)?
            }
            None => RadialProgressArgs::default(),
        };

        if let Some(progress) = self.progress {
            args.progress = progress;
        }
        if let Some(angle) = self.start_angle {
            args.start_angle = angle;
        }
        if let Some(width) = self.stroke_width {
            args.progressbar_width = width.into();
        }
        if let Some(width) = self.background_stroke_width {
            args.background_progressbar_width = width.into();
        }
        if self.indeterminate {
            args.indeterminate_mode = true;
        }
        if self.round_border {
            args.round_border = true;
        }
        if self.counter_clockwise {
            args.progress_direction = ProgressDirection::CounterClockwise;
        }
        Ok(args)
    }

    fn shade(&self) -> anyhow::Result<Option<Color>> {
        self.color
            .as_deref()
            .map(|text| Color::parse_hex(text).ok_or_else(|| anyhow!("`{text}` is not a hex color")))
            .transpose()
    }
}

/// Runs the demo screen for the requested number of frames.
pub fn run(cli: &Cli) -> anyhow::Result<DemoScreen> {
    let clock = Arc::new(ManualClock::new());
    let mut screen = DemoScreen::new(cli.progress_args()?, clock.clone());
    if let Some(color) = cli.shade()? {
        screen.on_shade_slider(color);
    }
    screen
        .progress_mut()
        .measure(Px(cli.size), Px(cli.size));

    let frame = Duration::from_millis(cli.frame_ms);
    for _ in 0..cli.frames {
        clock.advance(frame);
        screen.progress_mut().on_frame();
    }
    Ok(screen)
}

fn describe(command: &RadialDrawCommand) -> String {
    match command {
        RadialDrawCommand::Oval(oval) => format!(
            "track: {:.0}x{:.0} stroke {:.1}px {:?}",
            oval.bounds.width(),
            oval.bounds.height(),
            oval.stroke_width_px,
            oval.brush.stops()[0].to_rgba_u8(),
        ),
        RadialDrawCommand::Arc(arc) => format!(
            "arc: start {:.1}° sweep {:.1}° stroke {:.1}px cap {:?}",
            arc.start_angle_degrees, arc.sweep_angle_degrees, arc.stroke_width_px, arc.cap,
        ),
    }
}

pub fn desktop_main() -> anyhow::Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?
        .write_mode(flexi_logger::WriteMode::Async)
        .start()?;

    let cli = Cli::parse();
    let mut screen = run(&cli)?;

    let progress = screen.progress();
    info!(
        "after {} frames: progress {:.1}/{:.1}, indeterminate {} (switch {})",
        cli.frames,
        progress.progress(),
        progress.progress_max(),
        progress.is_indeterminate(),
        screen.indeterminate_switch(),
    );

    let commands = screen.progress_mut().render();
    for command in &commands {
        info!("{}", describe(command));
    }
    info!(
        "{} instances packed, {} redraws and {} layouts requested",
        build_instances(&commands).len(),
        screen.host().redraws(),
        screen.host().layouts(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("radial-progress-example").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn overrides_land_in_args() {
        let args = cli(&[
            "--progress",
            "30",
            "--counter-clockwise",
            "--round-border",
            "--stroke-width",
            "9",
        ])
        .progress_args()
        .expect("args");
        assert_eq!(args.progress, 30.0);
        assert_eq!(args.progress_direction, ProgressDirection::CounterClockwise);
        assert!(args.round_border);
        assert_eq!(args.progressbar_width, radial_progress::Dp(9.0));
    }

    #[test]
    fn bad_color_is_reported() {
        let cli = cli(&["--color", "teal"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let cli = cli(&["--config", "/nonexistent/radial-progress.toml"]);
        let error = cli.progress_args().expect_err("missing file");
        assert!(error.to_string().contains("failed to read"));
    }

    #[test]
    fn headless_run_settles_on_intro_target() {
        let screen = run(&cli(&["--frames", "70", "--frame-ms", "16"])).expect("run");
        assert_eq!(screen.progress().progress(), 65.0);
        assert!(!screen.progress().needs_frame());
    }
}

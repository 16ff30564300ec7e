//! The sample screen: one indicator wired to a handful of controls.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use log::{debug, info};
use parking_lot::Mutex;
use radial_progress::{
    Color, ProgressDirection, RadialProgress, RenderHost,
    clock::Clock,
    color::adjust_alpha,
    config::RadialProgressArgs,
    radial_progress::ProgressAnimation,
};

/// Alpha factor applied to the shade color for the track.
const TRACK_ALPHA: f32 = 0.3;

/// Counts the requests the indicator sends to its host.
#[derive(Debug, Default)]
pub struct FrameCounter {
    redraws: AtomicUsize,
    layouts: AtomicUsize,
}

impl FrameCounter {
    /// Redraws requested so far.
    pub fn redraws(&self) -> usize {
        self.redraws.load(Ordering::Relaxed)
    }

    /// Layout passes requested so far.
    pub fn layouts(&self) -> usize {
        self.layouts.load(Ordering::Relaxed)
    }
}

impl RenderHost for FrameCounter {
    fn invalidate(&self) {
        self.redraws.fetch_add(1, Ordering::Relaxed);
    }

    fn request_layout(&self) {
        self.layouts.fetch_add(1, Ordering::Relaxed);
    }
}

/// Owns the indicator and reacts to control changes.
pub struct DemoScreen {
    progress: RadialProgress,
    indeterminate_switch: Arc<Mutex<bool>>,
    host: Arc<FrameCounter>,
}

impl DemoScreen {
    /// Builds the screen and starts the intro animation to 65 over one second.
    pub fn new(args: RadialProgressArgs, clock: Arc<dyn Clock>) -> Self {
        let host = Arc::new(FrameCounter::default());
        let indeterminate_switch = Arc::new(Mutex::new(args.indeterminate_mode));
        let mut progress = RadialProgress::new(args, host.clone(), clock);

        let switch = indeterminate_switch.clone();
        progress.set_on_indeterminate_mode_change(move |enabled| {
            *switch.lock() = enabled;
        });
        progress.set_on_progress_change(|value| debug!("progress changed to {value:.1}"));

        progress.set_progress_with_animation(
            ProgressAnimation::to(65.0).duration(Duration::from_millis(1000)),
        );

        Self {
            progress,
            indeterminate_switch,
            host,
        }
    }

    /// The indicator.
    pub fn progress(&self) -> &RadialProgress {
        &self.progress
    }

    /// Mutable access for the render loop.
    pub fn progress_mut(&mut self) -> &mut RadialProgress {
        &mut self.progress
    }

    /// Host request counters.
    pub fn host(&self) -> &FrameCounter {
        &self.host
    }

    /// State shown by the indeterminate switch.
    pub fn indeterminate_switch(&self) -> bool {
        *self.indeterminate_switch.lock()
    }

    /// Progress slider.
    pub fn on_progress_slider(&mut self, value: f32) {
        self.progress.set_progress(value);
    }

    /// Start angle slider.
    pub fn on_start_angle_slider(&mut self, value: f32) {
        self.progress.set_start_angle(value);
    }

    /// Stroke width slider, in dp.
    pub fn on_stroke_slider(&mut self, value: f32) {
        self.progress.set_progressbar_width(value);
    }

    /// Background stroke width slider, in dp.
    pub fn on_background_stroke_slider(&mut self, value: f32) {
        self.progress.set_background_progressbar_width(value);
    }

    /// Shade slider: colors the arc and a faded copy for the track.
    pub fn on_shade_slider(&mut self, color: Color) {
        self.progress.set_progressbar_color(color);
        self.progress
            .set_background_progressbar_color(adjust_alpha(color, TRACK_ALPHA));
    }

    /// Round border switch.
    pub fn on_round_border_switch(&mut self, checked: bool) {
        self.progress.set_round_border(checked);
    }

    /// Direction switch: checked grows clockwise.
    pub fn on_direction_switch(&mut self, checked: bool) {
        self.progress.set_progress_direction(if checked {
            ProgressDirection::Clockwise
        } else {
            ProgressDirection::CounterClockwise
        });
    }

    /// Indeterminate switch.
    pub fn on_indeterminate_switch(&mut self, checked: bool) {
        info!("indeterminate switch set to {checked}");
        self.progress.set_indeterminate_mode(checked);
    }
}

#[cfg(test)]
mod tests {
    use radial_progress::{clock::ManualClock, pipelines::progress_arc::command::RadialDrawCommand};

    use super::*;

    fn screen() -> (DemoScreen, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let screen = DemoScreen::new(RadialProgressArgs::default(), clock.clone());
        (screen, clock)
    }

    #[test]
    fn intro_animation_reaches_sixty_five() {
        let (mut screen, clock) = screen();
        assert!(screen.progress().is_animating());

        clock.advance(Duration::from_millis(500));
        screen.progress_mut().on_frame();
        assert!((screen.progress().progress() - 32.5).abs() < 1e-3);

        clock.advance(Duration::from_millis(500));
        assert!(!screen.progress_mut().on_frame());
        assert_eq!(screen.progress().progress(), 65.0);
    }

    #[test]
    fn indeterminate_switch_follows_the_widget() {
        let (mut screen, _clock) = screen();
        assert!(!screen.indeterminate_switch());
        screen.on_indeterminate_switch(true);
        assert!(screen.indeterminate_switch());
        screen.progress_mut().set_indeterminate_mode(false);
        assert!(!screen.indeterminate_switch());
    }

    #[test]
    fn shade_slider_fades_the_track() {
        let (mut screen, _clock) = screen();
        screen.on_shade_slider(Color::RED);
        assert_eq!(screen.progress().progressbar_color(), Color::RED);
        assert_eq!(
            screen.progress().background_progressbar_color().to_argb_u32(),
            0x4DFF_0000
        );
    }

    #[test]
    fn controls_reach_the_rendered_arc() {
        let (mut screen, _clock) = screen();
        screen.on_progress_slider(25.0);
        screen.on_direction_switch(false);
        screen.on_round_border_switch(true);
        screen.on_stroke_slider(10.0);
        assert!(screen.host().layouts() > 0);

        screen.progress_mut().measure(100.into(), 100.into());
        let commands = screen.progress_mut().render();
        let RadialDrawCommand::Arc(arc) = commands[1] else {
            panic!("missing arc");
        };
        assert!((arc.sweep_angle_degrees + 90.0).abs() < 1e-3);
        assert_eq!(arc.stroke_width_px, 10.0);
    }
}

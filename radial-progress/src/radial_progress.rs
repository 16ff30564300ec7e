//! The radial progress indicator.
//!
//! ## Usage
//!
//! Show how much of a task is done as a ring that fills up, or, when the amount
//! is unknown, switch to indeterminate mode and let the ring oscillate.
//!
//! ## Frame driving
//!
//! The widget never spawns threads or owns a platform timer. Animated
//! transitions and the indeterminate oscillation are advanced by
//! [`RadialProgress::on_frame`], which the host calls once per frame for as
//! long as [`RadialProgress::needs_frame`] reports pending work. Every state
//! change asks the [`RenderHost`] for a redraw.

use std::{sync::Arc, time::Duration};

use derive_setters::Setters;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::{
    Color, Dp, PxSize,
    animation::{AnimationRun, AnimationSample, Interpolator},
    clock::Clock,
    config::{AttributeSet, RadialProgressArgs},
    error::{RadialProgressError, Result},
    paint::{GradientDirection, Paint},
    pipelines::progress_arc::command::{
        ArcRect, OvalCommand, ProgressArcCap, ProgressArcCommand, RadialDrawCommand,
    },
    px::Px,
    timer::{TaskHandle, TimerQueue},
};

/// Defaults applied when a configuration leaves a value out.
pub struct RadialProgressDefaults;

impl RadialProgressDefaults {
    /// Default maximum progress.
    pub const PROGRESS_MAX: f32 = 100.0;
    /// Visual origin of the arc: 270° is 12 o'clock.
    pub const START_ANGLE: f32 = 270.0;
    /// Duration of an animated progress change when none is given.
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(1500);
    /// Period of the indeterminate oscillation.
    pub const INDETERMINATE_CYCLE: Duration = Duration::from_millis(1500);
    /// Width of the progress arc.
    pub const STROKE_WIDTH: Dp = Dp(4.0);
    /// Width of the background track.
    pub const BACKGROUND_STROKE_WIDTH: Dp = Dp(2.0);
    /// Color of the progress arc.
    pub const COLOR: Color = Color::BLACK;
    /// Color of the background track.
    pub const BACKGROUND_COLOR: Color = Color::GRAY;
}

const MIN_INDETERMINATE_CYCLE: Duration = Duration::from_millis(1);
const MAX_INDETERMINATE_CYCLE: Duration = Duration::from_secs(24 * 60 * 60);

/// Which way the arc grows from its start angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProgressDirection {
    /// Grows clockwise on screen.
    #[default]
    Clockwise,
    /// Grows counter-clockwise on screen.
    CounterClockwise,
}

impl ProgressDirection {
    /// Attribute code of this direction.
    pub fn code(self) -> i32 {
        match self {
            ProgressDirection::Clockwise => 1,
            ProgressDirection::CounterClockwise => 2,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            ProgressDirection::Clockwise => ProgressDirection::CounterClockwise,
            ProgressDirection::CounterClockwise => ProgressDirection::Clockwise,
        }
    }

    /// Whether this is [`ProgressDirection::Clockwise`].
    pub fn is_clockwise(self) -> bool {
        self == ProgressDirection::Clockwise
    }

    fn sweep_sign(self) -> f32 {
        if self.is_clockwise() { 1.0 } else { -1.0 }
    }
}

impl TryFrom<i32> for ProgressDirection {
    type Error = RadialProgressError;

    fn try_from(code: i32) -> Result<Self> {
        match code {
            1 => Ok(ProgressDirection::Clockwise),
            2 => Ok(ProgressDirection::CounterClockwise),
            other => Err(RadialProgressError::invalid(
                "progress_direction",
                format!("unsupported progress direction {other}"),
            )),
        }
    }
}

/// What the widget needs from the render tree it is attached to.
pub trait RenderHost: Send + Sync {
    /// Schedule a redraw of the widget.
    fn invalidate(&self);
    /// Schedule a new measure pass for the widget.
    fn request_layout(&self);
}

/// A host that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHost;

impl RenderHost for NoopHost {
    fn invalidate(&self) {}

    fn request_layout(&self) {}
}

/// Called with the stored (clamped) progress after every change.
pub type ProgressChangeListener = Arc<dyn Fn(f32) + Send + Sync>;

/// Called with the new flag whenever indeterminate mode is set.
pub type IndeterminateModeChangeListener = Arc<dyn Fn(bool) + Send + Sync>;

/// An animated progress change.
///
/// Unset fields fall back to [`RadialProgressDefaults::ANIMATION_DURATION`],
/// [`Interpolator::Linear`] and no delay.
#[derive(Clone, Copy, Debug, PartialEq, Setters)]
pub struct ProgressAnimation {
    /// Value to settle on.
    pub target: f32,
    /// How long the transition takes.
    #[setters(strip_option)]
    pub duration: Option<Duration>,
    /// Easing curve.
    #[setters(strip_option)]
    pub interpolator: Option<Interpolator>,
    /// Wait before the value starts moving.
    #[setters(strip_option)]
    pub delay: Option<Duration>,
}

impl ProgressAnimation {
    /// Animation towards `target` with every option left at its default.
    pub fn to(target: f32) -> Self {
        Self {
            target,
            duration: None,
            interpolator: None,
            delay: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerTask {
    IndeterminateStep,
}

#[derive(Debug)]
struct IndeterminateState {
    active: bool,
    progress: f32,
    direction: ProgressDirection,
    start_angle: f32,
    step: Option<TaskHandle>,
}

impl IndeterminateState {
    fn new() -> Self {
        Self {
            active: false,
            progress: 0.0,
            direction: ProgressDirection::Clockwise,
            start_angle: RadialProgressDefaults::START_ANGLE,
            step: None,
        }
    }

    fn reset(&mut self) {
        self.progress = 0.0;
        self.direction = ProgressDirection::Clockwise;
        self.start_angle = RadialProgressDefaults::START_ANGLE;
    }
}

/// Maps `angle + 270` into `[0, 360]`.
fn normalize_start_angle(angle: f32) -> f32 {
    let shifted = angle + RadialProgressDefaults::START_ANGLE;
    if !shifted.is_finite() {
        return 0.0;
    }
    shifted.rem_euclid(360.0).clamp(0.0, 360.0)
}

/// A circular progress indicator: a background ring with an arc on top whose
/// length follows `progress / progress_max`.
pub struct RadialProgress {
    progress: f32,
    progress_max: f32,
    progressbar_width: Dp,
    progressbar_width_px: f32,
    background_progressbar_width: Dp,
    background_progressbar_width_px: f32,
    foreground: Paint,
    background: Paint,
    round_border: bool,
    start_angle: f32,
    progress_direction: ProgressDirection,
    indeterminate: IndeterminateState,
    indeterminate_cycle: Duration,
    animation: Option<AnimationRun>,
    timers: TimerQueue<TimerTask>,
    size: PxSize,
    attached: bool,
    on_progress_change: Option<ProgressChangeListener>,
    on_indeterminate_mode_change: Option<IndeterminateModeChangeListener>,
    host: Arc<dyn RenderHost>,
    clock: Arc<dyn Clock>,
}

impl RadialProgress {
    /// Creates an attached widget from typed arguments.
    pub fn new(args: RadialProgressArgs, host: Arc<dyn RenderHost>, clock: Arc<dyn Clock>) -> Self {
        let mut widget = Self {
            progress: 0.0,
            progress_max: RadialProgressDefaults::PROGRESS_MAX,
            progressbar_width: Dp::ZERO,
            progressbar_width_px: 0.0,
            background_progressbar_width: Dp::ZERO,
            background_progressbar_width_px: 0.0,
            foreground: Paint::new(args.foreground_spec()),
            background: Paint::new(args.background_spec()),
            round_border: args.round_border,
            start_angle: RadialProgressDefaults::START_ANGLE,
            progress_direction: args.progress_direction,
            indeterminate: IndeterminateState::new(),
            indeterminate_cycle: RadialProgressDefaults::INDETERMINATE_CYCLE,
            animation: None,
            timers: TimerQueue::new(),
            size: PxSize::ZERO,
            attached: true,
            on_progress_change: None,
            on_indeterminate_mode_change: None,
            host,
            clock,
        };

        widget.set_progress_max(args.progress_max);
        widget.set_progress(args.progress);
        widget.set_progressbar_width(args.progressbar_width);
        widget.set_background_progressbar_width(args.background_progressbar_width);
        widget.set_start_angle(args.start_angle);
        if args.indeterminate_mode {
            widget.set_indeterminate_mode(true);
        }
        widget
    }

    /// Creates a widget from a declarative attribute table, rejecting unknown
    /// direction codes and malformed colors.
    pub fn from_attributes(
        attributes: AttributeSet,
        host: Arc<dyn RenderHost>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let args = RadialProgressArgs::try_from(attributes)?;
        Ok(Self::new(args, host, clock))
    }

    // ---- progress ----

    /// Stored progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Sets the progress. Values above the maximum are clamped to it; values
    /// below zero are stored as given.
    pub fn set_progress(&mut self, progress: f32) {
        let progress = if progress.is_nan() { 0.0 } else { progress };
        let clamped = if progress > self.progress_max {
            trace!(progress, max = self.progress_max, "progress clamped to max");
            self.progress_max
        } else {
            progress
        };
        self.progress = clamped;
        if let Some(listener) = &self.on_progress_change {
            listener(clamped);
        }
        self.host.invalidate();
    }

    /// Value that fills the whole ring.
    pub fn progress_max(&self) -> f32 {
        self.progress_max
    }

    /// Sets the maximum. Negative values fall back to
    /// [`RadialProgressDefaults::PROGRESS_MAX`]. Progress above the new maximum
    /// is pulled down to it.
    pub fn set_progress_max(&mut self, max: f32) {
        self.progress_max = if max >= 0.0 {
            max
        } else {
            trace!(max, "negative max replaced by default");
            RadialProgressDefaults::PROGRESS_MAX
        };
        if self.progress > self.progress_max {
            self.set_progress(self.progress_max);
        }
        self.host.invalidate();
    }

    // ---- stroke ----

    /// Width of the progress arc.
    pub fn progressbar_width(&self) -> Dp {
        self.progressbar_width
    }

    /// Width of the progress arc in device pixels.
    pub fn progressbar_width_px(&self) -> f32 {
        self.progressbar_width_px
    }

    /// Sets the width of the progress arc.
    pub fn set_progressbar_width(&mut self, width: impl Into<Dp>) {
        self.progressbar_width = width.into();
        self.progressbar_width_px = self.progressbar_width.to_pixels_f32();
        self.host.request_layout();
        self.host.invalidate();
    }

    /// Width of the background track.
    pub fn background_progressbar_width(&self) -> Dp {
        self.background_progressbar_width
    }

    /// Width of the background track in device pixels.
    pub fn background_progressbar_width_px(&self) -> f32 {
        self.background_progressbar_width_px
    }

    /// Sets the width of the background track.
    pub fn set_background_progressbar_width(&mut self, width: impl Into<Dp>) {
        self.background_progressbar_width = width.into();
        self.background_progressbar_width_px = self.background_progressbar_width.to_pixels_f32();
        self.host.request_layout();
        self.host.invalidate();
    }

    // ---- colors ----

    /// Base color of the progress arc.
    pub fn progressbar_color(&self) -> Color {
        self.foreground.spec().color
    }

    /// Sets the base color of the progress arc.
    pub fn set_progressbar_color(&mut self, color: Color) {
        self.foreground.update(|spec| spec.color = color);
        self.host.invalidate();
    }

    /// Gradient start of the progress arc.
    pub fn progressbar_color_start(&self) -> Option<Color> {
        self.foreground.spec().start
    }

    /// Sets or clears the gradient start of the progress arc.
    pub fn set_progressbar_color_start(&mut self, color: Option<Color>) {
        self.foreground.update(|spec| spec.start = color);
        self.host.invalidate();
    }

    /// Gradient end of the progress arc.
    pub fn progressbar_color_end(&self) -> Option<Color> {
        self.foreground.spec().end
    }

    /// Sets or clears the gradient end of the progress arc.
    pub fn set_progressbar_color_end(&mut self, color: Option<Color>) {
        self.foreground.update(|spec| spec.end = color);
        self.host.invalidate();
    }

    /// Gradient axis of the progress arc.
    pub fn progressbar_color_direction(&self) -> GradientDirection {
        self.foreground.spec().direction
    }

    /// Sets the gradient axis of the progress arc.
    pub fn set_progressbar_color_direction(&mut self, direction: GradientDirection) {
        self.foreground.update(|spec| spec.direction = direction);
        self.host.invalidate();
    }

    /// Base color of the background track.
    pub fn background_progressbar_color(&self) -> Color {
        self.background.spec().color
    }

    /// Sets the base color of the background track.
    pub fn set_background_progressbar_color(&mut self, color: Color) {
        self.background.update(|spec| spec.color = color);
        self.host.invalidate();
    }

    /// Same as [`set_background_progressbar_color`](Self::set_background_progressbar_color);
    /// the track is what reads as the widget's background.
    pub fn set_background_color(&mut self, color: Color) {
        self.set_background_progressbar_color(color);
    }

    /// Gradient start of the background track.
    pub fn background_progressbar_color_start(&self) -> Option<Color> {
        self.background.spec().start
    }

    /// Sets or clears the gradient start of the background track.
    pub fn set_background_progressbar_color_start(&mut self, color: Option<Color>) {
        self.background.update(|spec| spec.start = color);
        self.host.invalidate();
    }

    /// Gradient end of the background track.
    pub fn background_progressbar_color_end(&self) -> Option<Color> {
        self.background.spec().end
    }

    /// Sets or clears the gradient end of the background track.
    pub fn set_background_progressbar_color_end(&mut self, color: Option<Color>) {
        self.background.update(|spec| spec.end = color);
        self.host.invalidate();
    }

    /// Gradient axis of the background track.
    pub fn background_progressbar_color_direction(&self) -> GradientDirection {
        self.background.spec().direction
    }

    /// Sets the gradient axis of the background track.
    pub fn set_background_progressbar_color_direction(&mut self, direction: GradientDirection) {
        self.background.update(|spec| spec.direction = direction);
        self.host.invalidate();
    }

    // ---- shape ----

    /// Whether the arc ends are rounded.
    pub fn round_border(&self) -> bool {
        self.round_border
    }

    /// Switches between rounded and flat arc ends.
    pub fn set_round_border(&mut self, round_border: bool) {
        self.round_border = round_border;
        self.host.invalidate();
    }

    /// Stored start angle, already offset from 3 o'clock and within `[0, 360]`.
    pub fn start_angle(&self) -> f32 {
        self.start_angle
    }

    /// Sets the start angle relative to 12 o'clock.
    ///
    /// `angle + 270` is reduced modulo 360 in both directions, so negative
    /// results wrap around (`-400` becomes `230`) instead of snapping to 0.
    pub fn set_start_angle(&mut self, angle: f32) {
        self.start_angle = normalize_start_angle(angle);
        self.host.invalidate();
    }

    /// Direction of the arc outside indeterminate mode.
    pub fn progress_direction(&self) -> ProgressDirection {
        self.progress_direction
    }

    /// Sets the direction of the arc.
    pub fn set_progress_direction(&mut self, direction: ProgressDirection) {
        self.progress_direction = direction;
        self.host.invalidate();
    }

    // ---- listeners ----

    /// Installs the progress listener, replacing any previous one.
    pub fn set_on_progress_change(&mut self, listener: impl Fn(f32) + Send + Sync + 'static) {
        self.on_progress_change = Some(Arc::new(listener));
    }

    /// Removes the progress listener.
    pub fn clear_on_progress_change(&mut self) {
        self.on_progress_change = None;
    }

    /// Installs the indeterminate-mode listener, replacing any previous one.
    pub fn set_on_indeterminate_mode_change(
        &mut self,
        listener: impl Fn(bool) + Send + Sync + 'static,
    ) {
        self.on_indeterminate_mode_change = Some(Arc::new(listener));
    }

    /// Removes the indeterminate-mode listener.
    pub fn clear_on_indeterminate_mode_change(&mut self) {
        self.on_indeterminate_mode_change = None;
    }

    // ---- indeterminate mode ----

    /// Whether indeterminate mode is on.
    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate.active
    }

    /// Oscillating progress shown in indeterminate mode.
    pub fn indeterminate_progress(&self) -> f32 {
        self.indeterminate.progress
    }

    /// Current direction of the indeterminate oscillation.
    pub fn indeterminate_direction(&self) -> ProgressDirection {
        self.indeterminate.direction
    }

    /// Start angle used in indeterminate mode.
    pub fn indeterminate_start_angle(&self) -> f32 {
        self.indeterminate.start_angle
    }

    /// Period between two reversals of the oscillation.
    pub fn indeterminate_cycle(&self) -> Duration {
        self.indeterminate_cycle
    }

    /// Changes the oscillation period; takes effect from the next reversal.
    /// The period is kept between 1 ms and 24 h.
    pub fn set_indeterminate_cycle(&mut self, cycle: Duration) {
        self.indeterminate_cycle = cycle.clamp(MIN_INDETERMINATE_CYCLE, MAX_INDETERMINATE_CYCLE);
    }

    /// Turns indeterminate mode on or off.
    ///
    /// Either way the oscillation state is reset and any running transition
    /// or pending reversal is cancelled. Turning it on schedules the first
    /// reversal for the next frame.
    pub fn set_indeterminate_mode(&mut self, enabled: bool) {
        debug!(enabled, "indeterminate mode");
        self.indeterminate.active = enabled;
        if let Some(listener) = &self.on_indeterminate_mode_change {
            listener(enabled);
        }
        self.indeterminate.reset();
        self.cancel_indeterminate_step();
        self.cancel_animation();

        if enabled && self.attached {
            let now = self.clock.now();
            self.indeterminate.step = Some(self.timers.schedule(now, TimerTask::IndeterminateStep));
        }
        self.host.invalidate();
    }

    fn cancel_indeterminate_step(&mut self) {
        if let Some(handle) = self.indeterminate.step.take() {
            self.timers.cancel(handle);
        }
    }

    fn indeterminate_step(&mut self, due: std::time::Instant) {
        if !self.indeterminate.active {
            return;
        }
        match due.checked_add(self.indeterminate_cycle) {
            Some(next) => {
                self.indeterminate.step =
                    Some(self.timers.schedule(next, TimerTask::IndeterminateStep));
            }
            None => debug!("next indeterminate reversal is out of range, not scheduled"),
        }

        self.indeterminate.direction = self.indeterminate.direction.reversed();
        self.host.invalidate();
        let target = if self.indeterminate.direction.is_clockwise() {
            0.0
        } else {
            self.progress_max
        };
        trace!(direction = ?self.indeterminate.direction, target, "indeterminate reversal");
        self.start_animation(
            target,
            self.indeterminate_cycle,
            Interpolator::Linear,
            Duration::ZERO,
            due,
        );
    }

    /// Jumps over whole cycles that elapsed between `due` and `now` in one go,
    /// leaving the oscillation where firing each of them would have left it.
    /// Returns the due time of the last missed reversal.
    fn skip_missed_reversals(
        &mut self,
        due: std::time::Instant,
        now: std::time::Instant,
    ) -> std::time::Instant {
        let cycle_nanos = self.indeterminate_cycle.as_nanos();
        let behind_nanos = now.saturating_duration_since(due).as_nanos();
        let missed = behind_nanos / cycle_nanos;
        if missed == 0 || !self.indeterminate.active {
            return due;
        }
        let remainder = u64::try_from(behind_nanos % cycle_nanos).unwrap_or(u64::MAX);
        let Some(last_due) = now.checked_sub(Duration::from_nanos(remainder)) else {
            return due;
        };
        trace!(missed = %missed, "collapsing missed indeterminate reversals");

        if missed % 2 == 1 {
            self.indeterminate.direction = self.indeterminate.direction.reversed();
        }
        // Each skipped run ended on its target.
        let settled = if self.indeterminate.direction.is_clockwise() {
            0.0
        } else {
            self.progress_max
        };
        self.cancel_animation();
        self.apply_animated_value(settled);
        last_due
    }

    // ---- animation ----

    /// Animates from the displayed progress to `target` with default options.
    pub fn animate_progress_to(&mut self, target: f32) {
        self.set_progress_with_animation(ProgressAnimation::to(target));
    }

    /// Animates from the displayed progress, the oscillating value in
    /// indeterminate mode, to `animation.target`.
    ///
    /// A running transition is replaced. A transition without duration and
    /// delay settles immediately.
    pub fn set_progress_with_animation(&mut self, animation: ProgressAnimation) {
        if !self.attached {
            debug!("ignoring animated progress change on a detached widget");
            return;
        }
        let now = self.clock.now();
        self.start_animation(
            animation.target,
            animation
                .duration
                .unwrap_or(RadialProgressDefaults::ANIMATION_DURATION),
            animation.interpolator.unwrap_or_default(),
            animation.delay.unwrap_or_default(),
            now,
        );
        self.advance_animation(now);
    }

    fn start_animation(
        &mut self,
        target: f32,
        duration: Duration,
        interpolator: Interpolator,
        delay: Duration,
        started_at: std::time::Instant,
    ) {
        self.cancel_animation();
        let from = self.displayed_raw_progress();
        debug!(from, target, ?duration, ?delay, "progress animation started");
        self.animation = Some(AnimationRun::new(
            from,
            target,
            started_at,
            delay,
            duration,
            interpolator,
        ));
    }

    fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            trace!("progress animation cancelled");
        }
    }

    /// Whether a transition is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn advance_animation(&mut self, now: std::time::Instant) {
        let Some(run) = self.animation else {
            return;
        };
        match run.sample(now) {
            AnimationSample::Pending => {}
            AnimationSample::Running(value) => self.apply_animated_value(value),
            AnimationSample::Finished(value) => {
                self.animation = None;
                self.apply_animated_value(value);
            }
        }
    }

    fn apply_animated_value(&mut self, value: f32) {
        if self.indeterminate.active {
            self.indeterminate.progress = value;
            let delta = value * 360.0 / 100.0;
            self.indeterminate.start_angle = RadialProgressDefaults::START_ANGLE
                + if self.indeterminate.direction.is_clockwise() {
                    delta
                } else {
                    -delta
                };
            self.host.invalidate();
        } else {
            self.set_progress(value);
        }
    }

    // ---- frame driving ----

    /// Fires due reversals and advances the running transition.
    ///
    /// Returns [`needs_frame`](Self::needs_frame). Does nothing once detached.
    pub fn on_frame(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        let now = self.clock.now();
        while let Some((handle, due, task)) = self.timers.pop_due(now) {
            match task {
                TimerTask::IndeterminateStep => {
                    if self.indeterminate.step == Some(handle) {
                        self.indeterminate.step = None;
                        self.advance_animation(due);
                        let due = self.skip_missed_reversals(due, now);
                        self.indeterminate_step(due);
                    }
                }
            }
        }
        self.advance_animation(now);
        self.needs_frame()
    }

    /// Whether the host should keep delivering frames.
    pub fn needs_frame(&self) -> bool {
        self.attached && (self.animation.is_some() || !self.timers.is_empty())
    }

    /// When the widget next needs a frame: now while animating, otherwise the
    /// next pending reversal.
    pub fn next_wakeup(&self) -> Option<std::time::Instant> {
        if !self.attached {
            return None;
        }
        if self.animation.is_some() {
            return Some(self.clock.now());
        }
        self.timers.next_due()
    }

    // ---- lifecycle ----

    /// Whether the widget is part of a render tree.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Removes the widget from the render tree: the running transition and
    /// any pending reversal are dropped and no further frames are processed.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        debug!("radial progress detached");
        self.attached = false;
        self.cancel_animation();
        self.cancel_indeterminate_step();
        self.timers.clear();
    }

    /// Puts a detached widget back into a render tree, resuming the
    /// oscillation if indeterminate mode is still on.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        debug!("radial progress attached");
        self.attached = true;
        if self.indeterminate.active {
            let now = self.clock.now();
            self.indeterminate.step = Some(self.timers.schedule(now, TimerTask::IndeterminateStep));
        }
        self.host.request_layout();
        self.host.invalidate();
    }

    // ---- layout ----

    /// Claims the largest square that fits the available space.
    pub fn measure(&mut self, available_width: Px, available_height: Px) -> PxSize {
        let side = available_width.min(available_height).non_negative();
        let size = PxSize::square(side);
        if size != self.size {
            trace!(side = side.raw(), "size changed");
            self.size = size;
            self.foreground.invalidate();
            self.background.invalidate();
            self.host.invalidate();
        }
        size
    }

    /// Last measured size.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Rectangle the stroke centerline is drawn on, inset by half the thicker
    /// stroke so neither stroke is clipped.
    pub fn arc_bounds(&self) -> ArcRect {
        let inset = self
            .progressbar_width_px
            .max(self.background_progressbar_width_px)
            / 2.0;
        let side = self.size.width.to_f32();
        ArcRect::new(inset, inset, side - inset, side - inset)
    }

    // ---- rendering ----

    fn displayed_raw_progress(&self) -> f32 {
        if self.indeterminate.active {
            self.indeterminate.progress
        } else {
            self.progress
        }
    }

    /// Displayed progress scaled to `0..=100` of the maximum. A zero maximum
    /// displays nothing.
    pub fn display_progress(&self) -> f32 {
        if self.progress_max <= 0.0 {
            return 0.0;
        }
        self.displayed_raw_progress() * 100.0 / self.progress_max
    }

    /// Direction in effect: the oscillation's in indeterminate mode, the
    /// configured one otherwise.
    pub fn effective_direction(&self) -> ProgressDirection {
        if self.indeterminate.active {
            self.indeterminate.direction
        } else {
            self.progress_direction
        }
    }

    /// Start angle in effect.
    pub fn effective_start_angle(&self) -> f32 {
        if self.indeterminate.active {
            self.indeterminate.start_angle
        } else {
            self.start_angle
        }
    }

    /// Signed arc length in degrees, positive clockwise.
    pub fn sweep_angle_degrees(&self) -> f32 {
        self.effective_direction().sweep_sign() * 360.0 * self.display_progress() / 100.0
    }

    /// Produces the track ring followed by the progress arc.
    pub fn render(&mut self) -> SmallVec<[RadialDrawCommand; 2]> {
        let bounds = self.arc_bounds();
        let size = self.size;
        let track = OvalCommand {
            bounds,
            brush: self.background.brush(size),
            stroke_width_px: self.background_progressbar_width_px,
        };
        let arc = ProgressArcCommand {
            bounds,
            brush: self.foreground.brush(size),
            stroke_width_px: self.progressbar_width_px,
            start_angle_degrees: self.effective_start_angle(),
            sweep_angle_degrees: self.sweep_angle_degrees(),
            cap: if self.round_border {
                ProgressArcCap::Round
            } else {
                ProgressArcCap::Butt
            },
        };
        smallvec![RadialDrawCommand::Oval(track), RadialDrawCommand::Arc(arc)]
    }
}

impl std::fmt::Debug for RadialProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadialProgress")
            .field("progress", &self.progress)
            .field("progress_max", &self.progress_max)
            .field("start_angle", &self.start_angle)
            .field("progress_direction", &self.progress_direction)
            .field("indeterminate", &self.indeterminate)
            .field("animation", &self.animation)
            .field("size", &self.size)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

//! Time-based interpolation for animated progress changes.

use std::time::{Duration, Instant};

/// Curve applied to the linear time fraction of an animation.
///
/// Every curve maps `0.0` to `0.0` and `1.0` to `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interpolator {
    /// Constant rate of change.
    #[default]
    Linear,
    /// Starts slowly and speeds up.
    Accelerate,
    /// Starts quickly and slows down.
    Decelerate,
    /// Slow start and end, fast middle.
    AccelerateDecelerate,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Interpolator {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    pub fn map(self, fraction: f32) -> f32 {
        let t = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        match self {
            Interpolator::Linear => t,
            Interpolator::Accelerate => t * t,
            Interpolator::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Interpolator::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
            Interpolator::CubicBezier(x1, y1, x2, y2) => cubic_bezier_easing(t, x1, y1, x2, y2),
        }
    }
}

fn cubic_bezier(t: f32, a: f32, b: f32, c: f32, d: f32) -> f32 {
    let u = 1.0 - t;
    (u * u * u * a) + (3.0 * u * u * t * b) + (3.0 * u * t * t * c) + (t * t * t * d)
}

fn cubic_bezier_easing(progress: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = progress.clamp(0.0, 1.0);
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut t = x;

    for _ in 0..16 {
        let mid = (lo + hi) * 0.5;
        let mid_x = cubic_bezier(mid, 0.0, x1, x2, 1.0);
        if mid_x < x {
            lo = mid;
        } else {
            hi = mid;
        }
        t = mid;
    }

    cubic_bezier(t, 0.0, y1, y2, 1.0).clamp(0.0, 1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// What an [`AnimationRun`] produces at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSample {
    /// The start delay has not elapsed yet; nothing should be written.
    Pending,
    /// Intermediate value.
    Running(f32),
    /// The run reached its target; this is the last value it will produce.
    Finished(f32),
}

/// An in-flight interpolation from one value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRun {
    from: f32,
    to: f32,
    started_at: Instant,
    delay: Duration,
    duration: Duration,
    interpolator: Interpolator,
}

impl AnimationRun {
    /// Creates a run that starts counting at `started_at`.
    pub fn new(
        from: f32,
        to: f32,
        started_at: Instant,
        delay: Duration,
        duration: Duration,
        interpolator: Interpolator,
    ) -> Self {
        Self {
            from,
            to,
            started_at,
            delay,
            duration,
            interpolator,
        }
    }

    /// Value the run started from.
    pub fn from(&self) -> f32 {
        self.from
    }

    /// Value the run settles on.
    pub fn to(&self) -> f32 {
        self.to
    }

    /// Samples the run at `now`.
    pub fn sample(&self, now: Instant) -> AnimationSample {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed < self.delay {
            return AnimationSample::Pending;
        }
        let active = elapsed - self.delay;
        if self.duration.is_zero() || active >= self.duration {
            return AnimationSample::Finished(self.to);
        }
        let fraction = active.as_secs_f32() / self.duration.as_secs_f32();
        AnimationSample::Running(lerp(self.from, self.to, self.interpolator.map(fraction)))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Interpolator::Linear)]
    #[case(Interpolator::Accelerate)]
    #[case(Interpolator::Decelerate)]
    #[case(Interpolator::AccelerateDecelerate)]
    #[case(Interpolator::CubicBezier(0.2, 0.0, 0.0, 1.0))]
    fn curves_pin_their_endpoints(#[case] curve: Interpolator) {
        assert!(curve.map(0.0).abs() < 1e-6);
        assert!((curve.map(1.0) - 1.0).abs() < 1e-6);
        assert!(curve.map(-3.0).abs() < 1e-6);
        assert!((curve.map(7.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn accelerate_lags_linear() {
        assert!(Interpolator::Accelerate.map(0.5) < Interpolator::Linear.map(0.5));
        assert!(Interpolator::Decelerate.map(0.5) > Interpolator::Linear.map(0.5));
    }

    #[test]
    fn run_waits_for_delay_then_interpolates() {
        let start = Instant::now();
        let run = AnimationRun::new(
            0.0,
            100.0,
            start,
            Duration::from_millis(200),
            Duration::from_millis(1000),
            Interpolator::Linear,
        );

        assert_eq!(run.sample(start), AnimationSample::Pending);
        assert_eq!(
            run.sample(start + Duration::from_millis(199)),
            AnimationSample::Pending
        );
        match run.sample(start + Duration::from_millis(700)) {
            AnimationSample::Running(v) => assert!((v - 50.0).abs() < 1e-3),
            other => panic!("unexpected sample {other:?}"),
        }
        assert_eq!(
            run.sample(start + Duration::from_millis(1200)),
            AnimationSample::Finished(100.0)
        );
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let start = Instant::now();
        let run = AnimationRun::new(
            10.0,
            100.0,
            start,
            Duration::ZERO,
            Duration::ZERO,
            Interpolator::Linear,
        );
        assert_eq!(run.sample(start), AnimationSample::Finished(100.0));
    }
}

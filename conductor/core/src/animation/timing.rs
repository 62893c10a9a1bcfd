//! Tween Timing
//!
//! Easing curves and tween specifications for scale animations. Everything
//! here is pure: given a start value, a target and the time elapsed since the
//! tween started, it returns the value to display. The Conductor owns the
//! clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing functions for smooth animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing (constant speed)
    #[default]
    Linear,

    /// Slow start, fast end
    EaseIn,

    /// Fast start, slow end
    EaseOut,

    /// Slow start and end (smoothstep)
    EaseInOut,

    /// Material "standard" curve, `cubic-bezier(0.4, 0.0, 0.2, 1.0)`
    FastOutSlowIn,
}

impl EasingFunction {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluate a CSS-style cubic bezier easing curve at `x`.
///
/// The curve runs from (0,0) to (1,1) with control points (x1,y1) and
/// (x2,y2). We solve for the curve parameter whose x equals the input with a
/// few Newton steps, falling back to bisection where the slope is flat.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };
    let slope = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };

    let mut t = x;
    for _ in 0..8 {
        let err = sample(x1, x2, t) - x;
        if err.abs() < 1e-5 {
            return sample(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    t = x;
    for _ in 0..32 {
        let current = sample(x1, x2, t);
        if (current - x).abs() < 1e-5 {
            break;
        }
        if current < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }

    sample(y1, y2, t)
}

/// A single timed transition toward a target value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// How long the value takes to travel from start to target
    pub duration: Duration,
    /// Time spent holding the start value before moving
    pub delay: Duration,
    /// Easing curve applied over `duration`
    pub easing: EasingFunction,
}

impl Tween {
    /// Create a tween with no start delay
    #[must_use]
    pub const fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            easing,
        }
    }

    /// Set a start delay
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total wall time including the delay
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }

    /// Eased progress (0.0 to 1.0) at `elapsed` since the tween started
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(moving) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let raw = moving.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.apply(raw)
    }

    /// Interpolated value between `from` and `to` at `elapsed`
    #[must_use]
    pub fn value_at(&self, from: f32, to: f32, elapsed: Duration) -> f32 {
        if elapsed >= self.total() {
            return to;
        }
        from + (to - from) * self.progress(elapsed)
    }
}

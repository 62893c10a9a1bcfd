//! Animation System
//!
//! Surface-agnostic animation primitives. The Conductor describes scale
//! animations as [`Keyframe`]s (a target plus a [`Tween`]) and samples them
//! on its frame clock; surfaces only ever see the resulting values.
//!
//! ```text
//! Keyframe { target: 0.3, tween: 1800ms fast-out-slow-in }
//!     │
//!     ├─→ Conductor samples Tween::value_at() every frame
//!     └─→ StageMessage::ScaleChanged / KeyframeReached → surface
//! ```

mod timing;

pub use timing::{EasingFunction, Tween};

use serde::{Deserialize, Serialize};

/// Baseline button scale
pub const BASELINE_SCALE: f32 = 1.0;

/// One scale transition: where to go and how to get there
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Scale value at the end of the tween
    pub target: f32,
    /// Timing of the transition
    pub tween: Tween,
}

impl Keyframe {
    /// Create a keyframe
    #[must_use]
    pub const fn new(target: f32, tween: Tween) -> Self {
        Self { target, tween }
    }

    /// Number of frames needed to play this keyframe at `frame_interval`.
    ///
    /// Always at least one, so a zero-length tween still reports its target.
    #[must_use]
    pub fn frame_count(&self, frame_interval: std::time::Duration) -> u32 {
        if frame_interval.is_zero() {
            return 1;
        }
        let total = self.tween.total().as_secs_f64();
        let frames = (total / frame_interval.as_secs_f64()).ceil();
        (frames as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_frame_count_rounds_up() {
        let keyframe = Keyframe::new(
            0.5,
            Tween::new(Duration::from_millis(100), EasingFunction::Linear),
        );
        assert_eq!(keyframe.frame_count(Duration::from_millis(33)), 4);
        assert_eq!(keyframe.frame_count(Duration::from_millis(50)), 2);
    }

    #[test]
    fn test_frame_count_includes_delay() {
        let keyframe = Keyframe::new(
            1.2,
            Tween::new(Duration::from_millis(1800), EasingFunction::Linear)
                .with_delay(Duration::from_millis(200)),
        );
        assert_eq!(keyframe.frame_count(Duration::from_millis(100)), 20);
    }

    #[test]
    fn test_zero_length_keyframe_has_one_frame() {
        let keyframe = Keyframe::new(1.0, Tween::new(Duration::ZERO, EasingFunction::Linear));
        assert_eq!(keyframe.frame_count(Duration::from_millis(33)), 1);
        assert_eq!(keyframe.frame_count(Duration::ZERO), 1);
    }
}

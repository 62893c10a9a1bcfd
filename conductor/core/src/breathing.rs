//! Breathing Cycle Controller
//!
//! ```text
//! ready ─→ ( inhale ─→ hold ─→ exhale ─→ hold ) × 6 ─→ praise ─→ restart
//! ```
//!
//! Inhale shrinks the button, exhale grows it past the baseline. The last
//! phase is terminal: the Conductor waits for another tap.

use crate::animation::{EasingFunction, Keyframe, Tween};
use crate::config::BreathingConfig;
use crate::phase::{HoldAfter, Phase};
use crate::script::Step;

/// Repetitions per activation
pub const BREATH_REPETITIONS: usize = 6;

/// The breathing cycle
#[derive(Clone, Debug)]
pub struct BreathingCycle {
    config: BreathingConfig,
}

impl BreathingCycle {
    /// Create a cycle from configuration
    #[must_use]
    pub fn new(config: BreathingConfig) -> Self {
        Self { config }
    }

    /// Keyframe for one inhale
    #[must_use]
    pub fn inhale(&self) -> Keyframe {
        Keyframe::new(
            self.config.inhale_scale,
            Tween::new(self.config.breath, EasingFunction::FastOutSlowIn),
        )
    }

    /// Keyframe for one exhale
    #[must_use]
    pub fn exhale(&self) -> Keyframe {
        Keyframe::new(
            self.config.exhale_scale,
            Tween::new(self.config.breath, EasingFunction::Linear)
                .with_delay(self.config.exhale_delay),
        )
    }

    /// Steps of a single repetition
    #[must_use]
    pub fn repetition(&self) -> [Step; 8] {
        [
            Step::Phase(Phase::Inhale),
            Step::Animate(self.inhale()),
            Step::Phase(Phase::Hold(HoldAfter::Inhale)),
            Step::Wait(self.config.hold),
            Step::Phase(Phase::Exhale),
            Step::Animate(self.exhale()),
            Step::Phase(Phase::Hold(HoldAfter::Exhale)),
            Step::Wait(self.config.hold),
        ]
    }

    /// Script for one full activation
    #[must_use]
    pub fn script(&self) -> Vec<Step> {
        let mut steps = vec![Step::Phase(Phase::Ready), Step::Wait(self.config.ready)];
        for _ in 0..BREATH_REPETITIONS {
            steps.extend(self.repetition());
        }
        steps.extend([
            Step::Phase(Phase::Done),
            Step::Wait(self.config.praise),
            Step::Phase(Phase::Restart),
        ]);
        steps
    }
}

impl Default for BreathingCycle {
    fn default() -> Self {
        Self::new(BreathingConfig::default())
    }
}

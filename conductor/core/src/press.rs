//! Button Press Animator
//!
//! The one-shot pulse played when the button is tapped: shrink, overshoot,
//! settle back to the baseline. It also clears whatever the button was
//! showing so the breathing cycle starts from a clean label.

use crate::animation::{EasingFunction, Keyframe, Tween, BASELINE_SCALE};
use crate::config::PressConfig;
use crate::phase::Phase;
use crate::script::Step;

/// The press pulse
#[derive(Clone, Debug)]
pub struct PressAnimator {
    keyframes: [Keyframe; 3],
}

impl PressAnimator {
    /// Build the pulse from configuration
    #[must_use]
    pub fn new(config: &PressConfig) -> Self {
        let keyframes = [
            Keyframe::new(
                config.scale_down,
                Tween::new(config.duration, EasingFunction::FastOutSlowIn),
            ),
            Keyframe::new(
                config.overshoot,
                Tween::new(config.duration, EasingFunction::Linear).with_delay(config.delay),
            ),
            Keyframe::new(
                BASELINE_SCALE,
                Tween::new(config.duration, EasingFunction::Linear),
            ),
        ];
        Self { keyframes }
    }

    /// The three scale keyframes in play order
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe; 3] {
        &self.keyframes
    }

    /// Script for one press
    #[must_use]
    pub fn script(&self) -> Vec<Step> {
        let mut steps = vec![Step::ButtonText(false), Step::Phase(Phase::Idle)];
        steps.extend(self.keyframes.iter().copied().map(Step::Animate));
        steps
    }
}

impl Default for PressAnimator {
    fn default() -> Self {
        Self::new(&PressConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::script::{keyframe_targets, phases, script_duration};

    #[test]
    fn test_keyframes_in_order() {
        let press = PressAnimator::default();
        assert_eq!(keyframe_targets(&press.script()), vec![0.3, 1.2, 1.0]);
    }

    #[test]
    fn test_pulse_ends_on_baseline() {
        let press = PressAnimator::default();
        assert_eq!(press.keyframes()[2].target, BASELINE_SCALE);
    }

    #[test]
    fn test_keyframe_timing() {
        let press = PressAnimator::default();
        let [down, up, settle] = press.keyframes();

        assert_eq!(down.tween.easing, EasingFunction::FastOutSlowIn);
        assert_eq!(down.tween.delay, Duration::ZERO);
        assert_eq!(up.tween.easing, EasingFunction::Linear);
        assert_eq!(up.tween.delay, Duration::from_millis(200));
        assert_eq!(settle.tween.easing, EasingFunction::Linear);

        let script = press.script();
        assert_eq!(script_duration(&script), Duration::from_millis(1800 * 3 + 200));
    }

    #[test]
    fn test_press_clears_button_first() {
        let script = PressAnimator::default().script();
        assert_eq!(script[0], Step::ButtonText(false));
        assert_eq!(phases(&script), vec![Phase::Idle]);
    }
}

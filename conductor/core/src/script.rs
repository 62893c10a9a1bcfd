//! Animation Scripts
//!
//! A script is the flat list of things an animator does, in order. Building
//! one touches no clock; the Conductor plays it back against time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Keyframe;
use crate::phase::Phase;

/// One instruction in an animator's script
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// Switch the button to a phase (label and colour)
    Phase(Phase),
    /// Show the static button text (true) or the live phase label (false)
    ButtonText(bool),
    /// Do nothing for a while
    Wait(Duration),
    /// Animate the button scale to a keyframe
    Animate(Keyframe),
}

/// Total time a script takes to play
#[must_use]
pub fn script_duration(steps: &[Step]) -> Duration {
    steps
        .iter()
        .map(|step| match step {
            Step::Wait(d) => *d,
            Step::Animate(k) => k.tween.total(),
            Step::Phase(_) | Step::ButtonText(_) => Duration::ZERO,
        })
        .sum()
}

/// Phases in the order a script visits them
#[must_use]
pub fn phases(steps: &[Step]) -> Vec<Phase> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Phase(p) => Some(*p),
            _ => None,
        })
        .collect()
}

/// Keyframe targets in the order a script reaches them
#[must_use]
pub fn keyframe_targets(steps: &[Step]) -> Vec<f32> {
    steps
        .iter()
        .filter_map(|step| match step {
            Step::Animate(k) => Some(k.target),
            _ => None,
        })
        .collect()
}

//! Stage Messages
//!
//! Messages sent from the Conductor to a surface. Every change to the stage
//! goes through one of these: the Conductor applies it to its own
//! [`StageState`](crate::stage::StageState) and forwards the same message,
//! so a surface that applies them in order always mirrors the Conductor.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Messages from Conductor to UI surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageMessage {
    /// The typewriter advanced; `text` is the full prefix now displayed
    TextRevealed {
        /// Displayed prefix
        text: String,
    },

    /// The greeting finished and the button should appear
    ButtonShown,

    /// Toggle between the static button text and the live phase label
    ButtonText {
        /// True for the static "tap here" text
        visible: bool,
    },

    /// The button moved to a new phase
    PhaseChanged {
        /// New phase (colour derives from it)
        phase: Phase,
        /// Label text to show
        label: String,
    },

    /// Intermediate scale value during a tween
    ScaleChanged {
        /// Current scale
        value: f32,
    },

    /// A tween finished exactly on its target
    KeyframeReached {
        /// Target scale
        value: f32,
    },

    /// The Conductor is waiting for a tap
    AwaitingTap,

    /// A tap was accepted and an animation is starting
    TapAccepted,

    /// The Conductor has stopped
    Finished,
}

//! Stage State
//!
//! Everything a surface needs to draw the screen: the revealed greeting, the
//! visibility flags, and the button's phase, label and scale. The Conductor
//! owns the authoritative copy; surfaces keep a mirror by applying the same
//! [`StageMessage`]s. There are no setters besides [`StageState::apply_message`].

use serde::{Deserialize, Serialize};

use crate::animation::BASELINE_SCALE;
use crate::messages::StageMessage;
use crate::phase::{ButtonColor, Phase};

/// Snapshot of the screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageState {
    display_text: String,
    show_button: bool,
    show_button_text: bool,
    phase: Phase,
    label: String,
    scale: f32,
    awaiting_tap: bool,
    finished: bool,
}

impl Default for StageState {
    fn default() -> Self {
        Self {
            display_text: String::new(),
            show_button: false,
            show_button_text: true,
            phase: Phase::Idle,
            label: String::new(),
            scale: BASELINE_SCALE,
            awaiting_tap: false,
            finished: false,
        }
    }
}

impl StageState {
    /// Fresh stage: nothing revealed, button hidden
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a message from the Conductor
    pub fn apply_message(&mut self, msg: &StageMessage) {
        match msg {
            StageMessage::TextRevealed { text } => {
                self.display_text.clone_from(text);
            }
            StageMessage::ButtonShown => {
                self.show_button = true;
            }
            StageMessage::ButtonText { visible } => {
                self.show_button_text = *visible;
            }
            StageMessage::PhaseChanged { phase, label } => {
                self.phase = *phase;
                self.label.clone_from(label);
            }
            StageMessage::ScaleChanged { value } | StageMessage::KeyframeReached { value } => {
                self.scale = *value;
            }
            StageMessage::AwaitingTap => {
                self.awaiting_tap = true;
            }
            StageMessage::TapAccepted => {
                self.awaiting_tap = false;
            }
            StageMessage::Finished => {
                self.awaiting_tap = false;
                self.finished = true;
            }
        }
    }

    /// Greeting text revealed so far
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Whether the button is on screen
    #[must_use]
    pub fn show_button(&self) -> bool {
        self.show_button
    }

    /// Whether the button shows its static text instead of the phase label
    #[must_use]
    pub fn show_button_text(&self) -> bool {
        self.show_button_text
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current phase label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Button colour, derived from the phase
    #[must_use]
    pub fn color(&self) -> ButtonColor {
        self.phase.color()
    }

    /// Current button scale
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Whether a tap would be accepted right now
    #[must_use]
    pub fn awaiting_tap(&self) -> bool {
        self.awaiting_tap && self.show_button
    }

    /// Whether the Conductor has stopped
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text the button should display right now
    #[must_use]
    pub fn button_text<'a>(&'a self, tap_here: &'a str) -> &'a str {
        if self.show_button_text {
            tap_here
        } else {
            &self.label
        }
    }
}

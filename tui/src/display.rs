//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from StageMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Conductor tells it to.
//! Display state is the bridge between StageMessages and rendering:
//!
//! - [`StageState`]: mirror of the Conductor's stage, updated only by messages
//! - [`ColorTransition`]: the button colour blending towards its phase colour

use std::time::Duration;

use breathe_core::{StageMessage, StageState};

use crate::theme::{Rgb, BACKGROUND};

/// How long the button takes to fade in when it first appears
pub const FADE_IN_DURATION: Duration = Duration::from_millis(2000);

/// How long a phase colour change takes
pub const BLEND_DURATION: Duration = Duration::from_millis(1000);

/// A linear blend between two colours, advanced by frame deltas
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorTransition {
    /// Colour at the start of the blend
    pub from: Rgb,
    /// Colour at the end of the blend
    pub to: Rgb,
    /// Time spent so far
    pub elapsed: Duration,
    /// Total duration of the blend
    pub duration: Duration,
}

impl ColorTransition {
    /// Start a new blend
    pub fn new(from: Rgb, to: Rgb, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// A finished transition resting on `color`
    pub fn settled(color: Rgb) -> Self {
        Self::new(color, color, Duration::ZERO)
    }

    /// Advance the blend
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    /// Progress of the transition (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Check if the transition is complete
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Colour right now
    pub fn current(&self) -> Rgb {
        self.from.lerp(self.to, self.progress())
    }
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Mirror of the Conductor's stage
    pub stage: StageState,
    /// Button colour; `None` until the button appears
    color: Option<ColorTransition>,
    /// Messages applied so far
    pub messages_applied: u64,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            stage: StageState::new(),
            color: None,
            messages_applied: 0,
        }
    }
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a StageMessage to update display state
    pub fn apply_message(&mut self, msg: &StageMessage) {
        let before = self.stage.color();
        self.stage.apply_message(msg);
        self.messages_applied += 1;

        match msg {
            StageMessage::ButtonShown => {
                self.color = Some(ColorTransition::new(
                    BACKGROUND,
                    self.stage.color().into(),
                    FADE_IN_DURATION,
                ));
            }
            StageMessage::PhaseChanged { .. } if self.stage.color() != before => {
                if let Some(transition) = self.color.as_mut() {
                    // Blend from wherever the colour is right now
                    *transition = ColorTransition::new(
                        transition.current(),
                        self.stage.color().into(),
                        BLEND_DURATION,
                    );
                }
            }
            _ => {}
        }
    }

    /// Update timers and animations
    pub fn update(&mut self, delta: Duration) {
        if let Some(transition) = self.color.as_mut() {
            transition.advance(delta);
        }
    }

    /// Button colour to draw, if the button is shown
    pub fn button_color(&self) -> Option<Rgb> {
        if !self.stage.show_button() {
            return None;
        }
        Some(
            self.color
                .map_or_else(|| self.stage.color().into(), |t| t.current()),
        )
    }

    /// Whether a colour blend is still running
    pub fn is_blending(&self) -> bool {
        self.color.is_some_and(|t| !t.is_complete())
    }

    /// Whether the Conductor has finished
    pub fn is_finished(&self) -> bool {
        self.stage.is_finished()
    }
}

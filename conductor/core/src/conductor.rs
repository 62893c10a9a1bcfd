//! Conductor
//!
//! The single owner of the stage. The Conductor runs the whole exercise as
//! one async task:
//!
//! ```text
//! reveal greeting ─→ show button ─→ ┌─ wait for tap ─→ press pulse ─→ breathing cycle ─┐
//!                                   └──────────────────────────────────────────────────┘
//! ```
//!
//! Each stage is an `async fn` that returns when its animation is done, so
//! the press pulse always finishes before the breathing cycle begins. Taps
//! that arrive while an animation is playing are dropped; only a Conductor
//! that has announced [`StageMessage::AwaitingTap`] acts on a tap.
//!
//! All timing goes through `tokio::time`, which lets tests drive the whole
//! exercise under paused time.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::animation::Keyframe;
use crate::breathing::BreathingCycle;
use crate::config::BreatheConfig;
use crate::events::SurfaceEvent;
use crate::messages::StageMessage;
use crate::press::PressAnimator;
use crate::reveal::{RevealStep, Typewriter};
use crate::script::Step;
use crate::stage::StageState;

/// Errors that end a Conductor run early
#[derive(Debug, Error)]
pub enum ConductorError {
    /// The surface stopped listening for stage messages
    #[error("surface disconnected")]
    SurfaceClosed,
}

/// Why a stage stopped before finishing
enum Halt {
    Quit,
    SurfaceClosed,
}

/// The Conductor - owns the stage and plays the choreography
pub struct Conductor {
    /// Configuration
    config: BreatheConfig,
    /// Authoritative stage state
    state: StageState,
    /// Channel to the surface
    tx: mpsc::Sender<StageMessage>,
    /// Channel from the surface
    events: mpsc::Receiver<SurfaceEvent>,
    /// Set once the surface dropped its event sender
    events_closed: bool,
    /// Greeting revealer
    greeting: Typewriter,
    /// Press pulse
    press: PressAnimator,
    /// Breathing cycle
    breathing: BreathingCycle,
    /// Completed activations
    activations: u32,
}

impl Conductor {
    /// Create a Conductor that reveals the configured greeting
    pub fn new(
        config: BreatheConfig,
        tx: mpsc::Sender<StageMessage>,
        events: mpsc::Receiver<SurfaceEvent>,
    ) -> Self {
        let greeting = Typewriter::new(vec![config.strings.greeting()])
            .with_char_delay(config.reveal.char_delay)
            .with_string_delay(config.reveal.string_delay)
            .with_split(config.reveal.split_mode);
        let press = PressAnimator::new(&config.press);
        let breathing = BreathingCycle::new(config.breathing.clone());

        Self {
            config,
            state: StageState::new(),
            tx,
            events,
            events_closed: false,
            greeting,
            press,
            breathing,
            activations: 0,
        }
    }

    /// Replace the greeting with an explicit list of strings
    #[must_use]
    pub fn with_texts(mut self, texts: Vec<String>) -> Self {
        self.greeting = Typewriter::new(texts)
            .with_char_delay(self.config.reveal.char_delay)
            .with_string_delay(self.config.reveal.string_delay)
            .with_split(self.config.reveal.split_mode);
        self
    }

    /// Current stage
    pub fn state(&self) -> &StageState {
        &self.state
    }

    /// Number of press + breathing runs completed
    pub fn activations(&self) -> u32 {
        self.activations
    }

    /// Run the exercise until the surface quits
    ///
    /// Returns `Ok(())` when the surface sends [`SurfaceEvent::Quit`] or
    /// drops its event sender while the Conductor waits for a tap.
    ///
    /// # Errors
    ///
    /// Returns [`ConductorError::SurfaceClosed`] if the surface stops
    /// receiving stage messages.
    pub async fn run(&mut self) -> Result<(), ConductorError> {
        tracing::info!(
            frame_ms = self.config.frame_interval.as_millis() as u64,
            "Conductor starting"
        );

        let outcome = self.choreograph().await;

        let result = match outcome {
            Ok(()) | Err(Halt::Quit) => {
                // Best effort: the surface may already be gone
                self.state.apply_message(&StageMessage::Finished);
                let _ = self.tx.try_send(StageMessage::Finished);
                Ok(())
            }
            Err(Halt::SurfaceClosed) => Err(ConductorError::SurfaceClosed),
        };

        tracing::info!(activations = self.activations, "Conductor stopped");
        result
    }

    async fn choreograph(&mut self) -> Result<(), Halt> {
        if !self.reveal().await? {
            tracing::info!("Nothing to reveal, button stays hidden");
            return self.idle_until_quit().await;
        }

        loop {
            self.wait_for_tap().await?;
            self.run_press().await?;
            self.run_breathing().await?;
            self.activations += 1;
        }
    }

    /// Typewriter reveal; returns whether the button was shown
    async fn reveal(&mut self) -> Result<bool, Halt> {
        let greeting = self.greeting.clone();
        let mut finished = false;

        for step in greeting.steps() {
            match step {
                RevealStep::Show { text, hold } => {
                    self.emit(StageMessage::TextRevealed { text }).await?;
                    self.pause(hold).await?;
                }
                RevealStep::StringDone { index, pause } => {
                    tracing::debug!(index, "String revealed");
                    self.pause(pause).await?;
                }
                RevealStep::Finished => finished = true,
            }
        }

        if finished {
            self.emit(StageMessage::ButtonShown).await?;
        }
        Ok(finished)
    }

    async fn run_press(&mut self) -> Result<(), Halt> {
        tracing::debug!("Press pulse");
        let script = self.press.script();
        self.play(&script).await
    }

    async fn run_breathing(&mut self) -> Result<(), Halt> {
        tracing::debug!("Breathing cycle");
        let script = self.breathing.script();
        self.play(&script).await
    }

    async fn play(&mut self, steps: &[Step]) -> Result<(), Halt> {
        for step in steps {
            match *step {
                Step::Phase(phase) => {
                    let label = phase.label(&self.config.strings).to_string();
                    tracing::info!(phase = ?phase, key = phase.key(), "Phase changed");
                    self.emit(StageMessage::PhaseChanged { phase, label }).await?;
                }
                Step::ButtonText(visible) => {
                    self.emit(StageMessage::ButtonText { visible }).await?;
                }
                Step::Wait(duration) => self.pause(duration).await?,
                Step::Animate(keyframe) => self.animate(keyframe).await?,
            }
        }
        Ok(())
    }

    /// Sample a keyframe on the frame clock, landing exactly on its target
    async fn animate(&mut self, keyframe: Keyframe) -> Result<(), Halt> {
        let from = self.state.scale();
        let interval = self.config.frame_interval;
        let frames = keyframe.frame_count(interval);
        let start = Instant::now();

        for frame in 1..frames {
            let at = interval * frame;
            self.pause_until(start + at).await?;
            let value = keyframe.tween.value_at(from, keyframe.target, at);
            self.emit(StageMessage::ScaleChanged { value }).await?;
        }

        self.pause_until(start + keyframe.tween.total()).await?;
        self.emit(StageMessage::KeyframeReached {
            value: keyframe.target,
        })
        .await
    }

    async fn wait_for_tap(&mut self) -> Result<(), Halt> {
        self.discard_pending_events()?;
        if self.events_closed {
            return Err(Halt::Quit);
        }

        self.emit(StageMessage::AwaitingTap).await?;
        match self.events.recv().await {
            Some(SurfaceEvent::Tap) => {
                tracing::debug!(phase = ?self.state.phase(), "Tap accepted");
                self.emit(StageMessage::TapAccepted).await
            }
            Some(SurfaceEvent::Quit) | None => Err(Halt::Quit),
        }
    }

    async fn idle_until_quit(&mut self) -> Result<(), Halt> {
        if self.events_closed {
            return Ok(());
        }
        while let Some(event) = self.events.recv().await {
            match event {
                SurfaceEvent::Tap => tracing::debug!("Ignoring tap, no button"),
                SurfaceEvent::Quit => break,
            }
        }
        Ok(())
    }

    /// Drop taps queued while an animation played
    fn discard_pending_events(&mut self) -> Result<(), Halt> {
        loop {
            match self.events.try_recv() {
                Ok(SurfaceEvent::Tap) => {
                    tracing::debug!("Ignoring tap queued during animation");
                }
                Ok(SurfaceEvent::Quit) => return Err(Halt::Quit),
                Err(mpsc::error::TryRecvError::Empty) => return Ok(()),
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.events_closed = true;
                    return Ok(());
                }
            }
        }
    }

    async fn pause(&mut self, duration: Duration) -> Result<(), Halt> {
        self.pause_until(Instant::now() + duration).await
    }

    /// Sleep until `deadline`, still listening for quit
    async fn pause_until(&mut self, deadline: Instant) -> Result<(), Halt> {
        let sleep = tokio::time::sleep_until(deadline);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep => return Ok(()),
                event = self.events.recv(), if !self.events_closed => match event {
                    Some(SurfaceEvent::Tap) => {
                        tracing::debug!(phase = ?self.state.phase(), "Ignoring tap while animating");
                    }
                    Some(SurfaceEvent::Quit) => return Err(Halt::Quit),
                    None => self.events_closed = true,
                },
            }
        }
    }

    async fn emit(&mut self, msg: StageMessage) -> Result<(), Halt> {
        self.state.apply_message(&msg);
        self.tx.send(msg).await.map_err(|_| Halt::SurfaceClosed)
    }
}

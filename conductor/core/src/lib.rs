//! Breathe Core - Headless Choreography for the Breathing Exercise
//!
//! This crate owns every decision about what the screen shows and when,
//! independent of any UI framework. A surface (the terminal UI, the headless
//! JSON driver, or a test) connects to a [`Conductor`] through two channels
//! and renders whatever the Conductor tells it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     UI Surfaces                      │
//! │  ┌───────────┐  ┌──────────────────┐  ┌──────────┐   │
//! │  │    TUI    │  │ breathe-headless │  │  tests   │   │
//! │  │ (ratatui) │  │   (JSON lines)   │  │          │   │
//! │  └─────┬─────┘  └────────┬─────────┘  └────┬─────┘   │
//! │        └─────────────────┴─────────────────┘         │
//! │                 SurfaceEvent (up)                    │
//! │                 StageMessage (down)                  │
//! └─────────────────────────┬────────────────────────────┘
//!                           │
//! ┌─────────────────────────┴────────────────────────────┐
//! │                     Conductor                        │
//! │  ┌────────────┐  ┌──────────────┐  ┌───────────────┐ │
//! │  │ Typewriter │  │PressAnimator │  │BreathingCycle │ │
//! │  └────────────┘  └──────────────┘  └───────────────┘ │
//! │                   StageState (owned)                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use breathe_core::{Conductor, BreatheConfig, StageMessage, SurfaceEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(256);
//!     let (event_tx, event_rx) = mpsc::channel(16);
//!
//!     let mut conductor = Conductor::new(BreatheConfig::default(), tx, event_rx);
//!     tokio::spawn(async move { conductor.run().await });
//!
//!     while let Some(msg) = rx.recv().await {
//!         if msg == StageMessage::AwaitingTap {
//!             event_tx.send(SurfaceEvent::Tap).await.unwrap();
//!         }
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`animation`]: easing curves, tweens and keyframes
//! - [`reveal`]: typewriter reveal of the greeting
//! - [`press`]: the press pulse
//! - [`breathing`]: the breathing cycle
//! - [`script`]: the step lists animators produce
//! - [`stage`]: the screen state surfaces mirror
//! - [`conductor`]: the task that plays everything
//! - [`headless`]: the JSON-lines surface behind `breathe-headless`
//! - [`config`]: TOML and environment configuration
//!
//! # No TUI Dependencies
//!
//! This crate has no dependency on ratatui, crossterm, or any other UI
//! framework.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

pub mod animation;
pub mod breathing;
pub mod conductor;
pub mod config;
pub mod events;
pub mod headless;
pub mod messages;
pub mod phase;
pub mod press;
pub mod reveal;
pub mod script;
pub mod stage;
pub mod strings;

// Re-exports for convenience
pub use animation::{EasingFunction, Keyframe, Tween, BASELINE_SCALE};
pub use breathing::{BreathingCycle, BREATH_REPETITIONS};
pub use conductor::{Conductor, ConductorError};
pub use config::{
    default_config_path, load_config, load_config_from_path, BreatheConfig, BreathingConfig,
    ConfigError, ConfigSource, PressConfig, RevealConfig,
};
pub use events::SurfaceEvent;
pub use headless::HeadlessError;
pub use messages::StageMessage;
pub use phase::{ButtonColor, HoldAfter, Phase};
pub use press::PressAnimator;
pub use reveal::{RevealStep, SplitMode, Typewriter};
pub use script::Step;
pub use stage::StageState;
pub use strings::StringTable;

//! Breathe TUI - Terminal interface for the breathing exercise
//!
//! This crate renders the exercise in a full-screen terminal: the greeting
//! typed out at the top, a round button that pulses and breathes below it,
//! and a status line. All sequencing lives in `breathe-core`; this crate
//! only mirrors the stage and draws it.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering and hit testing
//! - **Display**: Mirrored stage state plus button colour blends
//! - **Widgets**: Centred text block and the scalable circle button
//! - **ConductorClient**: The embedded Conductor and its channels

pub mod app;
pub mod compositor;
pub mod conductor_client;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;

//! Conductor Client
//!
//! Thin wrapper around the Conductor for TUI integration.
//! The Conductor runs as its own task in this process (no network); the
//! client holds both ends of its channels.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any choreography.
//! All sequencing happens in the Conductor. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Conductor
//! 3. Receive StageMessages
//! 4. Render display state based on messages

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use breathe_core::{BreatheConfig, Conductor, ConductorError, StageMessage, SurfaceEvent};

/// Stage messages buffered between frames
const MESSAGE_CAPACITY: usize = 256;

/// Surface events buffered for the Conductor
const EVENT_CAPACITY: usize = 16;

/// How long shutdown waits for the Conductor to stop
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors talking to the embedded Conductor
#[derive(Debug, Error)]
pub enum ClientError {
    /// The Conductor task is no longer accepting events
    #[error("conductor is not running")]
    NotRunning,

    /// The Conductor stopped with an error
    #[error(transparent)]
    Conductor(#[from] ConductorError),

    /// The Conductor task panicked or was cancelled
    #[error("conductor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Client for communicating with the embedded Conductor
pub struct ConductorClient {
    /// Events to the Conductor
    events: mpsc::Sender<SurfaceEvent>,
    /// Receiver for messages from Conductor
    rx: mpsc::Receiver<StageMessage>,
    /// The running Conductor
    task: Option<JoinHandle<Result<(), ConductorError>>>,
}

impl ConductorClient {
    /// Spawn a Conductor revealing the configured greeting
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: BreatheConfig) -> Self {
        Self::spawn_with(config, None)
    }

    /// Spawn a Conductor, optionally with an explicit list of texts to reveal
    pub fn spawn_with(config: BreatheConfig, texts: Option<Vec<String>>) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_CAPACITY);
        let (events, event_rx) = mpsc::channel(EVENT_CAPACITY);

        let mut conductor = Conductor::new(config, tx, event_rx);
        if let Some(texts) = texts {
            conductor = conductor.with_texts(texts);
        }
        let task = tokio::spawn(async move { conductor.run().await });

        Self {
            events,
            rx,
            task: Some(task),
        }
    }

    /// Forward a tap
    ///
    /// Never blocks the render loop: if the Conductor is busy and the queue
    /// is full, the tap is dropped, which is what the Conductor would do
    /// with it anyway.
    pub fn tap(&self) -> Result<(), ClientError> {
        match self.events.try_send(SurfaceEvent::Tap) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(ClientError::NotRunning),
        }
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<StageMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Check if the Conductor task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Ask the Conductor to quit and wait for it to stop
    ///
    /// Messages still in flight are drained so the Conductor is never left
    /// blocked on a full channel.
    pub async fn shutdown(&mut self) -> Result<(), ClientError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };

        if self.events.try_send(SurfaceEvent::Quit).is_err() {
            tracing::debug!("Conductor event queue unavailable during shutdown");
        }

        let rx = &mut self.rx;
        let drained = tokio::time::timeout(SHUTDOWN_TIMEOUT, async {
            while rx.recv().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            tracing::warn!("Conductor did not stop in time, aborting");
            task.abort();
        }

        match task.await {
            Ok(result) => Ok(result?),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for ConductorClient {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

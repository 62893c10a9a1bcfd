//! Headless Surface
//!
//! Drives a [`Conductor`] from line commands and writes every stage message
//! as one JSON object per line. This is what `breathe-headless` runs; tests
//! drive it with in-memory readers and writers.
//!
//! Commands are queued in the order they arrive. A queued `tap` is only
//! forwarded once the mirrored stage is awaiting one, the same gate the TUI
//! applies, so `echo tap | breathe-headless` waits for the button. A `quit`
//! at the head of the queue is forwarded at once. When the input ends and
//! the queue is empty, the event channel is closed and the Conductor stops
//! at its next tap wait.

use std::collections::VecDeque;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::conductor::{Conductor, ConductorError};
use crate::config::BreatheConfig;
use crate::events::SurfaceEvent;
use crate::messages::StageMessage;
use crate::stage::StageState;

/// Stage messages buffered for the transcript writer
const MESSAGE_CAPACITY: usize = 256;

/// Surface events buffered for the Conductor
const EVENT_CAPACITY: usize = 16;

/// Errors from a headless run
#[derive(Debug, Error)]
pub enum HeadlessError {
    /// Reading commands or writing the transcript failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stage message could not be encoded
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The Conductor stopped with an error
    #[error(transparent)]
    Conductor(#[from] ConductorError),

    /// The Conductor task panicked or was cancelled
    #[error("conductor task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Commands read from input, released to the Conductor when it can use them
struct CommandQueue {
    pending: VecDeque<SurfaceEvent>,
    events: Option<mpsc::Sender<SurfaceEvent>>,
    input_closed: bool,
    tap_in_flight: bool,
}

impl CommandQueue {
    fn new(events: mpsc::Sender<SurfaceEvent>) -> Self {
        Self {
            pending: VecDeque::new(),
            events: Some(events),
            input_closed: false,
            tap_in_flight: false,
        }
    }

    /// Forward whatever the mirrored stage allows, then close the channel
    /// once the input is exhausted
    async fn release(&mut self, stage: &StageState) {
        while let Some(&next) = self.pending.front() {
            let Some(events) = &self.events else {
                self.pending.clear();
                return;
            };

            match next {
                SurfaceEvent::Tap if !stage.awaiting_tap() || self.tap_in_flight => break,
                SurfaceEvent::Tap => self.tap_in_flight = true,
                SurfaceEvent::Quit => {}
            }

            self.pending.pop_front();
            tracing::debug!(event = ?next, "Forwarding command");
            if events.send(next).await.is_err() {
                self.events = None;
            }
        }

        if self.input_closed && self.pending.is_empty() && self.events.take().is_some() {
            tracing::debug!("Input exhausted, closing event channel");
        }
    }
}

/// Run the exercise against `input` commands, writing the transcript to
/// `output`
///
/// `texts` replaces the configured greeting when given. Returns once the
/// Conductor has stopped and its last message has been written.
///
/// # Errors
///
/// Returns an error if the transcript cannot be written or the Conductor
/// stops abnormally.
pub async fn run<R, W>(
    config: BreatheConfig,
    texts: Option<Vec<String>>,
    input: R,
    mut output: W,
) -> Result<(), HeadlessError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::channel(MESSAGE_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);

    let mut conductor = Conductor::new(config, tx, event_rx);
    if let Some(texts) = texts {
        conductor = conductor.with_texts(texts);
    }
    let conductor_task = tokio::spawn(async move { conductor.run().await });

    let mut lines = input.lines();
    let mut queue = CommandQueue::new(event_tx);
    let mut mirror = StageState::new();

    loop {
        tokio::select! {
            msg = rx.recv() => {
                let Some(msg) = msg else { break };
                mirror.apply_message(&msg);
                if msg == StageMessage::TapAccepted {
                    queue.tap_in_flight = false;
                }

                let mut line = serde_json::to_vec(&msg)?;
                line.push(b'\n');
                output.write_all(&line).await?;
                output.flush().await?;
            }

            line = lines.next_line(), if !queue.input_closed => match line {
                Ok(Some(line)) => match line.parse::<SurfaceEvent>() {
                    Ok(event) => queue.pending.push_back(event),
                    Err(e) => tracing::warn!(error = %e, "Ignoring input line"),
                },
                Ok(None) => queue.input_closed = true,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read input");
                    queue.input_closed = true;
                }
            },
        }

        queue.release(&mirror).await;
    }

    conductor_task.await??;
    Ok(())
}

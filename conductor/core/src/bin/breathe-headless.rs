//! Headless Breathe Driver
//!
//! Runs the Conductor without a terminal UI. Every stage message is written
//! to stdout as one JSON object per line; commands are read from stdin, one
//! per line.
//!
//! # Usage
//!
//! ```bash
//! # Tap once the button appears, watch the whole cycle
//! echo tap | breathe-headless
//!
//! # Two rounds, fast timings for scripting
//! printf 'tap\ntap\n' | BREATHE_CHAR_DELAY_MS=0 BREATHE_HOLD_MS=100 BREATHE_BREATH_MS=200 breathe-headless
//!
//! # With verbose logging (on stderr)
//! RUST_LOG=debug breathe-headless
//! ```
//!
//! # Commands
//!
//! - `tap` (or an empty line): activate the button once it is waiting
//! - `quit`: stop
//!
//! Commands are queued, so taps typed early wait for the button. Once stdin
//! reaches EOF and every queued command has been used, the run stops at the
//! next point where a tap would be needed.

use tokio::io::BufReader;
use tracing::info;

use breathe_core::{headless, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("breathe_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = load_config()?;
    info!(source = %config.source(), "Configuration loaded");

    let input = BufReader::new(tokio::io::stdin());
    headless::run(config, None, input, tokio::io::stdout()).await?;
    Ok(())
}

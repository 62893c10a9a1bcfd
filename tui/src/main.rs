//! Breathe TUI Entry Point
//!
//! Launches the terminal UI for the guided breathing exercise.
//!
//! Usage:
//!   breathe-tui
//!
//! Keys:
//!   Space / Enter / click  Tap the button
//!   Esc / q / Ctrl-C       Quit
//!   F12                    Toggle developer status line
//!
//! Environment:
//!   BREATHE_CONFIG   Path to a config file
//!   BREATHE_LOG      Write logs to this file (filtered by RUST_LOG)

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breathe_core::{load_config, BreatheConfig};
use breathe_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: breathe-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        eprintln!();
        eprintln!("For scripted use, run breathe-headless instead.");
        std::process::exit(1);
    }

    // Config errors are reported before the screen is taken over
    let config = load_config()?;
    tracing::info!(source = %config.source(), "Configuration loaded");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: BreatheConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await
}

/// Log to the file named by `BREATHE_LOG`; stay silent otherwise so nothing
/// is written over the alternate screen
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os("BREATHE_LOG") else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("breathe_core=info".parse()?)
                .add_directive("breathe_tui=info".parse()?),
        )
        .init();

    Ok(())
}

//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - ConductorClient for choreography
//! - DisplayState for rendering
//!
//! The App never decides what happens next. It turns key presses and clicks
//! into taps, forwards them only while the Conductor is waiting for one, and
//! draws whatever the mirrored stage says.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;

use breathe_core::{BreatheConfig, StringTable};

use crate::compositor::{Compositor, LayerId};
use crate::conductor_client::{ClientError, ConductorClient};
use crate::display::DisplayState;
use crate::theme::{DIM_GRAY, GREETING_TEXT, HINT_BLUE, LABEL_TEXT};
use crate::widgets::{Circle, TextBlock};

/// Smallest greeting region, in rows
const GREETING_MIN_HEIGHT: u16 = 4;

/// Screen regions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Greeting text, top of the screen
    pub greeting: Rect,
    /// The breathing button, below the greeting
    pub button: Rect,
    /// One-line status bar at the bottom
    pub status: Rect,
}

impl ScreenLayout {
    /// Split a `width` x `height` screen
    pub fn new(width: u16, height: u16) -> Self {
        let body = height.saturating_sub(1);
        let greeting_height = (body / 3)
            .max(GREETING_MIN_HEIGHT)
            .min(body.saturating_sub(1));

        Self {
            greeting: Rect::new(0, 0, width, greeting_height),
            button: Rect::new(
                0,
                greeting_height,
                width,
                body.saturating_sub(greeting_height),
            ),
            status: Rect::new(0, body, width, height.min(1)),
        }
    }
}

/// Layer IDs for UI regions
struct AppLayers {
    greeting: LayerId,
    button: LayerId,
    status: LayerId,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Conductor Integration ===
    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient,
    /// Display state derived from StageMessages
    display: DisplayState,
    /// Localized strings (for the button's static text)
    strings: StringTable,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Current screen split
    layout: ScreenLayout,

    // === Misc State ===
    /// Redraw interval
    frame_interval: Duration,
    /// Last frame time (for colour blends)
    last_frame: Instant,
    /// Developer mode
    dev_mode: bool,
}

impl App {
    /// Create a new App for the current terminal, spawning its Conductor
    pub fn new(config: BreatheConfig) -> anyhow::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        let conductor = ConductorClient::spawn(config.clone());
        Ok(Self::with_client(&config, conductor, width, height))
    }

    /// Create an App around an existing client, for a screen of the given size
    pub fn with_client(
        config: &BreatheConfig,
        conductor: ConductorClient,
        width: u16,
        height: u16,
    ) -> Self {
        let layout = ScreenLayout::new(width, height);
        let mut compositor = Compositor::new(Rect::new(0, 0, width, height));

        let layers = AppLayers {
            greeting: compositor.create_layer(layout.greeting, 0),
            button: compositor.create_layer(layout.button, 10),
            status: compositor.create_layer(layout.status, 20),
        };
        // The button appears once the greeting is revealed
        compositor.set_visible(layers.button, false);

        Self {
            running: true,
            conductor,
            display: DisplayState::new(),
            strings: config.strings.clone(),
            compositor,
            layers,
            layout,
            frame_interval: config.frame_interval,
            last_frame: Instant::now(),
            dev_mode: false,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(&event),
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                // Frame tick
                () = tokio::time::sleep(self.frame_interval) => {}
            }

            let now = Instant::now();
            let delta = now - self.last_frame;
            self.last_frame = now;

            self.tick(delta);
            self.render(terminal)?;
        }

        if let Err(e) = self.shutdown().await {
            tracing::warn!(error = %e, "Conductor stopped with an error");
        }

        Ok(())
    }

    /// Process pending Conductor messages and advance blends by `delta`
    pub fn tick(&mut self, delta: Duration) {
        for msg in self.conductor.recv_all() {
            self.display.apply_message(&msg);
        }
        self.display.update(delta);

        self.compositor
            .set_visible(self.layers.button, self.display.stage.show_button());

        if self.display.is_finished() || !self.conductor.is_running() {
            self.running = false;
        }
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(w, h) => self.handle_resize(*w, *h),
            _ => {}
        }
    }

    /// Stop the Conductor
    ///
    /// # Errors
    ///
    /// Returns the Conductor's own error if it stopped abnormally.
    pub async fn shutdown(&mut self) -> Result<(), ClientError> {
        self.running = false;
        self.conductor.shutdown().await
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current screen split
    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Tap
            KeyCode::Char(' ') | KeyCode::Enter => self.request_tap(),

            // Toggle dev mode
            KeyCode::F(12) => self.dev_mode = !self.dev_mode,

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.compositor.layer_at(mouse.column, mouse.row) == Some(self.layers.button)
        {
            self.request_tap();
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::new(width, height);
        self.compositor.resize(Rect::new(0, 0, width, height));
        self.compositor
            .place_layer(self.layers.greeting, self.layout.greeting);
        self.compositor
            .place_layer(self.layers.button, self.layout.button);
        self.compositor
            .place_layer(self.layers.status, self.layout.status);
    }

    /// Forward a tap if the Conductor is waiting for one
    fn request_tap(&mut self) {
        if !self.display.stage.awaiting_tap() {
            tracing::debug!(phase = ?self.display.stage.phase(), "Tap ignored, not awaiting");
            return;
        }
        if let Err(e) = self.conductor.tap() {
            tracing::warn!(error = %e, "Failed to forward tap");
            self.running = false;
        }
    }

    /// Draw every layer and composite them
    pub fn frame(&mut self) -> &Buffer {
        self.render_greeting();
        self.render_button();
        self.render_status();
        self.compositor.composite()
    }

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let output = self.frame();

        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    buf[(x, y)] = output[(x, y)].clone();
                }
            }
        })?;

        Ok(())
    }

    /// Render greeting layer
    fn render_greeting(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.greeting) {
            buf.reset();
            let area = buf.area;
            TextBlock::new(self.display.stage.display_text())
                .style(Style::default().fg(GREETING_TEXT))
                .centered()
                .render(area, buf);
        }
    }

    /// Render button layer
    fn render_button(&mut self) {
        let Some(color) = self.display.button_color() else {
            return;
        };
        let stage = &self.display.stage;
        let label = stage.button_text(&self.strings.tap_here);

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.button) {
            buf.reset();
            let area = buf.area;
            Circle::new(stage.scale(), color.to_color())
                .label(label)
                .label_style(Style::default().fg(LABEL_TEXT))
                .render(area, buf);
        }
    }

    /// Render status bar
    fn render_status(&mut self) {
        let stage = &self.display.stage;

        let (mut status, style) = if stage.awaiting_tap() {
            (
                " Space, Enter or click the button to begin | Esc to quit".to_string(),
                Style::default().fg(HINT_BLUE),
            )
        } else if stage.label().is_empty() {
            (" Esc to quit".to_string(), Style::default().fg(DIM_GRAY))
        } else {
            (
                format!(" {} | Esc to quit", stage.label()),
                Style::default().fg(DIM_GRAY),
            )
        };

        if self.dev_mode {
            status.push_str(&format!(
                " | {:?} scale {:.2} | {} msgs",
                stage.phase(),
                stage.scale(),
                self.display.messages_applied
            ));
        }

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;
            buf.set_stringn(area.x, area.y, &status, usize::from(area.width), style);
        }
    }
}

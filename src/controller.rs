//! Viewer controller.
//!
//! This module runs the interactive dot plot viewer:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::AppState;
use crate::ui::glyphs::{self, Glyphs};
use crate::ui::{calculate_visible_dimensions, render};

/// What the main loop does after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The terminal changed size; the viewport must be refitted.
    Refit,
    Quit,
}

/// Applies one terminal event to the viewer state.
pub fn dispatch(state: &mut AppState, event: Event) -> Flow {
    let action = handle_event(event, &state.mode);
    let resized = matches!(action, Action::Resize(..));
    if let Action::Resize(width, height) = action {
        debug!("terminal resized to {}x{}", width, height);
    }

    if !apply_action(state, action) {
        Flow::Quit
    } else if resized {
        Flow::Refit
    } else {
        Flow::Continue
    }
}

/// The viewer application.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Viewer state
    state: AppState,
    /// Characters used to draw the plot
    glyphs: Glyphs,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new viewer with the given state.
    pub fn new(state: AppState, fancy: bool) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            state,
            glyphs: glyphs::select(fancy),
            tick_rate: Duration::from_millis(50),
        })
    }

    /// Runs the main loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        self.update_viewport_size()?;

        loop {
            let glyphs = self.glyphs;
            let state = &self.state;
            self.terminal.draw(|frame| {
                render(frame, state, &glyphs);
            })?;

            let Some(event) = poll_event(self.tick_rate) else {
                continue;
            };
            match dispatch(&mut self.state, event) {
                Flow::Continue => {}
                Flow::Refit => self.update_viewport_size()?,
                Flow::Quit => break,
            }
        }

        Ok(())
    }

    /// Updates the viewport size based on terminal dimensions.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (visible_rows, visible_cols) = calculate_visible_dimensions(size.width, size.height);
        self.state.update_viewport_size(visible_rows, visible_cols);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the viewer on a finished analysis.
pub fn run_viewer(state: AppState, fancy: bool) -> Result<()> {
    let mut app = App::new(state, fancy)?;
    app.run()
}

//! Terminal front end for the calculator
//!
//! Keyboard and mouse events are turned into [`CalcEvent`](crate::core::CalcEvent)s
//! and the engine's display is drawn with ratatui.

mod app;
mod input;
mod keypad;
mod ui;

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info};

pub use app::CalculatorApp;
pub use input::{to_key, InputHandler, KeyAction};
pub use keypad::{ButtonKind, Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI, Panels};

/// Runs the calculator in the current terminal until the user quits
///
/// The terminal is restored even when the event loop fails.
pub fn run(app: CalculatorApp) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    info!("terminal UI started");
    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("terminal UI stopped");

    result
}

/// Event loop over any backend
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: CalculatorApp) -> io::Result<()> {
    loop {
        let frame = terminal.draw(|f| render(&app, f))?.area;

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, frame),
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            _ => {}
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

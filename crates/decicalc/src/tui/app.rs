//! TUI application state
//!
//! Wraps one [`Engine`] with the terminal-only concerns: the keypad
//! highlight, the error popup and the quit flag.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui;
use crate::config::EngineConfig;
use crate::core::{CalcError, CalcEvent, DisplayUpdate, Engine};
use crate::keymap::KeyMap;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: Engine,
    keypad: Keypad,
    input: InputHandler,
    /// Error shown in the popup until dismissed
    error: Option<CalcError>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a calculator app with a custom engine configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(config),
            keypad: Keypad::new(),
            input: InputHandler::new(),
            error: None,
            should_quit: false,
        }
    }

    /// Replaces the key bindings
    #[must_use]
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.input = InputHandler::with_keymap(keymap);
        self
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.engine.current_display()
    }

    /// Returns the pending expression, e.g. `12 +`, or an empty string
    #[must_use]
    pub fn pending_expression(&self) -> String {
        match (self.engine.stored_operand(), self.engine.pending_operator()) {
            (Some(stored), Some(op)) if !self.engine.just_evaluated() => {
                format!("{} {op}", crate::core::number::render(stored))
            }
            _ => String::new(),
        }
    }

    /// Returns the error waiting to be acknowledged
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Closes the error popup
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Presses a button
    ///
    /// Errors leave the display untouched and open the popup.
    pub fn press(&mut self, event: CalcEvent) -> DisplayUpdate {
        self.keypad.highlight(event);
        let update = self.engine.handle(event);
        if let DisplayUpdate::Error(err) = &update {
            self.error = Some(err.clone());
        }
        update
    }

    /// Applies a decoded key action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Calc(event) => {
                self.press(event);
            }
            KeyAction::DismissError => self.dismiss_error(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a keyboard event
    pub fn handle_key(&mut self, event: KeyEvent) {
        let action = self.input.handle_key(event, self.error.is_some());
        self.apply(action);
    }

    /// Handles a mouse event; `frame` is the full terminal area
    pub fn handle_mouse(&mut self, event: MouseEvent, frame: Rect) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.error.is_some() {
            self.dismiss_error();
            return;
        }
        let area = ui::keypad_area(frame);
        if let Some(calc) = self.keypad.event_at(area, event.column, event.row) {
            self.press(calc);
        }
    }
}

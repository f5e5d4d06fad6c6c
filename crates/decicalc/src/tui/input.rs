//! Keyboard input handling
//!
//! Translates crossterm key events into [`KeyAction`]s through a [`KeyMap`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::CalcEvent;
use crate::keymap::{Key, KeyMap};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send a button event to the engine
    Calc(CalcEvent),
    /// Close the error popup
    DismissError,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler {
    keymap: KeyMap,
}

impl InputHandler {
    /// Creates a new input handler with the default bindings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input handler with custom bindings
    #[must_use]
    pub fn with_keymap(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    /// Returns the key map in use
    #[must_use]
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Maps a key event to an action
    ///
    /// While an error popup is open every non-quit key only dismisses it.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, error_open: bool) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        if error_open {
            return KeyAction::DismissError;
        }

        to_key(code)
            .and_then(|key| self.keymap.lookup(key))
            .map_or(KeyAction::None, KeyAction::Calc)
    }
}

/// Converts a crossterm key code to a platform-neutral [`Key`]
#[must_use]
pub fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::F(n) => Some(Key::F(n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    // ===== Constructor tests =====

    #[test]
    fn test_input_handler_new() {
        let handler = InputHandler::new();
        assert_eq!(handler.keymap(), &KeyMap::new());
    }

    // ===== Calculator keys =====

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            let action = handler.handle_key(key_event(KeyCode::Char(c)), false);
            assert_eq!(action, KeyAction::Calc(CalcEvent::digit(d).unwrap()));
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for op in Operation::ALL {
            let action = handler.handle_key(key_event(KeyCode::Char(op.symbol())), false);
            assert_eq!(action, KeyAction::Calc(CalcEvent::Operator(op)));
        }
    }

    #[test]
    fn test_shifted_operator_still_maps() {
        let handler = InputHandler::new();
        let event = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key(event, false),
            KeyAction::Calc(CalcEvent::Operator(Operation::Add))
        );
    }

    #[test]
    fn test_handle_special_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Enter, CalcEvent::Evaluate),
            (KeyCode::Backspace, CalcEvent::Backspace),
            (KeyCode::Delete, CalcEvent::ClearEntry),
            (KeyCode::Esc, CalcEvent::ClearAll),
            (KeyCode::F(9), CalcEvent::ToggleSign),
            (KeyCode::Char('%'), CalcEvent::Percent),
            (KeyCode::Char('.'), CalcEvent::Dot),
        ];
        for (code, expected) in cases {
            assert_eq!(
                handler.handle_key(key_event(code), false),
                KeyAction::Calc(expected),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key_event(KeyCode::Char('x')), false), KeyAction::None);
        assert_eq!(handler.handle_key(key_event(KeyCode::Left), false), KeyAction::None);
        assert_eq!(handler.handle_key(key_event(KeyCode::F(1)), false), KeyAction::None);
    }

    // ===== Ctrl combinations =====

    #[test]
    fn test_ctrl_quit() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key_event_ctrl(KeyCode::Char('c')), false), KeyAction::Quit);
        assert_eq!(handler.handle_key(key_event_ctrl(KeyCode::Char('q')), false), KeyAction::Quit);
        assert_eq!(handler.handle_key(key_event_ctrl(KeyCode::Char('q')), true), KeyAction::Quit);
    }

    #[test]
    fn test_ctrl_other_ignored() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key_event_ctrl(KeyCode::Char('5')), false), KeyAction::None);
    }

    // ===== Error popup =====

    #[test]
    fn test_any_key_dismisses_error() {
        let handler = InputHandler::new();
        for code in [KeyCode::Char('5'), KeyCode::Enter, KeyCode::Esc, KeyCode::Left] {
            assert_eq!(handler.handle_key(key_event(code), true), KeyAction::DismissError);
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let handler = InputHandler::new();
        let mut event = key_event(KeyCode::Char('5'));
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key(event, false), KeyAction::None);
    }

    // ===== Custom key map =====

    #[test]
    fn test_custom_keymap() {
        let keymap = KeyMap::new().with_binding(Key::Char('n'), CalcEvent::ToggleSign);
        let handler = InputHandler::with_keymap(keymap);
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('n')), false),
            KeyAction::Calc(CalcEvent::ToggleSign)
        );
    }

    #[test]
    fn test_to_key() {
        assert_eq!(to_key(KeyCode::Char('7')), Some(Key::Char('7')));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::Tab), None);
    }
}

//! Key bindings: physical keys to button events
//!
//! The binding table is plain data. Front ends translate their native key
//! codes into [`Key`] and look the result up in a [`KeyMap`].

use serde::{Deserialize, Serialize};

use crate::core::{CalcEvent, Digit, Operation};

/// Platform-neutral key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// A printable character (main row or numeric keypad)
    Char(char),
    /// Enter, Return, or keypad Enter
    Enter,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Escape
    Escape,
    /// Function key F1-F12
    F(u8),
}

const fn digit(value: u8) -> CalcEvent {
    CalcEvent::Digit(Digit::from_literal(value))
}

/// Default bindings
///
/// Keypad digits, operators and the keypad decimal arrive with the same
/// character codes as the main row, so one entry covers both.
pub const DEFAULT_BINDINGS: &[(Key, CalcEvent)] = &[
    (Key::Char('0'), digit(0)),
    (Key::Char('1'), digit(1)),
    (Key::Char('2'), digit(2)),
    (Key::Char('3'), digit(3)),
    (Key::Char('4'), digit(4)),
    (Key::Char('5'), digit(5)),
    (Key::Char('6'), digit(6)),
    (Key::Char('7'), digit(7)),
    (Key::Char('8'), digit(8)),
    (Key::Char('9'), digit(9)),
    (Key::Char('+'), CalcEvent::Operator(Operation::Add)),
    (Key::Char('-'), CalcEvent::Operator(Operation::Subtract)),
    (Key::Char('*'), CalcEvent::Operator(Operation::Multiply)),
    (Key::Char('/'), CalcEvent::Operator(Operation::Divide)),
    (Key::Char('.'), CalcEvent::Dot),
    (Key::Char('%'), CalcEvent::Percent),
    (Key::Char('='), CalcEvent::Evaluate),
    (Key::Enter, CalcEvent::Evaluate),
    (Key::Backspace, CalcEvent::Backspace),
    (Key::Delete, CalcEvent::ClearEntry),
    (Key::Escape, CalcEvent::ClearAll),
    (Key::F(9), CalcEvent::ToggleSign),
];

/// Lookup table from keys to events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(Key, CalcEvent)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// Creates a key map with [`DEFAULT_BINDINGS`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.to_vec(),
        }
    }

    /// Creates a key map with no bindings
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds `key` to `event`, replacing any existing binding for `key`
    #[must_use]
    pub fn with_binding(mut self, key: Key, event: CalcEvent) -> Self {
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, event));
        self
    }

    /// Looks up the event bound to `key`
    #[must_use]
    pub fn lookup(&self, key: Key) -> Option<CalcEvent> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, event)| *event)
    }

    /// Returns all keys bound to `event`
    pub fn keys_for(&self, event: CalcEvent) -> impl Iterator<Item = Key> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, e)| *e == event)
            .map(|(k, _)| *k)
    }

    /// Returns the number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if there are no bindings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

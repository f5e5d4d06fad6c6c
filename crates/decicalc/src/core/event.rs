//! The closed vocabulary of button events the engine accepts

use serde::{Deserialize, Serialize};

use super::Operation;

/// A single decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, rejecting values above 9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a digit from a literal, for use in constant tables
    ///
    /// # Panics
    ///
    /// Panics if `value` is above 9; in a `const` item this is a compile error.
    #[must_use]
    pub const fn from_literal(value: u8) -> Self {
        assert!(value <= 9, "not a decimal digit");
        Self(value)
    }

    /// Creates a digit from its ASCII character
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    /// Numeric value of the digit
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character of the digit
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a decimal digit"))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// Button events, one per keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcEvent {
    /// Enter a digit
    Digit(Digit),
    /// Enter the decimal point
    Dot,
    /// Reset the current entry only (CE)
    ClearEntry,
    /// Reset everything (C)
    ClearAll,
    /// Remove the last typed character
    Backspace,
    /// Flip the sign of the entry
    ToggleSign,
    /// Percent of the entry (or of the stored operand)
    Percent,
    /// Queue a binary operator
    Operator(Operation),
    /// Apply the pending operator (=)
    Evaluate,
}

impl CalcEvent {
    /// Shorthand for a digit event; values above 9 yield `None`
    #[must_use]
    pub const fn digit(value: u8) -> Option<Self> {
        match Digit::new(value) {
            Some(d) => Some(Self::Digit(d)),
            None => None,
        }
    }

    /// Keypad label for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.as_char().to_string(),
            Self::Dot => ".".into(),
            Self::ClearEntry => "CE".into(),
            Self::ClearAll => "C".into(),
            Self::Backspace => "⌫".into(),
            Self::ToggleSign => "±".into(),
            Self::Percent => "%".into(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Evaluate => "=".into(),
        }
    }

    /// Check if this event edits the entry text rather than evaluating
    #[must_use]
    pub const fn is_entry_edit(&self) -> bool {
        matches!(
            self,
            Self::Digit(_) | Self::Dot | Self::Backspace | Self::ToggleSign | Self::ClearEntry
        )
    }
}

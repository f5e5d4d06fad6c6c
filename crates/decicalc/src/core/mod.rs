//! Calculator core: the decimal entry/evaluation state machine
//!
//! The engine owns all arithmetic state and knows nothing about widgets or
//! key codes. Front ends feed it [`CalcEvent`]s and render the
//! [`DisplayUpdate`] it hands back.

mod engine;
mod event;
pub mod number;
mod operations;

pub use engine::{Engine, EntryMode, Snapshot};
pub use event::{CalcEvent, Digit};
pub use operations::Operation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Recoverable arithmetic failures surfaced to the front end
///
/// Neither variant mutates engine state: the user can correct the entry and
/// retry, or clear.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CalcError {
    /// Right-hand operand of a division was zero at evaluation time
    #[error("Cannot divide by zero.")]
    DivisionByZero,
    /// Any other failure of the decimal evaluation step
    #[error("Math error: {0}")]
    ArithmeticFailure(String),
}

impl CalcError {
    /// Create an arithmetic failure from any message
    #[must_use]
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::ArithmeticFailure(message.into())
    }
}

/// What the front end should show after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUpdate {
    /// Re-render the display with this text
    Text(String),
    /// Present this error out-of-band; the display text is unchanged
    Error(CalcError),
}

impl DisplayUpdate {
    /// Returns the display text, if this is not an error
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Error(_) => None,
        }
    }

    /// Returns the error, if any
    #[must_use]
    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Text(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Check if this update carries an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<CalcResult<String>> for DisplayUpdate {
    fn from(result: CalcResult<String>) -> Self {
        match result {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_division_by_zero() {
        let err = CalcError::DivisionByZero;
        assert_eq!(format!("{err}"), "Cannot divide by zero.");
    }

    #[test]
    fn test_calc_error_display_arithmetic_failure() {
        let err = CalcError::arithmetic("multiplication overflow");
        assert_eq!(format!("{err}"), "Math error: multiplication overflow");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("divide"));
    }

    // ===== DisplayUpdate tests =====

    #[test]
    fn test_display_update_text_accessors() {
        let update = DisplayUpdate::Text("42".into());
        assert_eq!(update.text(), Some("42"));
        assert!(update.error().is_none());
        assert!(!update.is_error());
    }

    #[test]
    fn test_display_update_error_accessors() {
        let update = DisplayUpdate::Error(CalcError::DivisionByZero);
        assert!(update.text().is_none());
        assert_eq!(update.error(), Some(&CalcError::DivisionByZero));
        assert!(update.is_error());
    }

    #[test]
    fn test_display_update_from_result() {
        let ok: CalcResult<String> = Ok("8".into());
        assert_eq!(DisplayUpdate::from(ok), DisplayUpdate::Text("8".into()));

        let err: CalcResult<String> = Err(CalcError::DivisionByZero);
        assert!(DisplayUpdate::from(err).is_error());
    }
}

//! decicalc - a desk calculator engine with exact decimal arithmetic
//!
//! The engine is a small state machine driven by keypad button events. It
//! owns the display text, the operand being typed, a stored left operand and
//! a pending operator, and evaluates left to right like a pocket calculator.
//! Arithmetic uses arbitrary-precision [`bigdecimal`] values, so `0.1 + 0.2`
//! is exactly `0.3` and long entries never lose digits.
//!
//! Front ends stay thin: they translate their native input into
//! [`CalcEvent`](core::CalcEvent)s (see [`keymap`]) and render the
//! [`DisplayUpdate`](core::DisplayUpdate) the engine returns. A terminal front
//! end is provided behind the `tui` feature.
//!
//! # Example
//!
//! ```rust
//! use decicalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! let keymap = KeyMap::new();
//!
//! for c in "10-4==".chars() {
//!     if let Some(event) = keymap.lookup(Key::Char(c)) {
//!         engine.handle(event);
//!     }
//! }
//! assert_eq!(engine.current_display(), "2");
//!
//! engine.handle(CalcEvent::ClearAll);
//! let update = engine.handle_all([
//!     CalcEvent::digit(5).unwrap(),
//!     CalcEvent::Operator(Operation::Divide),
//!     CalcEvent::digit(0).unwrap(),
//!     CalcEvent::Evaluate,
//! ]);
//! assert_eq!(update, DisplayUpdate::Error(CalcError::DivisionByZero));
//! assert_eq!(engine.current_display(), "0");
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keymap;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::core::{
        CalcError, CalcEvent, CalcResult, Digit, DisplayUpdate, Engine, EntryMode, Operation,
        Snapshot,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::keymap::{Key, KeyMap};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

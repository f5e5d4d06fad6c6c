//! Front-end-neutral calculator driver
//!
//! Scenarios are written once against [`CalculatorDriver`] and run against
//! the bare engine and the terminal app alike.

use crate::core::{CalcError, CalcEvent, DisplayUpdate, Engine, Operation};
use crate::keymap::{Key, KeyMap};

/// Button-level interface to a calculator front end
pub trait CalculatorDriver {
    /// Presses one button
    fn press(&mut self, event: CalcEvent) -> DisplayUpdate;

    /// Returns the display text
    fn display(&self) -> String;

    /// Returns the error raised by the most recent press, if any
    fn last_error(&self) -> Option<CalcError>;

    /// Types a key sequence using the default bindings
    ///
    /// Characters with no binding are skipped.
    fn type_keys(&mut self, keys: &str) {
        let keymap = KeyMap::new();
        for c in keys.chars() {
            if let Some(event) = keymap.lookup(Key::Char(c)) {
                self.press(event);
            }
        }
    }
}

/// Driver over a bare [`Engine`]
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: Engine,
    last_error: Option<CalcError>,
}

impl EngineDriver {
    /// Creates a driver with a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing engine
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            last_error: None,
        }
    }

    /// Returns the underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, event: CalcEvent) -> DisplayUpdate {
        let update = self.engine.handle(event);
        self.last_error = update.error().cloned();
        update
    }

    fn display(&self) -> String {
        self.engine.current_display().to_string()
    }

    fn last_error(&self) -> Option<CalcError> {
        self.last_error.clone()
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// Driver over the terminal app
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalcError, CalcEvent, CalculatorDriver, DisplayUpdate};
    use crate::tui::CalculatorApp;

    /// Drives a [`CalculatorApp`] as if its keypad buttons were clicked
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, event: CalcEvent) -> DisplayUpdate {
            self.app.dismiss_error();
            self.app.press(event)
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn last_error(&self) -> Option<CalcError> {
            self.app.error().cloned()
        }
    }
}

// ===== Shared scenarios =====

/// Basic arithmetic on whole and fractional entries
///
/// `=` keeps the operator armed, so each calculation starts from a clear.
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [
        ("12+7=", "19"),
        ("0.1+0.2=", "0.3"),
        ("6*7=", "42"),
        ("10/4=", "2.5"),
        ("1/3=", "0.333333333333"),
    ] {
        driver.press(CalcEvent::ClearAll);
        driver.type_keys(keys);
        assert_eq!(driver.display(), expected, "{keys}");
    }
}

/// Operators chain left to right, without precedence
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.press(CalcEvent::ClearAll);
    driver.type_keys("2+3*4=");
    assert_eq!(driver.display(), "20");

    driver.press(CalcEvent::ClearAll);
    driver.type_keys("9-");
    driver.press(CalcEvent::Operator(Operation::Add));
    driver.type_keys("1=");
    assert_eq!(driver.display(), "10");
}

/// Errors keep the display and can be recovered from
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.press(CalcEvent::ClearAll);
    driver.type_keys("8/0");
    let update = driver.press(CalcEvent::Evaluate);
    assert_eq!(update, DisplayUpdate::Error(CalcError::DivisionByZero));
    assert_eq!(driver.last_error(), Some(CalcError::DivisionByZero));
    assert_eq!(driver.display(), "0");

    driver.type_keys("2=");
    assert_eq!(driver.last_error(), None);
    assert_eq!(driver.display(), "4");
}

/// Editing keys: backspace, sign, clear entry
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.press(CalcEvent::ClearAll);
    driver.type_keys("123");
    driver.press(CalcEvent::Backspace);
    assert_eq!(driver.display(), "12");
    driver.press(CalcEvent::ToggleSign);
    assert_eq!(driver.display(), "-12");
    driver.press(CalcEvent::ClearEntry);
    assert_eq!(driver.display(), "0");
}

/// Percent with and without a pending operator
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.press(CalcEvent::ClearAll);
    driver.type_keys("50%");
    assert_eq!(driver.display(), "0.5");

    driver.press(CalcEvent::ClearAll);
    driver.type_keys("200+10%");
    assert_eq!(driver.display(), "20");
    driver.press(CalcEvent::Evaluate);
    assert_eq!(driver.display(), "220");
}

/// Runs every shared scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_error_recovery(driver);
    verify_editing(driver);
    verify_percent(driver);
}

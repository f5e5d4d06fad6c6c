//! The calculator engine state machine
//!
//! State is two entry flags layered over three arithmetic slots (the entry
//! text with its parsed value, the stored operand, the pending operator).
//! Handlers match on the derived [`EntryMode`] so every event is defined for
//! every combination of flags.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::number::{self, ZERO_TEXT};
use super::operations::{self, Operation};
use super::{CalcEvent, CalcResult, Digit, DisplayUpdate};
use crate::config::EngineConfig;

/// How the next digit or dot press is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// The next digit starts a new number (after an operator or a clear)
    Fresh,
    /// Digits are appended to the entry
    Editing,
    /// A result is showing; the next digit starts a new number and the next
    /// operator chains from the result
    Evaluated,
}

/// Read-only copy of every state slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Text currently displayed
    pub display: String,
    /// Value parsed from the display
    pub current: BigDecimal,
    /// Left operand of the queued operation
    pub stored: Option<BigDecimal>,
    /// Queued operator
    pub pending: Option<Operation>,
    /// Next digit replaces the display
    pub entry_start: bool,
    /// Last action was a successful evaluation
    pub just_evaluated: bool,
    /// Right operand a repeated `=` replays
    pub repeat_operand: Option<BigDecimal>,
}

/// Desk calculator engine
///
/// Feed it events with [`Engine::handle`]; read the display back with
/// [`Engine::current_display`]. Not thread-safe by itself: front ends
/// serialize events onto one engine.
#[derive(Debug, Clone)]
pub struct Engine {
    display: String,
    current: BigDecimal,
    stored: Option<BigDecimal>,
    pending: Option<Operation>,
    entry_start: bool,
    just_evaluated: bool,
    /// Right operand of the last successful evaluation, replayed by `=`
    repeat_operand: Option<BigDecimal>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with custom configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            display: ZERO_TEXT.to_string(),
            current: BigDecimal::zero(),
            stored: None,
            pending: None,
            entry_start: true,
            just_evaluated: false,
            repeat_operand: None,
            config,
        }
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the text to render
    #[must_use]
    pub fn current_display(&self) -> &str {
        &self.display
    }

    /// Returns the value parsed from the display
    #[must_use]
    pub fn current_value(&self) -> &BigDecimal {
        &self.current
    }

    /// Returns the stored left operand
    #[must_use]
    pub fn stored_operand(&self) -> Option<&BigDecimal> {
        self.stored.as_ref()
    }

    /// Returns the queued operator
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending
    }

    /// Whether the next digit starts a new number
    #[must_use]
    pub fn entry_start(&self) -> bool {
        self.entry_start
    }

    /// Whether the last action was a successful evaluation
    #[must_use]
    pub fn just_evaluated(&self) -> bool {
        self.just_evaluated
    }

    /// Derives the entry mode from the two flags
    #[must_use]
    pub fn mode(&self) -> EntryMode {
        if self.just_evaluated {
            EntryMode::Evaluated
        } else if self.entry_start {
            EntryMode::Fresh
        } else {
            EntryMode::Editing
        }
    }

    /// Copies out every state slot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            current: self.current.clone(),
            stored: self.stored.clone(),
            pending: self.pending,
            entry_start: self.entry_start,
            just_evaluated: self.just_evaluated,
            repeat_operand: self.repeat_operand.clone(),
        }
    }

    /// Handles one button event
    ///
    /// On error the state is exactly as it was before the event.
    pub fn handle(&mut self, event: CalcEvent) -> DisplayUpdate {
        let outcome = match event {
            CalcEvent::Digit(d) => {
                self.push_digit(d);
                Ok(())
            }
            CalcEvent::Dot => {
                self.push_dot();
                Ok(())
            }
            CalcEvent::ClearEntry => {
                self.clear_entry();
                Ok(())
            }
            CalcEvent::ClearAll => {
                self.clear_all();
                Ok(())
            }
            CalcEvent::Backspace => {
                self.backspace();
                Ok(())
            }
            CalcEvent::ToggleSign => {
                self.toggle_sign();
                Ok(())
            }
            CalcEvent::Percent => self.percent(),
            CalcEvent::Operator(op) => self.set_operator(op),
            CalcEvent::Evaluate => self.evaluate(),
        };

        match outcome {
            Ok(()) => {
                debug!(?event, display = %self.display, mode = ?self.mode(), "handled event");
                DisplayUpdate::Text(self.display.clone())
            }
            Err(err) => {
                warn!(?event, %err, "event rejected");
                DisplayUpdate::Error(err)
            }
        }
    }

    /// Handles a sequence of events, returning the last update
    pub fn handle_all<I>(&mut self, events: I) -> DisplayUpdate
    where
        I: IntoIterator<Item = CalcEvent>,
    {
        let mut last = DisplayUpdate::Text(self.display.clone());
        for event in events {
            last = self.handle(event);
        }
        last
    }

    // ===== Entry editing =====

    fn push_digit(&mut self, d: Digit) {
        match self.mode() {
            EntryMode::Fresh | EntryMode::Evaluated => {
                self.display = d.as_char().to_string();
                self.entry_start = false;
                self.just_evaluated = false;
            }
            EntryMode::Editing if self.display == ZERO_TEXT => {
                self.display = d.as_char().to_string();
            }
            EntryMode::Editing => self.display.push(d.as_char()),
        }
        self.reparse();
    }

    fn push_dot(&mut self) {
        match self.mode() {
            EntryMode::Fresh | EntryMode::Evaluated => {
                self.display = "0.".to_string();
                self.entry_start = false;
                self.just_evaluated = false;
            }
            EntryMode::Editing if self.display.contains('.') => return,
            EntryMode::Editing => self.display.push('.'),
        }
        self.reparse();
    }

    fn clear_entry(&mut self) {
        self.display = ZERO_TEXT.to_string();
        self.current = BigDecimal::zero();
        self.entry_start = true;
        self.repeat_operand = None;
    }

    fn clear_all(&mut self) {
        *self = Self::with_config(self.config);
    }

    fn backspace(&mut self) {
        if self.mode() != EntryMode::Editing {
            return;
        }
        let collapses = self.display.chars().count() <= 1
            || (self.display.len() == 2 && self.display.starts_with('-'));
        if collapses {
            self.clear_entry();
            return;
        }
        self.display.pop();
        if self.display == "-" {
            self.clear_entry();
            return;
        }
        self.reparse();
    }

    fn toggle_sign(&mut self) {
        if self.display == ZERO_TEXT {
            return;
        }
        if let Some(unsigned) = self.display.strip_prefix('-') {
            self.display = unsigned.to_string();
        } else {
            self.display.insert(0, '-');
        }
        self.repeat_operand = None;
        self.reparse();
    }

    fn reparse(&mut self) {
        self.current = number::parse_display(&self.display);
    }

    // ===== Operators and evaluation =====

    fn percent(&mut self) -> CalcResult<()> {
        let base = self.pending.and(self.stored.as_ref());
        let result = operations::percent(base, &self.current, self.config.scale)?;
        self.show_result(result);
        self.entry_start = true;
        self.repeat_operand = None;
        Ok(())
    }

    fn set_operator(&mut self, op: Operation) -> CalcResult<()> {
        if self.pending.is_some() && self.mode() == EntryMode::Editing {
            self.evaluate()?;
        }
        self.stored = Some(self.current.clone());
        self.pending = Some(op);
        self.entry_start = true;
        self.just_evaluated = false;
        Ok(())
    }

    fn evaluate(&mut self) -> CalcResult<()> {
        let (Some(op), Some(stored)) = (self.pending, self.stored.as_ref()) else {
            self.display = number::render(&self.current);
            self.just_evaluated = true;
            return Ok(());
        };

        // A bare repeated `=` replays the last right operand against the
        // result. Editing the result clears the replay.
        let (lhs, rhs) = match (self.mode(), &self.repeat_operand) {
            (EntryMode::Evaluated, Some(last_rhs)) => (&self.current, last_rhs),
            _ => (stored, &self.current),
        };

        let result = op.apply(lhs, rhs, self.config.scale)?;
        let rhs = rhs.clone();
        self.stored = Some(result.clone());
        self.show_result(result);
        self.repeat_operand = Some(rhs);
        self.entry_start = true;
        self.just_evaluated = true;
        Ok(())
    }

    fn show_result(&mut self, value: BigDecimal) {
        self.display = number::render(&value);
        self.current = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn digit(d: u8) -> CalcEvent {
        CalcEvent::digit(d).unwrap()
    }

    fn op(c: char) -> CalcEvent {
        CalcEvent::Operator(Operation::from_symbol(c).unwrap())
    }

    /// Presses a script of keypad labels: digits, `.`, operators, `=`, `%`,
    /// `~` (sign), `<` (backspace), `E` (clear entry), `C` (clear all)
    fn press(engine: &mut Engine, keys: &str) -> DisplayUpdate {
        let events = keys.chars().map(|c| match c {
            '0'..='9' => digit(c as u8 - b'0'),
            '.' => CalcEvent::Dot,
            '=' => CalcEvent::Evaluate,
            '%' => CalcEvent::Percent,
            '~' => CalcEvent::ToggleSign,
            '<' => CalcEvent::Backspace,
            'E' => CalcEvent::ClearEntry,
            'C' => CalcEvent::ClearAll,
            other => op(other),
        });
        engine.handle_all(events)
    }

    fn display_after(keys: &str) -> String {
        let mut engine = Engine::new();
        press(&mut engine, keys);
        engine.current_display().to_string()
    }

    // ===== Construction =====

    #[test]
    fn test_initial_state() {
        let engine = Engine::new();
        assert_eq!(engine.current_display(), "0");
        assert!(engine.current_value().is_zero());
        assert!(engine.stored_operand().is_none());
        assert!(engine.pending_operator().is_none());
        assert!(engine.entry_start());
        assert!(!engine.just_evaluated());
        assert_eq!(engine.mode(), EntryMode::Fresh);
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Engine::default().snapshot(), Engine::new().snapshot());
    }

    // ===== Digit entry =====

    #[test]
    fn test_digits_append() {
        assert_eq!(display_after("123"), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(display_after("007"), "7");
    }

    #[test]
    fn test_digit_after_evaluate_starts_fresh() {
        let mut engine = Engine::new();
        press(&mut engine, "2+3=");
        assert_eq!(engine.current_display(), "5");
        press(&mut engine, "9");
        assert_eq!(engine.current_display(), "9");
        assert!(!engine.just_evaluated());
        assert!(!engine.entry_start());
    }

    #[test]
    fn test_long_entry_keeps_every_digit() {
        let keys = "1234567890123456789012345678901234567890";
        assert_eq!(display_after(keys), keys);
        let mut engine = Engine::new();
        press(&mut engine, &format!("{keys}.5"));
        assert_eq!(engine.current_value(), &dec(&format!("{keys}.5")));
    }

    #[test]
    fn test_handle_returns_display_text() {
        let mut engine = Engine::new();
        assert_eq!(engine.handle(digit(4)), DisplayUpdate::Text("4".into()));
    }

    // ===== Dot entry =====

    #[test]
    fn test_dot_on_fresh_entry() {
        assert_eq!(display_after("."), "0.");
        assert_eq!(display_after(".5"), "0.5");
    }

    #[test]
    fn test_second_dot_ignored() {
        assert_eq!(display_after("1.2.3"), "1.23");
    }

    #[test]
    fn test_dot_after_evaluate() {
        assert_eq!(display_after("1+1=."), "0.");
    }

    #[test]
    fn test_dot_parses_value() {
        let mut engine = Engine::new();
        press(&mut engine, "12.");
        assert_eq!(engine.current_value(), &dec("12"));
    }

    // ===== Clear operations =====

    #[test]
    fn test_clear_entry_keeps_operation() {
        let mut engine = Engine::new();
        press(&mut engine, "8*5E");
        assert_eq!(engine.current_display(), "0");
        assert_eq!(engine.stored_operand(), Some(&dec("8")));
        assert_eq!(engine.pending_operator(), Some(Operation::Multiply));
        press(&mut engine, "3=");
        assert_eq!(engine.current_display(), "24");
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut engine = Engine::new();
        press(&mut engine, "8*5=C");
        assert_eq!(engine.snapshot(), Engine::new().snapshot());
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "0");
    }

    #[test]
    fn test_clear_all_keeps_config() {
        let config = EngineConfig::new().with_scale(2);
        let mut engine = Engine::with_config(config);
        press(&mut engine, "C");
        assert_eq!(engine.config().scale, 2);
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last_char() {
        assert_eq!(display_after("123<"), "12");
        assert_eq!(display_after("1.5<"), "1.");
    }

    #[test]
    fn test_backspace_single_digit_collapses() {
        let mut engine = Engine::new();
        press(&mut engine, "7<");
        assert_eq!(engine.current_display(), "0");
        assert!(engine.entry_start());
        assert!(engine.current_value().is_zero());
    }

    #[test]
    fn test_backspace_negative_digit_collapses() {
        let mut engine = Engine::new();
        press(&mut engine, "7~");
        assert_eq!(engine.current_display(), "-7");
        press(&mut engine, "<");
        assert_eq!(engine.current_display(), "0");
        assert!(engine.entry_start());
    }

    #[test]
    fn test_backspace_ignored_on_fresh_entry() {
        let mut engine = Engine::new();
        press(&mut engine, "12+");
        press(&mut engine, "<");
        assert_eq!(engine.current_display(), "12");
    }

    #[test]
    fn test_backspace_ignored_after_evaluate() {
        assert_eq!(display_after("12+3=<"), "15");
    }

    // ===== Sign toggle =====

    #[test]
    fn test_toggle_sign_on_zero_is_noop() {
        let mut engine = Engine::new();
        let before = engine.snapshot();
        press(&mut engine, "~");
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_toggle_sign_twice_restores() {
        let mut engine = Engine::new();
        press(&mut engine, "4.5~");
        assert_eq!(engine.current_display(), "-4.5");
        assert_eq!(engine.current_value(), &dec("-4.5"));
        press(&mut engine, "~");
        assert_eq!(engine.current_display(), "4.5");
    }

    #[test]
    fn test_toggle_sign_on_result() {
        let mut engine = Engine::new();
        press(&mut engine, "2+3=~");
        assert_eq!(engine.current_display(), "-5");
        press(&mut engine, "+1=");
        assert_eq!(engine.current_display(), "-4");
    }

    // ===== Percent =====

    #[test]
    fn test_percent_without_pending_op() {
        let mut engine = Engine::new();
        press(&mut engine, "50%");
        assert_eq!(engine.current_display(), "0.5");
        assert!(engine.entry_start());
    }

    #[test]
    fn test_percent_with_pending_op() {
        let mut engine = Engine::new();
        press(&mut engine, "200+50%");
        assert_eq!(engine.current_display(), "100");
        assert_eq!(engine.stored_operand(), Some(&dec("200")));
        assert_eq!(engine.pending_operator(), Some(Operation::Add));
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "300");
    }

    #[test]
    fn test_percent_renders_integral_without_dot() {
        assert_eq!(display_after("500%"), "5");
    }

    // ===== Operators and evaluation =====

    #[test]
    fn test_simple_addition() {
        assert_eq!(display_after("5+3="), "8");
    }

    #[test]
    fn test_repeated_evaluate_reapplies_operator() {
        let mut engine = Engine::new();
        press(&mut engine, "10-4=");
        assert_eq!(engine.current_display(), "6");
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "2");
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "-2");
    }

    #[test]
    fn test_operator_chaining_evaluates_pending() {
        let mut engine = Engine::new();
        press(&mut engine, "2+3*");
        assert_eq!(engine.current_display(), "5");
        assert_eq!(engine.stored_operand(), Some(&dec("5")));
        press(&mut engine, "4=");
        assert_eq!(engine.current_display(), "20");
    }

    #[test]
    fn test_operator_replaced_without_second_operand() {
        let mut engine = Engine::new();
        press(&mut engine, "9+-");
        assert_eq!(engine.pending_operator(), Some(Operation::Subtract));
        press(&mut engine, "4=");
        assert_eq!(engine.current_display(), "5");
    }

    #[test]
    fn test_operator_after_evaluate_chains_from_result() {
        let mut engine = Engine::new();
        press(&mut engine, "6*7=");
        press(&mut engine, "-");
        assert_eq!(engine.stored_operand(), Some(&dec("42")));
        assert!(!engine.just_evaluated());
        press(&mut engine, "2=");
        assert_eq!(engine.current_display(), "40");
    }

    #[test]
    fn test_new_operand_after_evaluate_reuses_operator() {
        let mut engine = Engine::new();
        press(&mut engine, "10-4=1=");
        assert_eq!(engine.current_display(), "5");
    }

    #[test]
    fn test_division_rounding_display() {
        assert_eq!(display_after("2/3="), "0.666666666667");
        assert_eq!(display_after("1/8="), "0.125");
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        assert_eq!(display_after(".1+.2="), "0.3");
    }

    #[test]
    fn test_evaluate_without_operator_is_idempotent() {
        let mut engine = Engine::new();
        press(&mut engine, "42");
        let mut expected = engine.snapshot();
        press(&mut engine, "=");
        expected.just_evaluated = true;
        assert_eq!(engine.snapshot(), expected);
        press(&mut engine, "=");
        assert_eq!(engine.snapshot(), expected);
    }

    #[test]
    fn test_evaluate_without_operator_rerenders() {
        assert_eq!(display_after("5.="), "5");
        assert_eq!(display_after("1.50="), "1.5");
    }

    #[test]
    fn test_large_products_are_exact() {
        assert_eq!(
            display_after("12345678901234.5678*12345678901234.5678="),
            "152415787532388365279682997.65279684"
        );
        assert_eq!(
            display_after("99999999999999999999*99999999999999999999="),
            "9999999999999999999800000000000000000001"
        );
    }

    #[test]
    fn test_tiny_product_is_exact() {
        assert_eq!(
            display_after(".000000000000001*.000000000000001="),
            "0.000000000000000000000000000001"
        );
    }

    #[test]
    fn test_large_quotient_keeps_twelve_digits() {
        assert_eq!(
            display_after("12345678901234567890/7="),
            "1763668414462081127.142857142857"
        );
    }

    // ===== Repeated evaluate after editing =====

    #[test]
    fn test_clear_entry_after_evaluate_uses_zero_operand() {
        let mut engine = Engine::new();
        press(&mut engine, "10-4=E");
        assert_eq!(engine.current_display(), "0");
        assert_eq!(engine.handle(CalcEvent::Evaluate), DisplayUpdate::Text("6".into()));
    }

    #[test]
    fn test_toggle_sign_after_evaluate_uses_edited_value() {
        let mut engine = Engine::new();
        press(&mut engine, "2+3=~");
        assert_eq!(engine.handle(CalcEvent::Evaluate), DisplayUpdate::Text("0".into()));
    }

    #[test]
    fn test_percent_after_evaluate_uses_edited_value() {
        let mut engine = Engine::new();
        press(&mut engine, "10-4=");
        press(&mut engine, "%");
        assert_eq!(engine.current_display(), "0.36");
        assert!(engine.snapshot().repeat_operand.is_none());
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "5.64");
    }

    #[test]
    fn test_repeat_resumes_after_edited_evaluate() {
        let mut engine = Engine::new();
        press(&mut engine, "10-4=E=");
        assert_eq!(engine.current_display(), "6");
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "6");
    }

    // ===== Errors =====

    #[test]
    fn test_division_by_zero_leaves_state() {
        let mut engine = Engine::new();
        press(&mut engine, "5/0");
        let before = engine.snapshot();
        let update = engine.handle(CalcEvent::Evaluate);
        assert_eq!(update, DisplayUpdate::Error(CalcError::DivisionByZero));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.current_display(), "0");

        press(&mut engine, "2");
        assert_eq!(engine.current_display(), "2");
        press(&mut engine, "=");
        assert_eq!(engine.current_display(), "2.5");
    }

    #[test]
    fn test_chained_division_by_zero_aborts_operator() {
        let mut engine = Engine::new();
        press(&mut engine, "5/0");
        let before = engine.snapshot();
        let update = engine.handle(op('+'));
        assert!(update.is_error());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_division_by_zero_keeps_repeat_operand() {
        let mut engine = Engine::new();
        press(&mut engine, "9/3=");
        press(&mut engine, "/0");
        let before = engine.snapshot();
        assert_eq!(before.repeat_operand, Some(dec("3")));
        assert!(engine.handle(CalcEvent::Evaluate).is_error());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_recovers_after_error_with_clear() {
        let mut engine = Engine::new();
        press(&mut engine, "1/0=C3+4=");
        assert_eq!(engine.current_display(), "7");
    }

    // ===== Snapshot =====

    #[test]
    fn test_snapshot_serializes_decimals_as_strings() {
        let mut engine = Engine::new();
        press(&mut engine, "1.5+");
        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["display"], "1.5");
        assert_eq!(json["current"], "1.5");
        assert_eq!(json["stored"], "1.5");
        assert_eq!(json["pending"], "add");
        assert_eq!(json["entry_start"], true);
    }
}

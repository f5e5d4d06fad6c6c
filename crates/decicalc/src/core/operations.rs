//! Binary operators and their decimal arithmetic
//!
//! Addition, subtraction and multiplication are exact. Division is rounded
//! half-up to the configured scale.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::number;
use crate::core::CalcResult;

/// The four queueable binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operators, in keypad order
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to `(lhs, rhs)`
    ///
    /// `scale` is the number of fractional digits a quotient is rounded to.
    pub fn apply(self, lhs: &BigDecimal, rhs: &BigDecimal, scale: u32) -> CalcResult<BigDecimal> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => number::div_half_up(lhs, rhs, scale),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Percent of the current entry
///
/// With a pending operation the percentage is taken of the stored operand
/// (`stored * current / 100`), otherwise it is `current / 100`.
pub fn percent(
    stored: Option<&BigDecimal>,
    current: &BigDecimal,
    scale: u32,
) -> CalcResult<BigDecimal> {
    let hundred = BigDecimal::from(100);
    match stored {
        Some(lhs) => number::div_half_up(&(lhs * current), &hundred, scale),
        None => number::div_half_up(current, &hundred, scale),
    }
}

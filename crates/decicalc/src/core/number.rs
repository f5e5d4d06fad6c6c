//! Parsing, rendering and rounding of decimal values

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::str::FromStr;

use super::{CalcError, CalcResult};

/// Default number of fractional digits for rounded results
pub const DEFAULT_SCALE: u32 = 12;

/// The display text shown when nothing has been entered
pub const ZERO_TEXT: &str = "0";

/// Parses display text into a decimal value
///
/// A trailing `.` (an entry still being typed) is accepted. Anything that
/// does not parse yields zero rather than an error.
#[must_use]
pub fn parse_display(text: &str) -> BigDecimal {
    let digits = text.strip_suffix('.').unwrap_or(text);
    match BigDecimal::from_str(digits) {
        Ok(value) => value,
        Err(err) => {
            tracing::trace!(text, %err, "display text did not parse, using zero");
            BigDecimal::zero()
        }
    }
}

/// Renders a value as plain decimal text with trailing zeros stripped
///
/// Never uses exponent notation. Integral values have no trailing `.` and
/// negative zero renders as `0`.
#[must_use]
pub fn render(value: &BigDecimal) -> String {
    if value.is_zero() {
        return ZERO_TEXT.to_string();
    }
    value.normalized().to_plain_string()
}

fn pow10(exponent: i64) -> CalcResult<BigInt> {
    let exponent = u32::try_from(exponent)
        .map_err(|_| CalcError::arithmetic(format!("exponent {exponent} out of range")))?;
    Ok(BigInt::from(10u8).pow(exponent))
}

/// Divides exactly, then rounds half away from zero to `scale` digits
///
/// The quotient is computed on the unscaled integers, so the result is
/// correctly rounded however many digits the operands carry.
pub fn div_half_up(lhs: &BigDecimal, rhs: &BigDecimal, scale: u32) -> CalcResult<BigDecimal> {
    if rhs.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    let (num, num_scale) = lhs.as_bigint_and_exponent();
    let (den, den_scale) = rhs.as_bigint_and_exponent();

    // lhs / rhs = (num / den) * 10^(den_scale - num_scale)
    let shift = i64::from(scale) + den_scale - num_scale;
    let (num, den) = if shift >= 0 {
        (num * pow10(shift)?, den)
    } else {
        (num, den * pow10(-shift)?)
    };

    let mut quotient = &num / &den;
    let remainder = &num % &den;
    if remainder.abs() * 2 >= den.abs() {
        quotient += num.signum() * den.signum();
    }
    Ok(BigDecimal::new(quotient, i64::from(scale)))
}

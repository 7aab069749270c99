//! Formatting of decimal results.
//!
//! Decimal numbers are printed with at most [`SIGNIFICANT_DIGITS`] significant digits and no
//! trailing zeros, so that the small errors introduced by binary floating point arithmetic do not
//! show up in the output: `0.1 + 0.2` prints as `0.3`. Very large and very small magnitudes switch
//! to scientific notation.

mod float;

use rug::Float;
use std::fmt::{Display, Formatter};

pub use float::{fmt_decimal, fmt_scientific, should_use_scientific};

/// The number of significant digits used when printing a decimal.
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Formats a float with [`SIGNIFICANT_DIGITS`] significant digits.
pub fn fmt_float(n: &Float) -> String {
    FloatFormatter::new(n).to_string()
}

/// A [`Display`] wrapper around a [`Float`] that uses the formatting rules of this module.
#[derive(Debug, Clone, Copy)]
pub struct FloatFormatter<'a> {
    value: &'a Float,
    digits: usize,
}

impl<'a> FloatFormatter<'a> {
    /// Creates a formatter with the default number of significant digits.
    pub fn new(value: &'a Float) -> Self {
        Self { value, digits: SIGNIFICANT_DIGITS }
    }

    /// Sets the number of significant digits. At least one digit is always printed.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits.max(1);
        self
    }
}

impl Display for FloatFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        float::fmt(f, self.value, self.digits)
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::{float, float_from_str};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn trailing_zeroes() {
        assert_eq!(fmt_float(&float(37000000)), "37000000");
        assert_eq!(fmt_float(&float(2.5)), "2.5");
        assert_eq!(fmt_float(&float(-4)), "-4");
    }

    #[test]
    fn binary_error_is_hidden() {
        let sum = float_from_str("0.1").unwrap() + float_from_str("0.2").unwrap();
        assert_eq!(fmt_float(&sum), "0.3");
    }

    #[test]
    fn fifteen_digits() {
        let root = float(2).sqrt();
        assert_eq!(fmt_float(&root), "1.4142135623731");
        assert_eq!(fmt_float(&float(1).exp()), "2.71828182845905");
    }

    #[test]
    fn small_fraction() {
        assert_eq!(fmt_float(&float(0.015625)), "0.015625");
    }

    #[test]
    fn scientific() {
        assert_eq!(fmt_float(&float(1.5e20)), "1.5e20");
        assert_eq!(fmt_float(&float(-2e-7)), "-2e-7");
    }

    #[test]
    fn zero() {
        assert_eq!(fmt_float(&float(0)), "0");
    }

    #[test]
    fn fewer_digits() {
        let third = float(1) / float(3);
        assert_eq!(FloatFormatter::new(&third).digits(4).to_string(), "0.3333");
    }
}

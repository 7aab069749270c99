//! Utility functions to format floating-point numbers.

use rug::{float::Round, Float};
use std::{cmp::Ordering, fmt::Write};

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: &Float) -> bool {
    if n.is_zero() || !n.is_normal() {
        return false;
    }
    let abs = n.as_abs();
    *abs < 1e-6 || *abs >= 1e+15
}

/// Trims trailing zeros from the fractional part of a number in decimal notation, along with the
/// decimal point if nothing is left after it.
fn trim_trailing(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Writes the special values that have no digits.
fn fmt_special<W: Write>(f: &mut W, n: &Float) -> std::fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}∞", if n.is_sign_negative() { "-" } else { "" })
    } else {
        write!(f, "0")
    }
}

/// Formats a float as a standard number with the given number of significant digits.
pub fn fmt_decimal<W: Write>(f: &mut W, n: &Float, digits: usize) -> std::fmt::Result {
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(exponent) = exponent.filter(|_| n.is_normal()) else {
        return fmt_special(f, n);
    };

    // add decimal point
    match exponent.cmp(&0) {
        Ordering::Less => s.insert_str(0, &format!("0.{}", "0".repeat(-exponent as usize))),
        Ordering::Equal => s.insert_str(0, "0."),
        Ordering::Greater => {
            let exponent = exponent as usize;
            match s.len().cmp(&exponent) {
                // if there are not enough digits before the decimal point, add zeros
                Ordering::Less => s.push_str(&"0".repeat(exponent - s.len())),

                // place the decimal point in the correct place
                Ordering::Greater => s.insert(exponent, '.'),

                Ordering::Equal => {},
            }
        },
    }

    let trimmed = trim_trailing(&s);
    if trimmed == "0" {
        return write!(f, "0");
    }
    write!(f, "{}{}", if sign { "-" } else { "" }, trimmed)
}

/// Formats a float in scientific notation with the given number of significant digits, as in
/// `1.5e20` or `-2e-7`.
pub fn fmt_scientific<W: Write>(f: &mut W, n: &Float, digits: usize) -> std::fmt::Result {
    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits), Round::Nearest);
    let Some(exponent) = exponent.filter(|_| n.is_normal()) else {
        return fmt_special(f, n);
    };

    // add decimal point after the first digit, which divides the value by 10
    s.insert(1, '.');

    write!(f, "{}{}e{}",
        if sign { "-" } else { "" },
        trim_trailing(&s),
        exponent - 1,
    )
}

/// Formats a float using decimal or scientific notation, whichever is appropriate for its size.
pub fn fmt<W: Write>(f: &mut W, n: &Float, digits: usize) -> std::fmt::Result {
    if should_use_scientific(n) {
        fmt_scientific(f, n, digits)
    } else {
        fmt_decimal(f, n, digits)
    }
}

//! Exact values of the trigonometric functions at multiples of `pi/6` and `pi/4`.
//!
//! The trigonometric functions for certain angles are well-known, and can be represented exactly
//! in terms of square roots. We take advantage of this by creating a lookup table of these input
//! angles to the outputs of the respective trigonometric functions.
//!
//! The tables are keyed by the angle divided by `2pi`, reduced to the range `[0, 1)`. For
//! example, `sin(pi/6)` is looked up with the key `1/12`, as is `sin(25pi/6)`.

use crate::primitive::frac;
use crate::symbolic::expr::SymExpr;
use once_cell::sync::Lazy;
use rug::Rational;
use std::collections::HashMap;

/// An angle as a fraction of a full turn, and the exact value `(num/den) * sqrt(radicand)`.
type Entry = ((i64, i64), (i64, i64, i64));

/// Values of `sin` around the unit circle.
const SIN_VALUES: [Entry; 16] = [
    ((0, 1), (0, 1, 1)),
    ((1, 12), (1, 2, 1)),
    ((1, 8), (1, 2, 2)),
    ((1, 6), (1, 2, 3)),
    ((1, 4), (1, 1, 1)),
    ((1, 3), (1, 2, 3)),
    ((3, 8), (1, 2, 2)),
    ((5, 12), (1, 2, 1)),
    ((1, 2), (0, 1, 1)),
    ((7, 12), (-1, 2, 1)),
    ((5, 8), (-1, 2, 2)),
    ((2, 3), (-1, 2, 3)),
    ((3, 4), (-1, 1, 1)),
    ((5, 6), (-1, 2, 3)),
    ((7, 8), (-1, 2, 2)),
    ((11, 12), (-1, 2, 1)),
];

/// Values of `tan` around the unit circle. `tan` is undefined at `1/4` and `3/4` of a turn.
const TAN_VALUES: [Entry; 14] = [
    ((0, 1), (0, 1, 1)),
    ((1, 12), (1, 3, 3)),
    ((1, 8), (1, 1, 1)),
    ((1, 6), (1, 1, 3)),
    ((1, 3), (-1, 1, 3)),
    ((3, 8), (-1, 1, 1)),
    ((5, 12), (-1, 3, 3)),
    ((1, 2), (0, 1, 1)),
    ((7, 12), (1, 3, 3)),
    ((5, 8), (1, 1, 1)),
    ((2, 3), (1, 1, 3)),
    ((5, 6), (-1, 1, 3)),
    ((7, 8), (-1, 1, 1)),
    ((11, 12), (-1, 3, 3)),
];

/// Builds the exact value `(num/den) * sqrt(radicand)` in canonical form.
fn exact_value((num, den, radicand): (i64, i64, i64)) -> SymExpr {
    let coefficient = SymExpr::rational(frac(num, den));
    if radicand == 1 || num == 0 {
        coefficient
    } else if num == 1 && den == 1 {
        SymExpr::int(radicand).sqrt()
    } else {
        SymExpr::Mul(vec![coefficient, SymExpr::int(radicand).sqrt()])
    }
}

/// Reduces an angle given as a fraction of a turn to the range `[0, 1)`.
pub(super) fn normalize_turn(turn: Rational) -> Rational {
    let floor = Rational::from(turn.floor_ref());
    turn - floor
}

/// Builds a lookup table, shifting every angle by the given fraction of a turn.
fn build(entries: &[Entry], shift: Rational) -> HashMap<Rational, SymExpr> {
    entries.iter()
        .map(|&((num, den), value)| {
            (normalize_turn(frac(num, den) + &shift), exact_value(value))
        })
        .collect()
}

pub static SIN_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(&SIN_VALUES, Rational::new()));

/// `cos(t) = sin(t + 1/4)`, so the `sin` values are shifted back by a quarter turn.
pub static COS_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(&SIN_VALUES, frac(-1, 4)));

pub static TAN_TABLE: Lazy<HashMap<Rational, SymExpr>> = Lazy::new(|| build(&TAN_VALUES, Rational::new()));

/// Exact values of `asin`, as multiples of `pi`.
pub static ASIN_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| {
    [
        ((0, 1, 1), (0, 1)),
        ((1, 2, 1), (1, 6)),
        ((1, 2, 2), (1, 4)),
        ((1, 2, 3), (1, 3)),
        ((1, 1, 1), (1, 2)),
        ((-1, 2, 1), (-1, 6)),
        ((-1, 2, 2), (-1, 4)),
        ((-1, 2, 3), (-1, 3)),
        ((-1, 1, 1), (-1, 2)),
    ]
        .into_iter()
        .map(|(value, (num, den))| (exact_value(value), frac(num, den)))
        .collect()
});

/// Exact values of `acos`, as multiples of `pi`.
pub static ACOS_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| {
    [
        ((1, 1, 1), (0, 1)),
        ((1, 2, 3), (1, 6)),
        ((1, 2, 2), (1, 4)),
        ((1, 2, 1), (1, 3)),
        ((0, 1, 1), (1, 2)),
        ((-1, 2, 1), (2, 3)),
        ((-1, 2, 2), (3, 4)),
        ((-1, 2, 3), (5, 6)),
        ((-1, 1, 1), (1, 1)),
    ]
        .into_iter()
        .map(|(value, (num, den))| (exact_value(value), frac(num, den)))
        .collect()
});

/// Exact values of `atan`, as multiples of `pi`.
pub static ATAN_TABLE: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| {
    [
        ((0, 1, 1), (0, 1)),
        ((1, 3, 3), (1, 6)),
        ((1, 1, 1), (1, 4)),
        ((1, 1, 3), (1, 3)),
        ((-1, 3, 3), (-1, 6)),
        ((-1, 1, 1), (-1, 4)),
        ((-1, 1, 3), (-1, 3)),
    ]
        .into_iter()
        .map(|(value, (num, den))| (exact_value(value), frac(num, den)))
        .collect()
});

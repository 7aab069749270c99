//! Checking whether a student's answer is mathematically the same as the expected answer.
//!
//! Answers are compared through a chain of strategies, from cheapest to most expensive. Each
//! strategy returns `Some(true)` if it proves the answers equal, `Some(false)` if it can compare
//! them but finds them different, and `None` if it does not apply (for example, because an answer
//! does not parse). The first `Some(true)` wins; anything else falls through to the next strategy.
//!
//! 1. [`textual`]: the answers are the same text, ignoring whitespace, case and glyph spelling.
//! 2. [`symbolic`]: the difference of the answers simplifies to zero.
//! 3. [`exact_rational`]: both answers are fractions or decimals with the same value.
//! 4. [`numeric`]: both answers are decimals within [`CheckOptions::epsilon`] of each other.
//!
//! No strategy panics. If no strategy proves the answers equal, they are not equivalent.

use crate::normalize::{glyph, normalize};
use mathengine_compute::{
    primitive::{int_from_str, rat_from_decimal},
    symbolic::{expr::parse_expr, is_zero, SymExpr},
};
use rug::{ops::Pow, Integer, Rational};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest decimal exponent accepted by [`exact_rational`], so that `1e999999999` is not
/// computed exactly.
const MAX_EXPONENT: u32 = 1000;

/// Options for the equivalence checker.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckOptions {
    /// Whether answers that parse as decimals may differ by up to [`CheckOptions::epsilon`].
    pub numeric_tolerance: bool,

    /// The largest absolute difference allowed by the numeric strategy.
    pub epsilon: f64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            numeric_tolerance: true,
            epsilon: 1e-10,
        }
    }
}

impl CheckOptions {
    /// Wraps the given [`CheckOptions`] into a builder for further customization.
    pub fn into_builder(self) -> CheckOptionsBuilder {
        CheckOptionsBuilder(self)
    }
}

/// Helper struct to build a [`CheckOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CheckOptionsBuilder(CheckOptions);

impl CheckOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the numeric strategy is used. See [`CheckOptions::numeric_tolerance`].
    pub fn numeric_tolerance(mut self, numeric_tolerance: bool) -> Self {
        self.0.numeric_tolerance = numeric_tolerance;
        self
    }

    /// Sets the tolerance of the numeric strategy. See [`CheckOptions::epsilon`].
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.0.epsilon = epsilon;
        self
    }

    /// Builds the [`CheckOptions`].
    pub fn build(self) -> CheckOptions {
        self.0
    }
}

impl From<CheckOptionsBuilder> for CheckOptions {
    fn from(builder: CheckOptionsBuilder) -> Self {
        builder.build()
    }
}

/// Removes whitespace, lowercases and replaces glyphs, including `√`.
fn clean(answer: &str) -> String {
    let mut out = String::with_capacity(answer.len());
    for c in answer.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase) {
        match (c, glyph(c)) {
            ('√', _) => out.push_str("sqrt"),
            (_, Some(replacement)) => out.push_str(replacement),
            (c, None) => out.push(c),
        }
    }
    out
}

/// Compares the answers as text, ignoring whitespace, case and glyph spelling.
pub fn textual(user: &str, correct: &str) -> Option<bool> {
    Some(clean(user) == clean(correct))
}

/// Parses an answer as an expression, after normalizing it.
fn parse_answer(answer: &str) -> Option<SymExpr> {
    let normalized = normalize(answer).ok()?;
    parse_expr(&normalized).ok()
}

/// Compares the answers symbolically: they are equal if their difference simplifies to zero.
pub fn symbolic(user: &str, correct: &str) -> Option<bool> {
    let user = parse_answer(user)?;
    let correct = parse_answer(correct)?;
    Some(is_zero(&(user - correct)))
}

/// Parses a decimal with an optional sign and exponent, such as `-1.5e3`, exactly.
fn parse_decimal(s: &str) -> Option<Rational> {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let (mantissa, exponent) = match unsigned.split_once(|c| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok().filter(|e| e.unsigned_abs() <= MAX_EXPONENT)?),
        None => (unsigned, 0),
    };
    if mantissa.is_empty() || !mantissa.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = rat_from_decimal(mantissa)? * sign;
    let scale = Rational::from(Integer::from(10).pow(exponent.unsigned_abs()));
    Some(if exponent < 0 { value / scale } else { value * scale })
}

/// Parses a fraction `a/b` of integers, or a decimal.
fn parse_fraction(answer: &str) -> Option<Rational> {
    let answer = answer.trim();
    let Some((numer, denom)) = answer.split_once('/') else {
        return parse_decimal(answer);
    };

    let numer = int_from_str(numer.trim())?;
    let denom = int_from_str(denom.trim())?;
    if denom == 0 {
        return None;
    }
    Some(Rational::from((numer, denom)))
}

/// Compares the answers as exact fractions.
pub fn exact_rational(user: &str, correct: &str) -> Option<bool> {
    Some(parse_fraction(user)? == parse_fraction(correct)?)
}

/// Compares the answers as decimals, allowing a difference smaller than `epsilon`.
pub fn numeric(user: &str, correct: &str, epsilon: f64) -> Option<bool> {
    let user = user.trim().parse::<f64>().ok()?;
    let correct = correct.trim().parse::<f64>().ok()?;
    Some((user - correct).abs() < epsilon)
}

/// Checks whether the answers are equivalent with the default [`CheckOptions`].
pub fn check_equivalent(user: &str, correct: &str) -> bool {
    check_equivalent_with(user, correct, &CheckOptions::default())
}

/// Checks whether the answers are equivalent. See the [module-level documentation](self) for the
/// strategies that are tried.
pub fn check_equivalent_with(user: &str, correct: &str, options: &CheckOptions) -> bool {
    let strategies: [(&str, &dyn Fn() -> Option<bool>); 4] = [
        ("textual", &|| textual(user, correct)),
        ("symbolic", &|| symbolic(user, correct)),
        ("exact_rational", &|| exact_rational(user, correct)),
        ("numeric", &|| options.numeric_tolerance.then(|| numeric(user, correct, options.epsilon)).flatten()),
    ];

    for (name, strategy) in strategies {
        let outcome = strategy();
        debug!(target: "mathengine::equivalence", strategy = name, ?outcome, "strategy tried");
        if outcome == Some(true) {
            return true;
        }
    }
    false
}

/// Grades answers with a fixed set of [`CheckOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Grader {
    options: CheckOptions,
}

impl Grader {
    /// Creates a grader with the given options.
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Creates a grader that does not accept approximate decimal answers.
    pub fn strict() -> Self {
        Self::new(CheckOptionsBuilder::new().numeric_tolerance(false).build())
    }

    /// Returns the options of this grader.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks whether the answers are equivalent.
    pub fn check(&self, user: &str, correct: &str) -> bool {
        check_equivalent_with(user, correct, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fraction_and_decimal() {
        assert!(check_equivalent("1/2", "0.5"));
        assert!(check_equivalent("0.5", "1/2"));
    }

    #[test]
    fn factored_and_expanded() {
        assert!(check_equivalent("x^2-1", "(x-1)*(x+1)"));
        assert_eq!(textual("x^2-1", "(x-1)*(x+1)"), Some(false));
        assert_eq!(symbolic("x^2-1", "(x-1)*(x+1)"), Some(true));
    }

    #[test]
    fn textual_cleanup() {
        assert_eq!(textual(" X + 1 ", "x+1"), Some(true));
        assert_eq!(textual("6÷2", "6/2"), Some(true));
        assert_eq!(textual("√4", "sqrt4"), Some(true));
    }

    #[test]
    fn symbolic_needs_both_to_parse() {
        assert_eq!(symbolic("x +", "x"), None);
        assert_eq!(symbolic("2x", "x + x"), Some(true));
        assert_eq!(symbolic("2x", "3x"), Some(false));
    }

    #[test]
    fn exact_fractions() {
        assert_eq!(exact_rational("2/4", "1/2"), Some(true));
        assert_eq!(exact_rational("-3/6", "-0.5"), Some(true));
        assert_eq!(exact_rational("1.5e1", "15"), Some(true));
        assert_eq!(exact_rational("2.5E-1", "1/4"), Some(true));
        assert_eq!(exact_rational("1/3", "0.333"), Some(false));
        assert_eq!(exact_rational("1/0", "1"), None);
        assert_eq!(exact_rational("x", "1"), None);
    }

    #[test]
    fn numeric_tolerance() {
        assert_eq!(numeric("0.30000000000000004", "0.3", 1e-10), Some(true));
        assert_eq!(numeric("0.31", "0.3", 1e-10), Some(false));
        assert_eq!(numeric("abc", "0.3", 1e-10), None);
    }

    #[test]
    fn strict_grader() {
        let lenient = Grader::default();
        let strict = Grader::strict();
        assert!(!strict.options().numeric_tolerance);

        // only the numeric strategy accepts an answer this close
        let user = "0.33333333333333";
        let correct = "0.333333333333333";
        assert!(lenient.check(user, correct));
        assert!(!strict.check(user, correct));
    }

    #[test]
    fn not_equivalent() {
        assert!(!check_equivalent("3", "4"));
        assert!(!check_equivalent("x + 1", "x - 1"));
        assert!(!check_equivalent("", "1"));
        assert!(!check_equivalent("hello", "1/2"));
    }

    #[test]
    fn symmetric_and_reflexive() {
        let answers = ["1/2", "0.5", "x^2 - 1", "(x - 1)(x + 1)", "sqrt(2)", "3", "2x + 2"];
        for a in answers {
            assert!(check_equivalent(a, a));
            for b in answers {
                assert_eq!(check_equivalent(a, b), check_equivalent(b, a), "{} vs {}", a, b);
            }
        }
    }
}

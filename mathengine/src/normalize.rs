//! Rewriting of loosely formatted input into text the parser understands.
//!
//! Students type math in many ways: `2x`, `x**2`, `6÷2×3`, `√16`, `2π`. Normalization is a purely
//! textual pass that runs before parsing:
//!
//! 1. `**` is rewritten to `^`.
//! 2. Common glyphs are replaced with their ASCII spelling (see [`GLYPHS`]). A `√` followed
//!    directly by a number or a name wraps that operand in parentheses: `√16` becomes `sqrt(16)`.
//! 3. A `*` is inserted between a digit and a letter (in either order), between `)` and a digit,
//!    and between a digit and `(`.
//!
//! Step 3 only looks at adjacent characters. It does not know about function names, so `x2`
//! becomes `x*2`, which is what students almost always mean.

use std::fmt;
use tracing::debug;

/// The glyphs that are replaced during normalization, and their replacements. `√` is handled
/// separately, since it may also need to wrap its operand.
pub const GLYPHS: [(char, &str); 5] = [
    ('÷', "/"),
    ('×', "*"),
    ('·', "*"),
    ('−', "-"),
    ('π', "pi"),
];

/// The input was empty, or contained only whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationFailure;

impl fmt::Display for NormalizationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "No se proporcionó expresión")
    }
}

impl std::error::Error for NormalizationFailure {}

/// Returns the replacement for the given glyph, if it is in [`GLYPHS`].
pub(crate) fn glyph(c: char) -> Option<&'static str> {
    GLYPHS.iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, replacement)| *replacement)
}

/// Replaces every glyph in [`GLYPHS`] and every `√` in the input.
fn replace_glyphs(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '√' {
            match glyph(c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
            continue;
        }

        out.push_str("sqrt");
        match chars.peek() {
            Some('π') => {
                chars.next();
                out.push_str("(pi)");
            },
            Some(next) if next.is_ascii_digit() || *next == '.' => {
                out.push('(');
                while let Some(digit) = chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
                    out.push(digit);
                }
                out.push(')');
            },
            Some(next) if next.is_ascii_alphabetic() => {
                out.push('(');
                while let Some(letter) = chars.next_if(char::is_ascii_alphabetic) {
                    out.push(letter);
                }
                out.push(')');
            },
            _ => {},
        }
    }

    out
}

/// Returns true if a `*` belongs between the two characters.
fn needs_multiplication(prev: char, next: char) -> bool {
    (prev.is_ascii_digit() && next.is_ascii_alphabetic())
        || (prev.is_ascii_alphabetic() && next.is_ascii_digit())
        || (prev == ')' && next.is_ascii_digit())
        || (prev.is_ascii_digit() && next == '(')
}

/// Inserts `*` at every implicit multiplication found by [`needs_multiplication`].
fn insert_multiplication(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev = None;
    for c in input.chars() {
        if prev.map_or(false, |prev| needs_multiplication(prev, c)) {
            out.push('*');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Normalizes the input so that it can be parsed. See the [module-level documentation](self) for
/// the rewrites that are applied.
///
/// Malformed input is passed through; it is reported when it is parsed.
pub fn normalize(raw: &str) -> Result<String, NormalizationFailure> {
    if raw.trim().is_empty() {
        return Err(NormalizationFailure);
    }

    let normalized = insert_multiplication(&replace_glyphs(&raw.replace("**", "^")));
    debug!(target: "mathengine::normalize", raw, %normalized, "input normalized");
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).unwrap()
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), Err(NormalizationFailure));
        assert_eq!(normalize("  \t "), Err(NormalizationFailure));
        assert_eq!(NormalizationFailure.to_string(), "No se proporcionó expresión");
    }

    #[test]
    fn exponent_spelling() {
        assert_eq!(norm("x**2 + 1"), "x^2 + 1");
        assert_eq!(norm("x^2"), "x^2");
    }

    #[test]
    fn glyphs() {
        assert_eq!(norm("6÷2×3"), "6/2*3");
        assert_eq!(norm("2·3 − 1"), "2*3 - 1");
        assert_eq!(norm("2π"), "2*pi");
    }

    #[test]
    fn square_root_wraps_operand() {
        assert_eq!(norm("√16"), "sqrt(16)");
        assert_eq!(norm("√x + 1"), "sqrt(x) + 1");
        assert_eq!(norm("√(x + 1)"), "sqrt(x + 1)");
        assert_eq!(norm("√π"), "sqrt(pi)");
        assert_eq!(norm("3√2"), "3*sqrt(2)");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(norm("2x + 3"), "2*x + 3");
        assert_eq!(norm("x2"), "x*2");
        assert_eq!(norm("3(x + 1)"), "3*(x + 1)");
        assert_eq!(norm("(x + 1)2"), "(x + 1)*2");
        assert_eq!(norm("(x - 1)(x + 1)"), "(x - 1)(x + 1)");
    }

    #[test]
    fn malformed_passes_through() {
        assert_eq!(norm("2 + + )"), "2 + + )");
    }
}

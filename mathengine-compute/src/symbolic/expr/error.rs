//! Errors that can occur while turning a parsed expression into a [`SymExpr`].
//!
//! [`SymExpr`]: super::SymExpr

use ariadne::Fmt;
use mathengine_attrs::ErrorKind;
use mathengine_error::{ErrorKind, EXPR};

/// The names of every function a student can call, used to suggest corrections.
pub const KNOWN_FUNCTIONS: [&str; 14] = [
    "sqrt", "exp", "log", "ln", "abs",
    "sin", "cos", "tan",
    "asin", "acos", "atan",
    "arcsin", "arccos", "arctan",
];

/// The function is not one of the known functions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function does not exist", name),
    labels = ["this function"],
    help = if suggestions.is_empty() {
        format!(
            "the available functions are: {}",
            KNOWN_FUNCTIONS.join(", ")
        )
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UnknownFunction {
    /// The name of the function that was called.
    pub name: String,

    /// Known functions with a similar name.
    pub suggestions: Vec<String>,
}

impl UnknownFunction {
    /// Creates the error for the given name, with suggestions of known functions that are at most
    /// two edits away.
    pub fn new(name: &str) -> Self {
        let suggestions = KNOWN_FUNCTIONS.iter()
            .filter(|known| levenshtein::levenshtein(name, known) <= 2)
            .map(|known| known.to_string())
            .collect();
        Self { name: name.to_owned(), suggestions }
    }
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for the `{}` function", name),
    labels = ["this function call", ""],
    help = format!(
        "the `{}` function takes {} argument(s); there are {} argument(s) provided here",
        name.fg(EXPR),
        expected,
        given,
    ),
)]
pub struct WrongArgumentCount {
    /// The name of the function that was called.
    pub name: String,

    /// A description of how many arguments the function takes, such as `1` or `1 or 2`.
    pub expected: &'static str,

    /// The number of arguments that were given.
    pub given: usize,
}

/// A number literal could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid number", literal),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The literal as written.
    pub literal: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn suggestions_for_typo() {
        let err = UnknownFunction::new("sine");
        assert!(err.suggestions.contains(&"sin".to_string()));
        assert_eq!(err.message(), "the `sine` function does not exist");
    }

    #[test]
    fn no_suggestions_for_unrelated_name() {
        let err = UnknownFunction::new("foobarbaz");
        assert!(err.suggestions.is_empty());
    }
}

use ariadne::Fmt;
use mathengine_attrs::ErrorKind;
use mathengine_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// Signals the binary-expression loop to stop. Never reaches a caller of the parser.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "internal parser error",
    labels = ["here"],
    help = "this is a bug in the parser"
)]
pub struct NonFatal;

/// The input ended where an operand was still needed, as in `2 +`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("an {} is missing here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was followed by more input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("this {} does not continue the one before it", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// A token that cannot appear at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    pub expected: &'static [TokenKind],

    pub found: TokenKind,
}

/// A parenthesis without its partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// True for a stray `(`, false for a stray `)`.
    pub opening: bool,
}

/// `()` with nothing inside.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// More than one `=` appeared at the top level, as in `a = b = c`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "chained equations are not supported",
    labels = ["the first equals sign", "this equals sign starts a second equation"],
    help = format!("write a single {}, such as `2x + 3 = 7`", "equation".fg(EXPR)),
)]
pub struct ChainedEquation;

/// A comparison operator other than `=` was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the relation `{}` is not supported", relation),
    labels = ["this operator"],
    help = format!("only {} with a single `=` can be solved", "equations".fg(EXPR)),
)]
pub struct UnsupportedRelation {
    /// The operator as written.
    pub relation: String,
}

//! Tokenizer and parser for the math notation typed by students: numbers, variables, the four
//! arithmetic operators, exponentiation (`^` or `**`), parentheses, function calls and a single
//! top-level `=` for equations.
//!
//! ```
//! use mathengine_parser::parser::{ast::Input, Parser};
//!
//! let input = Parser::new("2x + 3 = 7").try_parse_full::<Input>().unwrap();
//! assert!(matches!(input, Input::Equation(_)));
//! ```

pub mod parser;
pub mod tokenizer;

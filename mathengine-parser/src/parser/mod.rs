pub mod ast;
pub mod error;
pub mod fmt;
pub mod token;

use error::{kind, Error};
use mathengine_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for math input. This is the type to use to parse an arbitrary piece of
/// input into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Set the cursor of this parser to the cursor of another parser. Both parsers must have been
    /// created from the same source.
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if token.is_whitespace() {
                self.cursor += 1;
            } else {
                break;
            }
        }
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns every non-whitespace token in the input, regardless of the cursor position.
    pub fn all_tokens(&self) -> impl Iterator<Item = &Token<'source>> {
        self.tokens.iter().filter(|token| !token.is_whitespace())
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = || {
            let value = T::parse(self)?;
            predicate(&value, self)?;
            Ok(value)
        };

        match compute() {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser (trailing whitespace is allowed); if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();
        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(kind::UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(self.error(kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        equation::{Equation, Input},
        expr::Expr,
        literal::{LitInt, LitFloat, LitSym, Literal},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn op(kind: BinOpKind, implicit: bool, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit, span }
    }

    fn parse_err(source: &str) -> Error {
        Parser::new(source).try_parse_full::<Input>().unwrap_err()
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_string(),
            span: 0..4,
        })));
    }

    #[test]
    fn trailing_whitespace() {
        let mut parser = Parser::new("  x   ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, sym("x", 2..3));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3 - 2 - 1");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 0..1)),
                op: op(BinOpKind::Sub, false, 2..3),
                rhs: Box::new(int("2", 4..5)),
                span: 0..5,
            })),
            op: op(BinOpKind::Sub, false, 6..7),
            rhs: Box::new(int("1", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let mut parser = Parser::new("2^3^4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: op(BinOpKind::Exp, false, 1..2),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 2..3)),
                op: op(BinOpKind::Exp, false, 3..4),
                rhs: Box::new(int("4", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1 + 2 * 3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: op(BinOpKind::Add, false, 2..3),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: op(BinOpKind::Mul, false, 6..7),
                rhs: Box::new(int("3", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn double_star_exponent() {
        let mut parser = Parser::new("x**2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(sym("x", 0..1)),
            op: op(BinOpKind::Exp, false, 1..3),
            rhs: Box::new(int("2", 3..4)),
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("2x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: op(BinOpKind::Mul, true, 1..1),
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, false, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn implicit_multiplication_paren() {
        let mut parser = Parser::new("(x - 1)(x + 1)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let Expr::Binary(binary) = expr else { panic!("expected a product") };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(binary.op.implicit);
        assert!(matches!(*binary.lhs, Expr::Paren(_)));
        assert!(matches!(*binary.rhs, Expr::Paren(_)));
    }

    #[test]
    fn implicit_multiplication_after_power() {
        let mut parser = Parser::new("2^3x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr.to_string(), "2^3x");
        let Expr::Binary(binary) = expr else { panic!("expected a product") };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(matches!(*binary.lhs, Expr::Binary(Binary { op: BinOp { kind: BinOpKind::Exp, .. }, .. })));
    }

    #[test]
    fn unary_binds_looser_than_exp() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: op(BinOpKind::Exp, false, 2..3),
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn unary_binds_tighter_than_mul() {
        let mut parser = Parser::new("-2*3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        let Expr::Binary(binary) = expr else { panic!("expected a product") };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(matches!(*binary.lhs, Expr::Unary(_)));
    }

    #[test]
    fn parenthesized() {
        let mut parser = Parser::new("(1 + 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Paren(Paren {
            expr: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("1", 1..2)),
                op: op(BinOpKind::Add, false, 3..4),
                rhs: Box::new(int("2", 5..6)),
                span: 1..6,
            })),
            span: 0..7,
        }));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("log(x, 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![sym("x", 4..5), int("2", 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn equation() {
        let mut parser = Parser::new("2x + 3 = 7");
        let input = parser.try_parse_full::<Input>().unwrap();

        let Input::Equation(Equation { lhs, rhs, span }) = input else {
            panic!("expected an equation");
        };
        assert_eq!(lhs.to_string(), "2x+3");
        assert_eq!(rhs, int("7", 9..10));
        assert_eq!(span, 0..10);
    }

    #[test]
    fn expression_input() {
        let mut parser = Parser::new("x^2 - 4");
        let input = parser.try_parse_full::<Input>().unwrap();

        assert!(matches!(input, Input::Expr(_)));
    }

    #[test]
    fn chained_equation() {
        let err = parse_err("a = b = c");
        assert_eq!(err.message(), "chained equations are not supported");
        assert_eq!(err.spans, vec![2..3, 6..7]);
    }

    #[test]
    fn unsupported_relation() {
        let err = parse_err("x + 1 >= 3");
        assert_eq!(err.message(), "the relation `>=` is not supported");
        assert_eq!(err.spans, vec![6..8]);
    }

    #[test]
    fn nested_equals_is_plain_error() {
        let err = parse_err("(x = 3)");
        assert_eq!(err.message(), "unexpected token");
    }

    #[test]
    fn unclosed_paren() {
        let err = parse_err("(x + 1");
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_close_paren() {
        let err = parse_err("x + 1)");
        assert_eq!(err.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn empty_paren() {
        let err = parse_err("2 * ()");
        assert_eq!(err.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn dangling_operator() {
        let err = parse_err("2 +");
        assert_eq!(err.message(), "unexpected end of input");
    }

    #[test]
    fn empty_side_of_equation() {
        let err = parse_err("= 4");
        assert_eq!(err.message(), "unexpected token");
    }

    #[test]
    fn unknown_symbol() {
        let err = parse_err("2 + $");
        assert_eq!(err.message(), "unexpected token");
        assert_eq!(err.spans, vec![4..5]);
    }
}

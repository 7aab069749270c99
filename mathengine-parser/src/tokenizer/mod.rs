pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Characters the lexer cannot match at all are kept as [`TokenKind::Symbol`] tokens, so the
/// parser can point at them.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn both_exponent_spellings() {
        compare_tokens(
            "x**2^3*y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "3"),
                (TokenKind::Mul, "*"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn decimals() {
        compare_tokens(
            "0.5+.25-3.",
            [
                (TokenKind::Float, "0.5"),
                (TokenKind::Add, "+"),
                (TokenKind::Float, ".25"),
                (TokenKind::Sub, "-"),
                (TokenKind::Float, "3."),
            ],
        );
    }

    #[test]
    fn equation_and_relations() {
        compare_tokens(
            "2x = 7 <= 8 == $",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "7"),
                (TokenKind::Whitespace, " "),
                (TokenKind::LessEq, "<="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "8"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Eq, "=="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("sqrt(x)");
        let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Name, TokenKind::OpenParen, TokenKind::Name, TokenKind::CloseParen]);
        assert_eq!(tokens[2].span, 5..6);
    }
}

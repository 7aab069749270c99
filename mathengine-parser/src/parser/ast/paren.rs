use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        fmt::Latex,
        token::OpenParen,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses the closing parenthesis matching the opening parenthesis at `open_span`, returning its
/// span.
///
/// Running out of input reports the opening parenthesis as unclosed; any other token is reported
/// as unexpected.
pub(crate) fn close_paren(
    input: &mut Parser,
    open_span: &Range<usize>,
    expected: &'static [TokenKind],
) -> Result<Range<usize>, Error> {
    let next = input.peek_token().map(|token| (token.kind, token.span.clone()));
    match next {
        Some((TokenKind::CloseParen, _)) => Ok(input.next_token()?.span),
        Some((found, span)) => Err(Error::new(vec![span], kind::UnexpectedToken {
            expected,
            found,
        })),
        None => Err(Error::new(vec![open_span.clone()], kind::UnclosedParenthesis { opening: true })),
    }
}

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        if matches!(input.peek_token(), Some(token) if token.kind == TokenKind::CloseParen) {
            let close = input.next_token()?;
            return Err(Error::new(vec![open_paren.span.start..close.span.end], kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_span = close_paren(input, &open_paren.span, &[TokenKind::CloseParen])?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_span.end,
        })
    }
}

impl std::fmt::Display for Paren {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\left(")?;
        self.expr.fmt_latex(f)?;
        write!(f, "\\right)")
    }
}

use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        fmt::Latex,
        token::Assign,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An equation with exactly one top-level `=`, such as `2x + 3 = 7`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_latex(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f)
    }
}

/// A complete piece of user input: either a bare expression or an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Input {
    /// An expression to simplify or evaluate, such as `x^2 - 4`.
    Expr(Expr),

    /// An equation to solve or verify, such as `2x + 3 = 7`.
    Equation(Equation),
}

impl Input {
    /// Returns the span of the input.
    pub fn span(&self) -> Range<usize> {
        match self {
            Input::Expr(expr) => expr.span(),
            Input::Equation(equation) => equation.span.clone(),
        }
    }
}

impl Parse for Input {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Some(token) = input.all_tokens().find(|token| token.kind.is_relation()) {
            return Err(Error::new(vec![token.span.clone()], kind::UnsupportedRelation {
                relation: token.lexeme.to_owned(),
            }));
        }

        let lhs = input.try_parse::<Expr>()?;
        let Ok(assign) = input.try_parse::<Assign>() else {
            return Ok(Input::Expr(lhs));
        };

        let rhs = input.try_parse::<Expr>()?;
        if matches!(input.peek_token(), Some(token) if token.kind == TokenKind::Assign) {
            let second = input.next_token()?;
            return Err(Error::new(vec![assign.span, second.span], kind::ChainedEquation));
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Input::Equation(Equation { lhs, rhs, span }))
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Input::Expr(expr) => expr.fmt(f),
            Input::Equation(equation) => equation.fmt(f),
        }
    }
}

impl Latex for Input {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Input::Expr(expr) => expr.fmt_latex(f),
            Input::Equation(equation) => equation.fmt_latex(f),
        }
    }
}

use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::{kind::NonFatal, Error},
    fmt::{fmt_pow, Latex},
    token::op::{Associativity, BinOp, BinOpKind, Precedence},
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An operator between two operands: either written, or implied by juxtaposition (`2x`,
/// `3(x + 1)`).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Joiner {
    Written(BinOp),
    Juxtaposition,
}

impl Joiner {
    fn precedence(&self) -> Precedence {
        match self {
            Joiner::Written(op) => op.precedence(),
            Joiner::Juxtaposition => Precedence::Factor,
        }
    }

    /// Builds the node `lhs op rhs`. A juxtaposition becomes an implicit `*` spanning the gap
    /// between the operands.
    fn join(self, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        let op = match self {
            Joiner::Written(op) => op,
            Joiner::Juxtaposition => BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..rhs.span().start,
            },
        };
        Expr::Binary(Binary { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span })
    }
}

/// Two operands joined by an operator, such as `2x + 3` or `x^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,
    pub span: Range<usize>,
}

impl Binary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Extends `rhs` with every following operator that binds tighter than `op` (or that is
    /// right-associative), then joins it to `lhs`.
    ///
    /// In `1 + 2 * 3`, `rhs` starts as `2`; the `*` binds tighter than `+`, so `rhs` grows to
    /// `2 * 3` before `1 + (2 * 3)` is built. When no operator follows but an operand does, as in
    /// `1 + 2x`, the operand is taken as an implicit multiplication of `rhs`.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: Joiner, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            let mut ahead = input.clone();
            match ahead.try_parse::<BinOp>() {
                Ok(next) if next.precedence() > precedence || next.associativity() == Associativity::Right => {
                    rhs = Self::parse_expr(input, rhs, next.precedence())?.0;
                },
                // weaker or equal and left-associative: the caller picks it up
                Ok(_) => break,
                Err(_) => {
                    // juxtaposition cannot bind tighter than a `*` or `^` that is already open
                    if precedence >= Precedence::Factor {
                        break;
                    }

                    let (extended, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                    rhs = extended;
                    if !changed {
                        break;
                    }
                },
            }
        }

        Ok(op.join(lhs, rhs))
    }

    /// Parses as many `op rhs` pairs after `lhs` as bind at least as tightly as `precedence`.
    ///
    /// Also returns whether anything was consumed; [`Self::complete_rhs`] uses it to stop looking
    /// for implicit multiplications.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut ahead = input.clone();
            let written = ahead.try_parse_then::<BinOp, _>(|op, input| {
                if op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(NonFatal))
                }
            });

            let joiner = match written {
                Ok(op) => Joiner::Written(op),
                Err(_) if Precedence::Factor >= precedence => {
                    // a weaker operator ends the loop; only a missing operator can be a
                    // juxtaposition
                    if ahead.try_parse::<BinOp>().is_ok() {
                        break;
                    }
                    match Unary::parse_or_lower(&mut ahead) {
                        Ok(rhs) if rhs.is_implicit_mul_target() => {
                            input.set_cursor(&ahead);
                            lhs = Self::complete_rhs(input, lhs, Joiner::Juxtaposition, rhs)?;
                            changed = true;
                            continue;
                        },
                        _ => break,
                    }
                },
                Err(_) => break,
            };

            input.set_cursor(&ahead);
            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, joiner, rhs)?;
            changed = true;
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => write!(
                f,
                "\\frac{{{}}}{{{}}}",
                self.lhs.innermost().as_display(),
                self.rhs.innermost().as_display(),
            ),
            _ => write!(f, "{}{}{}", self.lhs.as_display(), self.op.as_display(), self.rhs.as_display()),
        }
    }
}

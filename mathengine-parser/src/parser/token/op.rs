//! Operator tokens: the prefix `-` and the arithmetic binary operators.

use crate::{
    parser::{
        error::{kind, Error},
        fmt::Latex,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a chain of operators with the same precedence groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,

    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

/// Binding strength of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Accepts any operator. Used to start parsing a full expression.
    Any,

    /// `+` and `-`, which separate terms.
    Term,

    /// `*`, `/` and implicit multiplication, which separate factors.
    Factor,

    /// Prefix `-`. Binds weaker than `^`, so `-x^2` is `-(x^2)`.
    Neg,

    /// `^`, also written `**`.
    Exp,
}

/// The only prefix operator students write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

/// A prefix operator and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        match self.kind {
            UnaryOpKind::Neg => Precedence::Neg,
        }
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        if token.kind != TokenKind::Sub {
            return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Sub],
                found: token.kind,
            }));
        }

        Ok(Self { kind: UnaryOpKind::Neg, span: token.span })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-")
    }
}

impl Latex for UnaryOp {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "-")
    }
}

/// An arithmetic binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    const TOKENS: [(TokenKind, BinOpKind); 5] = [
        (TokenKind::Exp, BinOpKind::Exp),
        (TokenKind::Mul, BinOpKind::Mul),
        (TokenKind::Div, BinOpKind::Div),
        (TokenKind::Add, BinOpKind::Add),
        (TokenKind::Sub, BinOpKind::Sub),
    ];

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// The operator as written in plain text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }
}

/// A binary operator and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,

    /// True for a multiplication the parser inserted, as in `2x`. Implicit operators render as
    /// nothing.
    pub implicit: bool,

    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = BinOpKind::TOKENS.iter()
            .find(|(token_kind, _)| *token_kind == token.kind)
            .map(|(_, kind)| *kind);

        match kind {
            Some(kind) => Ok(Self { kind, implicit: false, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Exp, TokenKind::Mul, TokenKind::Div, TokenKind::Add, TokenKind::Sub],
                found: token.kind,
            })),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.implicit {
            return Ok(());
        }
        f.write_str(self.kind.symbol())
    }
}

impl Latex for BinOp {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            _ if self.implicit => Ok(()),
            BinOpKind::Mul => f.write_str("\\cdot "),
            kind => f.write_str(kind.symbol()),
        }
    }
}

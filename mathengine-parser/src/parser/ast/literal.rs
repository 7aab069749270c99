use crate::parser::{
    error::Error,
    fmt::Latex,
    token::{Float, Int, Name},
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Declares a numeric literal that keeps its digits exactly as written, so that `0.50` and `.5`
/// reach the compute crate untouched.
macro_rules! numeric_literal {
    ($(#[$doc:meta])* $name:ident from $token:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            pub value: String,
            pub span: Range<usize>,
        }

        impl Parse for $name {
            fn parse(input: &mut Parser) -> Result<Self, Error> {
                let token = input.try_parse::<$token>()?;
                Ok(Self { value: token.lexeme, span: token.span })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.value)
            }
        }

        impl Latex for $name {
            fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.value)
            }
        }
    };
}

numeric_literal!(
    /// A run of digits, such as `42`.
    LitInt from Int
);

numeric_literal!(
    /// A decimal, such as `0.5`, `.25` or `3.`.
    LitFloat from Float
);

/// A name: a variable, a constant such as `pi`, or a function name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    pub name: String,
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        Ok(Self { name: name.lexeme, span: name.span })
    }
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Latex for LitSym {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name.as_str() {
            "pi" | "theta" | "alpha" | "beta" | "phi" => write!(f, "\\{}", self.name),
            name => f.write_str(name),
        }
    }
}

/// A single-token value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Integer(LitInt),
    Float(LitFloat),
    Symbol(LitSym),
}

impl Literal {
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(LitInt { span, .. })
            | Literal::Float(LitFloat { span, .. })
            | Literal::Symbol(LitSym { span, .. }) => span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitInt>().map(Literal::Integer)
            .or_else(|_| input.try_parse::<LitFloat>().map(Literal::Float))
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt(f),
            Literal::Float(float) => float.fmt(f),
            Literal::Symbol(name) => name.fmt(f),
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(int) => int.fmt_latex(f),
            Literal::Float(float) => float.fmt_latex(f),
            Literal::Symbol(name) => name.fmt_latex(f),
        }
    }
}

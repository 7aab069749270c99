use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren::close_paren},
        error::Error,
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

/// A function call, such as `log(x, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns a set of two spans, where the first is the span of the function name (with the
    /// opening parenthesis) and the second is the span of the closing parenthesis.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        [
            self.name.span.start..self.paren_span.start + 1,
            self.paren_span.end - 1..self.paren_span.end,
        ]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let mut args = Vec::new();

        let close_span = if matches!(input.peek_token(), Some(token) if token.kind == TokenKind::CloseParen) {
            input.next_token()?.span
        } else {
            loop {
                args.push(input.try_parse::<Expr>()?);
                if matches!(input.peek_token(), Some(token) if token.kind == TokenKind::Comma) {
                    input.next_token()?;
                    continue;
                }
                break close_paren(input, &open_paren.span, &[TokenKind::Comma, TokenKind::CloseParen])?;
            }
        };

        // use `name` here before it is moved into the struct
        let span = name.span.start..close_span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_span.end,
        })
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.name.fmt(f)?;
        write!(f, "(")?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                arg.fmt(f)?;
                write!(f, ", ")?;
            }
            last.fmt(f)?;
        }
        write!(f, ")")
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.name.name.as_str(), self.args.as_slice()) {
            ("sqrt", [arg]) => write!(f, "\\sqrt{{{}}}", arg.innermost().as_display()),
            ("abs", [arg]) => write!(f, "\\left|{}\\right|", arg.innermost().as_display()),
            ("log", [arg, base]) => write!(
                f,
                "\\log_{{{}}}\\left({}\\right)",
                base.innermost().as_display(),
                arg.innermost().as_display(),
            ),
            (name, args) => {
                match name {
                    "sin" | "cos" | "tan" | "log" | "ln" | "exp" => write!(f, "\\{}", name)?,
                    "asin" | "acos" | "atan" => write!(f, "\\arc{}", &name[1..])?,
                    _ => write!(f, "\\mathrm{{{}}}", name)?,
                }
                write!(f, "\\left(")?;
                if let Some((last, args)) = args.split_last() {
                    for arg in args {
                        arg.fmt_latex(f)?;
                        write!(f, ", ")?;
                    }
                    last.fmt_latex(f)?;
                }
                write!(f, "\\right)")
            },
        }
    }
}

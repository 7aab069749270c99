use std::fmt::{Display, Formatter, Result};
use super::{ast::expr::Expr, token::op::BinOpKind};

/// Rendering as LaTeX, for display in the browser.
pub trait Latex {
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Borrows the value as something that [`Display`]s its LaTeX form.
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// See [`Latex::as_display`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Writes `left^{right}` as LaTeX, wrapping a base that is negated or built from an operator.
pub fn fmt_pow(f: &mut Formatter, left: &Expr, right: &Expr) -> Result {
    let base = left.innermost();
    let needs_parens = match base {
        Expr::Unary(_) => true,
        Expr::Binary(binary) => binary.op.precedence() <= BinOpKind::Exp.precedence(),
        _ => false,
    };

    if needs_parens {
        write!(f, "\\left({}\\right)", base.as_display())?;
    } else {
        base.fmt_latex(f)?;
    }
    write!(f, "^{{{}}}", right.innermost().as_display())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::parser::{ast::equation::Input, Parser};

    #[test]
    fn fmt_display() {
        let mut parser = Parser::new("3x + 6");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let fmt = format!("{}", expr);

        assert_eq!(fmt, "3x+6");
    }

    #[test]
    fn fmt_display_equation() {
        let mut parser = Parser::new("x**2 + 5x + 6 = 0");
        let input = parser.try_parse_full::<Input>().unwrap();
        let fmt = format!("{}", input);

        assert_eq!(fmt, "x^2+5x+6 = 0");
    }

    #[test]
    fn fmt_display_nested() {
        let mut parser = Parser::new("x^(3(x + 6))^9");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let fmt = format!("{}", expr);

        assert_eq!(fmt, "x^(3(x+6))^9");
    }

    #[test]
    fn fmt_latex() {
        let mut parser = Parser::new("sqrt(3x)^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let fmt = format!("{}", expr.as_display());

        assert_eq!(fmt, "\\sqrt{3x}^{2}");
    }

    #[test]
    fn fmt_latex_fractions() {
        let mut parser = Parser::new("1/x + 5/x^2 = sin(pi)");
        let input = parser.try_parse_full::<Input>().unwrap();
        let fmt = format!("{}", input.as_display());

        assert_eq!(fmt, "\\frac{1}{x}+\\frac{5}{x^{2}} = \\sin\\left(\\pi\\right)");
    }

    #[test]
    fn fmt_latex_negative_base() {
        let mut parser = Parser::new("(-2)^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let fmt = format!("{}", expr.as_display());

        assert_eq!(fmt, "\\left(-2\\right)^{2}");
    }
}

use crate::numerical::fmt::FloatFormatter;
use mathengine_parser::parser::fmt::Latex;
use rug::Rational;
use std::fmt::{self, Formatter};
use super::{
    display::{split_product, Coefficient, Parts},
    order::cmp_terms,
    Constant,
    Func,
    Primary,
    SymExpr,
};

impl Latex for Constant {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Pi => write!(f, "\\pi"),
            Self::E => write!(f, "e"),
        }
    }
}

impl Latex for Func {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Sin => write!(f, "\\sin"),
            Self::Cos => write!(f, "\\cos"),
            Self::Tan => write!(f, "\\tan"),
            Self::Asin => write!(f, "\\arcsin"),
            Self::Acos => write!(f, "\\arccos"),
            Self::Atan => write!(f, "\\arctan"),
            Self::Log => write!(f, "\\log"),
            Self::Abs => write!(f, "\\operatorname{{abs}}"),
        }
    }
}

/// Formats a rational number, using `\frac` if it is not an integer.
fn fmt_rational(f: &mut Formatter, n: &Rational) -> fmt::Result {
    if *n.denom() == 1 {
        write!(f, "{}", n.numer())
    } else if n.cmp0().is_lt() {
        write!(f, "-\\frac{{{}}}{{{}}}", Rational::from(n.abs_ref()).numer(), n.denom())
    } else {
        write!(f, "\\frac{{{}}}{{{}}}", n.numer(), n.denom())
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Rational(n) => fmt_rational(f, n),
            Self::Float(n) => write!(f, "{}", FloatFormatter::new(n)),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Const(c) => c.fmt_latex(f),
            Self::Call(Func::Abs, arg) => write!(f, "\\left|{}\\right|", arg.as_display()),
            Self::Call(func, arg) => write!(f, "{}\\left({}\\right)", func.as_display(), arg.as_display()),
        }
    }
}

/// Returns true if the base of a power must be wrapped in parentheses.
fn base_needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
        SymExpr::Primary(Primary::Rational(n)) => n.cmp0().is_lt() || *n.denom() != 1,
        SymExpr::Primary(Primary::Float(n)) => n.is_sign_negative(),
        SymExpr::Primary(Primary::Call(..)) => true,
        _ => false,
    }
}

fn fmt_power(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
    if exp.as_rational().map_or(false, |n| *n == Rational::from((1, 2))) {
        return write!(f, "\\sqrt{{{}}}", base.as_display());
    }

    if base_needs_parens(base) {
        write!(f, "\\left({}\\right)", base.as_display())?;
    } else {
        base.fmt_latex(f)?;
    }
    write!(f, "^{{{}}}", exp.as_display())
}

/// Joins the coefficient and factors of one side of a fraction. `\cdot` is only needed when a
/// digit would otherwise run into another digit.
fn juxtapose(coefficient: Option<String>, factors: &[SymExpr]) -> String {
    let mut out = coefficient.unwrap_or_default();
    for factor in factors {
        let item = match factor {
            SymExpr::Add(_) => format!("\\left({}\\right)", factor.as_display()),
            factor => factor.as_display().to_string(),
        };
        let ends_with_digit = out.chars().last().map_or(false, |c| c.is_ascii_digit());
        let starts_with_digit = item.chars().next().map_or(false, |c| c.is_ascii_digit());
        if ends_with_digit && starts_with_digit {
            out.push_str("\\cdot ");
        }
        out.push_str(&item);
    }

    if out.is_empty() {
        out.push('1');
    }
    out
}

fn fmt_parts(f: &mut Formatter, parts: &Parts, with_sign: bool) -> fmt::Result {
    if with_sign && parts.negative {
        write!(f, "-")?;
    }

    let numer_coeff = parts.numer_coeff.as_ref().map(|c| match c {
        Coefficient::Integer(n) => n.to_string(),
        Coefficient::Float(n) => FloatFormatter::new(n).to_string(),
    });
    let numer = juxtapose(numer_coeff, &parts.numer);

    if parts.denom.is_empty() && parts.denom_coeff.is_none() {
        write!(f, "{}", numer)
    } else {
        let denom = juxtapose(parts.denom_coeff.as_ref().map(ToString::to_string), &parts.denom);
        write!(f, "\\frac{{{}}}{{{}}}", numer, denom)
    }
}

/// Returns true if a term is written with a leading minus sign.
fn is_negative_term(term: &SymExpr) -> bool {
    match term {
        SymExpr::Mul(_) => split_product(term).negative,
        term => term.is_negative_number(),
    }
}

fn fmt_term(f: &mut Formatter, term: &SymExpr, magnitude: bool) -> fmt::Result {
    match term {
        SymExpr::Add(_) => write!(f, "\\left({}\\right)", term.as_display()),
        SymExpr::Primary(Primary::Rational(n)) if magnitude => fmt_rational(f, &Rational::from(n.abs_ref())),
        SymExpr::Primary(Primary::Float(n)) if magnitude => write!(f, "{}", FloatFormatter::new(&*n.as_abs())),
        SymExpr::Mul(_) if magnitude => fmt_parts(f, &split_product(term), false),
        term => term.fmt_latex(f),
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) => {
                let mut terms = terms.iter().collect::<Vec<_>>();
                terms.sort_by(|lhs, rhs| cmp_terms(lhs, rhs));

                for (i, term) in terms.into_iter().enumerate() {
                    if i == 0 {
                        fmt_term(f, term, false)?;
                    } else if is_negative_term(term) {
                        write!(f, " - ")?;
                        fmt_term(f, term, true)?;
                    } else {
                        write!(f, " + ")?;
                        fmt_term(f, term, false)?;
                    }
                }
                Ok(())
            },
            Self::Mul(_) => fmt_parts(f, &split_product(self), true),
            Self::Exp(_, exp) if exp.is_negative_number() => {
                fmt_parts(f, &split_product(self), true)
            },
            Self::Exp(base, exp) => fmt_power(f, base, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::frac;
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(expr: &SymExpr) -> String {
        expr.as_display().to_string()
    }

    #[test]
    fn fractions() {
        assert_eq!(latex(&SymExpr::rational(frac(-3, 4))), "-\\frac{3}{4}");

        let expr = SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::rational(frac(1, 2)),
            SymExpr::symbol("y").recip(),
        ]);
        assert_eq!(latex(&expr), "\\frac{x}{2y}");
    }

    #[test]
    fn roots_and_exponentials() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(3).sqrt()]);
        assert_eq!(latex(&expr), "2\\sqrt{3}");
        assert_eq!(latex(&parse_expr("exp(x)").unwrap()), "e^{x}");
    }

    #[test]
    fn cdot_between_digits() {
        let expr = SymExpr::Mul(vec![
            SymExpr::int(3),
            SymExpr::pow(SymExpr::int(2), SymExpr::symbol("x")),
        ]);
        assert_eq!(latex(&expr), "3\\cdot 2^{x}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex(&parse_expr("sin(pi)").unwrap()), "\\sin\\left(\\pi\\right)");
        assert_eq!(latex(&parse_expr("arcsin(x)").unwrap()), "\\arcsin\\left(x\\right)");
        assert_eq!(latex(&parse_expr("abs(x)").unwrap()), "\\left|x\\right|");
    }

    #[test]
    fn sum() {
        let expr = SymExpr::Add(vec![
            SymExpr::int(-2),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::int(2)),
        ]);
        assert_eq!(latex(&expr), "x^{2} - 2");
    }
}

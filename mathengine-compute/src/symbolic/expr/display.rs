//! Plain-text formatting of [`SymExpr`], in the notation a student would type.
//!
//! Sums are printed in [term order](super::order), with negative terms written as subtraction:
//! `x^2 - 2x + 1`. Products put the numeric coefficient first and juxtapose it with the next
//! factor when that factor starts with a letter or a parenthesis (`2x`, `2sqrt(3)`, `2(x + 1)`);
//! parenthesized factors are juxtaposed with whatever precedes them (`(x - 2)(x + 2)`), and `*`
//! separates everything else (`2x*y`). Factors with negative exponents are moved into a
//! denominator: `x/(2y)`.

use crate::numerical::fmt::FloatFormatter;
use rug::{Integer, Rational};
use std::fmt::{self, Display, Formatter};
use super::{order::cmp_factors, order::cmp_terms, Constant, Func, Primary, SymExpr};

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", FloatFormatter::new(n)),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Const(c) => write!(f, "{}", c),
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

/// The numeric magnitude that leads a product.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coefficient {
    /// An exact integer, always greater than one.
    Integer(Integer),

    /// A decimal, always positive.
    Float(rug::Float),
}

/// A product split into the pieces that are printed separately.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Parts {
    /// Whether the product is negative overall.
    pub negative: bool,

    /// The magnitude of the numerator of the numeric coefficient, if it is not one.
    pub numer_coeff: Option<Coefficient>,

    /// The denominator of the numeric coefficient, if it is not one.
    pub denom_coeff: Option<Integer>,

    /// Non-numeric factors with a non-negative exponent, in factor order.
    pub numer: Vec<SymExpr>,

    /// Factors that had a negative exponent, with the exponent made positive.
    pub denom: Vec<SymExpr>,
}

/// Splits a term into its sign, coefficient, numerator and denominator.
pub(crate) fn split_product(expr: &SymExpr) -> Parts {
    let factors = match expr {
        SymExpr::Mul(factors) => factors.as_slice(),
        expr => std::slice::from_ref(expr),
    };

    let mut coefficient = SymExpr::int(1);
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        if let Some(product) = coefficient.mul_number(factor) {
            coefficient = product;
            continue;
        }

        match factor {
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                let positive = -(**exp).clone();
                if positive.is_one() {
                    denom.push((**base).clone());
                } else {
                    denom.push(SymExpr::pow((**base).clone(), positive));
                }
            },
            factor => numer.push(factor.clone()),
        }
    }
    numer.sort_by(cmp_factors);
    denom.sort_by(cmp_factors);

    let negative = coefficient.is_negative_number();
    let (numer_coeff, denom_coeff) = match coefficient {
        SymExpr::Primary(Primary::Float(n)) => {
            let n = n.abs();
            ((n != 1).then_some(Coefficient::Float(n)), None)
        },
        SymExpr::Primary(Primary::Rational(n)) => {
            let (numer, denom) = Rational::from(n.abs_ref()).into_numer_denom();
            ((numer != 1).then_some(Coefficient::Integer(numer)), (denom != 1).then_some(denom))
        },
        _ => (None, None),
    };

    Parts { negative, numer_coeff, denom_coeff, numer, denom }
}

/// Returns true if the base of a power must be wrapped in parentheses.
fn base_needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Add(_) | SymExpr::Mul(_) | SymExpr::Exp(..) => true,
        SymExpr::Primary(Primary::Rational(n)) => n.cmp0().is_lt() || *n.denom() != 1,
        SymExpr::Primary(Primary::Float(n)) => n.is_sign_negative(),
        _ => false,
    }
}

/// Returns true if the exponent of a power can be written without parentheses.
fn exponent_is_bare(exp: &SymExpr) -> bool {
    match exp {
        SymExpr::Primary(Primary::Rational(n)) => *n.denom() == 1 && n.cmp0().is_ge(),
        SymExpr::Primary(Primary::Float(n)) => n.is_sign_positive(),
        SymExpr::Primary(Primary::Symbol(_) | Primary::Const(_)) => true,
        _ => false,
    }
}

/// Formats a power whose exponent is not negative.
fn fmt_power(f: &mut Formatter<'_>, base: &SymExpr, exp: &SymExpr) -> fmt::Result {
    if exp.as_rational().map_or(false, |n| *n == Rational::from((1, 2))) {
        return write!(f, "sqrt({})", base);
    }
    if matches!(base, SymExpr::Primary(Primary::Const(Constant::E))) {
        return write!(f, "exp({})", exp);
    }

    if base_needs_parens(base) {
        write!(f, "({})", base)?;
    } else {
        write!(f, "{}", base)?;
    }
    write!(f, "^")?;
    if exponent_is_bare(exp) {
        write!(f, "{}", exp)
    } else {
        write!(f, "({})", exp)
    }
}

/// Formats a single factor of a product. Sums are always wrapped in parentheses.
fn factor_string(factor: &SymExpr) -> String {
    match factor {
        SymExpr::Add(_) => format!("({})", factor),
        factor => factor.to_string(),
    }
}

/// Joins the coefficient and factors of one side of a fraction.
fn juxtapose(coefficient: Option<String>, factors: &[SymExpr]) -> String {
    let mut out = String::new();
    let mut after_coefficient = false;
    if let Some(coefficient) = coefficient {
        out.push_str(&coefficient);
        after_coefficient = true;
    }

    for factor in factors {
        let item = factor_string(factor);
        if !out.is_empty() {
            let first = item.chars().next().unwrap_or(' ');
            let juxtaposed = first == '(' || (after_coefficient && first.is_alphabetic());
            if !juxtaposed {
                out.push('*');
            }
        }
        out.push_str(&item);
        after_coefficient = false;
    }

    if out.is_empty() {
        out.push('1');
    }
    out
}

/// Formats a product from its parts. The sign is printed only if `with_sign` is true.
fn fmt_parts(f: &mut Formatter<'_>, parts: &Parts, with_sign: bool) -> fmt::Result {
    if with_sign && parts.negative {
        write!(f, "-")?;
    }

    let numer_coeff = parts.numer_coeff.as_ref().map(|c| match c {
        Coefficient::Integer(n) => n.to_string(),
        Coefficient::Float(n) => FloatFormatter::new(n).to_string(),
    });
    write!(f, "{}", juxtapose(numer_coeff, &parts.numer))?;

    let denom_count = parts.denom.len() + usize::from(parts.denom_coeff.is_some());
    if denom_count > 0 {
        let denom = juxtapose(parts.denom_coeff.as_ref().map(ToString::to_string), &parts.denom);
        if denom_count > 1 {
            write!(f, "/({})", denom)?;
        } else {
            write!(f, "/{}", denom)?;
        }
    }
    Ok(())
}

/// Formats a term of a sum. If `magnitude` is true, the sign of the term is left out.
fn fmt_term(f: &mut Formatter<'_>, term: &SymExpr, magnitude: bool) -> fmt::Result {
    match term {
        SymExpr::Add(_) => write!(f, "({})", term),
        SymExpr::Primary(Primary::Rational(n)) if magnitude => write!(f, "{}", Rational::from(n.abs_ref())),
        SymExpr::Primary(Primary::Float(n)) if magnitude => write!(f, "{}", FloatFormatter::new(&*n.as_abs())),
        SymExpr::Mul(_) | SymExpr::Exp(..) if magnitude => fmt_parts(f, &split_product(term), false),
        term => write!(f, "{}", term),
    }
}

/// Returns true if a term is written with a leading minus sign.
fn is_negative_term(term: &SymExpr) -> bool {
    match term {
        SymExpr::Mul(_) => split_product(term).negative,
        term => term.is_negative_number(),
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
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
    use crate::primitive::{float, frac};
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn y() -> SymExpr {
        SymExpr::symbol("y")
    }

    #[test]
    fn numbers() {
        assert_eq!(SymExpr::rational(frac(11, 12)).to_string(), "11/12");
        assert_eq!(SymExpr::rational(frac(-3, 4)).to_string(), "-3/4");
        assert_eq!(SymExpr::float(float(0.75)).to_string(), "0.75");
    }

    #[test]
    fn sum_with_subtraction() {
        let expr = SymExpr::Add(vec![
            SymExpr::int(-2),
            SymExpr::Mul(vec![SymExpr::int(-3), x()]),
            SymExpr::pow(x(), SymExpr::int(2)),
        ]);
        assert_eq!(expr.to_string(), "x^2 - 3x - 2");
    }

    #[test]
    fn juxtaposed_products() {
        let expr = SymExpr::Mul(vec![y(), SymExpr::int(2), x()]);
        assert_eq!(expr.to_string(), "2x*y");

        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(3).sqrt()]);
        assert_eq!(expr.to_string(), "2sqrt(3)");

        let expr = SymExpr::Mul(vec![
            SymExpr::Add(vec![x(), SymExpr::int(2)]),
            SymExpr::Add(vec![x(), SymExpr::int(-2)]),
        ]);
        assert_eq!(expr.to_string(), "(x - 2)(x + 2)");
    }

    #[test]
    fn fractions() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::rational(frac(1, 2)), y().recip()]);
        assert_eq!(expr.to_string(), "x/(2y)");
        assert_eq!(x().recip().to_string(), "1/x");

        let expr = SymExpr::Mul(vec![SymExpr::rational(frac(-1, 2)), x()]);
        assert_eq!(expr.to_string(), "-x/2");
    }

    #[test]
    fn powers() {
        assert_eq!(SymExpr::pow(x(), SymExpr::rational(frac(1, 3))).to_string(), "x^(1/3)");
        assert_eq!(SymExpr::pow(SymExpr::int(-2), x()).to_string(), "(-2)^x");
        assert_eq!(
            SymExpr::pow(SymExpr::Add(vec![x(), SymExpr::int(1)]), SymExpr::int(2)).to_string(),
            "(x + 1)^2",
        );
        assert_eq!(parse_expr("exp(x)").unwrap().to_string(), "exp(x)");
    }

    #[test]
    fn calls_and_constants() {
        assert_eq!(parse_expr("sin(pi)").unwrap().to_string(), "sin(pi)");
        assert_eq!(parse_expr("abs(x)").unwrap().to_string(), "abs(x)");
        assert_eq!(parse_expr("ln(x)").unwrap().to_string(), "log(x)");
    }
}

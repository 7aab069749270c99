//! The order in which terms and factors are stored and printed.
//!
//! Terms are ordered by total degree (highest first), then by the exponents of the variables in
//! alphabetical order, with plain numbers last: `x^2 + 2x*y + y^2 + 1`. Factors start with the
//! numeric coefficient, then roots of numbers, constants, variables, function calls and finally
//! parenthesized sums, ordered by their constant term: `2sqrt(3)*pi*x*sin(x)(x - 2)(x + 2)`.

use crate::primitive::rat;
use rug::Rational;
use std::{cmp::Ordering, collections::BTreeMap};
use super::{Primary, SymExpr};

/// Returns the value of a number as an [`f64`], for ordering purposes only.
pub(crate) fn number_to_f64(expr: &SymExpr) -> Option<f64> {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => Some(n.to_f64()),
        SymExpr::Primary(Primary::Float(n)) => Some(n.to_f64()),
        _ => None,
    }
}

/// Compares two numbers by value.
fn cmp_numbers(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    match (lhs.as_rational(), rhs.as_rational()) {
        (Some(lhs), Some(rhs)) => lhs.cmp(rhs),
        _ => number_to_f64(lhs)
            .zip(number_to_f64(rhs))
            .and_then(|(lhs, rhs)| lhs.partial_cmp(&rhs))
            .unwrap_or(Ordering::Equal),
    }
}

/// Returns the total degree of an expression in its variables.
///
/// Function calls and constants have degree zero, and `sqrt(x)` has degree `1/2`.
pub(crate) fn degree(expr: &SymExpr) -> Rational {
    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => rat(1),
        SymExpr::Primary(_) => Rational::new(),
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or_default(),
        SymExpr::Mul(factors) => factors.iter().map(degree).fold(Rational::new(), |acc, d| acc + d),
        SymExpr::Exp(base, exp) => match exp.as_rational() {
            Some(n) => degree(base) * n,
            None => degree(base),
        },
    }
}

/// Collects the exponent of each variable that appears as a factor of the term.
fn monomial(term: &SymExpr) -> BTreeMap<&str, Rational> {
    let factors = match term {
        SymExpr::Mul(factors) => factors.as_slice(),
        term => std::slice::from_ref(term),
    };

    let mut exponents = BTreeMap::new();
    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Symbol(name)) => {
                *exponents.entry(name.as_str()).or_insert_with(Rational::new) += 1;
            },
            SymExpr::Exp(base, exp) => {
                if let (Some(name), Some(n)) = (base.as_symbol(), exp.as_rational()) {
                    *exponents.entry(name).or_insert_with(Rational::new) += n;
                }
            },
            _ => {},
        }
    }
    exponents
}

/// Compares two monomials lexicographically: the term with the higher power of the
/// alphabetically first variable comes first.
fn cmp_monomials(lhs: &BTreeMap<&str, Rational>, rhs: &BTreeMap<&str, Rational>) -> Ordering {
    let mut lhs_iter = lhs.iter();
    let mut rhs_iter = rhs.iter();
    loop {
        match (lhs_iter.next(), rhs_iter.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (Some((lhs_name, lhs_exp)), Some((rhs_name, rhs_exp))) => {
                let ordering = lhs_name.cmp(rhs_name).then_with(|| rhs_exp.cmp(lhs_exp));
                if ordering.is_ne() {
                    return ordering;
                }
            },
        }
    }
}

/// Compares two terms of a sum.
pub(crate) fn cmp_terms(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    let (lhs_coeff, lhs_rest) = lhs.split_coefficient();
    let (rhs_coeff, rhs_rest) = rhs.split_coefficient();

    lhs.is_number().cmp(&rhs.is_number())
        .then_with(|| degree(&rhs_rest).cmp(&degree(&lhs_rest)))
        .then_with(|| cmp_monomials(&monomial(&lhs_rest), &monomial(&rhs_rest)))
        .then_with(|| lhs_rest.to_string().cmp(&rhs_rest.to_string()))
        .then_with(|| cmp_numbers(&lhs_coeff, &rhs_coeff))
}

/// The groups that factors are sorted into, in order.
fn factor_category(factor: &SymExpr) -> u8 {
    if factor.is_number() {
        return 0;
    }

    let (base, exp) = factor.as_base_exponent();
    match base {
        base if base.is_number() => 1,
        SymExpr::Primary(Primary::Const(_)) if exp.is_number() => 2,
        SymExpr::Primary(Primary::Symbol(_)) => 3,
        SymExpr::Primary(_) => 4,
        SymExpr::Add(_) => 5,
        _ => 6,
    }
}

/// Returns the constant term of a sum, or zero if there is none.
fn constant_term(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Add(terms) => terms.iter()
            .find(|term| term.is_number())
            .cloned()
            .unwrap_or_else(|| SymExpr::int(0)),
        _ => SymExpr::int(0),
    }
}

/// Compares the coefficients of two sums, starting from the lowest degree term: `x - y` comes
/// before `x + y`.
fn cmp_coefficients(lhs: &[SymExpr], rhs: &[SymExpr]) -> Ordering {
    let mut lhs = lhs.iter().collect::<Vec<_>>();
    let mut rhs = rhs.iter().collect::<Vec<_>>();
    lhs.sort_by(|a, b| cmp_terms(b, a));
    rhs.sort_by(|a, b| cmp_terms(b, a));

    lhs.iter()
        .zip(&rhs)
        .map(|(l, r)| cmp_numbers(&l.split_coefficient().0, &r.split_coefficient().0))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compares two factors of a product.
pub(crate) fn cmp_factors(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    let category = factor_category(lhs).cmp(&factor_category(rhs));
    if category.is_ne() {
        return category;
    }

    let (lhs_base, _) = lhs.as_base_exponent();
    let (rhs_base, _) = rhs.as_base_exponent();
    let by_base = match (&lhs_base, &rhs_base) {
        (SymExpr::Primary(Primary::Symbol(lhs)), SymExpr::Primary(Primary::Symbol(rhs))) => lhs.cmp(rhs),
        (SymExpr::Add(lhs_terms), SymExpr::Add(rhs_terms)) => {
            cmp_numbers(&constant_term(&lhs_base), &constant_term(&rhs_base))
                .then_with(|| cmp_coefficients(lhs_terms, rhs_terms))
        },
        (lhs, rhs) if lhs.is_number() && rhs.is_number() => cmp_numbers(lhs, rhs),
        _ => Ordering::Equal,
    };

    by_base.then_with(|| lhs.to_string().cmp(&rhs.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sorted_terms(source: &str) -> Vec<String> {
        let SymExpr::Add(mut terms) = parse_expr(source).unwrap() else {
            panic!("expected a sum");
        };
        terms.sort_by(cmp_terms);
        terms.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn degree_of_terms() {
        assert_eq!(degree(&parse_expr("x^2*y").unwrap()), 3);
        assert_eq!(degree(&parse_expr("sqrt(x)").unwrap()), rug::Rational::from((1, 2)));
        assert_eq!(degree(&parse_expr("sin(x)").unwrap()), 0);
    }

    #[test]
    fn constants_last() {
        assert_eq!(sorted_terms("4 + x + x^2"), vec!["x^2", "x", "4"]);
    }

    #[test]
    fn lexicographic_monomials() {
        assert_eq!(sorted_terms("y^2 + x^2 + 2x*y"), vec!["x^2", "2x*y", "y^2"]);
    }

    #[test]
    fn sums_by_constant_term() {
        let x_plus_2 = parse_expr("x + 2").unwrap();
        let x_minus_2 = parse_expr("x - 2").unwrap();
        assert_eq!(cmp_factors(&x_minus_2, &x_plus_2), Ordering::Less);

        let x_minus_y = parse_expr("x - y").unwrap();
        let x_plus_y = parse_expr("x + y").unwrap();
        assert_eq!(cmp_factors(&x_minus_y, &x_plus_y), Ordering::Less);
    }

    #[test]
    fn coefficient_first() {
        assert_eq!(cmp_factors(&SymExpr::int(3), &SymExpr::symbol("x")), Ordering::Less);
        assert_eq!(cmp_factors(&SymExpr::symbol("x"), &SymExpr::symbol("y")), Ordering::Less);
    }
}

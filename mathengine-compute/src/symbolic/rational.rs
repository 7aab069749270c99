//! Rational expressions: writing a sum over a common denominator, and cancelling common factors.

use crate::budget::Budget;
use rug::{Integer, Rational};
use super::{
    expand::expand_with,
    expr::SymExpr,
    factor::factor_with,
    poly::{factors_of, terms_of},
    simplify::canonical_with,
};

/// A term split into a numerator and a denominator.
struct Fraction {
    numer: Vec<SymExpr>,
    numer_coeff: SymExpr,
    denom_coeff: Integer,

    /// The factors of the denominator, as `(base, exponent)` pairs with positive exponents.
    denom: Vec<(SymExpr, Rational)>,
}

impl Fraction {
    fn from_term(term: &SymExpr) -> Self {
        let (coefficient, rest) = term.split_coefficient();
        let (numer_coeff, denom_coeff) = match coefficient.as_rational() {
            Some(n) => {
                let (numer, denom) = n.clone().into_numer_denom();
                (SymExpr::from(numer), denom)
            },
            None => (coefficient, Integer::from(1)),
        };

        let mut numer = Vec::new();
        let mut denom = Vec::new();
        for factor in factors_of(&rest) {
            let (base, exp) = factor.as_base_exponent();
            match exp.as_rational() {
                Some(n) if n.cmp0().is_lt() => denom.push((base, Rational::from(-n))),
                _ => numer.push(factor),
            }
        }

        Self { numer, numer_coeff, denom_coeff, denom }
    }
}

/// Returns the exponent of the given base in a list of factors, or zero.
fn exponent_of(factors: &[(SymExpr, Rational)], base: &SymExpr) -> Rational {
    factors.iter()
        .find(|(b, _)| b == base)
        .map(|(_, e)| e.clone())
        .unwrap_or_default()
}

fn power(base: &SymExpr, exp: Rational) -> SymExpr {
    if exp == 1 {
        base.clone()
    } else {
        SymExpr::pow(base.clone(), SymExpr::rational(exp))
    }
}

/// Writes the expression as a single fraction, returning the numerator and the denominator, both
/// in canonical form.
///
/// The common denominator is the least common multiple of the denominators of the terms, where
/// factors are compared with strict equality.
///
/// `1/x + 1/y = (y + x) / (x*y)`
/// `x/2 + 1/3 = (3x + 2) / 6`
pub fn together(expr: &SymExpr) -> (SymExpr, SymExpr) {
    together_with(expr, &Budget::default())
}

/// Writes the expression as a single fraction, staying within the given [`Budget`]. See
/// [`together`].
pub fn together_with(expr: &SymExpr, budget: &Budget) -> (SymExpr, SymExpr) {
    let canonical = canonical_with(expr, budget);
    let fractions = terms_of(&canonical)
        .iter()
        .map(Fraction::from_term)
        .collect::<Vec<_>>();

    let mut denom_coeff = Integer::from(1);
    let mut denom: Vec<(SymExpr, Rational)> = Vec::new();
    for fraction in &fractions {
        denom_coeff.lcm_mut(&fraction.denom_coeff);
        for (base, exp) in &fraction.denom {
            match denom.iter_mut().find(|(b, _)| b == base) {
                Some((_, existing)) if *existing < *exp => *existing = exp.clone(),
                Some(_) => {},
                None => denom.push((base.clone(), exp.clone())),
            }
        }
    }

    let numer_terms = fractions.into_iter()
        .map(|fraction| {
            let multiplier = Integer::from(&denom_coeff / &fraction.denom_coeff);
            let mut factors = vec![fraction.numer_coeff, SymExpr::from(multiplier)];
            factors.extend(fraction.numer);
            for (base, exp) in &denom {
                let missing = Rational::from(exp - exponent_of(&fraction.denom, base));
                if missing.cmp0().is_gt() {
                    factors.push(power(base, missing));
                }
            }
            SymExpr::Mul(factors)
        })
        .collect::<Vec<_>>();

    let mut denom_factors = vec![SymExpr::from(denom_coeff)];
    denom_factors.extend(denom.into_iter().map(|(base, exp)| power(&base, exp)));

    (
        canonical_with(&SymExpr::Add(numer_terms).downgrade(), budget),
        canonical_with(&SymExpr::Mul(denom_factors).downgrade(), budget),
    )
}

/// Splits a factored expression into `(base, exponent)` pairs.
fn factor_powers(expr: &SymExpr) -> Vec<(SymExpr, SymExpr)> {
    factors_of(expr)
        .iter()
        .map(SymExpr::as_base_exponent)
        .collect()
}

/// Cancels common factors from the numerator and denominator of the expression.
///
/// `(x^2 - 1)/(x - 1) = x + 1`
///
/// Returns [`None`] if the expression has no denominator, or if the numerator or denominator are
/// too large to factor within the given [`Budget`].
pub fn cancel(expr: &SymExpr, budget: &Budget) -> Option<SymExpr> {
    let (numer, denom) = together_with(expr, budget);
    if denom.is_one() {
        return None;
    }

    let numer = factor_with(&expand_with(&numer, budget).ok()?, budget);
    let denom = factor_with(&expand_with(&denom, budget).ok()?, budget);

    let mut numer_factors = factor_powers(&numer);
    let mut denom_factors = factor_powers(&denom);
    for (numer_base, numer_exp) in numer_factors.iter_mut() {
        let Some((_, denom_exp)) = denom_factors.iter_mut().find(|(base, _)| base == numer_base) else {
            continue;
        };
        let (Some(n), Some(d)) = (numer_exp.as_rational(), denom_exp.as_rational()) else {
            continue;
        };

        let common = n.clone().min(d.clone());
        if common.cmp0().is_le() {
            continue;
        }
        *numer_exp = SymExpr::rational(Rational::from(n - &common));
        *denom_exp = SymExpr::rational(Rational::from(d - &common));
    }

    let numer = numer_factors.into_iter()
        .map(|(base, exp)| SymExpr::pow(base, exp))
        .collect::<Vec<_>>();
    let denom = denom_factors.into_iter()
        .map(|(base, exp)| SymExpr::pow(base, exp))
        .collect::<Vec<_>>();
    let result = SymExpr::Mul(numer) / SymExpr::Mul(denom);
    Some(canonical_with(&result, budget))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn together_str(source: &str) -> (String, String) {
        let (numer, denom) = together(&parse_expr(source).unwrap());
        (numer.to_string(), denom.to_string())
    }

    fn cancel_str(source: &str) -> Option<String> {
        cancel(&parse_expr(source).unwrap(), &Budget::default()).map(|expr| expr.to_string())
    }

    #[test]
    fn common_denominator() {
        assert_eq!(together_str("x/2 + 1/3"), ("3x + 2".to_string(), "6".to_string()));
        assert_eq!(together_str("1/x + 1/y"), ("x + y".to_string(), "x*y".to_string()));
        assert_eq!(together_str("1/x^2 + 1/x"), ("x + 1".to_string(), "x^2".to_string()));
    }

    #[test]
    fn no_denominator() {
        assert_eq!(together_str("x + 1"), ("x + 1".to_string(), "1".to_string()));
        assert_eq!(cancel_str("x + 1"), None);
    }

    #[test]
    fn cancel_common_factor() {
        assert_eq!(cancel_str("(x^2 - 1)/(x - 1)"), Some("x + 1".to_string()));
        assert_eq!(cancel_str("(x^2 + 2x + 1)/(x + 1)"), Some("x + 1".to_string()));
        assert_eq!(cancel_str("(2x + 2)/4"), Some("x/2 + 1/2".to_string()));
    }
}

//! Factoring of polynomials over the rationals.
//!
//! Factoring proceeds in stages:
//!
//! 1. The content (common numeric factor) and the common power of each generator are pulled out:
//!    `6x^2*y + 4x*y^2 = 2x*y(3x + 2y)`.
//! 2. If what remains is a polynomial in one variable, every rational root `p/q` gives a linear
//!    factor `qx - p`: `x^2 - 4 = (x - 2)(x + 2)`. Polynomials in `x^2` only are also factored as
//!    polynomials in `x^2`: `x^4 - 5x^2 + 6 = (x^2 - 3)(x^2 - 2)`.
//! 3. If what remains is a homogeneous polynomial in two variables, it is factored as a
//!    polynomial in their ratio: `x^2 - y^2 = (x - y)(x + y)`.
//!
//! Irreducible parts, and anything that is not a polynomial, are left as they are.

use crate::budget::Budget;
use rug::Rational;
use super::{
    expr::SymExpr,
    poly::{factors_of, MultiPoly, UniPoly},
    simplify::canonical_with,
};
use tracing::debug;

/// Splits a univariate polynomial into its content and a list of irreducible (over the
/// rationals, as far as this module can tell) factors with their multiplicities.
fn factor_uni(poly: &UniPoly) -> (Rational, Vec<(UniPoly, u32)>) {
    let mut content = poly.content();
    let mut rest = poly.primitive();
    let mut factors = Vec::new();

    // x^k
    let lowest = rest.coeffs().iter().position(|c| c.cmp0().is_ne()).unwrap_or(0);
    if lowest > 0 {
        factors.push((UniPoly::new(vec![Rational::new(), Rational::from(1)]), lowest as u32));
        rest = UniPoly::new(rest.coeffs()[lowest..].to_vec());
    }

    for root in rest.rational_roots() {
        // qx - p
        let (p, q) = root.into_numer_denom();
        let linear = UniPoly::new(vec![Rational::from(-p), Rational::from(q)]);

        let mut multiplicity = 0;
        while let Some((quotient, remainder)) = rest.div_rem(&linear) {
            if !remainder.is_zero() {
                break;
            }
            rest = quotient;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push((linear, multiplicity));
        }
    }

    // a polynomial in x^2 with no rational roots may still split into quadratic factors
    if rest.degree().map_or(false, |d| d >= 4) && rest.coeffs().iter().skip(1).step_by(2).all(|c| c.cmp0().is_eq()) {
        let halved = UniPoly::new(rest.coeffs().iter().step_by(2).cloned().collect());
        let (inner_content, inner_factors) = factor_uni(&halved);
        if inner_factors.len() > 1 || inner_factors.iter().any(|(_, m)| *m > 1) {
            content *= inner_content;
            for (factor, multiplicity) in inner_factors {
                // substitute x^2 back in
                let mut coeffs = Vec::new();
                for c in factor.coeffs() {
                    coeffs.push(c.clone());
                    coeffs.push(Rational::new());
                }
                factors.push((UniPoly::new(coeffs), multiplicity));
            }
            rest = UniPoly::new(vec![Rational::from(1)]);
        }
    }

    match rest.degree() {
        Some(0) => content *= rest.leading(),
        Some(_) => factors.push((rest, 1)),
        None => {},
    }

    (content, factors)
}

/// Converts a factor `f(t)` of a dehomogenized polynomial back to `y^k f(x/y)`.
fn rehomogenize(factor: &UniPoly, x: &SymExpr, y: &SymExpr) -> SymExpr {
    let degree = factor.degree().unwrap_or(0);
    let terms = factor.coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.cmp0().is_ne())
        .map(|(i, c)| SymExpr::Mul(vec![
            SymExpr::rational(c.clone()),
            SymExpr::pow(x.clone(), SymExpr::int(i as i64)),
            SymExpr::pow(y.clone(), SymExpr::int((degree - i) as i64)),
        ]))
        .collect::<Vec<_>>();
    SymExpr::Add(terms).downgrade()
}

/// Adds `factor^multiplicity` to the list of factors, putting the factor in canonical form.
fn push_factor(factors: &mut Vec<SymExpr>, factor: SymExpr, multiplicity: u32, budget: &Budget) {
    let factor = canonical_with(&factor, budget);
    if factor.is_one() {
        return;
    }
    if multiplicity == 1 {
        factors.push(factor);
    } else {
        factors.push(SymExpr::pow(factor, SymExpr::int(i64::from(multiplicity))));
    }
}

/// Factors a single polynomial, returning its factors, or [`None`] if the expression is not a
/// polynomial.
fn factor_poly(expr: &SymExpr, budget: &Budget) -> Option<Vec<SymExpr>> {
    let poly = match MultiPoly::from_expr(expr, budget) {
        Ok(poly) => poly,
        Err(err) => {
            debug!(target: "mathengine::factor", %err, "factoring not applicable");
            return None;
        },
    };
    if poly.is_empty() {
        return None;
    }

    let (mut content, min_exps, rest) = poly.extract_common();
    let mut factors = Vec::new();
    for (generator, e) in poly.gens().iter().zip(min_exps) {
        if e > 0 {
            push_factor(&mut factors, generator.clone(), e, budget);
        }
    }

    let used = rest.used_gens();
    let gens = rest.gens();
    let is_symbol = |i: &usize| gens[*i].as_symbol().is_some();

    match used.as_slice() {
        [idx] if is_symbol(idx) => {
            let uni = rest.univariate(*idx)?;
            let (inner_content, inner_factors) = factor_uni(&uni);
            content *= inner_content;
            for (factor, multiplicity) in inner_factors {
                push_factor(&mut factors, factor.to_expr(&gens[*idx]), multiplicity, budget);
            }
        },
        [a, b] if is_symbol(a) && is_symbol(b) && rest.is_homogeneous() => {
            let uni = rest.dehomogenize(*a, *b)?;
            let (inner_content, inner_factors) = factor_uni(&uni);
            content *= inner_content;

            // after extracting common factors, some term is a pure power of `gens[a]`, so the
            // degree of the dehomogenized polynomial is the total degree
            for (factor, multiplicity) in inner_factors {
                push_factor(&mut factors, rehomogenize(&factor, &gens[*a], &gens[*b]), multiplicity, budget);
            }
        },
        _ => push_factor(&mut factors, rest.to_expr(budget), 1, budget),
    }

    if content != 1 {
        factors.insert(0, SymExpr::rational(content));
    }
    Some(factors)
}

/// Factors the expression, using the default [`Budget`].
pub fn factor(expr: &SymExpr) -> SymExpr {
    factor_with(expr, &Budget::default())
}

/// Factors the expression.
///
/// Each factor is in canonical form, but the product is not, so that the factors are not
/// multiplied back together. If the expression does not factor any further, it is returned
/// unchanged, even if it is not expanded: `(x + 1)(x + 2) + 1` is irreducible, so it is not
/// rewritten as `x^2 + 3x + 3`. Products are factored one factor at a time.
pub fn factor_with(expr: &SymExpr, budget: &Budget) -> SymExpr {
    let canonical = canonical_with(expr, budget);

    let factors = match &canonical {
        SymExpr::Mul(_) => {
            let mut factors = Vec::new();
            for factor in factors_of(&canonical) {
                match factor_poly(&factor, budget) {
                    Some(inner) if factor.as_symbol().is_none() && !factor.is_number() => factors.extend(inner),
                    _ => factors.push(factor),
                }
            }
            factors
        },
        canonical => match factor_poly(canonical, budget) {
            Some(factors) => factors,
            None => return expr.clone(),
        },
    };

    // a single irreducible factor is just the expanded form
    let factored = SymExpr::Mul(factors).downgrade();
    if factored == canonical || !matches!(factored, SymExpr::Mul(_) | SymExpr::Exp(..)) {
        expr.clone()
    } else {
        factored
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn factor_str(source: &str) -> String {
        factor(&parse_expr(source).unwrap()).to_string()
    }

    #[test]
    fn difference_of_squares() {
        assert_eq!(factor_str("x^2 - 4"), "(x - 2)(x + 2)");
        assert_eq!(factor_str("x^2 - y^2"), "(x - y)(x + y)");
    }

    #[test]
    fn perfect_square() {
        assert_eq!(factor_str("x^2 + 2x + 1"), "(x + 1)^2");
    }

    #[test]
    fn rational_roots() {
        assert_eq!(factor_str("6x^2 + 5x + 1"), "(2x + 1)(3x + 1)");
        assert_eq!(factor_str("x^3 - x"), "x(x - 1)(x + 1)");
    }

    #[test]
    fn common_factor() {
        assert_eq!(factor_str("2x + 4"), "2(x + 2)");
        assert_eq!(factor_str("6x^2*y + 4x*y^2"), "2x*y(3x + 2y)");
    }

    #[test]
    fn biquadratic() {
        assert_eq!(factor_str("x^4 - 5x^2 + 6"), "(x^2 - 3)(x^2 - 2)");
    }

    #[test]
    fn irreducible_is_unchanged() {
        let expr = parse_expr("x^2 + 1").unwrap();
        assert_eq!(factor(&expr), expr);
        let expr = parse_expr("sin(x) + 1").unwrap();
        assert_eq!(factor(&expr), expr);
        let expr = parse_expr("(x + 1)(x + 2) + 1").unwrap();
        assert_eq!(factor(&expr), expr);
    }

    #[test]
    fn too_many_root_candidates_is_unchanged() {
        let expr = parse_expr("963761198400x^2 + x - 963761198400").unwrap();
        assert_eq!(factor(&expr), expr);
    }
}

//! Polynomials with rational coefficients.
//!
//! A [`MultiPoly`] is a polynomial in a list of **generators**. Generators are usually variables,
//! but any constant atom that is not a rational number, such as `pi` or `sqrt(2)`, is also
//! treated as a generator. This lets expressions like `pi*x^2 + sqrt(2)` count as polynomials in
//! `x`, with `pi` and `sqrt(2)` acting as coefficients.
//!
//! [`UniPoly`] is the dense, single variable counterpart used by factoring and solving.

mod uni;

use crate::approx::approximate_rational;
use crate::budget::Budget;
use rug::Rational;
use std::collections::BTreeMap;
use std::fmt;
use super::{
    canonical_with,
    expand::expand_with,
    expr::{Primary, SymExpr},
};

pub use uni::UniPoly;

/// An error that can occur when converting an expression to a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyError {
    /// The expression is not a polynomial, such as `1/x` or `sin(x)`.
    NotPolynomial,

    /// The polynomial has more terms than the [`Budget`] allows.
    TooManyTerms,

    /// The polynomial has a higher degree than the [`Budget`] allows.
    DegreeTooHigh,
}

impl fmt::Display for PolyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotPolynomial => write!(f, "the expression is not a polynomial"),
            Self::TooManyTerms => write!(f, "the polynomial has too many terms"),
            Self::DegreeTooHigh => write!(f, "the degree of the polynomial is too high"),
        }
    }
}

impl std::error::Error for PolyError {}

/// Returns the terms of an expression, treating anything that is not a sum as a single term.
pub(crate) fn terms_of(expr: &SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Add(terms) => terms.clone(),
        expr => vec![expr.clone()],
    }
}

/// Returns the factors of an expression, treating anything that is not a product as a single
/// factor.
pub(crate) fn factors_of(expr: &SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Mul(factors) => factors.clone(),
        expr => vec![expr.clone()],
    }
}

/// Converts a numeric factor to a rational number. Decimals are converted to the closest simple
/// fraction.
fn number_to_rational(expr: &SymExpr) -> Option<Rational> {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => Some(n.clone()),
        SymExpr::Primary(Primary::Float(n)) => approximate_rational(n),
        _ => None,
    }
}

/// Splits a non-numeric factor into a generator and a non-negative integer power.
fn generator_power(factor: &SymExpr, budget: &Budget) -> Result<(SymExpr, u32), PolyError> {
    let (base, exp) = factor.as_base_exponent();
    let power = exp.as_integer()
        .filter(|n| n.cmp0().is_gt())
        .map(|n| n.to_u32().filter(|n| *n <= budget.max_degree).ok_or(PolyError::DegreeTooHigh));

    match power {
        Some(power) => {
            let power = power?;
            if base.as_symbol().is_some() || base.is_constant() {
                Ok((base, power))
            } else {
                Err(PolyError::NotPolynomial)
            }
        },
        // `x^(1/2)`, `x^-1`, `2^x`: only allowed as a whole if there are no variables
        None if factor.is_constant() => Ok((factor.clone(), 1)),
        None => Err(PolyError::NotPolynomial),
    }
}

/// A polynomial in several generators with rational coefficients.
///
/// Each term is stored as the list of exponents of the generators (in the same order as
/// [`MultiPoly::gens`]), mapped to its nonzero coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoly {
    gens: Vec<SymExpr>,
    terms: BTreeMap<Vec<u32>, Rational>,
}

impl MultiPoly {
    /// Converts an expression to a polynomial, expanding it first.
    ///
    /// The generators are the variables of the expression in lexicographic order, followed by any
    /// other constant atoms in order of appearance.
    pub fn from_expr(expr: &SymExpr, budget: &Budget) -> Result<Self, PolyError> {
        let expanded = expand_with(expr, budget)?;

        let mut gens = expr.free_symbols()
            .into_iter()
            .map(SymExpr::symbol)
            .collect::<Vec<_>>();
        let mut raw_terms = Vec::new();

        for term in terms_of(&expanded) {
            let mut coefficient = Rational::from(1);
            let mut powers = Vec::new();
            for factor in factors_of(&term) {
                if factor.is_number() {
                    coefficient *= number_to_rational(&factor).ok_or(PolyError::NotPolynomial)?;
                    continue;
                }

                let (generator, power) = generator_power(&factor, budget)?;
                let idx = match gens.iter().position(|g| *g == generator) {
                    Some(idx) => idx,
                    None => {
                        gens.push(generator);
                        gens.len() - 1
                    },
                };
                powers.push((idx, power));
            }
            raw_terms.push((powers, coefficient));
        }

        let mut terms = BTreeMap::new();
        for (powers, coefficient) in raw_terms {
            let mut exponents = vec![0; gens.len()];
            for (idx, power) in powers {
                exponents[idx] += power;
            }
            if exponents.iter().sum::<u32>() > budget.max_degree {
                return Err(PolyError::DegreeTooHigh);
            }

            let entry = terms.entry(exponents).or_insert_with(Rational::new);
            *entry += coefficient;
        }
        terms.retain(|_, c: &mut Rational| c.cmp0().is_ne());

        if terms.len() > budget.max_terms {
            return Err(PolyError::TooManyTerms);
        }
        Ok(Self { gens, terms })
    }

    /// Returns the generators of the polynomial.
    pub fn gens(&self) -> &[SymExpr] {
        &self.gens
    }

    /// Returns the number of nonzero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the total degree of the polynomial, or [`None`] for the zero polynomial.
    pub fn total_degree(&self) -> Option<u32> {
        self.terms.keys().map(|exps| exps.iter().sum::<u32>()).max()
    }

    /// Returns the indices of the generators that appear in at least one term.
    pub fn used_gens(&self) -> Vec<usize> {
        (0..self.gens.len())
            .filter(|&i| self.terms.keys().any(|exps| exps[i] > 0))
            .collect()
    }

    /// Returns true if every term has the same total degree.
    pub fn is_homogeneous(&self) -> bool {
        let mut degrees = self.terms.keys().map(|exps| exps.iter().sum::<u32>());
        match degrees.next() {
            Some(first) => degrees.all(|d| d == first),
            None => true,
        }
    }

    /// Splits the polynomial into its content (the rational factor common to all coefficients,
    /// with the sign of the leading term), the smallest power of each generator that divides
    /// every term, and what remains.
    pub fn extract_common(&self) -> (Rational, Vec<u32>, Self) {
        let leading = self.terms.values().next_back().cloned().unwrap_or_else(|| Rational::from(1));
        let content = self.terms.values()
            .fold(leading, |acc, c| gcd_rational(&acc, c).unwrap_or(acc));

        let min_exps = (0..self.gens.len())
            .map(|i| self.terms.keys().map(|exps| exps[i]).min().unwrap_or(0))
            .collect::<Vec<_>>();

        let terms = self.terms.iter()
            .map(|(exps, c)| {
                let exps = exps.iter().zip(&min_exps).map(|(e, m)| e - m).collect();
                (exps, Rational::from(c / &content))
            })
            .collect();

        (content, min_exps, Self { gens: self.gens.clone(), terms })
    }

    /// If only the generator at the given index appears, returns the polynomial as a [`UniPoly`]
    /// in that generator.
    pub fn univariate(&self, idx: usize) -> Option<UniPoly> {
        let degree = self.terms.keys().map(|exps| exps[idx]).max()?;
        let mut coeffs = vec![Rational::new(); degree as usize + 1];
        for (exps, c) in &self.terms {
            let only_idx = exps.iter()
                .enumerate()
                .all(|(i, e)| i == idx || *e == 0);
            if !only_idx {
                return None;
            }
            coeffs[exps[idx] as usize] = c.clone();
        }
        Some(UniPoly::new(coeffs))
    }

    /// Substitutes `gens[other] = 1` into a homogeneous polynomial in two generators, returning a
    /// [`UniPoly`] in `gens[idx]`. The coefficient of `t^k` is the coefficient of
    /// `gens[idx]^k * gens[other]^(d - k)`.
    pub fn dehomogenize(&self, idx: usize, other: usize) -> Option<UniPoly> {
        if !self.is_homogeneous() {
            return None;
        }
        let degree = self.total_degree()?;
        let mut coeffs = vec![Rational::new(); degree as usize + 1];
        for (exps, c) in &self.terms {
            let only_pair = exps.iter()
                .enumerate()
                .all(|(i, e)| i == idx || i == other || *e == 0);
            if !only_pair {
                return None;
            }
            coeffs[exps[idx] as usize] = c.clone();
        }
        Some(UniPoly::new(coeffs))
    }

    /// Converts the polynomial back to an expression in canonical form.
    pub fn to_expr(&self, budget: &Budget) -> SymExpr {
        let terms = self.terms.iter()
            .map(|(exps, c)| {
                let mut factors = vec![SymExpr::rational(c.clone())];
                for (generator, e) in self.gens.iter().zip(exps) {
                    match e {
                        0 => {},
                        1 => factors.push(generator.clone()),
                        e => factors.push(SymExpr::pow(generator.clone(), SymExpr::int(i64::from(*e)))),
                    }
                }
                SymExpr::Mul(factors)
            })
            .collect::<Vec<_>>();
        canonical_with(&SymExpr::Add(terms).downgrade(), budget)
    }
}

/// Returns the positive greatest common divisor of two rationals, that is, the largest rational
/// `g` such that both `a / g` and `b / g` are integers, with the sign of `a`.
fn gcd_rational(a: &Rational, b: &Rational) -> Option<Rational> {
    if a.cmp0().is_eq() {
        return None;
    }
    let numer = a.numer().clone().gcd(b.numer());
    let denom = a.denom().clone().lcm(b.denom());
    let g = Rational::from((numer, denom));
    Some(if a.cmp0().is_lt() { -g } else { g })
}

/// Returns the coefficients of an expression as a polynomial in the given variable, starting with
/// the constant term.
///
/// Unlike [`MultiPoly`], the coefficients may be any expression that does not contain the
/// variable, such as `2a` or `sin(b)`.
pub fn coefficients(expr: &SymExpr, var: &str, budget: &Budget) -> Result<Vec<SymExpr>, PolyError> {
    let expanded = expand_with(expr, budget)?;

    let mut coeffs: Vec<Vec<SymExpr>> = Vec::new();
    for term in terms_of(&expanded) {
        let mut power = 0u32;
        let mut rest = Vec::new();
        for factor in factors_of(&term) {
            if !factor.contains_symbol(var) {
                rest.push(factor);
                continue;
            }

            let (base, exp) = factor.as_base_exponent();
            let n = exp.as_integer()
                .filter(|n| n.cmp0().is_gt() && base.as_symbol() == Some(var))
                .ok_or(PolyError::NotPolynomial)?
                .to_u32()
                .filter(|n| *n <= budget.max_degree)
                .ok_or(PolyError::DegreeTooHigh)?;
            power += n;
        }

        let power = power as usize;
        if power > budget.max_degree as usize {
            return Err(PolyError::DegreeTooHigh);
        }
        if coeffs.len() <= power {
            coeffs.resize(power + 1, Vec::new());
        }
        coeffs[power].push(SymExpr::Mul(rest).downgrade());
    }

    let mut coeffs = coeffs.into_iter()
        .map(|terms| canonical_with(&SymExpr::Add(terms).downgrade(), budget))
        .collect::<Vec<_>>();
    while coeffs.last().map_or(false, SymExpr::is_zero_number) {
        coeffs.pop();
    }
    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use crate::primitive::{frac, rat};
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(source: &str) -> Result<MultiPoly, PolyError> {
        MultiPoly::from_expr(&parse_expr(source).unwrap(), &Budget::default())
    }

    #[test]
    fn generators() {
        let p = poly("pi*y^2 + x*y + sqrt(2)").unwrap();
        assert_eq!(p.gens()[..2], [SymExpr::symbol("x"), SymExpr::symbol("y")]);
        assert_eq!(p.gens().len(), 4);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn not_polynomials() {
        assert_eq!(poly("1/x + 1"), Err(PolyError::NotPolynomial));
        assert_eq!(poly("sin(x)"), Err(PolyError::NotPolynomial));
        assert_eq!(poly("sqrt(x)"), Err(PolyError::NotPolynomial));
    }

    #[test]
    fn budget_is_enforced() {
        let budget = Budget::default().into_builder().max_degree(4).build();
        let expr = parse_expr("(x + 1)^5").unwrap();
        assert!(MultiPoly::from_expr(&expr, &budget).is_err());
    }

    #[test]
    fn common_factor() {
        let p = poly("6x^2*y + 4x*y^2").unwrap();
        let (content, min_exps, rest) = p.extract_common();
        assert_eq!(content, rat(2));
        assert_eq!(min_exps, vec![1, 1]);
        assert_eq!(rest.to_expr(&Budget::default()).to_string(), "3x + 2y");
    }

    #[test]
    fn univariate_conversion() {
        let p = poly("x^2/2 - 3").unwrap();
        assert_eq!(p.univariate(0), Some(UniPoly::new(vec![rat(-3), rat(0), frac(1, 2)])));
        assert_eq!(poly("x + y").unwrap().univariate(0), None);
    }

    #[test]
    fn symbolic_coefficients() {
        let expr = parse_expr("a*x^2 + b*x + 2x + c").unwrap();
        let coeffs = coefficients(&expr, "x", &Budget::default()).unwrap();
        let rendered = coeffs.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["c", "b + 2", "a"]);
    }
}

//! Dense polynomials in one variable with rational coefficients.

use crate::symbolic::expr::SymExpr;
use rug::{Integer, Rational};
use tracing::debug;

/// The largest integer whose divisors are enumerated when looking for rational roots.
const MAX_DIVISOR_SEARCH: u64 = 1_000_000_000_000;

/// The largest number of `p / q` pairs tested when looking for rational roots.
const MAX_ROOT_CANDIDATES: usize = 100_000;

/// The number of bisection steps used to locate a real root numerically.
const BISECTION_STEPS: usize = 200;

/// A polynomial in one variable, stored as its coefficients from the constant term up.
///
/// The leading coefficient is never zero; the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniPoly {
    coeffs: Vec<Rational>,
}

impl UniPoly {
    /// Creates a polynomial from its coefficients, starting with the constant term.
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().map_or(false, |c| c.cmp0().is_eq()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Returns the coefficients, starting with the constant term.
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Returns the degree of the polynomial, or [`None`] for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the leading coefficient, or zero for the zero polynomial.
    pub fn leading(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_default()
    }

    /// Evaluates the polynomial using Horner's method.
    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs.iter()
            .rev()
            .fold(Rational::new(), |acc, c| acc * x + c)
    }

    /// Evaluates the polynomial at a floating point value.
    pub fn eval_f64(&self, x: f64) -> f64 {
        self.coeffs.iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c.to_f64())
    }

    /// Returns the derivative of the polynomial.
    pub fn derivative(&self) -> Self {
        Self::new(
            self.coeffs.iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| Rational::from(c * i as u32))
                .collect()
        )
    }

    /// Divides the polynomial by another, returning the quotient and remainder.
    ///
    /// Returns [`None`] if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let divisor_degree = divisor.degree()?;
        let divisor_leading = divisor.leading();

        let mut remainder = self.coeffs.clone();
        let quotient_len = remainder.len().saturating_sub(divisor_degree);
        let mut quotient = vec![Rational::new(); quotient_len];

        for i in (0..quotient_len).rev() {
            let coeff = Rational::from(&remainder[i + divisor_degree] / &divisor_leading);
            if coeff.cmp0().is_ne() {
                for (j, d) in divisor.coeffs.iter().enumerate() {
                    remainder[i + j] -= Rational::from(&coeff * d);
                }
            }
            quotient[i] = coeff;
        }

        remainder.truncate(divisor_degree);
        Some((Self::new(quotient), Self::new(remainder)))
    }

    /// Returns the content of the polynomial: the positive rational `c` such that the polynomial
    /// divided by `c` has coprime integer coefficients. The sign of `c` matches the sign of the
    /// leading coefficient, so that the primitive part has a positive leading coefficient.
    pub fn content(&self) -> Rational {
        if self.is_zero() {
            return Rational::from(1);
        }

        let mut numer_gcd = Integer::new();
        let mut denom_lcm = Integer::from(1);
        for c in &self.coeffs {
            numer_gcd.gcd_mut(c.numer());
            denom_lcm.lcm_mut(c.denom());
        }

        let content = Rational::from((numer_gcd, denom_lcm));
        if self.leading().cmp0().is_lt() {
            -content
        } else {
            content
        }
    }

    /// Divides every coefficient by the given number.
    pub fn div_scalar(&self, n: &Rational) -> Self {
        Self::new(self.coeffs.iter().map(|c| Rational::from(c / n)).collect())
    }

    /// Returns the primitive part of the polynomial: the polynomial divided by its
    /// [`content`](Self::content).
    pub fn primitive(&self) -> Self {
        self.div_scalar(&self.content())
    }

    /// Returns the rational roots of the polynomial, without multiplicity, in ascending order.
    ///
    /// The roots are found by testing every candidate allowed by the rational root theorem.
    /// Returns an empty list (apart from a root at zero) if the coefficients are too large to
    /// enumerate their divisors, or have too many divisors to test every candidate.
    pub fn rational_roots(&self) -> Vec<Rational> {
        let mut roots = Vec::new();
        let Some(mut poly) = self.degree().filter(|d| *d > 0).map(|_| self.primitive()) else {
            return roots;
        };

        // factor out x^k first, the theorem needs a nonzero constant term
        if poly.coeffs[0].cmp0().is_eq() {
            roots.push(Rational::new());
            let first_nonzero = poly.coeffs.iter().position(|c| c.cmp0().is_ne()).unwrap_or(0);
            poly = Self::new(poly.coeffs[first_nonzero..].to_vec());
        }
        if poly.degree().map_or(true, |d| d == 0) {
            return roots;
        }

        let constant = poly.coeffs[0].numer().clone().abs();
        let leading = poly.leading().numer().clone().abs();
        let (Some(p_divisors), Some(q_divisors)) = (divisors(&constant), divisors(&leading)) else {
            return roots;
        };
        let candidates = p_divisors.len().saturating_mul(q_divisors.len());
        if candidates > MAX_ROOT_CANDIDATES {
            debug!(target: "mathengine::poly", candidates, "too many rational root candidates");
            return roots;
        }

        for p in &p_divisors {
            for q in &q_divisors {
                let candidate = Rational::from((p.clone(), q.clone()));
                if *candidate.denom() != *q {
                    // not in lowest terms, already tested
                    continue;
                }
                for root in [candidate.clone(), -candidate] {
                    if poly.eval(&root).cmp0().is_eq() {
                        roots.push(root);
                    }
                }
            }
        }

        roots.sort();
        roots.dedup();
        roots
    }

    /// Returns the real roots of the polynomial, located numerically.
    ///
    /// The critical points of the polynomial (the roots of its derivative) split the real line
    /// into intervals on which the polynomial is monotonic, each containing at most one root. The
    /// search is bounded by the Cauchy bound on the magnitude of the roots.
    pub fn numeric_roots(&self) -> Vec<f64> {
        let Some(degree) = self.degree() else {
            return Vec::new();
        };
        if degree == 0 {
            return Vec::new();
        }

        let leading = self.leading().to_f64();
        let bound = 1.0 + self.coeffs[..degree].iter()
            .map(|c| (c.to_f64() / leading).abs())
            .fold(0.0, f64::max);

        let mut points = vec![-bound];
        points.extend(self.derivative().numeric_roots().into_iter().filter(|x| x.abs() < bound));
        points.push(bound);

        let scale = self.coeffs.iter().map(|c| c.to_f64().abs()).fold(0.0, f64::max);
        let mut roots: Vec<f64> = Vec::new();
        for window in points.windows(2) {
            let (lo, hi) = (window[0], window[1]);
            let (f_lo, f_hi) = (self.eval_f64(lo), self.eval_f64(hi));

            let root = if f_lo.abs() <= 1e-12 * scale {
                Some(lo)
            } else if f_lo.signum() != f_hi.signum() {
                Some(self.bisect(lo, hi))
            } else {
                None
            };
            if let Some(root) = root {
                if roots.last().map_or(true, |last| (root - last).abs() > 1e-9) {
                    roots.push(root);
                }
            }
        }
        roots
    }

    /// Locates a root in an interval where the polynomial changes sign.
    fn bisect(&self, mut lo: f64, mut hi: f64) -> f64 {
        let lo_sign = self.eval_f64(lo).signum();
        for _ in 0..BISECTION_STEPS {
            let mid = (lo + hi) / 2.0;
            if self.eval_f64(mid).signum() == lo_sign {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        (lo + hi) / 2.0
    }

    /// Converts the polynomial to an expression in the given variable. The expression is not in
    /// canonical form.
    pub fn to_expr(&self, var: &SymExpr) -> SymExpr {
        let terms = self.coeffs.iter()
            .enumerate()
            .filter(|(_, c)| c.cmp0().is_ne())
            .map(|(i, c)| match i {
                0 => SymExpr::rational(c.clone()),
                1 => SymExpr::rational(c.clone()) * var.clone(),
                i => SymExpr::rational(c.clone()) * SymExpr::pow(var.clone(), SymExpr::int(i as i64)),
            })
            .collect::<Vec<_>>();
        SymExpr::Add(terms).downgrade()
    }
}

/// Returns the positive divisors of `n`, or [`None`] if `n` is too large to search.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.to_u64().filter(|n| *n <= MAX_DIVISOR_SEARCH)?;
    if n == 0 {
        return Some(Vec::new());
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(Integer::from(d));
            if d * d != n {
                large.push(Integer::from(n / d));
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

#[cfg(test)]
mod tests {
    use crate::primitive::{frac, rat};
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(coeffs: &[i64]) -> UniPoly {
        UniPoly::new(coeffs.iter().map(|c| rat(*c)).collect())
    }

    #[test]
    fn trailing_zeros_are_trimmed() {
        assert_eq!(poly(&[1, 2, 0, 0]).degree(), Some(1));
        assert_eq!(poly(&[0, 0]).degree(), None);
    }

    #[test]
    fn division() {
        // (x^2 - 1) / (x - 1) = x + 1
        let (q, r) = poly(&[-1, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());

        // (x^2 + 1) / (x - 1) = x + 1, remainder 2
        let (q, r) = poly(&[1, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
        assert_eq!(q, poly(&[1, 1]));
        assert_eq!(r, poly(&[2]));
    }

    #[test]
    fn content_and_primitive() {
        let p = UniPoly::new(vec![frac(-1, 2), rat(0), frac(-3, 2)]);
        assert_eq!(p.content(), frac(-1, 2));
        assert_eq!(p.primitive(), poly(&[1, 0, 3]));
    }

    #[test]
    fn rational_roots() {
        // 6x^2 + 5x + 1 = (2x + 1)(3x + 1)
        assert_eq!(poly(&[1, 5, 6]).rational_roots(), vec![frac(-1, 2), frac(-1, 3)]);

        // x^3 - x = x(x - 1)(x + 1)
        assert_eq!(poly(&[0, -1, 0, 1]).rational_roots(), vec![rat(-1), rat(0), rat(1)]);

        assert!(poly(&[-2, 0, 1]).rational_roots().is_empty());
    }

    #[test]
    fn too_many_root_candidates() {
        // 963761198400 has 6720 divisors
        let n: i64 = 963_761_198_400;
        let p = UniPoly::new(vec![rat(-n), rat(1), rat(n)]);
        assert!(p.rational_roots().is_empty());

        // the root at zero is still found
        let p = UniPoly::new(vec![rat(0), rat(-n), rat(1), rat(n)]);
        assert_eq!(p.rational_roots(), vec![rat(0)]);
    }

    #[test]
    fn numeric_roots() {
        // x^3 - 2x - 5 has one real root
        let roots = poly(&[-5, -2, 0, 1]).numeric_roots();
        assert_eq!(roots.len(), 1);
        assert_float_absolute_eq!(roots[0], 2.0945514815423265, 1e-9);

        // (x - 1)^2 touches zero without changing sign
        let roots = poly(&[1, -2, 1]).numeric_roots();
        assert_eq!(roots.len(), 1);
        assert_float_absolute_eq!(roots[0], 1.0, 1e-9);
    }

    #[test]
    fn derivative() {
        assert_eq!(poly(&[5, 3, 0, 2]).derivative(), poly(&[3, 0, 6]));
    }
}

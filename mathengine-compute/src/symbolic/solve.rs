//! Solving equations in one variable over the reals.
//!
//! An equation `lhs = rhs` is first rewritten as `f = 0`, where `f = lhs - rhs` is written over a
//! common denominator `n / d`. Then:
//!
//! - If `n` is a polynomial in the variable, it is solved with the linear and quadratic formulas,
//!   the rational root theorem, and numeric root finding as a last resort.
//! - Otherwise, the equation is solved by **inversion**: the single occurrence of the variable is
//!   isolated by undoing one operation at a time, such as `2^x = 8` → `x = 3`.
//!
//! Solutions that make the denominator `d` zero are discarded, and solutions found by inversion
//! are checked numerically against the original equation. Only real solutions are returned.

use crate::approx::approximate_rational;
use crate::budget::Budget;
use crate::numerical::eval::{eval_f64, EvalError};
use crate::primitive::float;
use rug::{ops::Pow, Rational};
use std::fmt;
use super::{
    canonical_with,
    expr::{Constant, Func, Primary, SymExpr},
    is_zero_with,
    poly::{coefficients, terms_of, factors_of, PolyError, UniPoly},
    rational::together_with,
    simplify_with,
};
use tracing::debug;

/// The largest residual allowed when checking a solution numerically.
const TOLERANCE: f64 = 1e-9;

/// The solutions of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solutions {
    /// A finite (possibly empty) list of solutions.
    Finite(Vec<SymExpr>),

    /// Every real number is a solution, such as for `x + 1 = 1 + x`.
    All,
}

/// An error that can occur when solving an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The equation is not of a form that can be solved.
    Unsupported,

    /// Working with the equation would exceed the [`Budget`].
    BudgetExceeded(PolyError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unsupported => write!(f, "the equation cannot be solved"),
            Self::BudgetExceeded(err) => write!(f, "the equation is too large to solve: {}", err),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<PolyError> for SolveError {
    fn from(err: PolyError) -> Self {
        Self::BudgetExceeded(err)
    }
}

/// Solves `lhs = rhs` for the given variable, using the default [`Budget`].
pub fn solve(lhs: &SymExpr, rhs: &SymExpr, var: &str) -> Result<Solutions, SolveError> {
    solve_with(lhs, rhs, var, &Budget::default())
}

/// Solves `lhs = rhs` for the given variable.
///
/// Numeric solutions are returned in ascending order.
pub fn solve_with(lhs: &SymExpr, rhs: &SymExpr, var: &str, budget: &Budget) -> Result<Solutions, SolveError> {
    let f = canonical_with(&(lhs.clone() - rhs.clone()), budget);
    if is_zero_with(&f, budget) {
        return Ok(Solutions::All);
    }
    if !f.contains_symbol(var) {
        return Ok(Solutions::Finite(Vec::new()));
    }

    let (numer, denom) = together_with(&f, budget);
    let (candidates, verify) = match coefficients(&numer, var, budget) {
        Ok(coeffs) => (solve_polynomial(&coeffs, budget)?, false),
        Err(PolyError::NotPolynomial) => {
            let zero = SymExpr::int(0);
            (invert(&numer, zero, var, budget)?, true)
        },
        Err(err) => return Err(err.into()),
    };
    debug!(target: "mathengine::solve", candidates = candidates.len(), verify, "candidate solutions found");

    let mut solutions: Vec<SymExpr> = Vec::new();
    for candidate in candidates {
        let candidate = simplify_with(&candidate, budget);
        if makes_zero(&denom, var, &candidate, budget) {
            continue;
        }
        if verify && !satisfies(&f, var, &candidate, budget) {
            continue;
        }
        if !solutions.contains(&candidate) {
            solutions.push(candidate);
        }
    }

    sort_solutions(&mut solutions);
    Ok(Solutions::Finite(solutions))
}

/// Returns true if substituting the solution into the denominator gives zero.
fn makes_zero(denom: &SymExpr, var: &str, value: &SymExpr, budget: &Budget) -> bool {
    if !denom.contains_symbol(var) {
        return false;
    }
    let substituted = canonical_with(&denom.substitute(var, value), budget);
    if substituted.is_zero_number() {
        return true;
    }
    matches!(eval_f64(&substituted), Ok(n) if n.abs() < TOLERANCE)
}

/// Checks a solution numerically. Solutions that depend on other variables are accepted.
fn satisfies(f: &SymExpr, var: &str, value: &SymExpr, budget: &Budget) -> bool {
    let substituted = canonical_with(&f.substitute(var, value), budget);
    match eval_f64(&substituted) {
        Ok(n) => n.abs() < TOLERANCE,
        Err(EvalError::FreeSymbol(_)) => true,
        Err(_) => false,
    }
}

/// Sorts numeric solutions in ascending order, placing symbolic solutions after them in their
/// original order.
fn sort_solutions(solutions: &mut [SymExpr]) {
    solutions.sort_by(|lhs, rhs| {
        match (eval_f64(lhs), eval_f64(rhs)) {
            (Ok(lhs), Ok(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(std::cmp::Ordering::Equal),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        }
    });
}

/// Converts a list of coefficients to a [`UniPoly`] if they are all numbers.
fn rational_poly(coeffs: &[SymExpr]) -> Option<UniPoly> {
    coeffs.iter()
        .map(|c| match c {
            SymExpr::Primary(Primary::Rational(n)) => Some(n.clone()),
            SymExpr::Primary(Primary::Float(n)) => approximate_rational(n),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(UniPoly::new)
}

/// Solves `c[0] + c[1]*x + ... = 0`.
fn solve_polynomial(coeffs: &[SymExpr], budget: &Budget) -> Result<Vec<SymExpr>, SolveError> {
    match coeffs {
        [] | [_] => Ok(Vec::new()),
        [c0, c1] => Ok(vec![-c0.clone() / c1.clone()]),
        [c0, c1, c2] => Ok(quadratic(c0, c1, c2, budget)),
        _ => {
            let poly = rational_poly(coeffs).ok_or(SolveError::Unsupported)?;
            Ok(solve_rational(poly, budget))
        },
    }
}

/// Solves `a*x^2 + b*x + c = 0` with the quadratic formula.
fn quadratic(c: &SymExpr, b: &SymExpr, a: &SymExpr, budget: &Budget) -> Vec<SymExpr> {
    let discriminant = simplify_with(
        &(SymExpr::pow(b.clone(), SymExpr::int(2)) - SymExpr::int(4) * a.clone() * c.clone()),
        budget,
    );
    let denom = SymExpr::int(2) * a.clone();

    if discriminant.is_zero_number() {
        return vec![-b.clone() / denom];
    }
    if discriminant.is_negative_number() {
        return Vec::new();
    }
    if let Ok(n) = eval_f64(&discriminant) {
        if n < 0.0 {
            return Vec::new();
        }
    }

    let root = discriminant.sqrt();
    vec![
        (-b.clone() - root.clone()) / denom.clone(),
        (-b.clone() + root) / denom,
    ]
}

/// Solves a polynomial equation with rational coefficients of any degree.
fn solve_rational(mut poly: UniPoly, budget: &Budget) -> Vec<SymExpr> {
    let mut solutions = Vec::new();
    for root in poly.rational_roots() {
        let linear = UniPoly::new(vec![Rational::from(-&root), Rational::from(1)]);
        while let Some((quotient, remainder)) = poly.div_rem(&linear) {
            if !remainder.is_zero() {
                break;
            }
            poly = quotient;
        }
        solutions.push(SymExpr::rational(root));
    }

    let coeffs = poly.coeffs()
        .iter()
        .cloned()
        .map(SymExpr::rational)
        .collect::<Vec<_>>();
    match poly.degree() {
        Some(0) | None => {},
        Some(1) => solutions.push(-coeffs[0].clone() / coeffs[1].clone()),
        Some(2) => solutions.extend(quadratic(&coeffs[0], &coeffs[1], &coeffs[2], budget)),
        Some(_) => {
            debug!(target: "mathengine::solve", degree = poly.degree(), "falling back to numeric roots");
            solutions.extend(poly.numeric_roots().into_iter().map(|root| SymExpr::float(float(root))));
        },
    }
    solutions
}

/// Returns true if the expression is the constant `e`.
fn is_e(expr: &SymExpr) -> bool {
    matches!(expr, SymExpr::Primary(Primary::Const(Constant::E)))
}

/// Solves `base^g = value` for `g`, where `base` and `value` are constants.
fn solve_exponent(base: &SymExpr, value: SymExpr, budget: &Budget) -> Option<SymExpr> {
    if let Ok(n) = eval_f64(&value) {
        if n <= 0.0 {
            return None;
        }
    }
    if is_e(base) {
        return Some(SymExpr::call(Func::Log, value));
    }

    // exact integer exponents, such as `2^x = 8`
    if let (Some(b), Some(v)) = (base.as_rational(), value.as_rational()) {
        if let (Ok(b_f), Ok(v_f)) = (eval_f64(base), eval_f64(&value)) {
            let k = (v_f.ln() / b_f.ln()).round();
            if k.is_finite() && k.abs() <= f64::from(budget.max_exponent) {
                let k = k as i32;
                if b.clone().pow(k) == *v {
                    return Some(SymExpr::int(i64::from(k)));
                }
            }
        }
    }

    Some(SymExpr::call(Func::Log, value) / SymExpr::call(Func::Log, base.clone()))
}

/// Solves `lhs = rhs` for `var` by undoing the operations applied to `var`, one at a time.
fn invert(lhs: &SymExpr, rhs: SymExpr, var: &str, budget: &Budget) -> Result<Vec<SymExpr>, SolveError> {
    let lhs = canonical_with(lhs, budget);
    let rhs = canonical_with(&rhs, budget);

    match &lhs {
        SymExpr::Primary(Primary::Symbol(name)) if name == var => Ok(vec![rhs]),
        SymExpr::Add(_) => {
            let (with_var, without): (Vec<_>, Vec<_>) = terms_of(&lhs)
                .into_iter()
                .partition(|term| term.contains_symbol(var));
            let [term] = with_var.as_slice() else {
                return Err(SolveError::Unsupported);
            };
            let rest = SymExpr::Add(without).downgrade();
            invert(term, rhs - rest, var, budget)
        },
        SymExpr::Mul(_) => {
            let (with_var, without): (Vec<_>, Vec<_>) = factors_of(&lhs)
                .into_iter()
                .partition(|factor| factor.contains_symbol(var));
            match with_var.as_slice() {
                [factor] => {
                    let rest = SymExpr::Mul(without).downgrade();
                    invert(factor, rhs / rest, var, budget)
                },
                // zero product property
                factors if rhs.is_zero_number() => {
                    let mut solutions = Vec::new();
                    for factor in factors {
                        solutions.extend(invert(factor, SymExpr::int(0), var, budget)?);
                    }
                    Ok(solutions)
                },
                _ => Err(SolveError::Unsupported),
            }
        },
        SymExpr::Exp(base, exp) => {
            match (base.contains_symbol(var), exp.contains_symbol(var)) {
                (true, false) => invert_power(base, exp, rhs, var, budget),
                (false, true) => match solve_exponent(base, rhs, budget) {
                    Some(value) => invert(exp, value, var, budget),
                    None => Ok(Vec::new()),
                },
                _ => Err(SolveError::Unsupported),
            }
        },
        SymExpr::Primary(Primary::Call(func, arg)) => invert_call(*func, arg, rhs, var, budget),
        _ => Err(SolveError::Unsupported),
    }
}

/// Solves `base^exp = rhs`, where only `base` contains the variable.
fn invert_power(
    base: &SymExpr,
    exp: &SymExpr,
    rhs: SymExpr,
    var: &str,
    budget: &Budget,
) -> Result<Vec<SymExpr>, SolveError> {
    let inverse_exp = SymExpr::int(1) / exp.clone();
    let root = SymExpr::pow(rhs.clone(), inverse_exp);

    // an even power has a negative solution too
    let even = exp.as_rational().map_or(false, |n| n.numer().is_even());
    if !even {
        return invert(base, root, var, budget);
    }
    if rhs.is_negative_number() {
        return Ok(Vec::new());
    }

    let mut solutions = invert(base, root.clone(), var, budget)?;
    solutions.extend(invert(base, -root, var, budget)?);
    Ok(solutions)
}

/// Returns true if the value is a number outside of `[-1, 1]`.
fn outside_unit_interval(value: &SymExpr) -> bool {
    value.is_constant() && eval_f64(value).map_or(false, |n| n.abs() > 1.0)
}

/// Solves `func(arg) = rhs`.
fn invert_call(
    func: Func,
    arg: &SymExpr,
    rhs: SymExpr,
    var: &str,
    budget: &Budget,
) -> Result<Vec<SymExpr>, SolveError> {
    let pi = SymExpr::constant(Constant::Pi);
    let values = match func {
        Func::Log => vec![SymExpr::pow(SymExpr::constant(Constant::E), rhs)],
        Func::Sin if outside_unit_interval(&rhs) => Vec::new(),
        Func::Sin => {
            let principal = SymExpr::call(Func::Asin, rhs);
            vec![principal.clone(), pi - principal]
        },
        Func::Cos if outside_unit_interval(&rhs) => Vec::new(),
        Func::Cos => {
            let principal = SymExpr::call(Func::Acos, rhs);
            if is_zero_with(&principal, budget) {
                vec![principal]
            } else {
                vec![principal.clone(), SymExpr::int(2) * pi - principal]
            }
        },
        Func::Tan => vec![SymExpr::call(Func::Atan, rhs)],
        Func::Abs if rhs.is_negative_number() => Vec::new(),
        Func::Abs => vec![rhs.clone(), -rhs],
        Func::Asin => vec![SymExpr::call(Func::Sin, rhs)],
        Func::Acos => vec![SymExpr::call(Func::Cos, rhs)],
        Func::Atan => vec![SymExpr::call(Func::Tan, rhs)],
    };

    let mut solutions = Vec::new();
    for value in values {
        solutions.extend(invert(arg, value, var, budget)?);
    }
    Ok(solutions)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn solve_str(lhs: &str, rhs: &str) -> Result<Vec<String>, SolveError> {
        let lhs = parse_expr(lhs).unwrap();
        let rhs = parse_expr(rhs).unwrap();
        match solve(&lhs, &rhs, "x")? {
            Solutions::Finite(solutions) => Ok(solutions.iter().map(ToString::to_string).collect()),
            Solutions::All => Ok(vec!["all".to_string()]),
        }
    }

    #[test]
    fn linear() {
        assert_eq!(solve_str("2x + 3", "7").unwrap(), vec!["2"]);
        assert_eq!(solve_str("x/3", "1/2").unwrap(), vec!["3/2"]);
    }

    #[test]
    fn quadratic_roots() {
        assert_eq!(solve_str("x^2", "4").unwrap(), vec!["-2", "2"]);
        assert_eq!(solve_str("x^2 - 2", "0").unwrap(), vec!["-sqrt(2)", "sqrt(2)"]);
        assert_eq!(solve_str("x^2 + 2x + 1", "0").unwrap(), vec!["-1"]);
        assert!(solve_str("x^2 + 1", "0").unwrap().is_empty());
    }

    #[test]
    fn symbolic_coefficients() {
        assert_eq!(solve_str("a*x + b", "0").unwrap(), vec!["-b/a"]);
    }

    #[test]
    fn higher_degree() {
        assert_eq!(solve_str("x^3 - 6x^2 + 11x - 6", "0").unwrap(), vec!["1", "2", "3"]);

        let lhs = parse_expr("x^3 - 2x - 5").unwrap();
        let Solutions::Finite(solutions) = solve(&lhs, &SymExpr::int(0), "x").unwrap() else {
            panic!("expected finite solutions");
        };
        assert_eq!(solutions.len(), 1);
        assert_float_absolute_eq!(eval_f64(&solutions[0]).unwrap(), 2.0945514815423265, 1e-9);
    }

    #[test]
    fn identities_and_contradictions() {
        assert_eq!(solve_str("x + 1", "1 + x").unwrap(), vec!["all"]);
        assert!(solve_str("x + 1", "x + 2").unwrap().is_empty());
    }

    #[test]
    fn rational_equation() {
        assert_eq!(solve_str("1/x", "2").unwrap(), vec!["1/2"]);

        // x = 1 makes the denominator zero
        assert!(solve_str("(x^2 - 1)/(x - 1)", "2").unwrap().is_empty());
    }

    #[test]
    fn exponential_and_log() {
        assert_eq!(solve_str("2^x", "8").unwrap(), vec!["3"]);
        assert_eq!(solve_str("exp(x)", "2").unwrap(), vec!["log(2)"]);
        assert_eq!(solve_str("log(x)", "1").unwrap(), vec!["e"]);
        assert!(solve_str("2^x", "-1").unwrap().is_empty());
    }

    #[test]
    fn trigonometric() {
        assert_eq!(solve_str("sin(x)", "1/2").unwrap(), vec!["pi/6", "5pi/6"]);
        assert!(solve_str("cos(x)", "2").unwrap().is_empty());
    }

    #[test]
    fn square_root() {
        assert_eq!(solve_str("sqrt(x)", "3").unwrap(), vec!["9"]);
        assert!(solve_str("sqrt(x)", "-3").unwrap().is_empty());
    }
}

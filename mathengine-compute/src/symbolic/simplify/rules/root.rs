//! Simplification rules for square, cube, and higher roots of numbers.
//!
//! A rational number raised to a fractional power `p/q` is rewritten so that the `q`th root is
//! taken of the smallest possible integer, and never of a fraction:
//!
//! - `sqrt(12) = 2sqrt(3)`
//! - `8^(2/3) = 4`
//! - `sqrt(1/2) = sqrt(2)/2`
//! - `(-8)^(1/3) = -2` (odd roots of negative numbers are real)
//!
//! Even roots of negative numbers are not real, and are left alone.

use crate::budget::Budget;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// The largest trial divisor used when looking for perfect powers.
const TRIAL_LIMIT: u32 = 10_000;

/// The largest number of bits the radicand may have.
const MAX_RADICAND_BITS: u64 = 1 << 16;

/// Splits the positive integer `n` into `(outside, inside)`, where `n = outside^root * inside`.
///
/// Perfect powers of divisors up to [`TRIAL_LIMIT`] are always found. Larger factors are only
/// found if what remains after trial division is itself a perfect power.
fn extract_power(n: &Integer, root: u32) -> (Integer, Integer) {
    let mut outside = Integer::from(1);
    let mut inside = n.clone();

    let mut d = 2;
    while d <= TRIAL_LIMIT {
        let power = Integer::from(d).pow(root);
        if power > inside {
            break;
        }
        while inside.is_divisible(&power) {
            inside /= &power;
            outside *= d;
        }
        d += 1;
    }

    if inside > 1 {
        let candidate = Integer::from(inside.root_ref(root));
        if candidate.clone().pow(root) == inside {
            outside *= candidate;
            inside = Integer::from(1);
        }
    }

    (outside, inside)
}

/// `sqrt(x^2) = x`, where `x` is a positive rational number, and the other examples in the
/// [module-level documentation](self)
pub fn rational_root(expr: &SymExpr, budget: &Budget, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let base = base.as_rational()?;
        let exp = exp.as_rational()?;
        if *exp.denom() == 1 || base.cmp0().is_eq() {
            return None;
        }

        let q = exp.denom().to_u32().filter(|q| *q <= budget.max_exponent)?;
        let p = exp.numer().to_i32().filter(|p| p.unsigned_abs() <= budget.max_exponent)?;
        let negative = base.cmp0().is_lt();
        if negative && q % 2 == 0 {
            return None;
        }

        // nothing to do for `n^(1/q)` if `n` has no `q`th power factors; checked below
        let already_simple = p == 1 && *base.denom() == 1 && !negative;

        let bits = base.numer().significant_bits().max(base.denom().significant_bits()) as u64;
        if bits * u64::from(p.unsigned_abs() + q) > MAX_RADICAND_BITS {
            return None;
        }

        // (num/den)^(1/q) = (num * den^(q - 1))^(1/q) / den
        let magnitude = Rational::from(base.abs_ref()).pow(p);
        let (num, den) = magnitude.into_numer_denom();
        let radicand = num * den.clone().pow(q - 1);
        let (outside, inside) = extract_power(&radicand, q);
        if already_simple && outside == 1 {
            return None;
        }

        let mut coefficient = Rational::from((outside, den));
        if negative && p % 2 != 0 {
            coefficient = -coefficient;
        }

        if inside == 1 {
            return Some(SymExpr::rational(coefficient));
        }
        let root = SymExpr::pow(SymExpr::from(inside), SymExpr::rational(Rational::from((1u32, q))));
        if coefficient == 1 {
            Some(root)
        } else {
            Some(SymExpr::Mul(vec![SymExpr::rational(coefficient), root]))
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Root);
    Some(opt)
}

/// Applies all root rules.
pub fn all(expr: &SymExpr, budget: &Budget, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    rational_root(expr, budget, step_collector)
}

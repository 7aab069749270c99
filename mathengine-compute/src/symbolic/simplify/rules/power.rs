//! Simplification rules for powers.

use crate::budget::Budget;
use crate::primitive::float;
use crate::symbolic::{
    expr::{Constant, Func, Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Float};
use tracing::debug;

/// The largest number of bits an exact power may have.
const MAX_RESULT_BITS: u64 = 1 << 20;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, exp| {
        exp.is_zero_number().then(|| SymExpr::int(1))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        exp.is_one().then(|| base.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, _| {
        base.is_one().then(|| SymExpr::int(1))
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, where `a` is a positive number
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let positive = exp.is_number() && !exp.is_negative_number() && !exp.is_zero_number();
        (base.as_rational().map_or(false, |n| n.cmp0().is_eq()) && positive)
            .then(|| SymExpr::int(0))
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Converts a number into a [`Float`].
fn to_float(expr: &SymExpr) -> Option<Float> {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => Some(float(n)),
        SymExpr::Primary(Primary::Float(n)) => Some(n.clone()),
        _ => None,
    }
}

/// Computes a power of numbers.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
/// `2^0.5 = 1.4142...`
///
/// Exact powers are only computed if the exponent is within [`Budget::max_exponent`].
pub fn numeric_power(expr: &SymExpr, budget: &Budget, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if let (Some(base), Some(exp)) = (base.as_rational(), exp.as_integer()) {
            let n = exp.to_i32().filter(|n| n.unsigned_abs() <= budget.max_exponent);
            let Some(n) = n else {
                debug!(target: "mathengine::simplify", %exp, "exponent exceeds budget");
                return None;
            };
            if n < 0 && base.cmp0().is_eq() {
                return None;
            }

            let bits = base.numer().significant_bits().max(base.denom().significant_bits()) as u64;
            if bits * n.unsigned_abs() as u64 > MAX_RESULT_BITS {
                debug!(target: "mathengine::simplify", %exp, "exact power is too large");
                return None;
            }
            return Some(SymExpr::rational(base.clone().pow(n)));
        }

        // at least one side is a decimal
        if !matches!(base, SymExpr::Primary(Primary::Float(_))) && !matches!(exp, SymExpr::Primary(Primary::Float(_))) {
            return None;
        }
        let base = to_float(base)?;
        let exp = to_float(exp)?;
        if base.is_sign_negative() && !exp.is_integer() {
            return None;
        }
        if base.is_zero() && exp.is_sign_negative() {
            return None;
        }
        Some(SymExpr::float(base.pow(&exp)))
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// `e^log(a) = a`
/// `e^0.5 = 1.6487...`
pub fn exp_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if !matches!(base, SymExpr::Primary(Primary::Const(Constant::E))) {
            return None;
        }

        match exp {
            SymExpr::Primary(Primary::Call(Func::Log, arg)) => Some((**arg).clone()),
            SymExpr::Primary(Primary::Float(n)) => Some(SymExpr::float(n.clone().exp())),
            _ => None,
        }
    })?;

    step_collector.push(Step::ExpLog);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, where `c` is an integer
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let SymExpr::Exp(inner_base, inner_exp) = base else {
            return None;
        };
        exp.as_integer()?;

        let new_exp = inner_exp.mul_number(exp)
            .unwrap_or_else(|| (**inner_exp).clone() * exp.clone());
        Some(SymExpr::pow((**inner_base).clone(), new_exp))
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, budget: &Budget, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| numeric_power(expr, budget, step_collector))
        .or_else(|| exp_log(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::primitive::{float, frac};
    use crate::budget::BudgetBuilder;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn pow(base: SymExpr, exp: SymExpr) -> SymExpr {
        SymExpr::pow(base, exp)
    }

    #[test]
    fn exact_powers() {
        let budget = Budget::default();
        let expr = pow(SymExpr::int(2), SymExpr::int(10));
        assert_eq!(numeric_power(&expr, &budget, &mut ()), Some(SymExpr::int(1024)));

        let expr = pow(SymExpr::rational(frac(2, 3)), SymExpr::int(-2));
        assert_eq!(numeric_power(&expr, &budget, &mut ()), Some(SymExpr::rational(frac(9, 4))));
    }

    #[test]
    fn division_by_zero_is_left_alone() {
        let expr = pow(SymExpr::int(0), SymExpr::int(-1));
        assert_eq!(all(&expr, &Budget::default(), &mut ()), None);
    }

    #[test]
    fn exponent_over_budget() {
        let budget = BudgetBuilder::new().max_exponent(10).build();
        let expr = pow(SymExpr::int(2), SymExpr::int(11));
        assert_eq!(numeric_power(&expr, &budget, &mut ()), None);
    }

    #[test]
    fn decimal_power() {
        let expr = pow(SymExpr::int(2), SymExpr::float(float(0.5)));
        let result = numeric_power(&expr, &Budget::default(), &mut ()).unwrap();
        let value = result.as_float().unwrap().to_f64();
        assert_float_absolute_eq!(value, std::f64::consts::SQRT_2, 1e-12);
    }

    #[test]
    fn nested_power() {
        let x = SymExpr::symbol("x");
        let expr = pow(pow(x.clone(), SymExpr::int(2)), SymExpr::int(3));
        assert_eq!(power_of_power(&expr, &mut ()), Some(pow(x, SymExpr::int(6))));
    }

    #[test]
    fn exp_of_log() {
        let x = SymExpr::symbol("x");
        let expr = pow(SymExpr::constant(Constant::E), SymExpr::call(Func::Log, x.clone()));
        assert_eq!(exp_log(&expr, &mut ()), Some(x));
    }
}

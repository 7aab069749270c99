//! Simplification rules for trigonometric functions.

mod table;

use crate::symbolic::{
    expr::{Constant, Func, Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;
use std::collections::HashMap;

/// Returns `c` if the expression is `c*pi` for a rational number `c`.
fn pi_multiple(arg: &SymExpr) -> Option<Rational> {
    match arg {
        SymExpr::Primary(Primary::Rational(n)) if n.cmp0().is_eq() => Some(Rational::new()),
        SymExpr::Primary(Primary::Const(Constant::Pi)) => Some(Rational::from(1)),
        SymExpr::Mul(factors) => match factors.as_slice() {
            [SymExpr::Primary(Primary::Rational(c)), SymExpr::Primary(Primary::Const(Constant::Pi))]
                | [SymExpr::Primary(Primary::Const(Constant::Pi)), SymExpr::Primary(Primary::Rational(c))] => {
                Some(c.clone())
            },
            _ => None,
        },
        _ => None,
    }
}

/// Returns the expression `c*pi`.
fn pi_times(c: Rational) -> SymExpr {
    if c.cmp0().is_eq() {
        SymExpr::int(0)
    } else if c == 1 {
        SymExpr::constant(Constant::Pi)
    } else {
        SymExpr::Mul(vec![SymExpr::rational(c), SymExpr::constant(Constant::Pi)])
    }
}

/// Normalize the given angle and look it up in the provided table.
fn simplify_trig(arg: &SymExpr, table: &HashMap<Rational, SymExpr>) -> Option<SymExpr> {
    // example: compute sin(pi/6)
    // compute normalized fraction: (pi/6) / (2pi) = 1/12
    let turn = table::normalize_turn(pi_multiple(arg)? / 2);
    table.get(&turn).cloned()
}

/// `sin(x)`
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Sin, |arg| simplify_trig(arg, &table::SIN_TABLE))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Sin);
    Some(opt)
}

/// `cos(x)`
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Cos, |arg| simplify_trig(arg, &table::COS_TABLE))?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `tan(x)`
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Tan, |arg| simplify_trig(arg, &table::TAN_TABLE))?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// `asin(1/2) = pi/6`, `acos(0) = pi/2`, `atan(1) = pi/4`, etc.
pub fn inverse_trig(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (func, arg) = expr.as_call()?;
    let table = match func {
        Func::Asin => &table::ASIN_TABLE,
        Func::Acos => &table::ACOS_TABLE,
        Func::Atan => &table::ATAN_TABLE,
        _ => return None,
    };
    let opt = table.iter()
        .find(|(value, _)| value == arg)
        .map(|(_, c)| pi_times(c.clone()))?;

    step_collector.push(Step::InverseTrig);
    Some(opt)
}

/// Returns the argument with its sign flipped, if its numeric coefficient is negative.
fn negated_argument(arg: &SymExpr) -> Option<SymExpr> {
    let (coefficient, rest) = arg.split_coefficient();
    if !coefficient.is_negative_number() {
        return None;
    }

    let positive = -coefficient;
    Some(if rest.is_one() {
        positive
    } else if positive.is_one() {
        rest
    } else {
        positive * rest
    })
}

/// `sin(-x) = -sin(x)`
/// `cos(-x) = cos(x)`
/// `tan(-x) = -tan(x)`
/// `asin(-x) = -asin(x)`
/// `atan(-x) = -atan(x)`
pub fn parity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (func, arg) = expr.as_call()?;
    let odd = match func {
        Func::Sin | Func::Tan | Func::Asin | Func::Atan => true,
        Func::Cos => false,
        _ => return None,
    };
    let positive = negated_argument(arg)?;

    let call = SymExpr::call(func, positive);
    let opt = if odd { -call } else { call };
    step_collector.push(Step::TrigParity);
    Some(opt)
}

/// Evaluates a trigonometric function of a decimal.
///
/// `sin(0.5) = 0.4794...`
pub fn evaluate_decimal(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (func, arg) = expr.as_call()?;
    let n = arg.as_float()?.clone();
    let opt = match func {
        Func::Sin => n.sin(),
        Func::Cos => n.cos(),
        Func::Tan => n.tan(),
        Func::Asin if n.as_abs().to_f64() <= 1.0 => n.asin(),
        Func::Acos if n.as_abs().to_f64() <= 1.0 => n.acos(),
        Func::Atan => n.atan(),
        _ => return None,
    };

    step_collector.push(Step::EvaluateCall);
    Some(SymExpr::float(opt))
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| inverse_trig(expr, step_collector))
        .or_else(|| parity(expr, step_collector))
        .or_else(|| evaluate_decimal(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::primitive::frac;
    use pretty_assertions::assert_eq;
    use super::*;

    fn pi_over(c: Rational) -> SymExpr {
        SymExpr::Mul(vec![SymExpr::rational(c), SymExpr::constant(Constant::Pi)])
    }

    #[test]
    fn sin_of_known_angles() {
        let expr = SymExpr::call(Func::Sin, pi_over(frac(1, 6)));
        assert_eq!(sin(&expr, &mut ()), Some(SymExpr::rational(frac(1, 2))));

        let expr = SymExpr::call(Func::Sin, SymExpr::constant(Constant::Pi));
        assert_eq!(sin(&expr, &mut ()), Some(SymExpr::int(0)));
    }

    #[test]
    fn angles_wrap_around() {
        let expr = SymExpr::call(Func::Sin, pi_over(frac(25, 6)));
        assert_eq!(sin(&expr, &mut ()), Some(SymExpr::rational(frac(1, 2))));

        let expr = SymExpr::call(Func::Cos, pi_over(frac(-1, 3)));
        assert_eq!(cos(&expr, &mut ()), Some(SymExpr::rational(frac(1, 2))));
    }

    #[test]
    fn cos_of_known_angles() {
        let expr = SymExpr::call(Func::Cos, SymExpr::constant(Constant::Pi));
        assert_eq!(cos(&expr, &mut ()), Some(SymExpr::int(-1)));

        let expr = SymExpr::call(Func::Cos, pi_over(frac(1, 6)));
        assert_eq!(
            cos(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::rational(frac(1, 2)), SymExpr::int(3).sqrt()])),
        );
    }

    #[test]
    fn tan_is_undefined_at_right_angles() {
        let expr = SymExpr::call(Func::Tan, pi_over(frac(1, 2)));
        assert_eq!(tan(&expr, &mut ()), None);
    }

    #[test]
    fn inverse_values() {
        let expr = SymExpr::call(Func::Asin, SymExpr::rational(frac(1, 2)));
        assert_eq!(inverse_trig(&expr, &mut ()), Some(pi_over(frac(1, 6))));

        let expr = SymExpr::call(Func::Acos, SymExpr::int(-1));
        assert_eq!(inverse_trig(&expr, &mut ()), Some(SymExpr::constant(Constant::Pi)));
    }

    #[test]
    fn odd_and_even() {
        let x = SymExpr::symbol("x");
        let neg_x = SymExpr::Mul(vec![SymExpr::int(-1), x.clone()]);

        let expr = SymExpr::call(Func::Sin, neg_x.clone());
        assert_eq!(parity(&expr, &mut ()), Some(-SymExpr::call(Func::Sin, x.clone())));

        let expr = SymExpr::call(Func::Cos, neg_x);
        assert_eq!(parity(&expr, &mut ()), Some(SymExpr::call(Func::Cos, x)));
    }
}

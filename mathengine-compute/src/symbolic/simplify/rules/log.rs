//! Simplification rules for logarithms and absolute values.

use crate::symbolic::{
    expr::{Constant, Func, Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

/// `log(1) = 0`
/// `log(e) = 1`
/// `log(e^a) = a`
/// `log(0.5) = -0.6931...`
pub fn log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Log, |arg| match arg {
        arg if arg.is_one() => Some(SymExpr::int(0)),
        SymExpr::Primary(Primary::Const(Constant::E)) => Some(SymExpr::int(1)),
        SymExpr::Exp(base, exp) if matches!(**base, SymExpr::Primary(Primary::Const(Constant::E))) => {
            Some((**exp).clone())
        },
        SymExpr::Primary(Primary::Float(n)) if n.is_sign_positive() && !n.is_zero() => {
            Some(SymExpr::float(n.clone().ln()))
        },
        _ => None,
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Log);
    Some(opt)
}

/// `abs(-2) = 2`
/// `abs(pi) = pi`
/// `abs(-x) = abs(x)`
/// `abs(abs(x)) = abs(x)`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, Func::Abs, |arg| match arg {
        SymExpr::Primary(Primary::Rational(n)) => Some(SymExpr::rational(n.clone().abs())),
        SymExpr::Primary(Primary::Float(n)) => Some(SymExpr::float(n.clone().abs())),
        SymExpr::Primary(Primary::Const(_)) => Some(arg.clone()),
        SymExpr::Primary(Primary::Call(Func::Abs, _)) => Some(arg.clone()),
        arg => {
            let (coefficient, rest) = arg.split_coefficient();
            if !coefficient.is_negative_number() {
                return None;
            }
            let positive = -coefficient;
            Some(if positive.is_one() {
                SymExpr::call(Func::Abs, rest)
            } else {
                positive * SymExpr::call(Func::Abs, rest)
            })
        },
    })?;

    step_collector.push(Step::Abs);
    Some(opt)
}

/// Applies all logarithm and absolute value rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    log(expr, step_collector)
        .or_else(|| abs(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn log_of_e() {
        let e = SymExpr::constant(Constant::E);
        assert_eq!(log(&SymExpr::call(Func::Log, e.clone()), &mut ()), Some(SymExpr::int(1)));

        let x = SymExpr::symbol("x");
        let expr = SymExpr::call(Func::Log, SymExpr::pow(e, x.clone()));
        assert_eq!(log(&expr, &mut ()), Some(x));
    }

    #[test]
    fn log_of_one() {
        assert_eq!(log(&SymExpr::call(Func::Log, SymExpr::int(1)), &mut ()), Some(SymExpr::int(0)));
        assert_eq!(log(&SymExpr::call(Func::Log, SymExpr::int(2)), &mut ()), None);
    }

    #[test]
    fn abs_values() {
        assert_eq!(abs(&SymExpr::call(Func::Abs, SymExpr::int(-3)), &mut ()), Some(SymExpr::int(3)));

        let x = SymExpr::symbol("x");
        let expr = SymExpr::call(Func::Abs, SymExpr::Mul(vec![SymExpr::int(-2), x.clone()]));
        assert_eq!(
            abs(&expr, &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::int(2), SymExpr::call(Func::Abs, x)])),
        );
    }
}

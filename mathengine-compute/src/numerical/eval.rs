//! Evaluation of constant expressions to a [`Float`].

use crate::consts::{E, PI};
use crate::primitive::float;
use crate::symbolic::expr::{Constant, Func, Primary, SymExpr};
use rug::{ops::Pow, Float, Rational};
use std::fmt;

/// Values of `cos` closer to zero than this are treated as a pole of `tan`.
const POLE_TOLERANCE: f64 = 1e-100;

/// An error that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression contains a variable, which has no value.
    FreeSymbol(String),

    /// The result is not a real number, such as `sqrt(-1)` or `asin(2)`.
    NonReal,

    /// A division by zero occurred.
    DivisionByZero,

    /// The result is undefined, such as `log(0)` or `tan(pi/2)`.
    Undefined,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FreeSymbol(name) => write!(f, "the variable `{}` has no value", name),
            Self::NonReal => write!(f, "the result is not a real number"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::Undefined => write!(f, "the result is undefined"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Checks that the float is a finite number.
fn finite(n: Float) -> Result<Float, EvalError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(EvalError::Undefined)
    }
}

/// Computes the exact value of an expression built from rational numbers, if possible.
fn exact_rational(expr: &SymExpr) -> Option<Rational> {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => Some(n.clone()),
        SymExpr::Add(terms) => terms.iter()
            .try_fold(Rational::new(), |acc, term| Some(acc + exact_rational(term)?)),
        SymExpr::Mul(factors) => factors.iter()
            .try_fold(Rational::from(1), |acc, factor| Some(acc * exact_rational(factor)?)),
        SymExpr::Exp(base, exp) => {
            let base = exact_rational(base)?;
            let exp = exp.as_integer()?.to_i32().filter(|n| n.unsigned_abs() <= 1000)?;
            if base.cmp0().is_eq() && exp < 0 {
                return None;
            }
            Some(base.pow(exp))
        },
        _ => None,
    }
}

/// Evaluates a power.
///
/// A negative base is only allowed if the exponent is an exact fraction with an odd denominator,
/// in which case the real root is taken: `(-8)^(1/3) = -2`.
fn eval_power(base: &SymExpr, exp: &SymExpr) -> Result<Float, EvalError> {
    let base_value = eval(base)?;
    let exp_value = eval(exp)?;

    if base_value.is_zero() && exp_value.is_sign_negative() && !exp_value.is_zero() {
        return Err(EvalError::DivisionByZero);
    }

    if base_value.is_sign_negative() && !base_value.is_zero() && !exp_value.is_integer() {
        let Some(exp) = exact_rational(exp) else {
            return Err(EvalError::NonReal);
        };
        if exp.denom().is_even() {
            return Err(EvalError::NonReal);
        }

        let magnitude = base_value.abs().pow(&exp_value);
        return finite(if exp.numer().is_odd() { -magnitude } else { magnitude });
    }

    finite(base_value.pow(&exp_value))
}

fn eval_call(func: Func, arg: &SymExpr) -> Result<Float, EvalError> {
    let arg = eval(arg)?;
    let value = match func {
        Func::Sin => arg.sin(),
        Func::Cos => arg.cos(),
        Func::Tan => {
            if arg.clone().cos().to_f64().abs() < POLE_TOLERANCE {
                return Err(EvalError::Undefined);
            }
            arg.tan()
        },
        Func::Asin | Func::Acos if arg.clone().abs() > 1 => return Err(EvalError::NonReal),
        Func::Asin => arg.asin(),
        Func::Acos => arg.acos(),
        Func::Atan => arg.atan(),
        Func::Log if arg.is_zero() => return Err(EvalError::Undefined),
        Func::Log if arg.is_sign_negative() => return Err(EvalError::NonReal),
        Func::Log => arg.ln(),
        Func::Abs => arg.abs(),
    };
    finite(value)
}

/// Evaluates a constant expression.
pub fn eval(expr: &SymExpr) -> Result<Float, EvalError> {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => Ok(float(n)),
        SymExpr::Primary(Primary::Float(n)) => Ok(n.clone()),
        SymExpr::Primary(Primary::Symbol(name)) => Err(EvalError::FreeSymbol(name.clone())),
        SymExpr::Primary(Primary::Const(Constant::Pi)) => Ok(PI.clone()),
        SymExpr::Primary(Primary::Const(Constant::E)) => Ok(E.clone()),
        SymExpr::Primary(Primary::Call(func, arg)) => eval_call(*func, arg),
        SymExpr::Add(terms) => terms.iter()
            .try_fold(float(0), |acc, term| Ok(acc + eval(term)?))
            .and_then(finite),
        SymExpr::Mul(factors) => factors.iter()
            .try_fold(float(1), |acc, factor| Ok(acc * eval(factor)?))
            .and_then(finite),
        SymExpr::Exp(base, exp) => eval_power(base, exp),
    }
}

/// Evaluates a constant expression to an [`f64`].
pub fn eval_f64(expr: &SymExpr) -> Result<f64, EvalError> {
    eval(expr).map(|n| n.to_f64())
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_str(source: &str) -> Result<f64, EvalError> {
        eval_f64(&parse_expr(source).unwrap())
    }

    #[test]
    fn arithmetic() {
        assert_float_relative_eq!(eval_str("2/3 + 1/4").unwrap(), 11.0 / 12.0);
        assert_float_relative_eq!(eval_str("2^0.5").unwrap(), std::f64::consts::SQRT_2);
        assert_float_relative_eq!(eval_str("sin(pi/6)").unwrap(), 0.5, 1e-12);
    }

    #[test]
    fn real_odd_root() {
        assert_float_relative_eq!(eval_str("(-8)^(1/3)").unwrap(), -2.0);
        assert_float_relative_eq!(eval_str("(-8)^(2/3)").unwrap(), 4.0);
        assert_eq!(eval_str("(-4)^(1/2)"), Err(EvalError::NonReal));
    }

    #[test]
    fn errors() {
        assert_eq!(eval_str("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("log(0)"), Err(EvalError::Undefined));
        assert_eq!(eval_str("log(-1)"), Err(EvalError::NonReal));
        assert_eq!(eval_str("asin(2)"), Err(EvalError::NonReal));
        assert_eq!(eval_str("x + 1"), Err(EvalError::FreeSymbol("x".to_string())));
    }
}

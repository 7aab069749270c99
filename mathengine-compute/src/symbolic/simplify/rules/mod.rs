//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the top-level node; the caller is responsible for
//! simplifying the children first.

pub mod add;
pub mod distribute;
pub mod log;
pub mod multiply;
pub mod power;
pub mod pythagorean;
pub mod root;
pub mod trigonometry;

use crate::budget::Budget;
use crate::symbolic::{
    expr::{Func, Primary, SymExpr},
    step_collector::StepCollector,
};
use super::step::Step;

/// If the expression is a call to the given function, calls the given transformation function
/// with the argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &SymExpr,
    func: Func,
    f: impl Fn(&SymExpr) -> Option<SymExpr>,
) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Call(target, arg)) if *target == func => f(arg),
        _ => None,
    }
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(base, exp) = expr {
        f(base, exp)
    } else {
        None
    }
}

/// Applies all rules used for canonical form.
pub fn all(expr: &SymExpr, budget: &Budget, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| distribute::all(expr, step_collector))
        .or_else(|| power::all(expr, budget, step_collector))
        .or_else(|| root::all(expr, budget, step_collector))
        .or_else(|| trigonometry::all(expr, step_collector))
        .or_else(|| log::all(expr, step_collector))
}

/// Applies all canonical rules, plus identities that are only worth trying during
/// simplification.
pub fn all_with_identities(
    expr: &SymExpr,
    budget: &Budget,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<SymExpr> {
    all(expr, budget, step_collector)
        .or_else(|| pythagorean::all(expr, step_collector))
}

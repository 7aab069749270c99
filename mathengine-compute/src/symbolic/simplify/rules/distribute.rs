//! Simplification rules related to the distributive property.
//!
//! Only a numeric coefficient is distributed during canonicalization, so `2(x + 1)` becomes
//! `2x + 2` but `x(x + 1)` and `(x + 1)(x - 1)` are left alone. Full distribution is done by
//! [`expand`](crate::symbolic::expand()).

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// `n*(b+c) = n*b + n*c`, where `n` is a number
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (coefficient, terms) = match factors {
            [coefficient, SymExpr::Add(terms)] | [SymExpr::Add(terms), coefficient] => (coefficient, terms),
            _ => return None,
        };
        if !coefficient.is_number() {
            return None;
        }

        let new_terms = terms.iter()
            .map(|term| coefficient.clone() * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`, where `c` is an integer
/// `(4a)^c = 4^c * a^c`, where `c` is any number
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let SymExpr::Mul(factors) = base else {
            return None;
        };

        if exp.as_integer().is_some() {
            let new_factors = factors.iter()
                .map(|factor| SymExpr::pow(factor.clone(), exp.clone()))
                .collect::<Vec<_>>();
            return Some(SymExpr::Mul(new_factors));
        }

        // for other exponents, only positive numbers can be pulled out of the power
        if !exp.is_number() {
            return None;
        }
        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.is_number() && !factor.is_negative_number());
        if positive.is_empty() || rest.is_empty() {
            return None;
        }

        let mut new_factors = positive.into_iter()
            .map(|factor| SymExpr::pow(factor, exp.clone()))
            .collect::<Vec<_>>();
        new_factors.push(SymExpr::pow(SymExpr::Mul(rest).downgrade(), exp.clone()));
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distribute_coefficient(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::primitive::frac;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn numeric_coefficient() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::Add(vec![x(), SymExpr::int(1)])]);
        assert_eq!(
            distribute_coefficient(&expr, &mut ()),
            Some(SymExpr::Add(vec![
                SymExpr::Mul(vec![SymExpr::int(2), x()]),
                SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(1)]),
            ])),
        );
    }

    #[test]
    fn symbolic_coefficient_is_kept() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::Add(vec![x(), SymExpr::int(1)])]);
        assert_eq!(distribute_coefficient(&expr, &mut ()), None);
    }

    #[test]
    fn root_of_product() {
        let half = SymExpr::rational(frac(1, 2));
        let expr = SymExpr::pow(SymExpr::Mul(vec![SymExpr::int(4), x()]), half.clone());
        assert_eq!(
            distribute_power(&expr, &mut ()),
            Some(SymExpr::Mul(vec![
                SymExpr::pow(SymExpr::int(4), half.clone()),
                SymExpr::pow(x(), half),
            ])),
        );
    }
}

//! The Pythagorean identity, `sin(x)^2 + cos(x)^2 = 1`.
//!
//! This rule is not part of canonical form, since it changes the shape of an expression in a way
//! students may not expect while typing. It is only tried as a candidate during
//! [`simplify`](crate::symbolic::simplify()).

use crate::symbolic::{
    expr::{Func, SymExpr},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// If the term is `c*f(u)^2`, returns `c` and `u`.
fn squared_call(term: &SymExpr, func: Func) -> Option<(SymExpr, SymExpr)> {
    let (coefficient, rest) = term.split_coefficient();
    let SymExpr::Exp(base, exp) = rest else {
        return None;
    };
    if exp.as_integer().map_or(true, |n| *n != 2) {
        return None;
    }
    match base.as_call() {
        Some((found, arg)) if found == func => Some((coefficient, arg.clone())),
        _ => None,
    }
}

/// `a*sin(x)^2 + a*cos(x)^2 = a`
pub fn pythagorean(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        for (i, term) in terms.iter().enumerate() {
            let Some((coefficient, arg)) = squared_call(term, Func::Sin) else {
                continue;
            };

            let partner = terms.iter()
                .enumerate()
                .position(|(j, other)| {
                    j != i && squared_call(other, Func::Cos) == Some((coefficient.clone(), arg.clone()))
                });
            if let Some(j) = partner {
                let mut new_terms = terms.iter()
                    .enumerate()
                    .filter(|(k, _)| *k != i && *k != j)
                    .map(|(_, term)| term.clone())
                    .collect::<Vec<_>>();
                new_terms.push(coefficient);
                return Some(SymExpr::Add(new_terms).downgrade());
            }
        }
        None
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// Applies all identity rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    pythagorean(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn identity() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::call(Func::Sin, x.clone()), SymExpr::int(2)),
            SymExpr::pow(SymExpr::call(Func::Cos, x.clone()), SymExpr::int(2)),
            x.clone(),
        ]);
        assert_eq!(
            pythagorean(&expr, &mut ()),
            Some(SymExpr::Add(vec![x, SymExpr::int(1)])),
        );
    }

    #[test]
    fn different_arguments() {
        let expr = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::call(Func::Sin, SymExpr::symbol("x")), SymExpr::int(2)),
            SymExpr::pow(SymExpr::call(Func::Cos, SymExpr::symbol("y")), SymExpr::int(2)),
        ]);
        assert_eq!(pythagorean(&expr, &mut ()), None);
    }
}

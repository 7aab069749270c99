//! Grouping the terms of a sum by powers of a variable.

use crate::budget::Budget;
use rug::Rational;
use super::{
    canonical_with,
    expr::SymExpr,
    poly::{factors_of, terms_of},
};

/// Splits a term into the power of `var` it contains and the remaining factors. Returns [`None`]
/// if the variable appears in some other way, such as inside `sin(x)`.
fn split_power(term: &SymExpr, var: &str) -> Option<(Rational, SymExpr)> {
    let mut power = Rational::new();
    let mut rest = Vec::new();
    for factor in factors_of(term) {
        if !factor.contains_symbol(var) {
            rest.push(factor);
            continue;
        }

        let (base, exp) = factor.as_base_exponent();
        if base.as_symbol() != Some(var) {
            return None;
        }
        power += exp.as_rational()?;
    }
    Some((power, SymExpr::Mul(rest).downgrade()))
}

/// Groups the terms of the expression that contain the same power of `var`.
///
/// `a*x + b*x + c = x(a + b) + c`
/// `x^2 + 2x^2*y + x = x^2(2y + 1) + x`
///
/// Terms that do not contain `var` are left as they are. The coefficient of each group is in
/// canonical form, but the group is not multiplied back out.
pub fn collect(expr: &SymExpr, var: &str) -> SymExpr {
    collect_with(expr, var, &Budget::default())
}

/// Groups the terms of the expression that contain the same power of `var`, staying within the
/// given [`Budget`]. See [`collect`].
pub fn collect_with(expr: &SymExpr, var: &str, budget: &Budget) -> SymExpr {
    let expr = canonical_with(expr, budget);

    let mut groups: Vec<(Rational, Vec<SymExpr>)> = Vec::new();
    let mut others = Vec::new();
    for term in terms_of(&expr) {
        match split_power(&term, var) {
            Some((power, rest)) if power.cmp0().is_ne() => {
                match groups.iter_mut().find(|(p, _)| *p == power) {
                    Some((_, members)) => members.push(rest),
                    None => groups.push((power, vec![rest])),
                }
            },
            _ => others.push(term),
        }
    }

    if groups.iter().all(|(_, members)| members.len() < 2) {
        return expr;
    }

    let var = SymExpr::symbol(var);
    let mut terms = Vec::new();
    for (power, members) in groups {
        let var_power = if power == 1 {
            var.clone()
        } else {
            SymExpr::pow(var.clone(), SymExpr::rational(power))
        };

        if members.len() == 1 {
            terms.push(canonical_with(&(members[0].clone() * var_power), budget));
        } else {
            let coefficient = canonical_with(&SymExpr::Add(members), budget);
            terms.push(SymExpr::Mul(vec![var_power, coefficient]));
        }
    }
    terms.extend(others);

    SymExpr::Add(terms).downgrade()
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn collect_str(source: &str, var: &str) -> String {
        collect(&parse_expr(source).unwrap(), var).to_string()
    }

    #[test]
    fn group_by_power() {
        assert_eq!(collect_str("a*x + b*x + c", "x"), "x(a + b) + c");
        assert_eq!(collect_str("x^2 + 2x^2*y + x", "x"), "x^2(2y + 1) + x");
    }

    #[test]
    fn nothing_to_group() {
        assert_eq!(collect_str("x^2 + x + 1", "x"), "x^2 + x + 1");
        assert_eq!(collect_str("sin(x) + x", "x"), "x + sin(x)");
    }

    #[test]
    fn respects_budget() {
        let budget = crate::budget::BudgetBuilder::new().max_exponent(10).build();
        let expr = parse_expr("x + 2^11").unwrap();
        assert_eq!(collect_with(&expr, "x", &budget).to_string(), "x + 2^11");
        assert_eq!(collect(&expr, "x").to_string(), "x + 2048");
    }
}

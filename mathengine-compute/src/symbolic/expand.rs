//! Expansion of products and powers of sums.

use crate::budget::Budget;
use super::{
    expr::{Primary, SymExpr},
    poly::{terms_of, PolyError},
    simplify::canonical_with,
};
use tracing::debug;

/// Multiplies two lists of terms together, combining like terms in the result.
fn multiply_terms(lhs: &[SymExpr], rhs: &[SymExpr], budget: &Budget) -> Result<Vec<SymExpr>, PolyError> {
    if lhs.len().saturating_mul(rhs.len()) > budget.max_terms.saturating_mul(budget.max_terms) {
        return Err(PolyError::TooManyTerms);
    }

    let products = lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| a.clone() * b.clone()))
        .collect::<Vec<_>>();
    let product = canonical_with(&SymExpr::Add(products).downgrade(), budget);

    let terms = terms_of(&product);
    if terms.len() > budget.max_terms {
        return Err(PolyError::TooManyTerms);
    }
    Ok(terms)
}

/// Distributes every product and integer power of sums in the expression.
fn distribute(expr: &SymExpr, budget: &Budget) -> Result<SymExpr, PolyError> {
    match expr {
        SymExpr::Primary(Primary::Call(func, arg)) => Ok(SymExpr::call(*func, expand_with(arg, budget)?)),
        SymExpr::Primary(_) => Ok(expr.clone()),
        SymExpr::Add(terms) => {
            let terms = terms.iter()
                .map(|term| distribute(term, budget))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SymExpr::Add(terms))
        },
        SymExpr::Mul(factors) => {
            let mut terms = vec![SymExpr::int(1)];
            for factor in factors {
                terms = multiply_terms(&terms, &terms_of(&distribute(factor, budget)?), budget)?;
            }
            Ok(SymExpr::Add(terms).downgrade())
        },
        SymExpr::Exp(base, exp) => {
            let base = distribute(base, budget)?;
            let exp = distribute(exp, budget)?;

            let n = match (&base, exp.as_integer()) {
                (SymExpr::Add(_), Some(n)) => n,
                _ => return Ok(SymExpr::pow(base, exp)),
            };
            let power = n.to_i64()
                .filter(|n| n.unsigned_abs() <= u64::from(budget.max_degree))
                .ok_or(PolyError::DegreeTooHigh)?;

            let base_terms = terms_of(&base);
            let mut terms = vec![SymExpr::int(1)];
            for _ in 0..power.unsigned_abs() {
                terms = multiply_terms(&terms, &base_terms, budget)?;
            }

            let expanded = SymExpr::Add(terms).downgrade();
            if power < 0 {
                Ok(expanded.recip())
            } else {
                Ok(expanded)
            }
        },
    }
}

/// Expands the expression, using the default [`Budget`]. If the expansion would exceed the
/// budget, the expression is returned in canonical form instead.
pub fn expand(expr: &SymExpr) -> SymExpr {
    let budget = Budget::default();
    expand_with(expr, &budget).unwrap_or_else(|err| {
        debug!(target: "mathengine::expand", %err, "expansion not applicable");
        canonical_with(expr, &budget)
    })
}

/// Expands the expression: products of sums are distributed and sums raised to integer powers
/// are multiplied out. The result is in canonical form.
///
/// `(x + 1)(x - 1) = x^2 - 1`
/// `(x + 1)^2 = x^2 + 2x + 1`
/// `1/(x + 1)^2 = 1/(x^2 + 2x + 1)`
///
/// Returns an error if an intermediate or final result exceeds the given [`Budget`].
pub fn expand_with(expr: &SymExpr, budget: &Budget) -> Result<SymExpr, PolyError> {
    let canonical = canonical_with(expr, budget);
    let expanded = canonical_with(&distribute(&canonical, budget)?, budget);
    if terms_of(&expanded).len() > budget.max_terms {
        return Err(PolyError::TooManyTerms);
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use crate::budget::BudgetBuilder;
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn expand_str(source: &str) -> String {
        expand(&parse_expr(source).unwrap()).to_string()
    }

    #[test]
    fn product_of_sums() {
        assert_eq!(expand_str("(x + 1)(x - 1)"), "x^2 - 1");
        assert_eq!(expand_str("(x - 2)(x + 2)"), "x^2 - 4");
        assert_eq!(expand_str("x(x + y)"), "x^2 + x*y");
    }

    #[test]
    fn power_of_sum() {
        assert_eq!(expand_str("(x + 1)^2"), "x^2 + 2x + 1");
        assert_eq!(expand_str("(a + b)^3"), "a^3 + 3a^2*b + 3a*b^2 + b^3");
    }

    #[test]
    fn inside_function_arguments() {
        assert_eq!(expand_str("sin((x + 1)^2)"), "sin(x^2 + 2x + 1)");
    }

    #[test]
    fn negative_power() {
        assert_eq!(expand_str("1/(x + 1)^2"), "1/(x^2 + 2x + 1)");
    }

    #[test]
    fn budget_exceeded() {
        let budget = BudgetBuilder::new().max_terms(10).build();
        let expr = parse_expr("(a + b + c)^4").unwrap();
        assert_eq!(expand_with(&expr, &budget), Err(PolyError::TooManyTerms));

        // the unbounded version falls back to canonical form
        assert_eq!(expand_str("(x + 1)^100"), "(x + 1)^100");
    }
}

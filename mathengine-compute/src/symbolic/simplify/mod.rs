//! Canonical form and simplification of expressions.
//!
//! Both are driven by the same loop: the children of a node are simplified first, then the
//! [rules](rules) are applied to the node until none of them apply anymore. Whenever a rule
//! creates new children, they are simplified before trying the rules again.
//!
//! [`canonical()`] only uses the rules that never change the "shape" of an expression in a
//! surprising way. [`simplify()`] additionally tries trigonometric identities, expansion and
//! cancellation of common factors, and picks the form with the lowest [`complexity`].

pub mod rules;
pub mod step;

use crate::budget::Budget;
use crate::numerical::eval::eval;
use super::{
    expand::expand_with,
    expr::{Primary, SymExpr},
    rational::cancel,
    step_collector::{StepCollector, TraceCollector},
};
use step::Step;
use tracing::debug;

/// The maximum number of times rules are applied to a single node.
const MAX_PASSES: usize = 64;

/// The maximum number of rounds of [`simplify_with`].
const MAX_ROUNDS: usize = 4;

/// A set of rules to apply to a single node.
type Rules = fn(&SymExpr, &Budget, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// Simplifies the children of the expression, leaving the node itself alone.
fn simplify_children(
    expr: &SymExpr,
    rules: Rules,
    budget: &Budget,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(func, arg)) => {
            SymExpr::call(*func, inner_simplify(arg, rules, budget, step_collector))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => SymExpr::Add(
            terms.iter()
                .map(|term| inner_simplify(term, rules, budget, step_collector))
                .collect()
        ),
        SymExpr::Mul(factors) => SymExpr::Mul(
            factors.iter()
                .map(|factor| inner_simplify(factor, rules, budget, step_collector))
                .collect()
        ),
        SymExpr::Exp(base, exp) => SymExpr::pow(
            inner_simplify(base, rules, budget, step_collector),
            inner_simplify(exp, rules, budget, step_collector),
        ),
    }
}

/// Simplifies the children of the expression, then applies the given rules to the expression
/// until they no longer apply.
fn inner_simplify(
    expr: &SymExpr,
    rules: Rules,
    budget: &Budget,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut expr = simplify_children(expr, rules, budget, step_collector);

    for _ in 0..MAX_PASSES {
        match rules(&expr, budget, step_collector) {
            Some(new_expr) => expr = simplify_children(&new_expr, rules, budget, step_collector),
            None => return expr,
        }
    }

    debug!(target: "mathengine::simplify", %expr, "rule application limit reached");
    expr
}

/// Puts the expression in canonical form, using the default [`Budget`].
///
/// See the [module-level documentation](crate::symbolic) for what canonical form means.
pub fn canonical(expr: &SymExpr) -> SymExpr {
    canonical_with(expr, &Budget::default())
}

/// Puts the expression in canonical form. Every rule applied is reported as a `trace!` event.
pub fn canonical_with(expr: &SymExpr, budget: &Budget) -> SymExpr {
    inner_simplify(expr, rules::all, budget, &mut TraceCollector)
}

/// Puts the expression in canonical form, reporting every rule that was applied to the given
/// [`StepCollector`].
pub fn canonical_with_steps(
    expr: &SymExpr,
    budget: &Budget,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    inner_simplify(expr, rules::all, budget, step_collector)
}

/// Returns a rough measure of how complicated an expression looks.
///
/// Every number, variable, constant and function name counts as one. Negative numbers and
/// fractions count extra, and every operator between terms / factors adds one more.
pub fn complexity(expr: &SymExpr) -> usize {
    match expr {
        SymExpr::Primary(Primary::Rational(n)) => {
            1 + usize::from(n.cmp0().is_lt()) + usize::from(*n.denom() != 1)
        },
        SymExpr::Primary(Primary::Float(n)) => 1 + usize::from(n.is_sign_negative()),
        SymExpr::Primary(Primary::Symbol(_) | Primary::Const(_)) => 1,
        SymExpr::Primary(Primary::Call(_, arg)) => 1 + complexity(arg),
        SymExpr::Add(items) | SymExpr::Mul(items) => {
            items.len().saturating_sub(1) + items.iter().map(complexity).sum::<usize>()
        },
        SymExpr::Exp(base, exp) => 1 + complexity(base) + complexity(exp),
    }
}

/// Simplifies the expression, using the default [`Budget`].
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &Budget::default())
}

/// Returns the candidate forms of an expression, in order of preference.
fn candidates(expr: &SymExpr, budget: &Budget) -> Vec<SymExpr> {
    let canonical = canonical_with(expr, budget);
    let mut candidates = vec![
        canonical.clone(),
        inner_simplify(&canonical, rules::all_with_identities, budget, &mut TraceCollector),
    ];

    match expand_with(&canonical, budget) {
        Ok(expanded) => candidates.push(expanded),
        Err(err) => debug!(target: "mathengine::simplify", %err, "expansion skipped"),
    }
    if let Some(cancelled) = cancel(&canonical, budget) {
        candidates.push(cancelled);
    }

    candidates
}

/// Simplifies the expression.
///
/// Several candidate forms are built, and the one with the lowest [`complexity`] is kept. Ties
/// are broken in favor of canonical form. The process is repeated on the winner until no
/// candidate is simpler.
pub fn simplify_with(expr: &SymExpr, budget: &Budget) -> SymExpr {
    let mut current = canonical_with(expr, budget);
    let mut current_complexity = complexity(&current);

    for _ in 0..MAX_ROUNDS {
        let best = candidates(&current, budget)
            .into_iter()
            .map(|candidate| (complexity(&candidate), candidate))
            .min_by_key(|(complexity, _)| *complexity);

        match best {
            Some((best_complexity, best)) if best_complexity < current_complexity => {
                current = best;
                current_complexity = best_complexity;
            },
            _ => break,
        }
    }

    current
}

/// Returns true if the expression simplifies to zero.
///
/// A decimal is considered zero if its magnitude is negligible compared to the working precision,
/// so that `0.1 + 0.2 - 0.3` is zero. Constant expressions that do not simplify to a number are
/// evaluated numerically.
pub fn is_zero(expr: &SymExpr) -> bool {
    is_zero_with(expr, &Budget::default())
}

/// Returns true if the expression simplifies to zero within the given [`Budget`]. See
/// [`is_zero`].
pub fn is_zero_with(expr: &SymExpr, budget: &Budget) -> bool {
    let simplified = simplify_with(expr, budget);
    if simplified.is_zero_number() {
        return true;
    }

    match simplified {
        SymExpr::Primary(Primary::Float(n)) => n.to_f64().abs() < 1e-100,
        simplified if simplified.is_constant() && !simplified.is_number() => {
            eval(&simplified).map_or(false, |n| n.to_f64().abs() < 1e-100)
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::parse_expr;
    use pretty_assertions::assert_eq;
    use std::{io, sync::{Arc, Mutex}};
    use super::*;

    fn canon(source: &str) -> String {
        canonical(&parse_expr(source).unwrap()).to_string()
    }

    fn simp(source: &str) -> String {
        simplify(&parse_expr(source).unwrap()).to_string()
    }

    #[test]
    fn fold_numbers() {
        assert_eq!(canon("2/3 + 1/4"), "11/12");
        assert_eq!(canon("2^10 - 24"), "1000");
        assert_eq!(canon("0.5 + 1/4"), "0.75");
    }

    #[test]
    fn like_terms_and_factors() {
        assert_eq!(canon("2x + 3 + x - 1"), "3x + 2");
        assert_eq!(canon("x * x^2 * 2"), "2x^3");
        assert_eq!(canon("x - x"), "0");
    }

    #[test]
    fn canonical_does_not_expand() {
        assert_eq!(canon("(x + 1)^2"), "(x + 1)^2");
        assert_eq!(canon("2(x + 1)"), "2x + 2");
    }

    #[test]
    fn known_values() {
        assert_eq!(canon("sqrt(12)"), "2sqrt(3)");
        assert_eq!(canon("sin(pi/6)"), "1/2");
        assert_eq!(canon("log(e)"), "1");
    }

    #[test]
    fn canonical_is_idempotent() {
        for source in ["x^2 - 3x - 2", "2sqrt(2)*x/3", "(x + 1)(x - 1)", "sin(x)^2 + 1"] {
            let once = canonical(&parse_expr(source).unwrap());
            let twice = canonical(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn steps_are_collected() {
        let mut steps = Vec::new();
        let expr = parse_expr("0 + x").unwrap();
        canonical_with_steps(&expr, &Budget::default(), &mut steps);
        assert_eq!(steps, vec![Step::AddZero]);
    }

    /// Shared buffer the test subscriber writes its events into.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rules_are_traced() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let expr = parse_expr("0 + x").unwrap();
        let result = tracing::subscriber::with_default(subscriber, || canonical(&expr));
        assert_eq!(result.to_string(), "x");

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("rule applied"), "{}", output);
        assert!(output.contains("AddZero"), "{}", output);
    }

    #[test]
    fn simplify_picks_simplest() {
        assert_eq!(simp("(x + 1)^2 - x^2 - 1"), "2x");
        assert_eq!(simp("sin(x)^2 + cos(x)^2"), "1");
        assert_eq!(simp("(x^2 - 1)/(x - 1)"), "x + 1");
    }

    #[test]
    fn simplify_keeps_factored_form_when_simpler() {
        assert_eq!(simp("(x + 1)^5"), "(x + 1)^5");
    }

    #[test]
    fn simplify_is_idempotent() {
        for source in ["(x + 1)^2 - 1", "(x^2 - 4)/(x + 2)", "sin(x)^2 + cos(x)^2 + x"] {
            let once = simplify(&parse_expr(source).unwrap());
            let twice = simplify(&once);
            assert_eq!(once.to_string(), twice.to_string());
        }
    }

    #[test]
    fn zero_difference() {
        assert!(is_zero(&parse_expr("x^2 - 1 - (x - 1)(x + 1)").unwrap()));
        assert!(is_zero(&parse_expr("1/2 - 0.5").unwrap()));
        assert!(!is_zero(&parse_expr("x - 1").unwrap()));
    }

    #[test]
    fn complexity_counts_operators() {
        assert_eq!(complexity(&parse_expr("x").unwrap()), 1);
        assert_eq!(complexity(&parse_expr("x + 1").unwrap()), 3);
        assert_eq!(complexity(&parse_expr("x^2").unwrap()), 3);
    }
}

use crate::options::EngineOptions;
use mathengine_compute::{
    numerical::eval_f64,
    symbolic::{canonical_with, is_zero_with, solve_with, Solutions, SymExpr},
    Budget,
};
use tracing::debug;
use super::{variables, Derivation, Step, StepExpr, StepKind};

/// Relative tolerance used when comparing the two sides of an equation without variables
/// numerically, when at least one side is not a plain number.
const TOLERANCE: f64 = 1e-12;

/// Returns true if both sides of an equation without variables are equal.
///
/// Two numbers are compared at full precision, so `1/3 = 0.333333333333333` is false.
fn sides_equal(lhs: &SymExpr, rhs: &SymExpr, budget: &Budget) -> bool {
    if is_zero_with(&(lhs.clone() - rhs.clone()), budget) {
        return true;
    }
    if lhs.is_number() && rhs.is_number() {
        return false;
    }

    match (eval_f64(lhs), eval_f64(rhs)) {
        (Ok(lhs), Ok(rhs)) => (lhs - rhs).abs() <= TOLERANCE * lhs.abs().max(rhs.abs()).max(1.0),
        _ => false,
    }
}

/// Checks an equation without variables.
fn verify(lhs: SymExpr, rhs: SymExpr, budget: &Budget) -> Derivation {
    let holds = sides_equal(&lhs, &rhs, budget);
    debug!(target: "mathengine::derive", holds, "equation without variables verified");

    let explanation = format!("La ecuación es {}", if holds { "verdadera" } else { "falsa" });
    Derivation {
        original: StepExpr::Equation(lhs, rhs),
        steps: vec![Step::new(StepKind::VerifyEquality, StepExpr::Truth(holds), explanation)],
        result: StepExpr::Truth(holds),
    }
}

/// Derives an equation. Both sides are given as parsed.
pub(super) fn derive_equation(lhs: SymExpr, rhs: SymExpr, options: &EngineOptions) -> Derivation {
    let budget = &options.budget;
    let canonical_lhs = canonical_with(&lhs, budget);
    let canonical_rhs = canonical_with(&rhs, budget);

    let vars = variables(&[&lhs, &rhs], &[&canonical_lhs, &canonical_rhs], options);
    let Some(var) = vars.into_iter().next() else {
        return verify(canonical_lhs, canonical_rhs, budget);
    };
    debug!(target: "mathengine::derive", %var, "solving for variable");

    let (lhs, rhs) = (canonical_lhs, canonical_rhs);
    let mut steps = vec![Step::new(
        StepKind::OriginalEquation,
        StepExpr::Equation(lhs.clone(), rhs.clone()),
        format!("Resolver para {}", var),
    )];

    if lhs.as_symbol() != Some(var.as_str()) && !rhs.is_zero_number() {
        let moved = canonical_with(&(lhs.clone() - rhs.clone()), budget);
        steps.push(Step::new(
            StepKind::Rearrange,
            StepExpr::Equation(moved, SymExpr::int(0)),
            "Mover todos los términos a un lado",
        ));
    }

    let solutions = match solve_with(&lhs, &rhs, &var, budget) {
        Ok(solutions) => solutions,
        Err(err) => {
            debug!(target: "mathengine::derive", %err, "solver failed, reporting no solution");
            Solutions::Finite(Vec::new())
        },
    };

    let last = match solutions {
        Solutions::All => Step::new(
            StepKind::AllValues,
            StepExpr::AllReals(var),
            "La ecuación se cumple para todos los números reales",
        ),
        Solutions::Finite(values) => match values.len() {
            0 => Step::new(
                StepKind::NoSolution,
                StepExpr::EmptySet,
                "La ecuación no tiene solución en los números reales",
            ),
            1 => Step::new(
                StepKind::Solution,
                StepExpr::Solutions { var, values },
                "Despejar la variable",
            ),
            _ => Step::new(
                StepKind::MultipleSolutions,
                StepExpr::Solutions { var, values },
                "La ecuación tiene múltiples soluciones",
            ),
        },
    };
    debug!(target: "mathengine::derive", kind = ?last.kind, result = %last.expression, "equation solved");

    let result = last.expression.clone();
    steps.push(last);
    Derivation {
        original: steps[0].expression.clone(),
        steps,
        result,
    }
}

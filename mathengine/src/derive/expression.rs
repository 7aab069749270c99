use crate::options::EngineOptions;
use mathengine_compute::{
    numerical::eval,
    symbolic::{
        canonical_with,
        collect_with,
        expand_with,
        factor_with,
        poly::MultiPoly,
        simplify_with,
        SymExpr,
    },
};
use tracing::debug;
use super::{variables, Derivation, DeriveError, Step, StepExpr, StepKind};

/// Records a step if `candidate` differs from both the original expression and the running
/// result, and adopts it as the new result.
fn adopt(
    steps: &mut Vec<Step>,
    result: &mut SymExpr,
    original: &SymExpr,
    candidate: SymExpr,
    kind: StepKind,
    explanation: impl Into<String>,
) {
    if candidate == *original || candidate == *result {
        debug!(target: "mathengine::derive", ?kind, "step skipped, nothing changed");
        return;
    }

    debug!(target: "mathengine::derive", ?kind, expr = %candidate, "step emitted");
    steps.push(Step::new(kind, StepExpr::Expr(candidate.clone()), explanation));
    *result = candidate;
}

/// Evaluates a constant expression. Rational values are kept exact.
fn evaluate(expr: &SymExpr, options: &EngineOptions) -> Result<StepExpr, DeriveError> {
    if expr.as_rational().is_some() {
        return Ok(StepExpr::Expr(expr.clone()));
    }

    let value = eval(expr)?;
    Ok(StepExpr::Decimal { value, digits: options.float_digits })
}

/// Derives a bare expression, given as parsed.
pub(super) fn derive_expression(expr: SymExpr, options: &EngineOptions) -> Result<Derivation, DeriveError> {
    let budget = &options.budget;
    let original = canonical_with(&expr, budget);
    let vars = variables(&[&expr], &[&original], options);

    let mut steps = Vec::new();
    let mut result = original.clone();

    match MultiPoly::from_expr(&original, budget) {
        Ok(_) => {
            let factored = factor_with(&original, budget);
            adopt(&mut steps, &mut result, &original, factored, StepKind::Factor, "Aplicamos factorización para simplificar");

            if steps.is_empty() {
                match expand_with(&original, budget) {
                    Ok(expanded) => adopt(&mut steps, &mut result, &original, expanded, StepKind::Expand, "Aplicamos la propiedad distributiva"),
                    Err(err) => debug!(target: "mathengine::derive", %err, "expansion not applicable"),
                }
            }
        },
        Err(err) => debug!(target: "mathengine::derive", %err, "not a polynomial, factoring skipped"),
    }

    let simplified = simplify_with(&original, budget);
    adopt(
        &mut steps,
        &mut result,
        &original,
        simplified.clone(),
        StepKind::Simplify,
        "Aplicamos reglas de simplificación algebraica",
    );

    if let Some(var) = vars.first() {
        let collected = collect_with(&original, var, budget);
        adopt(&mut steps, &mut result, &original, collected, StepKind::Collect, format!("Agrupar términos con {}", var));
    }

    if steps.is_empty() {
        let step = if vars.is_empty() {
            Step::new(StepKind::Evaluate, evaluate(&original, options)?, "Calculamos el valor numérico de la expresión")
        } else {
            Step::new(StepKind::AlreadySimplified, StepExpr::Expr(simplified), "La expresión ya está en su forma más simple")
        };
        debug!(target: "mathengine::derive", kind = ?step.kind, expr = %step.expression, "fallback step emitted");
        steps.push(step);
    }

    let result = match steps.last() {
        Some(step) => step.expression.clone(),
        None => StepExpr::Expr(result),
    };
    Ok(Derivation {
        original: StepExpr::Expr(original),
        steps,
        result,
    })
}

//! The derivation engine: turns an input into a list of labeled steps and a final result.
//!
//! Input is first [normalized](crate::normalize) and parsed. An input with a single top-level `=`
//! follows the equation path; anything else follows the expression path.
//!
//! # Equation path
//!
//! The variable to solve for is the first variable in [`VariableOrder`] order. The steps show the
//! original equation, the equation rearranged to `lhs - rhs = 0` (unless it is already of the form
//! `x = ...` or `... = 0`), and the solutions. An equation without variables is verified instead:
//! its result is `Verdadero` or `Falso`.
//!
//! # Expression path
//!
//! Polynomials are factored, or expanded if factoring changes nothing. Then the expression is
//! simplified, and its terms are grouped by the first variable. Each transformation adds a step
//! only if it produces something new. If no step was added, a constant expression is evaluated,
//! and any other expression is shown as it is.
//!
//! [`VariableOrder`]: crate::options::VariableOrder

mod equation;
mod error;
mod expression;
pub mod report;
mod step;

use crate::normalize::normalize;
use crate::options::EngineOptions;
use mathengine_compute::symbolic::SymExpr;
use mathengine_parser::parser::{ast::Input, Parser};
use tracing::debug;

pub use error::DeriveError;
pub use report::{DerivationReport, StepReport};
pub use step::{Derivation, Step, StepExpr, StepKind};

/// Derives the input with the default [`EngineOptions`].
pub fn derive(input: &str) -> Result<Derivation, DeriveError> {
    derive_with(input, &EngineOptions::default())
}

/// Derives the input. See the [module-level documentation](self) for the steps that are produced.
pub fn derive_with(input: &str, options: &EngineOptions) -> Result<Derivation, DeriveError> {
    let normalized = normalize(input)?;
    let parse_error = |error| DeriveError::Parse { input: normalized.clone(), error };

    let parsed = Parser::new(&normalized)
        .try_parse_full::<Input>()
        .map_err(parse_error)?;

    match parsed {
        Input::Expr(expr) => {
            debug!(target: "mathengine::derive", input = %normalized, "expression path");
            let expr = SymExpr::try_from(expr).map_err(parse_error)?;
            expression::derive_expression(expr, options)
        },
        Input::Equation(equation) => {
            debug!(target: "mathengine::derive", input = %normalized, "equation path");
            let lhs = SymExpr::try_from(equation.lhs).map_err(parse_error)?;
            let rhs = SymExpr::try_from(equation.rhs).map_err(parse_error)?;
            Ok(equation::derive_equation(lhs, rhs, options))
        },
    }
}

/// Returns the variables that survive canonicalization, in the configured order. `written` are the
/// expressions as parsed, which give the order of appearance; `canonical` are the same
/// expressions in canonical form.
fn variables(written: &[&SymExpr], canonical: &[&SymExpr], options: &EngineOptions) -> Vec<String> {
    let mut by_appearance: Vec<String> = Vec::new();
    for name in written.iter().flat_map(|expr| expr.symbols_by_appearance()) {
        if !by_appearance.contains(&name) && canonical.iter().any(|expr| expr.contains_symbol(&name)) {
            by_appearance.push(name);
        }
    }
    options.order_variables(by_appearance)
}

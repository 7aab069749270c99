//! A flat, pre-rendered view of a derivation, for presentation layers that only deal with strings.

use mathengine_parser::parser::fmt::Latex;
use super::{Derivation, DeriveError, Step};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rendered [`Step`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepReport {
    /// The label of the step.
    pub description: String,

    /// The result of the step, as LaTeX.
    pub expression: String,

    /// The explanation of the step.
    pub explanation: String,
}

impl From<&Step> for StepReport {
    fn from(step: &Step) -> Self {
        Self {
            description: step.description().to_owned(),
            expression: step.expression.as_display().to_string(),
            explanation: step.explanation.clone(),
        }
    }
}

/// The outcome of a derivation, with every expression rendered as LaTeX.
///
/// On success, `original`, `steps` and `result` are set. On failure, only `error` is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivationReport {
    pub success: bool,
    pub original: Option<String>,
    pub steps: Option<Vec<StepReport>>,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl From<&Derivation> for DerivationReport {
    fn from(derivation: &Derivation) -> Self {
        Self {
            success: true,
            original: Some(derivation.original.as_display().to_string()),
            steps: Some(derivation.steps.iter().map(StepReport::from).collect()),
            result: Some(derivation.result.as_display().to_string()),
            error: None,
        }
    }
}

impl From<&DeriveError> for DerivationReport {
    fn from(err: &DeriveError) -> Self {
        Self {
            success: false,
            original: None,
            steps: None,
            result: None,
            error: Some(err.to_string()),
        }
    }
}

impl From<Result<Derivation, DeriveError>> for DerivationReport {
    fn from(result: Result<Derivation, DeriveError>) -> Self {
        match &result {
            Ok(derivation) => derivation.into(),
            Err(err) => err.into(),
        }
    }
}

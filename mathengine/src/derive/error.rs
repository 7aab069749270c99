use crate::normalize::NormalizationFailure;
use mathengine_compute::numerical::EvalError;
use mathengine_error::Error;
use std::fmt;

/// An error that stops a derivation. No partial derivation is ever returned.
#[derive(Debug)]
pub enum DeriveError {
    /// The input was empty.
    Empty,

    /// The input could not be parsed.
    Parse {
        /// The normalized input that was parsed. The spans of the error point into this string.
        input: String,

        /// The parse error.
        error: Error,
    },

    /// The input was parsed, but could not be processed, such as `1/0`.
    Processing(EvalError),
}

impl DeriveError {
    /// Renders a full report of the error, highlighting the offending part of the input, if the
    /// error came from the parser. The report contains ANSI color codes.
    pub fn report(&self) -> Option<String> {
        match self {
            Self::Parse { input, error } => Some(error.report_to_string("input", input)),
            _ => None,
        }
    }
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "{}", NormalizationFailure),
            Self::Parse { error, .. } => write!(f, "Expresión matemática inválida: {}", error.message()),
            Self::Processing(err) => write!(f, "Error procesando la expresión: {}", err),
        }
    }
}

impl std::error::Error for DeriveError {}

impl From<NormalizationFailure> for DeriveError {
    fn from(_: NormalizationFailure) -> Self {
        Self::Empty
    }
}

impl From<EvalError> for DeriveError {
    fn from(err: EvalError) -> Self {
        Self::Processing(err)
    }
}

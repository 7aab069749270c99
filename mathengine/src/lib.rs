//! Step-by-step algebra for students: derivations of expressions and equations, answer checking,
//! and feedback.
//!
//! The main entry points are:
//!
//! - [`derive`]: turns an expression or equation into labeled steps and a final result.
//! - [`check_equivalent`]: checks whether two answers are mathematically the same.
//! - [`check_answer`]: grades an answer to an [`Exercise`] and gives [`Feedback`].
//!
//! Every step and result renders both as plain text (with [`Display`](std::fmt::Display)) and as
//! LaTeX (with [`Latex`](mathengine_parser::parser::fmt::Latex)).
//!
//! ```
//! use mathengine::derive;
//!
//! let derivation = derive("2*x + 3 = 7").unwrap();
//! assert_eq!(derivation.result.to_string(), "x = 2");
//!
//! let derivation = derive("x^2 - 4").unwrap();
//! assert_eq!(derivation.steps.len(), 1);
//! assert_eq!(derivation.result.to_string(), "(x - 2)(x + 2)");
//!
//! let derivation = derive("(2/3) + (1/4)").unwrap();
//! assert_eq!(derivation.result.to_string(), "11/12");
//!
//! assert_eq!(derive("").unwrap_err().to_string(), "No se proporcionó expresión");
//! ```
//!
//! ```
//! use mathengine::check_equivalent;
//!
//! assert!(check_equivalent("1/2", "0.5"));
//! assert!(check_equivalent("x^2-1", "(x-1)*(x+1)"));
//! assert!(!check_equivalent("x + 1", "x - 1"));
//! ```

pub mod derive;
pub mod equivalence;
pub mod feedback;
pub mod normalize;
pub mod options;
pub mod session;

pub use derive::{derive, derive_with, Derivation, DerivationReport, DeriveError, Step, StepExpr, StepKind};
pub use equivalence::{check_equivalent, check_equivalent_with, CheckOptions, CheckOptionsBuilder, Grader};
pub use feedback::{check_answer, Exercise, Feedback, FeedbackKind};
pub use normalize::{normalize, NormalizationFailure};
pub use options::{EngineOptions, EngineOptionsBuilder, VariableOrder};
pub use session::Session;

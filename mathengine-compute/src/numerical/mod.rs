//! Numerical evaluation and formatting of expressions.
//!
//! Exact work happens in [`crate::symbolic`]. This module is used when an answer has to be shown
//! as a decimal, or when two candidate answers are compared by value.

pub mod eval;
pub mod fmt;

pub use eval::{eval, eval_f64, EvalError};

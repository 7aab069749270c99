//! Symbolic algebra for the expressions and equations students type.
//!
//! The [`symbolic`] module holds the expression tree ([`symbolic::SymExpr`]) and every symbolic
//! transformation: canonical auto-evaluation, simplification, factoring, expansion, collecting and
//! equation solving. The [`numerical`] module evaluates constant expressions to arbitrary-precision
//! decimals and formats them.
//!
//! All work is bounded by a [`budget::Budget`], so that inputs such as `(x + 1)^100000` are
//! reported as "not applicable" instead of running for a long time.

pub mod approx;
pub mod budget;
pub mod consts;
pub mod numerical;
pub mod primitive;
pub mod symbolic;

pub use budget::{Budget, BudgetBuilder};

//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`Expr`](mathengine_parser::parser::ast::expr::Expr) nodes produced by
//! [`mathengine_parser`], with the main difference being that [`SymExpr`] nodes **flatten** out
//! the tree structure: `x + (y + z)` is a single [`SymExpr::Add`] node with three children.
//!
//! ```
//! use mathengine_compute::symbolic::expr::{parse_expr, SymExpr};
//!
//! let expr = parse_expr("x + (y + z)").unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Canonical form and simplification
//!
//! Right after parsing, expressions are put in **canonical form** by [`canonical()`]: numbers are
//! folded, like terms and like factors are combined, exact numeric powers are computed and known
//! function values are substituted. No expansion or factoring happens at this stage, so
//! `(x + 1)^2` stays as it is.
//!
//! [`simplify()`] goes further. It builds several candidate forms (canonical, expanded, with
//! trigonometric identities applied, and with common factors cancelled from fractions) and keeps
//! the one with the lowest [`complexity`](simplify::complexity).
//!
//! ```
//! use mathengine_compute::symbolic::{expr::parse_expr, simplify};
//!
//! let expr = parse_expr("x + x + x").unwrap();
//! assert_eq!(simplify(&expr).to_string(), "3x");
//! ```
//!
//! # Other transformations
//!
//! - [`factor()`]: factors polynomials over the rationals.
//! - [`expand()`]: distributes products and integer powers of sums.
//! - [`collect()`]: groups the terms of a sum by powers of a variable.
//! - [`solve()`]: finds the real solutions of an equation in one variable.

pub mod collect;
pub mod expand;
pub mod expr;
pub mod factor;
pub mod poly;
pub mod rational;
pub mod simplify;
pub mod solve;
pub mod step_collector;

pub use collect::{collect, collect_with};
pub use expand::{expand, expand_with};
pub use expr::SymExpr;
pub use factor::{factor, factor_with};
pub use rational::{cancel, together, together_with};
pub use simplify::{canonical, canonical_with, canonical_with_steps, is_zero, is_zero_with, simplify, simplify_with};
pub use solve::{solve, solve_with, SolveError, Solutions};
pub use step_collector::{StepCollector, TraceCollector};

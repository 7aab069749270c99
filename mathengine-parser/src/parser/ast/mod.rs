//! The abstract syntax tree produced by the parser.
//!
//! The tree stays close to what the user wrote: parentheses are kept as [`paren::Paren`] nodes,
//! implicit multiplication is marked on the operator, and function names are not checked. Turning
//! the tree into something that can be manipulated algebraically is the job of the compute crate.

pub mod binary;
pub mod call;
pub mod equation;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use equation::{Equation, Input};
pub use expr::{Expr, Primary};
pub use literal::{LitFloat, LitInt, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;

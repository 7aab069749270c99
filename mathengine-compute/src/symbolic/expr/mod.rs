//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](mathengine_parser::parser::ast::expr::Expr) type from `mathengine_parser` is a
//! recursive `enum` that represents the AST of what the student typed. It's convenient for
//! parsing, but not so much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], which flattens the AST into a list of terms or factors,
//! depending on the operation. Subtraction is stored as addition of a term multiplied by `-1`,
//! division as multiplication by a power of `-1`, and `sqrt(x)` as `x^(1/2)`, so that every later
//! transformation only has to deal with sums, products and powers.
//!
//! # Strict equality
//!
//! Determining if two expressions are mathematically equal is hard in general: `x^2 + 2x + 1` and
//! `(x + 1)^2` are equal, but this is only visible after expanding or factoring. To combine like
//! terms / factors, we instead need a notion of equality that is simple and fast to compute, and
//! that never reports false positives.
//!
//! We call this **strict equality**. Two expressions are strictly equal if:
//!
//! - They are the same kind of node, with strictly equal values.
//! - If both are sums or products, they have strictly equal terms / factors, **in any order**.
//! - If both are powers, they have strictly equal bases and exponents.
//!
//! The [`PartialEq`] implementation for [`SymExpr`] implements **strict equality**. Semantic
//! equality ("the difference normalizes to zero") is provided by
//! [`is_zero`](crate::symbolic::is_zero).

mod convert;
mod display;
pub mod error;
mod iter;
mod latex;
pub(crate) mod order;

use crate::primitive::rat;
use iter::ExprIter;
use rug::{Float, Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

pub use convert::parse_expr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter, written `pi` or `π`.
    Pi,

    /// Euler's number, written `e`.
    E,
}

impl Constant {
    /// Returns the name of the constant as the student would type it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }
}

/// A function that can appear in an expression.
///
/// `sqrt` and `exp` are not listed; they are stored as powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    /// The natural logarithm.
    Log,
    Abs,
}

impl Func {
    /// Returns the name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Abs => "abs",
        }
    }

    /// Looks up a function by one of the names a student may use for it.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "log" | "ln" => Self::Log,
            "abs" => Self::Abs,
            _ => return None,
        })
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact rational number, such as `2` or `11/12`.
    Rational(Rational),

    /// A decimal number, such as `0.5`. Decimals stay approximate: `0.5 + 1/4` is `0.75`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A named constant, such as `pi`.
    Const(Constant),

    /// A function applied to an argument, such as `sin(x)`.
    Call(Func, Box<SymExpr>),
}

impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational(lhs), Self::Rational(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs == rhs,
            (Self::Const(lhs), Self::Const(rhs)) => lhs == rhs,
            (Self::Call(lhs_func, lhs_arg), Self::Call(rhs_func, rhs_arg)) => {
                lhs_func == rhs_func && lhs_arg == rhs_arg
            },
            _ => false,
        }
    }
}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn int(n: i64) -> Self {
        Self::Primary(Primary::Rational(rat(n)))
    }

    /// Creates an exact rational expression.
    pub fn rational(n: Rational) -> Self {
        Self::Primary(Primary::Rational(n))
    }

    /// Creates a decimal expression.
    pub fn float(n: Float) -> Self {
        Self::Primary(Primary::Float(n))
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a named constant.
    pub fn constant(constant: Constant) -> Self {
        Self::Primary(Primary::Const(constant))
    }

    /// Creates a function call.
    pub fn call(func: Func, arg: SymExpr) -> Self {
        Self::Primary(Primary::Call(func, Box::new(arg)))
    }

    /// Creates the power `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::rational(Rational::from((1, 2))))
    }

    /// Returns the reciprocal of this expression. No simplification is done.
    pub fn recip(self) -> Self {
        Self::pow(self, Self::int(-1))
    }

    /// If the expression is a [`Primary::Rational`], returns a reference to the number.
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Rational(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Rational`] with denominator 1, returns the integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_rational()
            .filter(|n| *n.denom() == 1)
            .map(|n| n.numer())
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the number.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns the name of the variable.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Call`], returns the function and its argument.
    pub fn as_call(&self) -> Option<(Func, &SymExpr)> {
        match self {
            Self::Primary(Primary::Call(func, arg)) => Some((*func, arg)),
            _ => None,
        }
    }

    /// Returns true if the expression is a number, either exact or decimal.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Rational(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Rational(n)) => n.cmp0().is_eq(),
            Self::Primary(Primary::Float(n)) => n.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the exact number one.
    pub fn is_one(&self) -> bool {
        self.as_rational().map_or(false, |n| *n == 1)
    }

    /// Returns true if the expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Rational(n)) => n.cmp0().is_lt(),
            Self::Primary(Primary::Float(n)) => n.is_sign_negative() && !n.is_zero(),
            _ => false,
        }
    }

    /// Returns the numeric coefficient and the remaining factors of a term.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a*b` -> `(3, a*b)`
    /// - `a` -> `(1, a)`
    pub fn split_coefficient(&self) -> (SymExpr, SymExpr) {
        match self {
            expr if expr.is_number() => (expr.clone(), Self::int(1)),
            Self::Mul(factors) => {
                let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
                    .cloned()
                    .partition(SymExpr::is_number);
                let coefficient = numbers.into_iter()
                    .fold(Self::int(1), |acc, n| acc.mul_number(&n).unwrap_or(acc));
                (coefficient, Self::Mul(rest).downgrade())
            },
            expr => (Self::int(1), expr.clone()),
        }
    }

    /// Returns the base and exponent of the expression, treating anything that is not a power as
    /// a power of one.
    pub fn as_base_exponent(&self) -> (SymExpr, SymExpr) {
        match self {
            Self::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
            expr => (expr.clone(), Self::int(1)),
        }
    }

    /// Adds two numbers. Returns [`None`] if either expression is not a number.
    ///
    /// Mixing an exact rational with a decimal gives a decimal.
    pub fn add_number(&self, rhs: &SymExpr) -> Option<SymExpr> {
        use Primary::{Float as F, Rational as R};
        match (self, rhs) {
            (Self::Primary(R(lhs)), Self::Primary(R(rhs))) => Some(Self::rational(rat(lhs + rhs))),
            (Self::Primary(F(lhs)), Self::Primary(F(rhs))) => Some(Self::float(lhs.clone() + rhs)),
            (Self::Primary(F(lhs)), Self::Primary(R(rhs)))
                | (Self::Primary(R(rhs)), Self::Primary(F(lhs))) => Some(Self::float(lhs.clone() + rhs)),
            _ => None,
        }
    }

    /// Multiplies two numbers. Returns [`None`] if either expression is not a number.
    ///
    /// Mixing an exact rational with a decimal gives a decimal.
    pub fn mul_number(&self, rhs: &SymExpr) -> Option<SymExpr> {
        use Primary::{Float as F, Rational as R};
        match (self, rhs) {
            (Self::Primary(R(lhs)), Self::Primary(R(rhs))) => Some(Self::rational(rat(lhs * rhs))),
            (Self::Primary(F(lhs)), Self::Primary(F(rhs))) => Some(Self::float(lhs.clone() * rhs)),
            (Self::Primary(F(lhs)), Self::Primary(R(rhs)))
                | (Self::Primary(R(rhs)), Self::Primary(F(lhs))) => Some(Self::float(lhs.clone() * rhs)),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the set of variables in the expression, in lexicographic order. Constants such as
    /// `pi` are not variables.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(SymExpr::as_symbol)
            .map(str::to_owned)
            .collect()
    }

    /// Returns the variables in the expression, in the order of their first appearance.
    pub fn symbols_by_appearance(&self) -> Vec<String> {
        let mut symbols = Vec::new();
        for name in self.post_order_iter().filter_map(SymExpr::as_symbol) {
            if !symbols.iter().any(|seen| seen == name) {
                symbols.push(name.to_owned());
            }
        }
        symbols
    }

    /// Returns true if the given variable appears in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if the expression contains no variables.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter().all(|expr| expr.as_symbol().is_none())
    }

    /// Replaces every occurrence of the given variable with the given value. No simplification is
    /// done.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(sym)) if sym == name => value.clone(),
            Self::Primary(Primary::Call(func, arg)) => Self::call(*func, arg.substitute(name, value)),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(name, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(name, value)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(name, value), exp.substitute(name, value)),
        }
    }
}

/// Returns true if every element of `lhs` can be paired with a strictly equal element of `rhs`.
fn same_multiset(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, other)| !used[i] && item == other);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<Integer> for SymExpr {
    fn from(n: Integer) -> Self {
        Self::rational(Rational::from(n))
    }
}

impl From<Rational> for SymExpr {
    fn from(n: Rational) -> Self {
        Self::rational(n)
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for flattening nested sums
/// into one list of terms.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for flattening nested
/// products into one list of factors.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Rational(n)) => Self::rational(-n),
            Self::Primary(Primary::Float(n)) => Self::float(-n),
            expr => Self::int(-1) * expr,
        }
    }
}

/// `a - b` is stored as `a + (-1)*b`.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

/// `a / b` is stored as `a * b^-1`.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// NOTE: Strict equality allows different orderings of terms and factors, but `pretty_assertions`
/// compares the `Debug` output, so a failing assertion may show differences that are only
/// reorderings.
#[cfg(test)]
mod tests {
    use crate::primitive::frac;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn y() -> SymExpr {
        SymExpr::symbol("y")
    }

    #[test]
    fn strict_equality_ignores_order() {
        let a = parse_expr("2(x + (y - 5))").unwrap();
        let b = parse_expr("(y - 5 + x) * 2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(x + (y - 5))").unwrap();
        let b = parse_expr("2x + 2y - 10").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        let a = SymExpr::Mul(vec![x(), x(), y()]);
        let b = SymExpr::Mul(vec![x(), y(), y()]);
        assert_ne!(a, b);
    }

    #[test]
    fn flattening_ops() {
        let expr = x() + y() + SymExpr::int(1);
        assert_eq!(expr, SymExpr::Add(vec![x(), y(), SymExpr::int(1)]));

        let expr = x() * (y() * SymExpr::int(2));
        assert_eq!(expr, SymExpr::Mul(vec![x(), y(), SymExpr::int(2)]));
    }

    #[test]
    fn negation_of_numbers() {
        assert_eq!(-SymExpr::int(3), SymExpr::int(-3));
        assert_eq!(-x(), SymExpr::Mul(vec![SymExpr::int(-1), x()]));
    }

    #[test]
    fn coefficient_split() {
        let term = SymExpr::Mul(vec![SymExpr::int(3), x(), SymExpr::rational(frac(1, 2))]);
        assert_eq!(term.split_coefficient(), (SymExpr::rational(frac(3, 2)), x()));
        assert_eq!(x().split_coefficient(), (SymExpr::int(1), x()));
    }

    #[test]
    fn symbols() {
        let expr = parse_expr("y + sin(x) + pi*a").unwrap();
        let free = expr.free_symbols().into_iter().collect::<Vec<_>>();
        assert_eq!(free, vec!["a", "x", "y"]);
        assert_eq!(expr.symbols_by_appearance(), vec!["y", "x", "a"]);
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("pi"));
    }

    #[test]
    fn substitution() {
        let expr = parse_expr("x^2 + y").unwrap();
        let substituted = expr.substitute("x", &SymExpr::int(3));
        assert_eq!(substituted, SymExpr::Add(vec![
            SymExpr::pow(SymExpr::int(3), SymExpr::int(2)),
            y(),
        ]));
    }
}

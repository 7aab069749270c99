//! Conversion of the parser's AST into [`SymExpr`].
//!
//! Conversion is where function names are checked. Known names become [`Func`] calls (or powers,
//! for `sqrt` and `exp`), and single-letter names followed by parentheses, as in `x(x + 1)`, are
//! read as implicit multiplication. Anything else is reported with a "did you mean" suggestion.

use crate::primitive::{float, rat_from_decimal};
use mathengine_error::Error;
use mathengine_parser::parser::{
    ast::{call::Call, expr::Expr as AstExpr, literal::Literal},
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};
use rug::{Integer, Rational};
use super::{
    error::{InvalidNumber, UnknownFunction, WrongArgumentCount},
    Constant,
    Func,
    SymExpr,
};

/// Parses the given source as a single expression and converts it into a [`SymExpr`]. No
/// simplification is done.
pub fn parse_expr(source: &str) -> Result<SymExpr, Error> {
    let ast = Parser::new(source).try_parse_full::<AstExpr>()?;
    SymExpr::try_from(ast)
}

/// Converts a bare name into a constant or a variable.
fn atom(name: &str) -> SymExpr {
    match name {
        "pi" => SymExpr::constant(Constant::Pi),
        "e" => SymExpr::constant(Constant::E),
        _ => SymExpr::symbol(name),
    }
}

/// Returns `k` if `value = base^k` for some positive integer `k`.
fn exact_log(value: &Integer, base: &Integer) -> Option<SymExpr> {
    if *base <= 1 || *value < 1 {
        return None;
    }

    let mut power = Integer::from(1);
    let mut k = 0;
    while power < *value {
        power *= base;
        k += 1;
    }

    (power == *value).then(|| SymExpr::int(k))
}

/// Converts a function call.
fn convert_call(call: Call) -> Result<SymExpr, Error> {
    let name = call.name.name.as_str();
    let given = call.args.len();
    let wrong_count = |expected: &'static str| Error::new(
        call.outer_span().to_vec(),
        WrongArgumentCount { name: name.to_owned(), expected, given },
    );

    match name {
        "sqrt" | "exp" => {
            if given != 1 {
                return Err(wrong_count("1"));
            }
        },
        "log" | "ln" => {
            if given != 1 && !(name == "log" && given == 2) {
                return Err(wrong_count(if name == "log" { "1 or 2" } else { "1" }));
            }
        },
        _ if Func::from_name(name).is_some() => {
            if given != 1 {
                return Err(wrong_count("1"));
            }
        },
        // `x(x + 1)` is `x * (x + 1)`
        _ if name.len() == 1 && given == 1 => {},
        _ => return Err(Error::new(vec![call.name.span.clone()], UnknownFunction::new(name))),
    }

    let name = call.name.name.clone();
    let mut args = call.args.into_iter()
        .map(SymExpr::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    // arity was checked above, so `args` holds one or two expressions
    let base = if args.len() == 2 { args.pop() } else { None };
    let arg = match args.pop() {
        Some(arg) => arg,
        None => return Ok(SymExpr::int(0)),
    };

    Ok(match (name.as_str(), base) {
        ("sqrt", _) => arg.sqrt(),
        ("exp", _) => SymExpr::pow(SymExpr::constant(Constant::E), arg),
        (_, Some(base)) => {
            match (arg.as_integer(), base.as_integer()) {
                (Some(value), Some(base_int)) => match exact_log(value, base_int) {
                    Some(k) => k,
                    None => SymExpr::call(Func::Log, arg) / SymExpr::call(Func::Log, base),
                },
                _ => SymExpr::call(Func::Log, arg) / SymExpr::call(Func::Log, base),
            }
        },
        (name, None) => match Func::from_name(name) {
            Some(func) => SymExpr::call(func, arg),
            None => atom(name) * arg,
        },
    })
}

impl TryFrom<AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        Ok(match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => {
                    let n = rat_from_decimal(&int.value)
                        .ok_or_else(|| Error::new(vec![int.span.clone()], InvalidNumber {
                            literal: int.value.clone(),
                        }))?;
                    Self::rational(n)
                },
                Literal::Float(decimal) => {
                    let n: Rational = rat_from_decimal(&decimal.value)
                        .ok_or_else(|| Error::new(vec![decimal.span.clone()], InvalidNumber {
                            literal: decimal.value.clone(),
                        }))?;
                    Self::float(float(&n))
                },
                Literal::Symbol(sym) => atom(&sym.name),
            },
            AstExpr::Paren(paren) => Self::try_from(paren.into_innermost())?,
            AstExpr::Call(call) => convert_call(call)?,
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::try_from(*unary.operand)?,
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(*bin.lhs)?;
                let rhs = Self::try_from(*bin.rhs)?;
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::frac;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6").unwrap();
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::int(6),
            SymExpr::Mul(vec![SymExpr::int(5), x()]),
            SymExpr::pow(x(), SymExpr::int(2)),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - 3/y").unwrap();
        assert_eq!(expr, SymExpr::Add(vec![
            x(),
            SymExpr::Mul(vec![
                SymExpr::int(-1),
                SymExpr::int(3),
                SymExpr::pow(SymExpr::symbol("y"), SymExpr::int(-1)),
            ]),
        ]));
    }

    #[test]
    fn decimals_are_floats() {
        let expr = parse_expr("0.5").unwrap();
        assert_eq!(expr, SymExpr::float(float(0.5)));
    }

    #[test]
    fn constants() {
        assert_eq!(parse_expr("pi").unwrap(), SymExpr::constant(Constant::Pi));
        assert_eq!(parse_expr("e").unwrap(), SymExpr::constant(Constant::E));
    }

    #[test]
    fn sqrt_is_power() {
        let expr = parse_expr("sqrt(x)").unwrap();
        assert_eq!(expr, SymExpr::pow(x(), SymExpr::rational(frac(1, 2))));
    }

    #[test]
    fn exp_is_power_of_e() {
        let expr = parse_expr("exp(x)").unwrap();
        assert_eq!(expr, SymExpr::pow(SymExpr::constant(Constant::E), x()));
    }

    #[test]
    fn ln_alias() {
        assert_eq!(parse_expr("ln(x)").unwrap(), SymExpr::call(Func::Log, x()));
    }

    #[test]
    fn log_with_base() {
        assert_eq!(parse_expr("log(8, 2)").unwrap(), SymExpr::int(3));
        assert_eq!(
            parse_expr("log(x, 10)").unwrap(),
            SymExpr::call(Func::Log, x()) / SymExpr::call(Func::Log, SymExpr::int(10)),
        );
    }

    #[test]
    fn single_letter_call_is_multiplication() {
        let expr = parse_expr("x(x + 1)").unwrap();
        assert_eq!(expr, SymExpr::Mul(vec![
            x(),
            SymExpr::Add(vec![x(), SymExpr::int(1)]),
        ]));
    }

    #[test]
    fn unknown_function() {
        let err = parse_expr("sine(x)").unwrap_err();
        assert_eq!(err.spans, vec![0..4]);
        assert_eq!(err.message(), "the `sine` function does not exist");

        let report = err.report_to_string("input", "sine(x)");
        let report = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(report.contains("did you mean one of these functions?"));
        assert!(report.contains("`sin`"));
    }

    #[test]
    fn wrong_argument_count() {
        let err = parse_expr("sin(x, y)").unwrap_err();
        assert_eq!(err.message(), "wrong number of arguments for the `sin` function");
        assert_eq!(err.spans.len(), 2);
    }
}

use mathengine_compute::{numerical::fmt::FloatFormatter, symbolic::SymExpr};
use mathengine_parser::parser::fmt::Latex;
use rug::Float;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of transformation a [`Step`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepKind {
    /// The expression was factored.
    Factor,

    /// The expression was expanded.
    Expand,

    /// The expression was simplified.
    Simplify,

    /// Like terms were grouped by powers of a variable.
    Collect,

    /// A constant expression was evaluated.
    Evaluate,

    /// No transformation applied; the expression is shown as it is.
    AlreadySimplified,

    /// The equation as it was given.
    OriginalEquation,

    /// Every term of the equation was moved to the left side.
    Rearrange,

    /// The equation has exactly one solution.
    Solution,

    /// The equation has more than one solution.
    MultipleSolutions,

    /// The equation has no real solution.
    NoSolution,

    /// An equation without variables was checked.
    VerifyEquality,

    /// Every real number is a solution.
    AllValues,
}

impl StepKind {
    /// Returns the label shown to the student for this kind of step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Factor => "Factorizar la expresión",
            Self::Expand => "Expandir la expresión",
            Self::Simplify => "Simplificar la expresión",
            Self::Collect => "Agrupar términos semejantes",
            Self::Evaluate => "Evaluar numéricamente",
            Self::AlreadySimplified => "Expresión simplificada",
            Self::OriginalEquation => "Ecuación original",
            Self::Rearrange => "Reorganizar términos",
            Self::Solution => "Solución",
            Self::MultipleSolutions => "Soluciones múltiples",
            Self::NoSolution => "Sin solución",
            Self::VerifyEquality => "Verificar igualdad",
            Self::AllValues => "Infinitas soluciones",
        }
    }
}

/// Something that can be shown as the result of a step: an expression, an equation, a set of
/// solutions or a truth value.
#[derive(Debug, Clone, PartialEq)]
pub enum StepExpr {
    /// An expression.
    Expr(SymExpr),

    /// A decimal value, shown with the given number of significant digits.
    Decimal {
        value: Float,
        digits: usize,
    },

    /// An equation `lhs = rhs`.
    Equation(SymExpr, SymExpr),

    /// The solutions of an equation: `x = 2`, or `x ∈ {-2, 2}` if there are several.
    Solutions {
        var: String,
        values: Vec<SymExpr>,
    },

    /// Every real number: `x ∈ ℝ`.
    AllReals(String),

    /// The truth value of an equation without variables.
    Truth(bool),

    /// No solution.
    EmptySet,
}

impl Display for StepExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Decimal { value, digits } => write!(f, "{}", FloatFormatter::new(value).digits(*digits)),
            Self::Equation(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
            Self::Solutions { var, values } => match values.as_slice() {
                [] => write!(f, "Sin solución"),
                [value] => write!(f, "{} = {}", var, value),
                values => {
                    write!(f, "{} ∈ {{", var)?;
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", value)?;
                    }
                    write!(f, "}}")
                },
            },
            Self::AllReals(var) => write!(f, "{} ∈ ℝ", var),
            Self::Truth(true) => write!(f, "Verdadero"),
            Self::Truth(false) => write!(f, "Falso"),
            Self::EmptySet => write!(f, "Sin solución"),
        }
    }
}

impl Latex for StepExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Expr(expr) => expr.fmt_latex(f),
            Self::Decimal { value, digits } => write!(f, "{}", FloatFormatter::new(value).digits(*digits)),
            Self::Equation(lhs, rhs) => {
                lhs.fmt_latex(f)?;
                write!(f, " = ")?;
                rhs.fmt_latex(f)
            },
            Self::Solutions { var, values } => match values.as_slice() {
                [] => write!(f, "\\emptyset"),
                [value] => {
                    write!(f, "{} = ", var)?;
                    value.fmt_latex(f)
                },
                values => {
                    write!(f, "{} \\in \\left\\{{", var)?;
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        value.fmt_latex(f)?;
                    }
                    write!(f, "\\right\\}}")
                },
            },
            Self::AllReals(var) => write!(f, "{} \\in \\mathbb{{R}}", var),
            Self::Truth(true) => write!(f, "\\text{{Verdadero}}"),
            Self::Truth(false) => write!(f, "\\text{{Falso}}"),
            Self::EmptySet => write!(f, "\\emptyset"),
        }
    }
}

/// One labeled transformation of a derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// What kind of transformation was applied.
    pub kind: StepKind,

    /// The result of the transformation.
    pub expression: StepExpr,

    /// A one-sentence explanation of the transformation.
    pub explanation: String,
}

impl Step {
    /// Creates a step.
    pub fn new(kind: StepKind, expression: StepExpr, explanation: impl Into<String>) -> Self {
        Self { kind, expression, explanation: explanation.into() }
    }

    /// Returns the label shown to the student for this step.
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

/// The complete, successful derivation of an input.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    /// The input after parsing and canonicalization.
    pub original: StepExpr,

    /// The steps, in the order they were applied.
    pub steps: Vec<Step>,

    /// The final result. It renders the same as the expression of the last step.
    pub result: StepExpr,
}

#[cfg(test)]
mod tests {
    use mathengine_compute::{primitive::float, symbolic::{canonical, expr::parse_expr}};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(source: &str) -> SymExpr {
        canonical(&parse_expr(source).unwrap())
    }

    fn solutions(values: &[&str]) -> StepExpr {
        StepExpr::Solutions {
            var: "x".to_string(),
            values: values.iter().map(|v| expr(v)).collect(),
        }
    }

    #[test]
    fn plain_text() {
        assert_eq!(solutions(&["2"]).to_string(), "x = 2");
        assert_eq!(solutions(&["-2", "2"]).to_string(), "x ∈ {-2, 2}");
        assert_eq!(StepExpr::AllReals("x".to_string()).to_string(), "x ∈ ℝ");
        assert_eq!(StepExpr::Truth(true).to_string(), "Verdadero");
        assert_eq!(StepExpr::Truth(false).to_string(), "Falso");
        assert_eq!(StepExpr::EmptySet.to_string(), "Sin solución");
        assert_eq!(StepExpr::Equation(expr("2x - 4"), expr("0")).to_string(), "2x - 4 = 0");
    }

    #[test]
    fn decimal_digits() {
        let value = StepExpr::Decimal { value: float(2).sqrt(), digits: 4 };
        assert_eq!(value.to_string(), "1.414");
    }

    #[test]
    fn latex() {
        assert_eq!(solutions(&["1/2"]).as_display().to_string(), "x = \\frac{1}{2}");
        assert_eq!(
            solutions(&["-2", "2"]).as_display().to_string(),
            "x \\in \\left\\{-2, 2\\right\\}",
        );
        assert_eq!(StepExpr::EmptySet.as_display().to_string(), "\\emptyset");
        assert_eq!(StepExpr::AllReals("x".to_string()).as_display().to_string(), "x \\in \\mathbb{R}");
    }

    #[test]
    fn step_description() {
        let step = Step::new(StepKind::Factor, StepExpr::Expr(expr("x")), "Aplicamos factorización para simplificar");
        assert_eq!(step.description(), "Factorizar la expresión");
    }
}

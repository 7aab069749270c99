//! Feedback on student answers: grading an answer against an exercise, remedial explanations,
//! hints and score bands.

mod topic;

use crate::equivalence::Grader;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use topic::{hint, Area, Difficulty, Topic, DEFAULT_HINT};

/// Message given for a correct answer.
pub const CORRECT_MESSAGE: &str = "¡Correcto! Excelente trabajo.";

/// Message given for an incorrect answer.
pub const INCORRECT_MESSAGE: &str = "Respuesta incorrecta. Revisa la explicación.";

/// Explanation given for an incorrect answer to an exercise without an [`ErrorType`].
pub const DEFAULT_EXPLANATION: &str = "Revisa la teoría correspondiente para entender mejor este concepto.";

/// The kind of mistake an exercise tends to provoke, used to pick a remedial explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorType {
    /// Adding fractions without a common denominator.
    FractionAddition,

    /// Evaluating operations in the wrong order, such as adding before multiplying.
    OrderOfOperations,

    /// Prime factorization of a number.
    Factorization,

    /// Multiplying or dividing monomials, where exponents are added or subtracted.
    MonomialOperations,

    /// Adding or multiplying polynomials.
    PolynomialOperations,

    /// Expanding squares of binomials and differences of squares.
    NotableProducts,
}

impl ErrorType {
    /// Returns the remedial explanation for this kind of mistake, as plain text.
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::FractionAddition => "Para sumar fracciones:\n\
                1. Encuentra el denominador común (MCM)\n\
                2. Convierte ambas fracciones al mismo denominador\n\
                3. Suma solo los numeradores\n\
                4. Simplifica si es posible",
            Self::OrderOfOperations => "Recuerda el orden de operaciones (PEMDAS):\n\
                1. Paréntesis\n\
                2. Exponentes\n\
                3. Multiplicación y División (izq. a der.)\n\
                4. Adición y Sustracción (izq. a der.)",
            Self::Factorization => "Para factorizar un número:\n\
                1. Divide por números primos empezando por 2\n\
                2. Continúa hasta que el cociente sea 1\n\
                3. Expresa como producto de potencias de primos",
            Self::MonomialOperations => "Operaciones con monomios:\n\
                - Para multiplicar, multiplica los coeficientes y suma los exponentes\n\
                - Para dividir, divide los coeficientes y resta los exponentes",
            Self::PolynomialOperations => "Operaciones con polinomios:\n\
                - Agrupa los términos semejantes\n\
                - Aplica la propiedad distributiva",
            Self::NotableProducts => "Productos notables:\n\
                - (a + b)^2 = a^2 + 2ab + b^2\n\
                - (a - b)^2 = a^2 - 2ab + b^2\n\
                - (a + b)(a - b) = a^2 - b^2",
        }
    }
}

/// An exercise with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exercise {
    problem: String,
    answer: String,
    solution_steps: Vec<String>,
    error_type: Option<ErrorType>,
}

impl Exercise {
    /// Creates an exercise with the given statement and expected answer.
    pub fn new(problem: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            answer: answer.into(),
            solution_steps: Vec::new(),
            error_type: None,
        }
    }

    /// Sets the worked solution shown after answering.
    pub fn with_solution_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.solution_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the kind of mistake the exercise tends to provoke.
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    /// Returns the statement shown to the student.
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Returns the expected answer, as written by the exercise author.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the worked solution, one line per step. Empty if none was given.
    pub fn solution_steps(&self) -> &[String] {
        &self.solution_steps
    }

    /// Returns the kind of mistake the exercise tends to provoke, if known.
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error_type
    }
}

/// Whether an answer was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeedbackKind {
    Success,
    Error,
}

/// The response to a student's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feedback {
    pub is_correct: bool,
    pub kind: FeedbackKind,
    pub message: String,

    /// Remedial explanation, only given for incorrect answers.
    pub explanation: Option<String>,
}

impl Feedback {
    /// Builds the feedback for an answer to the given exercise.
    fn new(is_correct: bool, exercise: &Exercise) -> Self {
        if is_correct {
            Self {
                is_correct,
                kind: FeedbackKind::Success,
                message: CORRECT_MESSAGE.to_string(),
                explanation: None,
            }
        } else {
            let explanation = exercise.error_type
                .map(|error_type| error_type.explanation())
                .unwrap_or(DEFAULT_EXPLANATION);
            Self {
                is_correct,
                kind: FeedbackKind::Error,
                message: INCORRECT_MESSAGE.to_string(),
                explanation: Some(explanation.to_string()),
            }
        }
    }
}

impl Grader {
    /// Grades an answer to the exercise.
    pub fn check_answer(&self, user: &str, exercise: &Exercise) -> Feedback {
        Feedback::new(self.check(user, &exercise.answer), exercise)
    }
}

/// Grades an answer to the exercise with a [strict](Grader::strict) grader: an approximate
/// decimal is not accepted for an exact answer.
pub fn check_answer(user: &str, exercise: &Exercise) -> Feedback {
    Grader::strict().check_answer(user, exercise)
}

/// A letter grade for an exam score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Returns the grade for a score out of 100.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::A,
            s if s >= 80.0 => Self::B,
            s if s >= 70.0 => Self::C,
            s if s >= 60.0 => Self::D,
            _ => Self::F,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        }
    }

    /// Returns the description of the grade shown to the student.
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "Excelente",
            Self::B => "Muy Bueno",
            Self::C => "Bueno",
            Self::D => "Suficiente",
            Self::F => "Insuficiente",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.letter(), self.label())
    }
}

/// Formats a duration in seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use crate::equivalence::check_equivalent;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn correct_answer() {
        let exercise = Exercise::new("1/4 + 1/4", "1/2");
        let feedback = check_answer("0.5", &exercise);
        assert_eq!(feedback, Feedback {
            is_correct: true,
            kind: FeedbackKind::Success,
            message: "¡Correcto! Excelente trabajo.".to_string(),
            explanation: None,
        });
    }

    #[test]
    fn incorrect_answer_with_error_type() {
        let exercise = Exercise::new("1/2 + 1/3", "5/6")
            .with_error_type(ErrorType::FractionAddition);
        let feedback = check_answer("2/5", &exercise);
        assert!(!feedback.is_correct);
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.message, "Respuesta incorrecta. Revisa la explicación.");

        let explanation = feedback.explanation.unwrap();
        assert!(explanation.contains("Encuentra el denominador común (MCM)"));
        assert!(!explanation.contains('<'));
    }

    #[test]
    fn incorrect_answer_without_error_type() {
        let exercise = Exercise::new("x + x", "2x");
        let feedback = check_answer("x^2", &exercise);
        assert_eq!(feedback.explanation.as_deref(), Some(DEFAULT_EXPLANATION));
    }

    #[test]
    fn near_miss_decimal_is_rejected() {
        let exercise = Exercise::new("1/3", "0.333333333333333");
        let feedback = check_answer("0.33333333333333", &exercise);
        assert!(!feedback.is_correct);
        assert_eq!(feedback.kind, FeedbackKind::Error);

        // the lenient comparison stays available outside of grading
        assert!(check_equivalent("0.33333333333333", "0.333333333333333"));
        assert!(Grader::default().check_answer("0.33333333333333", &exercise).is_correct);
    }

    #[test]
    fn exact_forms_are_accepted() {
        let exercise = Exercise::new("1/2 + 1/4", "3/4");
        assert!(check_answer("0.75", &exercise).is_correct);
        assert!(check_answer("6/8", &exercise).is_correct);
        assert!(check_answer("0.333333333333333", &Exercise::new("1/3", "0.333333333333333")).is_correct);
    }

    #[test]
    fn exercise_accessors() {
        let exercise = Exercise::new("(x + 1)^2", "x^2 + 2x + 1")
            .with_solution_steps(["(x + 1)(x + 1)", "x^2 + x + x + 1", "x^2 + 2x + 1"])
            .with_error_type(ErrorType::NotableProducts);
        assert_eq!(exercise.problem(), "(x + 1)^2");
        assert_eq!(exercise.answer(), "x^2 + 2x + 1");
        assert_eq!(exercise.solution_steps().len(), 3);
        assert_eq!(exercise.error_type(), Some(ErrorType::NotableProducts));
    }

    #[test]
    fn grade_bands() {
        assert_eq!(Grade::from_score(100.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.9), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
        assert_eq!(Grade::from_score(85.0).to_string(), "B (Muy Bueno)");
        assert_eq!(Grade::F.label(), "Insuficiente");
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(30 * 60), "30:00");
        assert_eq!(format_time(3725), "62:05");
    }
}

use rand::{seq::SliceRandom, Rng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The hint given for topics without hints of their own.
pub const DEFAULT_HINT: &str = "Revisa la teoría del tema";

/// A subject area of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Area {
    Arithmetic,
    Algebra,
}

impl Area {
    /// Returns the name of the area shown to the student.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Arithmetic => "Aritmética",
            Self::Algebra => "Álgebra",
        }
    }
}

/// A topic that exercises are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topic {
    FractionOperations,
    CombinedOperations,
    LcmGcd,
    Factorization,
    WordProblems,
    Monomials,
    Polynomials,
    NotableProducts,
    AlgebraicFactorization,
}

impl Topic {
    /// Every topic, arithmetic topics first.
    pub const ALL: [Topic; 9] = [
        Topic::FractionOperations,
        Topic::CombinedOperations,
        Topic::LcmGcd,
        Topic::Factorization,
        Topic::WordProblems,
        Topic::Monomials,
        Topic::Polynomials,
        Topic::NotableProducts,
        Topic::AlgebraicFactorization,
    ];

    /// Returns the name of the topic shown to the student.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FractionOperations => "Operaciones con Fracciones",
            Self::CombinedOperations => "Operaciones Combinadas",
            Self::LcmGcd => "MCM y MCD",
            Self::Factorization | Self::AlgebraicFactorization => "Factorización",
            Self::WordProblems => "Problemas Verbales",
            Self::Monomials => "Monomios",
            Self::Polynomials => "Polinomios",
            Self::NotableProducts => "Productos Notables",
        }
    }

    /// Returns the area the topic belongs to.
    pub fn area(&self) -> Area {
        match self {
            Self::FractionOperations
            | Self::CombinedOperations
            | Self::LcmGcd
            | Self::Factorization
            | Self::WordProblems => Area::Arithmetic,
            Self::Monomials
            | Self::Polynomials
            | Self::NotableProducts
            | Self::AlgebraicFactorization => Area::Algebra,
        }
    }

    /// Returns the hints for the topic. Some topics have none.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::FractionOperations => &[
                "Para sumar fracciones, necesitas un denominador común",
                "Para multiplicar fracciones, multiplica numeradores y denominadores",
                "Para dividir fracciones, multiplica por el recíproco",
            ],
            Self::CombinedOperations => &[
                "Recuerda el orden de operaciones: PEMDAS",
                "Resuelve primero los paréntesis",
                "Los exponentes van antes que la multiplicación",
            ],
            Self::LcmGcd => &[
                "Factoriza ambos números en primos",
                "MCD: factores comunes con menor exponente",
                "MCM: todos los factores con mayor exponente",
            ],
            Self::Monomials => &[
                "Para multiplicar monomios, multiplica coeficientes y suma exponentes",
                "Solo puedes sumar monomios semejantes",
                "Para dividir, divide coeficientes y resta exponentes",
            ],
            Self::NotableProducts => &[
                "Identifica el patrón: (a+b)², (a-b)², (a+b)(a-b)",
                "Cuadrado de suma: a² + 2ab + b²",
                "Diferencia de cuadrados: a² - b²",
            ],
            Self::Factorization
            | Self::WordProblems
            | Self::Polynomials
            | Self::AlgebraicFactorization => &[],
        }
    }
}

/// Picks one of the hints for the topic, or [`DEFAULT_HINT`] if it has none.
pub fn hint<R: Rng + ?Sized>(topic: Topic, rng: &mut R) -> &'static str {
    topic.hints().choose(rng).copied().unwrap_or(DEFAULT_HINT)
}

/// How hard an exercise is.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the name of the difficulty shown to the student.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Medium => "Medio",
            Self::Hard => "Difícil",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::{mock::StepRng, StdRng}, SeedableRng};
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Topic::LcmGcd.label(), "MCM y MCD");
        assert_eq!(Topic::NotableProducts.label(), "Productos Notables");
        assert_eq!(Area::Algebra.label(), "Álgebra");
        assert_eq!(Difficulty::default().label(), "Medio");
    }

    #[test]
    fn areas() {
        let arithmetic = Topic::ALL.iter().filter(|topic| topic.area() == Area::Arithmetic).count();
        assert_eq!(arithmetic, 5);
        assert_eq!(Topic::AlgebraicFactorization.area(), Area::Algebra);
    }

    #[test]
    fn deterministic_hint() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            hint(Topic::FractionOperations, &mut rng),
            "Para sumar fracciones, necesitas un denominador común",
        );
    }

    #[test]
    fn hint_is_from_topic() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(Topic::Monomials.hints().contains(&hint(Topic::Monomials, &mut rng)));
        }
    }

    #[test]
    fn default_hint() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(hint(Topic::WordProblems, &mut rng), DEFAULT_HINT);
    }
}

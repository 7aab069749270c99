//! Size limits for symbolic work.
//!
//! Expanding `(x + 1)^1000` or computing `7^(10^9)` exactly would take far longer than any student
//! is willing to wait. Every transformation in this crate checks the relevant limit of a
//! [`Budget`] before doing potentially expensive work, and reports the transformation as not
//! applicable when the limit would be exceeded.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size limits for symbolic transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Budget {
    /// The maximum number of terms a polynomial or expanded sum may have.
    pub max_terms: usize,

    /// The maximum degree of a polynomial, and the largest integer exponent that expansion will
    /// multiply out.
    pub max_degree: u32,

    /// The largest exponent (in absolute value) that is computed exactly for numeric powers such
    /// as `2^100`. Larger powers are left unevaluated.
    pub max_exponent: u32,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_terms: 200,
            max_degree: 32,
            max_exponent: 1000,
        }
    }
}

impl Budget {
    /// Wraps the given [`Budget`] into a builder for further customization.
    pub fn into_builder(self) -> BudgetBuilder {
        BudgetBuilder(self)
    }
}

/// Helper struct to build a [`Budget`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BudgetBuilder(Budget);

impl BudgetBuilder {
    /// Creates a new builder with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of terms. See [`Budget::max_terms`] for more information.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.0.max_terms = max_terms;
        self
    }

    /// Sets the maximum degree. See [`Budget::max_degree`] for more information.
    pub fn max_degree(mut self, max_degree: u32) -> Self {
        self.0.max_degree = max_degree;
        self
    }

    /// Sets the maximum exact exponent. See [`Budget::max_exponent`] for more information.
    pub fn max_exponent(mut self, max_exponent: u32) -> Self {
        self.0.max_exponent = max_exponent;
        self
    }

    /// Builds the [`Budget`].
    pub fn build(self) -> Budget {
        self.0
    }
}

impl From<BudgetBuilder> for Budget {
    fn from(builder: BudgetBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let budget = BudgetBuilder::new().max_degree(4).build();
        assert_eq!(budget, Budget { max_degree: 4, ..Budget::default() });
    }

    #[test]
    fn into_builder_round_trip() {
        let budget = Budget::default().into_builder().max_terms(10).build();
        assert_eq!(budget.max_terms, 10);
        assert_eq!(budget.max_exponent, 1000);
    }
}

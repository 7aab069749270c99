//! Configuration of the derivation engine.

use mathengine_compute::{numerical::fmt::SIGNIFICANT_DIGITS, Budget};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rule used to pick the variable to solve for, or to collect terms by, when an input
/// contains more than one variable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariableOrder {
    /// Alphabetical order: in `y + x = 3`, the variable is `x`.
    #[default]
    Lexicographic,

    /// The order in which the variables are first written: in `y + x = 3`, the variable is `y`.
    FirstAppearance,
}

/// Options that control how [`derive_with`](crate::derive::derive_with) works.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineOptions {
    /// How to choose the variable to solve for or collect by.
    pub variable_order: VariableOrder,

    /// Size limits for every symbolic transformation. A transformation that would exceed them is
    /// skipped.
    pub budget: Budget,

    /// The number of significant digits shown when an expression is evaluated to a decimal.
    pub float_digits: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            variable_order: VariableOrder::default(),
            budget: Budget::default(),
            float_digits: SIGNIFICANT_DIGITS,
        }
    }
}

impl EngineOptions {
    /// Wraps the given [`EngineOptions`] into a builder for further customization.
    pub fn into_builder(self) -> EngineOptionsBuilder {
        EngineOptionsBuilder(self)
    }

    /// Sorts the given variables according to [`EngineOptions::variable_order`].
    ///
    /// `by_appearance` must list every variable once, in the order they were written.
    pub(crate) fn order_variables(&self, by_appearance: Vec<String>) -> Vec<String> {
        match self.variable_order {
            VariableOrder::Lexicographic => {
                let mut sorted = by_appearance;
                sorted.sort();
                sorted
            },
            VariableOrder::FirstAppearance => by_appearance,
        }
    }
}

/// Helper struct to build an [`EngineOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EngineOptionsBuilder(EngineOptions);

impl EngineOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable order. See [`VariableOrder`] for more information.
    pub fn variable_order(mut self, variable_order: VariableOrder) -> Self {
        self.0.variable_order = variable_order;
        self
    }

    /// Sets the size limits. See [`Budget`] for more information.
    pub fn budget(mut self, budget: impl Into<Budget>) -> Self {
        self.0.budget = budget.into();
        self
    }

    /// Sets the number of significant digits of decimal results. At least one digit is always
    /// shown.
    pub fn float_digits(mut self, float_digits: usize) -> Self {
        self.0.float_digits = float_digits.max(1);
        self
    }

    /// Builds the [`EngineOptions`].
    pub fn build(self) -> EngineOptions {
        self.0
    }
}

impl From<EngineOptionsBuilder> for EngineOptions {
    fn from(builder: EngineOptionsBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use mathengine_compute::BudgetBuilder;
    use pretty_assertions::assert_eq;
    use super::*;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.variable_order, VariableOrder::Lexicographic);
        assert_eq!(options.budget, Budget::default());
        assert_eq!(options.float_digits, 15);
    }

    #[test]
    fn builder() {
        let options = EngineOptionsBuilder::new()
            .variable_order(VariableOrder::FirstAppearance)
            .budget(BudgetBuilder::new().max_terms(20))
            .float_digits(0)
            .build();
        assert_eq!(options.budget.max_terms, 20);
        assert_eq!(options.float_digits, 1);
    }

    #[test]
    fn variable_order() {
        let written = vars(&["y", "x", "a"]);
        assert_eq!(EngineOptions::default().order_variables(written.clone()), vars(&["a", "x", "y"]));

        let options = EngineOptions::default()
            .into_builder()
            .variable_order(VariableOrder::FirstAppearance)
            .build();
        assert_eq!(options.order_variables(written), vars(&["y", "x", "a"]));
    }
}

//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `a * (b * c) = a * b * c`
pub fn flatten_product(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let new_factors = factors.iter()
            .flat_map(|factor| match factor {
                SymExpr::Mul(inner) => inner.clone(),
                factor => vec![factor.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenProduct);
    Some(opt)
}

/// Multiplies all the numbers in a product together.
///
/// `2 * x * 3 = 6x`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut product = SymExpr::int(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match product.mul_number(factor) {
                Some(new_product) => product = new_product,
                None => new_factors.push(factor.clone()),
            }
        }
        new_factors.insert(0, product);
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter()
            .find(|factor| factor.is_zero_number())
            .cloned()
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Returns true if the factor is a power of an exact number, such as `sqrt(2)`.
fn is_numeric_power(factor: &SymExpr) -> bool {
    matches!(factor, SymExpr::Exp(base, _) if matches!(**base, SymExpr::Primary(Primary::Rational(_))))
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `2^c*3^c = 6^c`, where `c` is a number
///
/// A plain numeric coefficient is never merged into a power of the same number: `2sqrt(2)` stays
/// as it is instead of becoming `2^(3/2)`.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;
        let mut changed = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            if new_factors[current_factor_idx].is_number() {
                current_factor_idx += 1;
                continue;
            }

            let (mut current_factor, mut current_factor_exp) = new_factors[current_factor_idx].as_base_exponent();
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                if new_factors[next_factor_idx].is_number() {
                    next_factor_idx += 1;
                    continue;
                }

                let (next_factor, next_factor_exp) = new_factors[next_factor_idx].as_base_exponent();
                let same_root = current_factor_exp == next_factor_exp
                    && current_factor_exp.is_number()
                    && is_numeric_power(&new_factors[current_factor_idx])
                    && is_numeric_power(&new_factors[next_factor_idx]);

                if current_factor == next_factor {
                    // bases must be strictly equal
                    // if they are, apply a^b*a^c = a^(b+c)
                    current_factor_exp = current_factor_exp.add_number(&next_factor_exp)
                        .unwrap_or_else(|| current_factor_exp.clone() + next_factor_exp);
                } else if same_root {
                    // degrees must be strictly equal
                    // if they are, apply a^c*b^c = (a*b)^c
                    current_factor = current_factor.mul_number(&next_factor)
                        .unwrap_or_else(|| current_factor.clone() * next_factor);
                } else {
                    next_factor_idx += 1;
                    continue;
                }

                new_factors.swap_remove(next_factor_idx);
                combined = true;
            }

            if !combined {
                current_factor_idx += 1;
                continue;
            }

            // after all combining, update the current factor
            changed = true;
            new_factors[current_factor_idx] = if current_factor_exp.is_one() {
                current_factor
            } else {
                SymExpr::pow(current_factor, current_factor_exp)
            };
            current_factor_idx += 1;
        }

        changed.then(|| SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_product(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
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
    fn numbers_are_folded() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), x(), SymExpr::int(3)]);
        assert_eq!(multiply_numbers(&expr, &mut ()), Some(SymExpr::Mul(vec![SymExpr::int(6), x()])));
    }

    #[test]
    fn zero_product() {
        let expr = SymExpr::Mul(vec![SymExpr::int(0), x()]);
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(SymExpr::int(0)));
        assert_eq!(steps, vec![Step::MultiplyZero]);
    }

    #[test]
    fn exponents_are_added() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::pow(x(), SymExpr::int(2))]);
        assert_eq!(combine_like_factors(&expr, &mut ()), Some(SymExpr::pow(x(), SymExpr::int(3))));
    }

    #[test]
    fn roots_are_merged() {
        let half = SymExpr::rational(frac(1, 2));
        let expr = SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::int(2), half.clone()),
            SymExpr::pow(SymExpr::int(3), half.clone()),
        ]);
        assert_eq!(combine_like_factors(&expr, &mut ()), Some(SymExpr::pow(SymExpr::int(6), half)));
    }

    #[test]
    fn coefficient_is_not_merged_into_root() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(2).sqrt()]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);
    }
}

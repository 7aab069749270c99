//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `a + (b + c) = a + b + c`
pub fn flatten_sum(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let new_terms = terms.iter()
            .flat_map(|term| match term {
                SymExpr::Add(inner) => inner.clone(),
                term => vec![term.clone()],
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FlattenSum);
    Some(opt)
}

/// Adds all the numbers in a sum together.
///
/// `2 + x + 3 = x + 5`
/// `0.5 + 1/4 = 0.75`
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if terms.iter().filter(|term| term.is_number()).count() < 2 {
            return None;
        }

        let mut sum = SymExpr::int(0);
        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match sum.add_number(term) {
                Some(new_sum) => sum = new_sum,
                None => new_terms.push(term.clone()),
            }
        }
        new_terms.push(sum);
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero_number())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `2a-2a = 0`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;
        let mut changed = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = new_terms[current_term_idx].split_coefficient();
            let mut combined = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = new_terms[next_term_idx].split_coefficient();

                // factors must be strictly equal
                if current_term_factors == next_term_factors {
                    // if so, apply a*n + a*m = (n+m)*a
                    if let Some(sum) = current_term_coeff.add_number(&next_term_coeff) {
                        current_term_coeff = sum;
                        new_terms.swap_remove(next_term_idx);
                        combined = true;
                        continue;
                    }
                }
                next_term_idx += 1;
            }

            if !combined {
                current_term_idx += 1;
                continue;
            }

            changed = true;
            if current_term_coeff.is_zero_number() {
                new_terms.swap_remove(current_term_idx);
            } else {
                new_terms[current_term_idx] = if current_term_coeff.is_one() {
                    current_term_factors
                } else {
                    current_term_coeff * current_term_factors
                };
                current_term_idx += 1;
            }
        }

        changed.then(|| SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten_sum(expr, step_collector)
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn numbers_are_folded() {
        let expr = SymExpr::Add(vec![SymExpr::int(2), x(), SymExpr::int(3)]);
        let mut steps = Vec::new();
        assert_eq!(add_numbers(&expr, &mut steps), Some(SymExpr::Add(vec![x(), SymExpr::int(5)])));
        assert_eq!(steps, vec![Step::AddNumbers]);
    }

    #[test]
    fn decimals_win() {
        let expr = SymExpr::Add(vec![SymExpr::float(float(0.5)), SymExpr::rational((1, 4).into())]);
        assert_eq!(add_numbers(&expr, &mut ()), Some(SymExpr::float(float(0.75))));
    }

    #[test]
    fn like_terms() {
        let expr = SymExpr::Add(vec![
            x(),
            SymExpr::Mul(vec![SymExpr::int(2), x()]),
            SymExpr::symbol("y"),
        ]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(SymExpr::Add(vec![SymExpr::Mul(vec![SymExpr::int(3), x()]), SymExpr::symbol("y")])),
        );
    }

    #[test]
    fn like_terms_cancel() {
        let expr = SymExpr::Add(vec![x(), SymExpr::Mul(vec![SymExpr::int(-1), x()])]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(SymExpr::int(0)));
    }

    #[test]
    fn nothing_to_combine() {
        let expr = SymExpr::Add(vec![x(), SymExpr::symbol("y")]);
        assert_eq!(all(&expr, &mut ()), None);
    }
}

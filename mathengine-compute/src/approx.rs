use rug::{Float, Integer, Rational};
use std::cmp::Ordering;
use super::primitive::float;

/// The maximum number of terms of the continued fraction to compute.
const MAX_TERMS: usize = 64;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut iter = continued_fraction_form.iter().rev();
    let mut rational = match iter.next() {
        Some(last) => Rational::from(last),
        None => return Rational::new(),
    };

    for integer in iter {
        if rational.cmp0() == Ordering::Equal {
            rational = Rational::from(integer);
        } else {
            rational = rational.recip() + integer;
        }
    }

    rational
}

/// Approximates the given float as a rational fraction.
///
/// This function applies the continued fraction algorithm to the given float until the relative
/// error is less than `1e-12`, which recovers the fraction a student most likely meant when typing
/// a decimal such as `0.333333333333`. Returns [`None`] for non-finite floats, or if no
/// sufficiently close fraction with a reasonably small continued fraction form exists.
pub fn approximate_rational(n: &Float) -> Option<Rational> {
    if !n.is_finite() {
        return None;
    }
    if n.is_zero() {
        return Some(Rational::new());
    }

    let orig = n.clone();
    let tolerance = float(orig.abs_ref()) * 1e-12;
    let mut continued_fraction_form = Vec::new();
    let mut n = n.clone();

    for _ in 0..MAX_TERMS {
        let (integer, fractional) = n.trunc_fract(float(0));
        continued_fraction_form.push(integer.to_integer()?);

        let rational = rational_from_continued_fraction(&continued_fraction_form);
        let error = (orig.clone() - &rational).abs();
        if fractional.is_zero() || error <= tolerance {
            return Some(rational);
        }

        n = fractional.recip();
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::primitive::{frac, float_from_str};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_decimals() {
        let half = float_from_str("0.5").unwrap();
        assert_eq!(approximate_rational(&half), Some(frac(1, 2)));

        let negative = float_from_str("-2.75").unwrap();
        assert_eq!(approximate_rational(&negative), Some(frac(-11, 4)));
    }

    #[test]
    fn repeating_decimals() {
        let third = float_from_str("0.333333333333333").unwrap();
        assert_eq!(approximate_rational(&third), Some(frac(1, 3)));
    }

    #[test]
    fn integers() {
        assert_eq!(approximate_rational(&float(7)), Some(frac(7, 1)));
        assert_eq!(approximate_rational(&float(0)), Some(frac(0, 1)));
    }
}

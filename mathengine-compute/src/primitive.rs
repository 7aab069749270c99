//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use rug::{ops::Pow, Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s, 10).ok()
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates the [`Rational`] `num / den`. The denominator must not be zero.
pub fn frac(num: i64, den: i64) -> Rational {
    Rational::from((num, den))
}

/// Creates a [`Rational`] from a decimal string, such as `0.25` or `.5`, without going through a
/// binary float. `0.1` becomes exactly `1/10`.
pub fn rat_from_decimal(s: &str) -> Option<Rational> {
    let (whole, fractional) = match s.split_once('.') {
        Some((whole, fractional)) => (whole, fractional),
        None => (s, ""),
    };
    if whole.is_empty() && fractional.is_empty() {
        return None;
    }

    let digits = format!("{}{}", whole, fractional);
    let numerator = int_from_str(&digits)?;
    let denominator = Integer::from(10).pow(fractional.len() as u32);
    Some(Rational::from((numerator, denominator)))
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice.
pub fn float_from_str(s: &str) -> Option<Float> {
    Float::parse(s).ok().map(|parsed| Float::with_val(PRECISION, parsed))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_to_rational() {
        assert_eq!(rat_from_decimal("0.1"), Some(frac(1, 10)));
        assert_eq!(rat_from_decimal(".25"), Some(frac(1, 4)));
        assert_eq!(rat_from_decimal("3."), Some(rat(3)));
        assert_eq!(rat_from_decimal("12"), Some(rat(12)));
        assert_eq!(rat_from_decimal("."), None);
    }

    #[test]
    fn parse_float() {
        let half = float_from_str("0.5").unwrap();
        assert_eq!(half, 0.5);
        assert!(float_from_str("abc").is_none());
    }
}

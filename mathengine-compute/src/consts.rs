//! The named constants students can write, at [`PRECISION`](crate::primitive::PRECISION) bits.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

/// `e`, Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// `π`, computed as `acos(-1)`.
pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

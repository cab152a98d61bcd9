/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use num_rational::Rational32;
use num_traits::{CheckedAdd, CheckedMul, One, Signed, Zero};

use crate::UnitError;

/// Rational exponent of a signature term (m² = 2, √Hz = -1/2).
pub type Exponent = Rational32;

pub fn integer(n: i32) -> Exponent {
    Exponent::from_integer(n)
}

pub fn one() -> Exponent {
    Exponent::one()
}

pub fn is_zero(e: &Exponent) -> bool {
    e.is_zero()
}

/// `a * b`, failing instead of overflowing. A numerator of
/// `i32::MIN` is rejected too, since it cannot be negated.
pub fn checked_mul(a: Exponent, b: Exponent) -> Result<Exponent, UnitError> {
    a.checked_mul(&b)
        .filter(negatable)
        .ok_or_else(|| overflow(a, b))
}

/// `a + b`, failing instead of overflowing.
pub fn checked_add(a: Exponent, b: Exponent) -> Result<Exponent, UnitError> {
    a.checked_add(&b)
        .filter(negatable)
        .ok_or_else(|| overflow(a, b))
}

fn negatable(e: &Exponent) -> bool {
    *e.numer() != i32::MIN
}

fn overflow(a: Exponent, b: Exponent) -> UnitError {
    UnitError::MalformedSignature(format!(
        "exponent overflow combining {} and {}",
        a, b
    ))
}

/// Raise a conversion slope (or any positive factor) to a rational
/// power: the numerator as an integer power, then the
/// denominator-th root.
pub fn scale(factor: f64, exponent: Exponent) -> f64 {
    let raised = factor.powi(*exponent.numer());
    match *exponent.denom() {
        1 => raised,
        2 => raised.sqrt(),
        3 => raised.cbrt(),
        n => raised.powf(1.0 / n as f64),
    }
}

/// The smaller of two exponent magnitudes, which is the amount
/// cancelled when a numerator term meets a denominator term.
pub fn cancelled(a: Exponent, b: Exponent) -> Exponent {
    let (a, b) = (a.abs(), b.abs());
    match a < b {
        true => a,
        false => b,
    }
}

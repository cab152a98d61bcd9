/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::exponent::{self, Exponent};
use crate::parser::parse_quantity;
use crate::registry::Registry;
use crate::signature::Signature;
use crate::{Unit, UnitError};

/// A value with its dimensional signature. Quantities are never
/// modified; every operation returns a new one.
///
/// Operators and methods work in the process-wide registry. The
/// `Registry` methods of the same name take an explicit one.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct Quantity(f64, Signature);

impl Quantity {
    /// Repeated units in `signature` are merged; other units are
    /// kept as given.
    pub fn of<S: Into<Signature>>(value: f64, signature: S) -> Self {
        let signature = signature.into();
        match signature.is_absolute() {
            true => Quantity(value, signature),
            false => Quantity(
                value,
                Signature::from_terms(signature.terms().iter().copied()),
            ),
        }
    }

    pub fn dimensionless(value: f64) -> Self {
        Quantity(value, Signature::dimensionless())
    }

    /// An absolute quantity, such as a temperature reading.
    pub fn absolute(value: f64, unit: Unit) -> Self {
        Quantity(value, Signature::absolute(unit))
    }

    pub fn parse(input: &str) -> Result<Self, UnitError> {
        parse_quantity(input)
    }

    /// The raw scalar, in this quantity's own units.
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn signature(&self) -> &Signature {
        &self.1
    }

    pub fn is_dimensionless(&self) -> bool {
        self.1.is_dimensionless()
    }

    /// The value expressed in `target`.
    pub fn value_as(&self, target: &Signature) -> Result<f64, UnitError> {
        Registry::global().convert(self.0, &self.1, target)
    }

    pub fn convert(&self, target: &Signature) -> Result<Self, UnitError> {
        Registry::global().convert_to(self, target)
    }

    pub fn powi(&self, n: i32) -> Result<Self, UnitError> {
        Registry::global().powi(self, n)
    }

    pub fn pow(&self, n: Exponent) -> Result<Self, UnitError> {
        Registry::global().pow(self, n)
    }

    pub fn sqrt(&self) -> Result<Self, UnitError> {
        self.pow(Exponent::new(1, 2))
    }

    pub fn recip(&self) -> Result<Self, UnitError> {
        Registry::global().divide(&Quantity::dimensionless(1.0), self)
    }

    /// Add a plain number; only dimensionless quantities accept one.
    pub fn add_scalar(&self, rhs: f64) -> Result<Self, UnitError> {
        Registry::global().add_scalar(self, rhs)
    }

    /* Note: we cannot implement the trait, because it does not allow
    for error conditions. */
    pub fn partial_cmp(
        &self,
        rhs: &Self,
    ) -> Result<Option<Ordering>, UnitError> {
        Registry::global().compare(self, rhs)
    }

    pub fn lt(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(self.partial_cmp(rhs)? == Some(Ordering::Less))
    }

    pub fn le(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(matches!(
            self.partial_cmp(rhs)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    pub fn gt(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(self.partial_cmp(rhs)? == Some(Ordering::Greater))
    }

    pub fn ge(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(matches!(
            self.partial_cmp(rhs)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    /// Exact equality after converting `rhs` into this quantity's
    /// units.
    pub fn eq_strict(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(self.partial_cmp(rhs)? == Some(Ordering::Equal))
    }

    pub fn ne_strict(&self, rhs: &Self) -> Result<bool, UnitError> {
        Ok(!self.eq_strict(rhs)?)
    }

    /// Equality within `epsilon`, in this quantity's units.
    pub fn nearly_equal(
        &self,
        rhs: &Self,
        epsilon: f64,
    ) -> Result<bool, UnitError> {
        let rhs = self.value_in_own_units(rhs)?;
        Ok((self.0 - rhs).abs() < epsilon)
    }

    pub(crate) fn value_in_own_units(&self, rhs: &Self) -> Result<f64, UnitError> {
        Registry::global().convert(rhs.0, &rhs.1, &self.1)
    }
}

impl Registry {
    /// `q` expressed in `target`.
    pub fn convert_to(
        &self,
        q: &Quantity,
        target: &Signature,
    ) -> Result<Quantity, UnitError> {
        Ok(Quantity(self.convert(q.0, &q.1, target)?, target.clone()))
    }

    pub fn multiply(
        &self,
        a: &Quantity,
        b: &Quantity,
    ) -> Result<Quantity, UnitError> {
        self.check_relative(a)?;
        self.check_relative(b)?;
        let num: Vec<_> = a.1.num().chain(b.1.num()).collect();
        let den: Vec<_> = a.1.den().chain(b.1.den()).collect();
        let (signature, value) = self.simplify(&num, &den, a.0 * b.0)?;
        Ok(Quantity(value, signature))
    }

    pub fn divide(
        &self,
        a: &Quantity,
        b: &Quantity,
    ) -> Result<Quantity, UnitError> {
        self.check_relative(a)?;
        self.check_relative(b)?;
        if b.0 == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        let num: Vec<_> = a.1.num().chain(b.1.den()).collect();
        let den: Vec<_> = a.1.den().chain(b.1.num()).collect();
        let (signature, value) = self.simplify(&num, &den, a.0 / b.0)?;
        Ok(Quantity(value, signature))
    }

    /// `a + b` in the units of `a`. A relative `b` added to an
    /// absolute `a` is a difference: only the slope of the
    /// conversion applies.
    pub fn add(&self, a: &Quantity, b: &Quantity) -> Result<Quantity, UnitError> {
        let b = self.operand(a, b)?;
        Ok(Quantity(a.0 + b, a.1.clone()))
    }

    /// `a - b` in the units of `a`. The difference of two absolute
    /// quantities is relative.
    pub fn subtract(
        &self,
        a: &Quantity,
        b: &Quantity,
    ) -> Result<Quantity, UnitError> {
        let value = a.0 - self.operand(a, b)?;
        match a.1.is_absolute() && b.1.is_absolute() {
            true => Ok(Quantity(
                value,
                Signature::from_terms(a.1.terms().iter().copied()),
            )),
            false => Ok(Quantity(value, a.1.clone())),
        }
    }

    /// The value of `b` in the units of `a`, for addition.
    fn operand(&self, a: &Quantity, b: &Quantity) -> Result<f64, UnitError> {
        match a.1.is_absolute() && !b.1.is_absolute() {
            true => self.convert_delta(b.0, &b.1, &a.1),
            false => self.convert(b.0, &b.1, &a.1),
        }
    }

    pub fn add_scalar(&self, q: &Quantity, rhs: f64) -> Result<Quantity, UnitError> {
        match q.is_dimensionless() {
            true => Ok(Quantity(q.0 + rhs, q.1.clone())),
            false => Err(self.mismatch(&q.1, &Signature::dimensionless())),
        }
    }

    pub fn compare(
        &self,
        a: &Quantity,
        b: &Quantity,
    ) -> Result<Option<Ordering>, UnitError> {
        Ok(a.0.partial_cmp(&self.convert(b.0, &b.1, &a.1)?))
    }

    /// Integer power. `q⁰` is the dimensionless 1, whatever the
    /// units of `q`.
    pub fn powi(&self, q: &Quantity, n: i32) -> Result<Quantity, UnitError> {
        if n == 0 {
            return Ok(Quantity::dimensionless(1.0));
        }
        self.check_power(q, exponent::integer(n))?;
        let signature = q.1.pow(exponent::integer(n))?;
        if n < 0 && q.0 == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        let magnitude = pow_by_squaring(q.0, n.unsigned_abs());
        Ok(Quantity(
            match n < 0 {
                true => 1.0 / magnitude,
                false => magnitude,
            },
            signature,
        ))
    }

    /// Rational power, e.g. the square root of an area. Even roots
    /// of negative values are an error.
    pub fn pow(&self, q: &Quantity, n: Exponent) -> Result<Quantity, UnitError> {
        if n.is_integer() {
            return self.powi(q, n.to_integer());
        }
        self.check_power(q, n)?;
        if n < Exponent::from_integer(0) && q.0 == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        let value = exponent::scale(q.0, n);
        if value.is_nan() && !q.0.is_nan() {
            return Err(UnitError::OutOfDomain(format!(
                "{} raised to the power {}",
                q.0, n
            )));
        }
        Ok(Quantity(value, q.1.pow(n)?))
    }

    fn check_power(&self, q: &Quantity, n: Exponent) -> Result<(), UnitError> {
        match q.1.is_absolute() && n != exponent::one() {
            true => Err(UnitError::MalformedSignature(format!(
                "absolute unit {} raised to the power {}",
                self.format_signature(&q.1),
                n
            ))),
            false => Ok(()),
        }
    }

    fn check_relative(&self, q: &Quantity) -> Result<(), UnitError> {
        match q.1.is_absolute() {
            true => Err(UnitError::MalformedSignature(format!(
                "absolute quantity in {} cannot be combined with other units",
                self.format_signature(&q.1)
            ))),
            false => Ok(()),
        }
    }
}

fn pow_by_squaring(mut base: f64, mut n: u32) -> f64 {
    let mut result = 1.0;
    while n > 0 {
        if n & 1 == 1 {
            result *= base;
        }
        base *= base;
        n >>= 1;
    }
    result
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self.1.is_dimensionless() {
            true => write!(f, "{}", self.0),
            false => write!(f, "{} {}", self.0, self.1),
        }
    }
}

impl FromStr for Quantity {
    type Err = UnitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_quantity(s)
    }
}

impl Add<Quantity> for Quantity {
    type Output = Result<Quantity, UnitError>;
    fn add(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        Registry::global().add(&self, &rhs)
    }
}

impl Sub<Quantity> for Quantity {
    type Output = Result<Quantity, UnitError>;
    fn sub(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        Registry::global().subtract(&self, &rhs)
    }
}

impl Mul<Quantity> for Quantity {
    type Output = Result<Quantity, UnitError>;
    fn mul(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        Registry::global().multiply(&self, &rhs)
    }
}

impl Div<Quantity> for Quantity {
    type Output = Result<Quantity, UnitError>;
    fn div(self, rhs: Quantity) -> Result<Quantity, UnitError> {
        Registry::global().divide(&self, &rhs)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        Quantity(self.0 * rhs, self.1)
    }
}

impl Div<f64> for Quantity {
    type Output = Result<Quantity, UnitError>;
    fn div(self, rhs: f64) -> Result<Quantity, UnitError> {
        match rhs == 0.0 {
            true => Err(UnitError::DivisionByZero),
            false => Ok(Quantity(self.0 / rhs, self.1)),
        }
    }
}

impl Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity(-self.0, self.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn squaring() {
        assert_eq!(pow_by_squaring(3.0, 0), 1.0);
        assert_eq!(pow_by_squaring(3.0, 1), 3.0);
        assert_eq!(pow_by_squaring(3.0, 5), 243.0);
        assert_eq!(pow_by_squaring(-2.0, 3), -8.0);
    }
}

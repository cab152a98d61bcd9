/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Numeric helpers on quantities. Angle functions work in the
//! registry's angle unit (radians in the standard set); the others
//! keep the signature of their first argument.

use crate::registry::Registry;
use crate::signature::Signature;
use crate::{Quantity, UnitError};

impl Registry {
    fn angle_signature(&self) -> Result<Signature, UnitError> {
        self.angle_unit()
            .map(Signature::unit)
            .ok_or_else(|| UnitError::UnknownUnit(String::from("angle unit")))
    }

    fn radians(&self, angle: &Quantity) -> Result<f64, UnitError> {
        self.convert(angle.value(), angle.signature(), &self.angle_signature()?)
    }

    fn angle(&self, value: f64) -> Result<Quantity, UnitError> {
        Ok(Quantity::of(value, self.angle_signature()?))
    }

    pub fn sin(&self, angle: &Quantity) -> Result<f64, UnitError> {
        Ok(self.radians(angle)?.sin())
    }

    pub fn cos(&self, angle: &Quantity) -> Result<f64, UnitError> {
        Ok(self.radians(angle)?.cos())
    }

    pub fn tan(&self, angle: &Quantity) -> Result<f64, UnitError> {
        Ok(self.radians(angle)?.tan())
    }

    pub fn asin(&self, x: f64) -> Result<Quantity, UnitError> {
        self.angle(unit_interval("asin", x)?.asin())
    }

    pub fn acos(&self, x: f64) -> Result<Quantity, UnitError> {
        self.angle(unit_interval("acos", x)?.acos())
    }

    pub fn atan(&self, x: f64) -> Result<Quantity, UnitError> {
        self.angle(x.atan())
    }

    /// Angle of the point (`x`, `y`); `x` is converted into the
    /// units of `y`.
    pub fn atan2(&self, y: &Quantity, x: &Quantity) -> Result<Quantity, UnitError> {
        let x = self.convert(x.value(), x.signature(), y.signature())?;
        self.angle(y.value().atan2(x))
    }

    pub fn hypot(&self, a: &Quantity, b: &Quantity) -> Result<Quantity, UnitError> {
        let b = self.convert(b.value(), b.signature(), a.signature())?;
        Ok(Quantity::of(a.value().hypot(b), a.signature().clone()))
    }

    /// Remainder of `a / b`, with the sign of `a`.
    pub fn fmod(&self, a: &Quantity, b: &Quantity) -> Result<Quantity, UnitError> {
        let b = self.convert(b.value(), b.signature(), a.signature())?;
        if b == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        Ok(Quantity::of(a.value() % b, a.signature().clone()))
    }
}

fn unit_interval(function: &str, x: f64) -> Result<f64, UnitError> {
    match (-1.0..=1.0).contains(&x) {
        true => Ok(x),
        false => Err(UnitError::OutOfDomain(format!("{}({})", function, x))),
    }
}

impl Quantity {
    fn map(&self, f: impl FnOnce(f64) -> f64) -> Quantity {
        Quantity::of(f(self.value()), self.signature().clone())
    }

    pub fn sin(&self) -> Result<f64, UnitError> {
        Registry::global().sin(self)
    }

    pub fn cos(&self) -> Result<f64, UnitError> {
        Registry::global().cos(self)
    }

    pub fn tan(&self) -> Result<f64, UnitError> {
        Registry::global().tan(self)
    }

    pub fn asin(x: f64) -> Result<Quantity, UnitError> {
        Registry::global().asin(x)
    }

    pub fn acos(x: f64) -> Result<Quantity, UnitError> {
        Registry::global().acos(x)
    }

    pub fn atan(x: f64) -> Result<Quantity, UnitError> {
        Registry::global().atan(x)
    }

    pub fn atan2(&self, x: &Quantity) -> Result<Quantity, UnitError> {
        Registry::global().atan2(self, x)
    }

    pub fn hypot(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        Registry::global().hypot(self, other)
    }

    pub fn fmod(&self, divisor: &Quantity) -> Result<Quantity, UnitError> {
        Registry::global().fmod(self, divisor)
    }

    pub fn abs(&self) -> Quantity {
        self.map(f64::abs)
    }

    pub fn floor(&self) -> Quantity {
        self.map(f64::floor)
    }

    pub fn ceil(&self) -> Quantity {
        self.map(f64::ceil)
    }

    pub fn round(&self) -> Quantity {
        self.map(f64::round)
    }

    /// Fractional and integral parts, both with the sign of the value.
    pub fn modf(&self) -> (Quantity, Quantity) {
        (self.map(f64::fract), self.map(f64::trunc))
    }
}

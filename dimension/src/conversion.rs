/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::{Unit, UnitError};

/// Affine map `to = from * slope + offset`.
#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug)]
pub struct Conversion {
    pub slope: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Conversion {
    pub const IDENTITY: Self = Conversion {
        slope: 1.0,
        offset: 0.0,
    };

    pub const fn linear(slope: f64) -> Self {
        Conversion { slope, offset: 0.0 }
    }

    pub const fn affine(slope: f64, offset: f64) -> Self {
        Conversion { slope, offset }
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.slope + self.offset
    }

    pub fn inverse(&self) -> Self {
        Conversion {
            slope: 1.0 / self.slope,
            offset: -self.offset / self.slope,
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Conversion) -> Self {
        Conversion {
            slope: self.slope * next.slope,
            offset: self.offset * next.slope + next.offset,
        }
    }
}

impl Registry {
    /// Resolve the conversion from one unit to another: identity,
    /// a declared rule, the inverse of a declared rule, or one hop
    /// through the primary unit of their common dimension.
    ///
    /// Subscripts play no part here; whether two subscripted
    /// units may be converted is decided by the caller.
    pub fn resolve(&self, from: Unit, to: Unit) -> Result<Conversion, UnitError> {
        if from.id() == to.id() {
            return Ok(Conversion::IDENTITY);
        }
        if let Some(conv) = self.direct(from, to) {
            return Ok(conv);
        }

        let from_def = self.def(from)?;
        let to_def = self.def(to)?;
        if from_def.dimension != to_def.dimension {
            return Err(UnitError::DimensionMismatch(
                from_def.qualified_name.clone(),
                to_def.qualified_name.clone(),
            ));
        }

        let missing = || {
            UnitError::MissingConversion(
                from_def.qualified_name.clone(),
                to_def.qualified_name.clone(),
            )
        };
        let primary = self.primary(from_def.dimension).ok_or_else(missing)?;
        let to_primary = match from.id() == primary.id() {
            true => Conversion::IDENTITY,
            false => self.direct(from, primary).ok_or_else(missing)?,
        };
        let from_primary = match to.id() == primary.id() {
            true => Conversion::IDENTITY,
            false => self.direct(primary, to).ok_or_else(missing)?,
        };
        Ok(to_primary.then(&from_primary))
    }

    /// A declared rule or the inverse of one.
    fn direct(&self, from: Unit, to: Unit) -> Option<Conversion> {
        self.declared(from, to)
            .or_else(|| self.declared(to, from).map(|c| c.inverse()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn composition_is_nested_application() {
        let k_to_c = Conversion::affine(1.0, -273.15);
        let c_to_f = Conversion::affine(1.8, 32.0);
        let k_to_f = k_to_c.then(&c_to_f);
        assert!((k_to_f.apply(0.0) - -459.67).abs() < 1e-9);
        assert!((k_to_f.apply(373.15) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn inverse_undoes() {
        let c_to_f = Conversion::affine(1.8, 32.0);
        assert!((c_to_f.inverse().apply(212.0) - 100.0).abs() < 1e-12);
        let id = c_to_f.then(&c_to_f.inverse());
        assert!((id.slope - 1.0).abs() < 1e-12);
        assert!(id.offset.abs() < 1e-12);
    }
}

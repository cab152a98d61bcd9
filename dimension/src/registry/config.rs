/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::path::Path;

use num_rational::Rational32;
use serde::{Deserialize, Serialize};

use super::RegistryBuilder;
use crate::signature::Term;
use crate::{Dimension, Unit, UnitError};

/// Unit declarations loaded at startup, on top of (or instead of)
/// the standard unit set.
///
/// ```json
/// {
///   "dimensions": ["Information"],
///   "units": [
///     { "name": "Bytes", "symbol": "B", "dimension": "Information", "primary": true },
///     { "name": "Bits", "symbol": "bit", "dimension": "Information" },
///     { "name": "Baud", "symbol": "Bd", "dimension": "Frequency",
///       "derived": { "numerator": [{ "unit": "bit" }], "denominator": [{ "unit": "s" }] } }
///   ],
///   "conversions": [{ "from": "bit", "to": "B", "slope": 0.125 }]
/// }
/// ```
#[derive(Serialize, Deserialize, PartialEq, Clone, Default, Debug)]
pub struct RegistryConfig {
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    #[serde(default)]
    pub conversions: Vec<ConversionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_unit: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct UnitConfig {
    pub name: String,
    pub symbol: String,
    pub dimension: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedConfig>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DerivedConfig {
    #[serde(default = "one")]
    pub coefficient: f64,
    #[serde(default)]
    pub numerator: Vec<TermConfig>,
    #[serde(default)]
    pub denominator: Vec<TermConfig>,
}

/// `unit^(power/root)`; unit by symbol or name.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct TermConfig {
    pub unit: String,
    #[serde(default = "one_i32")]
    pub power: i32,
    #[serde(default = "one_i32")]
    pub root: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct ConversionConfig {
    pub from: String,
    pub to: String,
    pub slope: f64,
    #[serde(default)]
    pub offset: f64,
}

fn one() -> f64 {
    1.0
}

fn one_i32() -> i32 {
    1
}

impl RegistryConfig {
    pub fn from_json(input: &str) -> Result<Self, UnitError> {
        serde_json::from_str(input).map_err(|e| UnitError::Config(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, UnitError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            UnitError::Config(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&data)
    }
}

impl RegistryBuilder {
    /// Feed declarations from a configuration file. Units are declared
    /// before derived definitions and conversions are resolved, so
    /// entries may refer to units further down the file.
    pub fn apply_config(
        &mut self,
        config: &RegistryConfig,
    ) -> Result<(), UnitError> {
        for name in &config.dimensions {
            self.config_dimension(name);
        }

        let mut derived = Vec::new();
        for unit in &config.units {
            let dimension = self.config_dimension(&unit.dimension);
            let handle = match unit.primary {
                true => {
                    self.define_primary_unit(&unit.name, &unit.symbol, dimension)
                }
                false => self.define_unit(&unit.name, &unit.symbol, dimension),
            };
            if let Some(def) = &unit.derived {
                derived.push((handle, def));
            }
        }

        for (unit, def) in derived {
            let terms = def
                .numerator
                .iter()
                .map(|t| self.config_term(t, false))
                .chain(def.denominator.iter().map(|t| self.config_term(t, true)))
                .collect::<Result<Vec<_>, _>>()?;
            self.set_derived_terms(unit, def.coefficient, &terms);
        }

        for conv in &config.conversions {
            let from = self.config_unit(&conv.from)?;
            let to = self.config_unit(&conv.to)?;
            self.define_conversion(from, to, conv.slope, conv.offset);
        }

        if let Some(name) = &config.angle_unit {
            let unit = self.config_unit(name)?;
            self.set_angle_unit(unit);
        }

        log::debug!(
            "applied unit configuration: {} dimensions, {} units, {} conversions",
            config.dimensions.len(),
            config.units.len(),
            config.conversions.len()
        );
        Ok(())
    }

    fn config_dimension(&mut self, name: &str) -> Dimension {
        match self.registry.dimension_by_name(name) {
            Some(dim) => dim,
            None => self.define_dimension(name),
        }
    }

    fn config_unit(&self, name: &str) -> Result<Unit, UnitError> {
        self.registry
            .lookup(name)
            .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))
    }

    fn config_term(&self, term: &TermConfig, invert: bool) -> Result<Term, UnitError> {
        if term.root == 0 {
            return Err(UnitError::Config(format!(
                "zero root for unit {}",
                term.unit
            )));
        }
        let exponent = Rational32::new(term.power, term.root);
        Ok(Term::new(
            self.config_unit(&term.unit)?,
            match invert {
                true => -exponent,
                false => exponent,
            },
        ))
    }
}

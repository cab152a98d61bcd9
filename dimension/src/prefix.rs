/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Decimal SI prefixes. A prefixed unit is registered as its own
/// fundamental unit with a conversion to the unprefixed one.
#[derive(
    Serialize,
    Deserialize,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Hash,
    Clone,
    Copy,
    Debug,
)]
pub enum SiPrefix {
    Yocto,
    Zepto,
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
    Yotta,
}

static SI_PREFIXES: [SiPrefix; 20] = [
    SiPrefix::Yocto,
    SiPrefix::Zepto,
    SiPrefix::Atto,
    SiPrefix::Femto,
    SiPrefix::Pico,
    SiPrefix::Nano,
    SiPrefix::Micro,
    SiPrefix::Milli,
    SiPrefix::Centi,
    SiPrefix::Deci,
    SiPrefix::Deca,
    SiPrefix::Hecto,
    SiPrefix::Kilo,
    SiPrefix::Mega,
    SiPrefix::Giga,
    SiPrefix::Tera,
    SiPrefix::Peta,
    SiPrefix::Exa,
    SiPrefix::Zetta,
    SiPrefix::Yotta,
];

impl SiPrefix {
    pub const LIST: &[Self] = &SI_PREFIXES;

    pub const fn power(&self) -> i32 {
        match self {
            SiPrefix::Yocto => -24,
            SiPrefix::Zepto => -21,
            SiPrefix::Atto => -18,
            SiPrefix::Femto => -15,
            SiPrefix::Pico => -12,
            SiPrefix::Nano => -9,
            SiPrefix::Micro => -6,
            SiPrefix::Milli => -3,
            SiPrefix::Centi => -2,
            SiPrefix::Deci => -1,
            SiPrefix::Deca => 1,
            SiPrefix::Hecto => 2,
            SiPrefix::Kilo => 3,
            SiPrefix::Mega => 6,
            SiPrefix::Giga => 9,
            SiPrefix::Tera => 12,
            SiPrefix::Peta => 15,
            SiPrefix::Exa => 18,
            SiPrefix::Zetta => 21,
            SiPrefix::Yotta => 24,
        }
    }

    /// Exact decimal factor; `10f64.powi` drifts for negative powers.
    pub fn multiplier(&self) -> f64 {
        match self.power() {
            p if p < 0 => 1.0 / 10f64.powi(-p),
            p => 10f64.powi(p),
        }
    }

    pub const fn prefix(&self) -> &'static str {
        match self {
            SiPrefix::Yocto => "y",
            SiPrefix::Zepto => "z",
            SiPrefix::Atto => "a",
            SiPrefix::Femto => "f",
            SiPrefix::Pico => "p",
            SiPrefix::Nano => "n",
            SiPrefix::Micro => "µ",
            SiPrefix::Milli => "m",
            SiPrefix::Centi => "c",
            SiPrefix::Deci => "d",
            SiPrefix::Deca => "da",
            SiPrefix::Hecto => "h",
            SiPrefix::Kilo => "k",
            SiPrefix::Mega => "M",
            SiPrefix::Giga => "G",
            SiPrefix::Tera => "T",
            SiPrefix::Peta => "P",
            SiPrefix::Exa => "E",
            SiPrefix::Zetta => "Z",
            SiPrefix::Yotta => "Y",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            SiPrefix::Yocto => "Yocto",
            SiPrefix::Zepto => "Zepto",
            SiPrefix::Atto => "Atto",
            SiPrefix::Femto => "Femto",
            SiPrefix::Pico => "Pico",
            SiPrefix::Nano => "Nano",
            SiPrefix::Micro => "Micro",
            SiPrefix::Milli => "Milli",
            SiPrefix::Centi => "Centi",
            SiPrefix::Deci => "Deci",
            SiPrefix::Deca => "Deca",
            SiPrefix::Hecto => "Hecto",
            SiPrefix::Kilo => "Kilo",
            SiPrefix::Mega => "Mega",
            SiPrefix::Giga => "Giga",
            SiPrefix::Tera => "Tera",
            SiPrefix::Peta => "Peta",
            SiPrefix::Exa => "Exa",
            SiPrefix::Zetta => "Zetta",
            SiPrefix::Yotta => "Yotta",
        }
    }

    /// Name of the prefixed unit: "Kilo" + "Meters" = "Kilometers".
    pub fn apply(&self, unit_name: &str) -> String {
        format!("{}{}", self.name(), unit_name.to_lowercase())
    }
}

impl Display for SiPrefix {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.prefix())
    }
}

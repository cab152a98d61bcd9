/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// A physical quantity class. Conversion is possible only
/// between units of the same dimension.
///
/// Dimensions are opaque handles into a [`Registry`]. The
/// constants below are the dimensions of the standard unit set
/// and keep their ids in every registry started from
/// [`RegistryBuilder::standard`](crate::RegistryBuilder::standard).
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
#[serde(transparent)]
pub struct Dimension(pub(crate) u16);

impl Dimension {
    /* Fundamental dimensions. */
    pub const LENGTH: Self = Dimension(0);
    pub const MASS: Self = Dimension(1);
    pub const TIME: Self = Dimension(2);
    pub const ANGLE: Self = Dimension(3);
    pub const TEMPERATURE: Self = Dimension(4);
    pub const CURRENT: Self = Dimension(5);
    pub const AMOUNT: Self = Dimension(6);
    pub const LUMINOUS_INTENSITY: Self = Dimension(7);

    /* Dimensions of derived units. */
    pub const AREA: Self = Dimension(8);
    pub const VOLUME: Self = Dimension(9);
    pub const SPEED: Self = Dimension(10);
    pub const FORCE: Self = Dimension(11);
    pub const ENERGY: Self = Dimension(12);
    pub const POWER: Self = Dimension(13);
    pub const PRESSURE: Self = Dimension(14);
    pub const FREQUENCY: Self = Dimension(15);
    pub const CHARGE: Self = Dimension(16);
    pub const POTENTIAL: Self = Dimension(17);
    pub const RESISTANCE: Self = Dimension(18);

    pub const fn id(&self) -> u16 {
        self.0
    }
}

pub(crate) static STANDARD_DIMENSIONS: [(Dimension, &str); 19] = [
    (Dimension::LENGTH, "Length"),
    (Dimension::MASS, "Mass"),
    (Dimension::TIME, "Time"),
    (Dimension::ANGLE, "Angle"),
    (Dimension::TEMPERATURE, "Temperature"),
    (Dimension::CURRENT, "Current"),
    (Dimension::AMOUNT, "Amount"),
    (Dimension::LUMINOUS_INTENSITY, "LuminousIntensity"),
    (Dimension::AREA, "Area"),
    (Dimension::VOLUME, "Volume"),
    (Dimension::SPEED, "Speed"),
    (Dimension::FORCE, "Force"),
    (Dimension::ENERGY, "Energy"),
    (Dimension::POWER, "Power"),
    (Dimension::PRESSURE, "Pressure"),
    (Dimension::FREQUENCY, "Frequency"),
    (Dimension::CHARGE, "Charge"),
    (Dimension::POTENTIAL, "ElectricPotential"),
    (Dimension::RESISTANCE, "Resistance"),
];

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match Registry::current().dimension_name(*self) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "dimension#{}", self.0),
        }
    }
}

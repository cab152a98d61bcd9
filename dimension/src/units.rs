/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! The standard unit set. The handles below are valid in every registry
//! started from [`RegistryBuilder::standard`]; units declared on top of
//! it get later ids.

use std::f64::consts::PI;

use crate::signature::Term;
use crate::{Dimension, RegistryBuilder, SiPrefix, Unit};

/* Length */
pub const METERS: Unit = Unit::new(0);
pub const FEET: Unit = Unit::new(1);
pub const INCHES: Unit = Unit::new(2);
pub const YARDS: Unit = Unit::new(3);
pub const MILES: Unit = Unit::new(4);
pub const NAUTICAL_MILES: Unit = Unit::new(5);

/* Mass */
pub const GRAMS: Unit = Unit::new(6);
pub const POUNDS: Unit = Unit::new(7);
pub const OUNCES: Unit = Unit::new(8);
pub const SLUGS: Unit = Unit::new(9);
pub const TONNES: Unit = Unit::new(10);

/* Time */
pub const SECONDS: Unit = Unit::new(11);
pub const MINUTES: Unit = Unit::new(12);
pub const HOURS: Unit = Unit::new(13);
pub const DAYS: Unit = Unit::new(14);

/* Angle */
pub const RADIANS: Unit = Unit::new(15);
pub const DEGREES: Unit = Unit::new(16);

/* Temperature */
pub const CELSIUS: Unit = Unit::new(17);
pub const FAHRENHEIT: Unit = Unit::new(18);
pub const KELVIN: Unit = Unit::new(19);

pub const AMPERES: Unit = Unit::new(20);
pub const MOLES: Unit = Unit::new(21);
pub const POUND_MOLES: Unit = Unit::new(22);
pub const CANDELAS: Unit = Unit::new(23);

/* SI-prefixed */
pub const KILOMETERS: Unit = Unit::new(24);
pub const CENTIMETERS: Unit = Unit::new(25);
pub const MILLIMETERS: Unit = Unit::new(26);
pub const KILOGRAMS: Unit = Unit::new(27);
pub const MILLIGRAMS: Unit = Unit::new(28);
pub const MILLISECONDS: Unit = Unit::new(29);
pub const MILLIAMPERES: Unit = Unit::new(30);

/* Derived */
pub const HECTARES: Unit = Unit::new(31);
pub const LITERS: Unit = Unit::new(32);
pub const MILLILITERS: Unit = Unit::new(33);
pub const GALLONS: Unit = Unit::new(34);
pub const KNOTS: Unit = Unit::new(35);
pub const KILOMETERS_PER_HOUR: Unit = Unit::new(36);
pub const NEWTONS: Unit = Unit::new(37);
pub const POUNDS_FORCE: Unit = Unit::new(38);
pub const JOULES: Unit = Unit::new(39);
pub const CALORIES: Unit = Unit::new(40);
pub const WATTS: Unit = Unit::new(41);
pub const PASCALS: Unit = Unit::new(42);
pub const PSI: Unit = Unit::new(43);
pub const HERTZ: Unit = Unit::new(44);
pub const COULOMBS: Unit = Unit::new(45);
pub const VOLTS: Unit = Unit::new(46);
pub const OHMS: Unit = Unit::new(47);

/// Declare the standard units, in the order of the handles above.
pub(crate) fn register(b: &mut RegistryBuilder) {
    let t = Term::powi;

    b.define_primary_unit("Meters", "m", Dimension::LENGTH);
    b.define_unit("Feet", "ft", Dimension::LENGTH);
    b.define_unit("Inches", "in", Dimension::LENGTH);
    b.define_unit("Yards", "yd", Dimension::LENGTH);
    b.define_unit("Miles", "mi", Dimension::LENGTH);
    b.define_unit("NauticalMiles", "nmi", Dimension::LENGTH);
    b.define_conversion(FEET, METERS, 0.3048, 0.0);
    b.define_conversion(INCHES, METERS, 0.0254, 0.0);
    b.define_conversion(YARDS, METERS, 0.9144, 0.0);
    b.define_conversion(MILES, METERS, 1609.344, 0.0);
    b.define_conversion(NAUTICAL_MILES, METERS, 1852.0, 0.0);

    b.define_primary_unit("Grams", "g", Dimension::MASS);
    b.define_unit("Pounds", "lb", Dimension::MASS);
    b.define_unit("Ounces", "oz", Dimension::MASS);
    b.define_unit("Slugs", "slug", Dimension::MASS);
    b.define_unit("Tonnes", "t", Dimension::MASS);
    b.define_conversion(GRAMS, POUNDS, 0.0022046226, 0.0);
    b.define_conversion(POUNDS, GRAMS, 453.5923745, 0.0);
    b.define_conversion(GRAMS, OUNCES, 0.0352739619, 0.0);
    b.define_conversion(OUNCES, GRAMS, 28.349523165, 0.0);
    b.define_conversion(SLUGS, GRAMS, 14593.90294, 0.0);
    b.define_conversion(TONNES, GRAMS, 1e6, 0.0);

    b.define_primary_unit("Seconds", "s", Dimension::TIME);
    b.define_unit("Minutes", "min", Dimension::TIME);
    b.define_unit("Hours", "h", Dimension::TIME);
    b.define_unit("Days", "d", Dimension::TIME);
    b.define_conversion(SECONDS, MINUTES, 1.0 / 60.0, 0.0);
    b.define_conversion(MINUTES, SECONDS, 60.0, 0.0);
    b.define_conversion(SECONDS, HOURS, 1.0 / 3600.0, 0.0);
    b.define_conversion(HOURS, SECONDS, 3600.0, 0.0);
    b.define_conversion(DAYS, SECONDS, 86400.0, 0.0);

    b.define_primary_unit("Radians", "rad", Dimension::ANGLE);
    b.define_unit("Degrees", "deg", Dimension::ANGLE);
    b.define_conversion(RADIANS, DEGREES, 180.0 / PI, 0.0);
    b.define_conversion(DEGREES, RADIANS, PI / 180.0, 0.0);
    b.set_angle_unit(RADIANS);

    b.define_primary_unit("Celsius", "°C", Dimension::TEMPERATURE);
    b.define_unit("Fahrenheit", "°F", Dimension::TEMPERATURE);
    b.define_unit("Kelvin", "K", Dimension::TEMPERATURE);
    b.define_conversion(CELSIUS, FAHRENHEIT, 9.0 / 5.0, 32.0);
    b.define_conversion(FAHRENHEIT, CELSIUS, 5.0 / 9.0, -160.0 / 9.0);
    b.define_conversion(CELSIUS, KELVIN, 1.0, 273.15);
    b.define_conversion(KELVIN, CELSIUS, 1.0, -273.15);

    b.define_primary_unit("Amperes", "A", Dimension::CURRENT);
    b.define_primary_unit("Moles", "mol", Dimension::AMOUNT);
    b.define_unit("PoundMoles", "lbmol", Dimension::AMOUNT);
    b.define_conversion(POUND_MOLES, MOLES, 453.59237, 0.0);
    b.define_primary_unit("Candelas", "cd", Dimension::LUMINOUS_INTENSITY);

    b.define_si_prefixed(METERS, SiPrefix::Kilo);
    b.define_si_prefixed(METERS, SiPrefix::Centi);
    b.define_si_prefixed(METERS, SiPrefix::Milli);
    b.define_si_prefixed(GRAMS, SiPrefix::Kilo);
    b.define_si_prefixed(GRAMS, SiPrefix::Milli);
    b.define_si_prefixed(SECONDS, SiPrefix::Milli);
    b.define_si_prefixed(AMPERES, SiPrefix::Milli);

    b.define_derived_unit(
        "Hectares",
        "ha",
        Dimension::AREA,
        1e4,
        &[t(METERS, 2)],
    );
    b.define_derived_unit(
        "Liters",
        "L",
        Dimension::VOLUME,
        1e-3,
        &[t(METERS, 3)],
    );
    b.define_derived_unit(
        "Milliliters",
        "mL",
        Dimension::VOLUME,
        1e-3,
        &[t(LITERS, 1)],
    );
    b.define_derived_unit(
        "Gallons",
        "gal",
        Dimension::VOLUME,
        0.003785411784,
        &[t(METERS, 3)],
    );
    b.define_derived_unit(
        "Knots",
        "kn",
        Dimension::SPEED,
        1852.0 / 3600.0,
        &[t(METERS, 1), t(SECONDS, -1)],
    );
    b.define_derived_unit(
        "KilometersPerHour",
        "kph",
        Dimension::SPEED,
        1.0,
        &[t(KILOMETERS, 1), t(HOURS, -1)],
    );
    b.define_derived_unit(
        "Newtons",
        "N",
        Dimension::FORCE,
        1.0,
        &[t(KILOGRAMS, 1), t(METERS, 1), t(SECONDS, -2)],
    );
    b.define_derived_unit(
        "PoundsForce",
        "lbf",
        Dimension::FORCE,
        4.4482216152605,
        &[t(NEWTONS, 1)],
    );
    b.define_derived_unit(
        "Joules",
        "J",
        Dimension::ENERGY,
        1.0,
        &[t(NEWTONS, 1), t(METERS, 1)],
    );
    b.define_derived_unit(
        "Calories",
        "cal",
        Dimension::ENERGY,
        4.184,
        &[t(JOULES, 1)],
    );
    b.define_derived_unit(
        "Watts",
        "W",
        Dimension::POWER,
        1.0,
        &[t(JOULES, 1), t(SECONDS, -1)],
    );
    b.define_derived_unit(
        "Pascals",
        "Pa",
        Dimension::PRESSURE,
        1.0,
        &[t(NEWTONS, 1), t(METERS, -2)],
    );
    b.define_derived_unit(
        "PoundsPerSquareInch",
        "psi",
        Dimension::PRESSURE,
        1.0,
        &[t(POUNDS_FORCE, 1), t(INCHES, -2)],
    );
    b.define_derived_unit(
        "Hertz",
        "Hz",
        Dimension::FREQUENCY,
        1.0,
        &[t(SECONDS, -1)],
    );
    b.define_derived_unit(
        "Coulombs",
        "C",
        Dimension::CHARGE,
        1.0,
        &[t(AMPERES, 1), t(SECONDS, 1)],
    );
    b.define_derived_unit(
        "Volts",
        "V",
        Dimension::POTENTIAL,
        1.0,
        &[t(WATTS, 1), t(AMPERES, -1)],
    );
    b.define_derived_unit(
        "Ohms",
        "Ω",
        Dimension::RESISTANCE,
        1.0,
        &[t(VOLTS, 1), t(AMPERES, -1)],
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Registry;

    #[test]
    fn handles_match_declarations() {
        let registry = Registry::standard();
        for (unit, name) in [
            (METERS, "Length::Meters"),
            (NAUTICAL_MILES, "Length::NauticalMiles"),
            (TONNES, "Mass::Tonnes"),
            (DAYS, "Time::Days"),
            (DEGREES, "Angle::Degrees"),
            (KELVIN, "Temperature::Kelvin"),
            (CANDELAS, "LuminousIntensity::Candelas"),
            (KILOMETERS, "Length::Kilometers"),
            (MILLIAMPERES, "Current::Milliamperes"),
            (HECTARES, "Area::Hectares"),
            (KILOMETERS_PER_HOUR, "Speed::KilometersPerHour"),
            (PSI, "Pressure::PoundsPerSquareInch"),
            (OHMS, "Resistance::Ohms"),
        ] {
            assert_eq!(registry.unit_by_name(name), Some(unit), "{}", name);
        }
        assert_eq!(registry.units().count(), 48);
    }

    #[test]
    fn prefixed_symbols() {
        let registry = Registry::standard();
        assert_eq!(registry.unit_by_symbol("km"), Some(KILOMETERS));
        assert_eq!(registry.unit_by_symbol("kg"), Some(KILOGRAMS));
        assert_eq!(registry.unit_by_symbol("ms"), Some(MILLISECONDS));
        assert_eq!(registry.unit_by_symbol("mA"), Some(MILLIAMPERES));
    }
}

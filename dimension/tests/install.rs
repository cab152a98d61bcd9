/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use dimension::units::{CELSIUS, METERS, SECONDS};
use dimension::{Quantity, Registry, RegistryBuilder, Signature, UnitError};

/* One test only: the process-wide registry can be installed once. */
#[test]
fn install_custom_registry() {
    /* Errors and display from a private registry leave the
     * process-wide one alone. */
    let private = Registry::standard();
    assert!(private
        .powi(&Quantity::absolute(1.0, CELSIUS), 2)
        .is_err());
    assert!(private
        .add_scalar(&Quantity::of(1.0, METERS), 1.0)
        .is_err());
    assert_eq!(Signature::unit(METERS).to_string(), "m");
    assert_eq!(METERS.to_string(), "m");

    let mut builder = RegistryBuilder::standard();
    let beats = builder.define_derived_unit(
        "BeatsPerMinute",
        "bpm",
        dimension::Dimension::FREQUENCY,
        1.0 / 60.0,
        &[dimension::Term::powi(SECONDS, -1)],
    );
    let registry = builder.build().unwrap().install().unwrap();
    assert_eq!(registry.lookup("bpm"), Some(beats));
    assert_eq!(Registry::global().lookup("bpm"), Some(beats));

    let pulse = Quantity::parse("72 bpm").unwrap();
    let hz = pulse.value_as(&Signature::unit(registry.lookup("Hz").unwrap()));
    assert!((hz.unwrap() - 1.2).abs() < 1e-12);
    assert_eq!(pulse.to_string(), "72 bpm");

    assert_eq!(
        Registry::standard().install().unwrap_err(),
        UnitError::AlreadyInstalled
    );
}

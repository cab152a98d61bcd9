/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use dimension::units::{FEET, INCHES, METERS, SECONDS};
use dimension::{
    Quantity, Registry, RegistryBuilder, RegistryConfig, Signature, Term,
    UnitError,
};

#[test]
fn resolver_paths() {
    let registry = Registry::standard();

    let id = registry.resolve(FEET, FEET).unwrap();
    assert_eq!((id.slope, id.offset), (1.0, 0.0));

    assert_eq!(registry.resolve(FEET, METERS).unwrap().slope, 0.3048);
    assert_eq!(registry.resolve(METERS, FEET).unwrap().slope, 1.0 / 0.3048);

    let via_primary = registry.resolve(FEET, INCHES).unwrap();
    assert!((via_primary.slope - 12.0).abs() < 1e-12);

    assert!(matches!(
        registry.resolve(METERS, SECONDS),
        Err(UnitError::DimensionMismatch(_, _))
    ));
}

#[test]
fn missing_conversion_to_primary() {
    let mut builder = RegistryBuilder::new();
    let length = builder.define_dimension("Length");
    builder.define_primary_unit("Meters", "m", length);
    builder.define_unit("Feet", "ft", length);
    assert_eq!(
        builder.build().unwrap_err(),
        UnitError::MissingConversion(
            String::from("Length::Feet"),
            String::from("Length::Meters")
        )
    );
}

#[test]
fn missing_primary() {
    let mut builder = RegistryBuilder::new();
    let length = builder.define_dimension("Length");
    builder.define_unit("Feet", "ft", length);
    assert!(matches!(
        builder.build(),
        Err(UnitError::MissingConversion(_, _))
    ));
}

/// Only one hop through the primary unit is tried; a chain of
/// conversions that does not touch it is not enough.
#[test]
fn conversions_are_not_chained() {
    let mut builder = RegistryBuilder::new();
    let length = builder.define_dimension("Length");
    let m = builder.define_primary_unit("Meters", "m", length);
    let ft = builder.define_unit("Feet", "ft", length);
    let inch = builder.define_unit("Inches", "in", length);
    builder.define_conversion(ft, m, 0.3048, 0.0);
    builder.define_conversion(inch, ft, 1.0 / 12.0, 0.0);
    assert!(matches!(
        builder.build(),
        Err(UnitError::MissingConversion(_, _))
    ));
}

#[test]
fn last_conversion_wins() {
    let mut builder = RegistryBuilder::standard();
    builder.define_conversion(FEET, METERS, 0.5, 0.0);
    let registry = builder.build().unwrap();
    assert_eq!(registry.resolve(FEET, METERS).unwrap().slope, 0.5);
}

#[test]
fn conflicting_declarations() {
    let mut builder = RegistryBuilder::new();
    let length = builder.define_dimension("Length");
    builder.define_primary_unit("Meters", "m", length);
    builder.define_primary_unit("Feet", "ft", length);
    assert!(matches!(
        builder.build(),
        Err(UnitError::MalformedSignature(_))
    ));

    let mut builder = RegistryBuilder::standard();
    builder.define_dimension("Length");
    assert!(matches!(
        builder.build(),
        Err(UnitError::MalformedSignature(_))
    ));
}

#[test]
fn cyclic_derived_units() {
    let mut builder = RegistryBuilder::standard();
    let dim = builder.define_dimension("Loop");
    let a = builder.define_derived_unit("Aa", "aa", dim, 1.0, &[]);
    let b = builder.define_derived_unit(
        "Bb",
        "bb",
        dim,
        1.0,
        &[Term::from(a), Term::powi(METERS, -1)],
    );
    builder.set_derived_terms(a, 1.0, &[Term::powi(b, 2)]);
    assert!(matches!(
        builder.build(),
        Err(UnitError::MalformedSignature(_))
    ));
}

#[test]
fn lookups() {
    let registry = Registry::standard();
    assert_eq!(registry.lookup("m"), Some(METERS));
    assert_eq!(registry.lookup("Meters"), Some(METERS));
    assert_eq!(registry.lookup("Length::Meters"), Some(METERS));
    assert_eq!(registry.lookup("Parsecs"), None);
    assert_eq!(registry.primary(registry.dimension_of(FEET).unwrap()), Some(METERS));
    assert_eq!(registry.angle_unit(), registry.lookup("rad"));
}

#[test]
fn subscripts_never_cancel() {
    let x = METERS.with_subscript(1);
    let y = METERS.with_subscript(2);

    let area = (Quantity::of(2.0, x) * Quantity::of(3.0, y)).unwrap();
    assert_eq!(area.signature().terms().len(), 2);
    assert_eq!(area.value(), 6.0);

    let ratio = (Quantity::of(2.0, x) / Quantity::of(4.0, y)).unwrap();
    assert!(!ratio.is_dimensionless());

    let same = (Quantity::of(2.0, x) / Quantity::of(4.0, x)).unwrap();
    assert!(same.is_dimensionless());

    assert!(matches!(
        Quantity::of(1.0, x).value_as(&Signature::unit(y)),
        Err(UnitError::DimensionMismatch(_, _))
    ));

    /* Feet on the x axis still cancel against meters on the x axis. */
    let mixed = (Quantity::of(1.0, FEET.with_subscript(1)) / Quantity::of(1.0, x))
        .unwrap();
    assert!(mixed.is_dimensionless());
    assert!((mixed.value() - 0.3048).abs() < 1e-12);
}

const DEFINITIONS: &str = r#"{
    "dimensions": ["Information"],
    "units": [
        { "name": "Baud", "symbol": "Bd", "dimension": "Frequency",
          "derived": { "numerator": [{ "unit": "bit" }],
                       "denominator": [{ "unit": "s" }] } },
        { "name": "Bytes", "symbol": "B", "dimension": "Information", "primary": true },
        { "name": "Bits", "symbol": "bit", "dimension": "Information" },
        { "name": "Furlongs", "symbol": "fur", "dimension": "Length" }
    ],
    "conversions": [
        { "from": "bit", "to": "B", "slope": 0.125 },
        { "from": "fur", "to": "Meters", "slope": 201.168 }
    ]
}"#;

#[test]
fn configured_units() {
    let mut builder = RegistryBuilder::standard();
    builder
        .apply_config(&RegistryConfig::from_json(DEFINITIONS).unwrap())
        .unwrap();
    let registry = builder.build().unwrap();

    let bits = registry.parse_quantity("16 bit").unwrap();
    let bytes = registry
        .convert_to(&bits, &registry.parse_signature("B").unwrap())
        .unwrap();
    assert_eq!(bytes.value(), 2.0);

    let rate = registry.parse_quantity("1200 Bd").unwrap();
    let per_second = registry
        .convert_to(&rate, &registry.parse_signature("B/s").unwrap())
        .unwrap();
    assert_eq!(per_second.value(), 150.0);

    let fur = registry.parse_quantity("1 fur").unwrap();
    let ft = registry
        .convert(fur.value(), fur.signature(), &Signature::unit(FEET))
        .unwrap();
    assert!((ft - 660.0).abs() < 1e-9);
}

#[test]
fn configured_unknown_unit() {
    let config = RegistryConfig::from_json(
        r#"{"conversions": [{"from": "parsec", "to": "m", "slope": 3.0857e16}]}"#,
    )
    .unwrap();
    let mut builder = RegistryBuilder::standard();
    assert_eq!(
        builder.apply_config(&config),
        Err(UnitError::UnknownUnit(String::from("parsec")))
    );
}

#[test]
fn configured_cycle() {
    let config = RegistryConfig::from_json(
        r#"{"units": [
            {"name": "Ping", "symbol": "ping", "dimension": "Time",
             "derived": {"numerator": [{"unit": "pong"}]}},
            {"name": "Pong", "symbol": "pong", "dimension": "Time",
             "derived": {"numerator": [{"unit": "ping", "power": 1, "root": 2}]}}
        ]}"#,
    )
    .unwrap();
    let mut builder = RegistryBuilder::standard();
    builder.apply_config(&config).unwrap();
    assert!(matches!(
        builder.build(),
        Err(UnitError::MalformedSignature(_))
    ));
}

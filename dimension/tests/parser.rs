/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use dimension::parser::parse_signature;
use dimension::units::{
    CELSIUS, HERTZ, KILOGRAMS, METERS, NEWTONS, SECONDS,
};
use dimension::{Exponent, HashPolicy, Quantity, Signature, Term, UnitError};

#[test]
fn signatures() {
    let accel = Signature::from_terms([Term::from(METERS), Term::powi(SECONDS, -2)]);
    assert_eq!(parse_signature("m/s^2").unwrap(), accel);
    assert_eq!(parse_signature("m/s²").unwrap(), accel);
    assert_eq!(parse_signature("m/s/s").unwrap(), accel);
    assert_eq!(parse_signature("m*s^-2").unwrap(), accel);
    assert_eq!(parse_signature("Meters/Seconds^2").unwrap(), accel);
    assert_eq!(parse_signature("m⋅s⁻²").unwrap(), accel);

    assert_eq!(
        parse_signature("kg*m/s^2").unwrap(),
        Signature::from_terms([
            Term::from(KILOGRAMS),
            Term::from(METERS),
            Term::powi(SECONDS, -2)
        ])
    );
    assert_eq!(parse_signature("N").unwrap(), Signature::unit(NEWTONS));
    assert_eq!(
        parse_signature("1/s").unwrap(),
        Signature::ratio(&[], &[SECONDS])
    );
    assert_eq!(
        parse_signature("Hz^(1/2)").unwrap(),
        Signature::from_terms([Term::new(HERTZ, Exponent::new(1, 2))])
    );
    assert_eq!(
        parse_signature("m#1*m#2").unwrap(),
        Signature::ratio(&[METERS.with_subscript(1), METERS.with_subscript(2)], &[])
    );
    assert!(parse_signature("").unwrap().is_dimensionless());
}

#[test]
fn signature_errors() {
    assert_eq!(
        parse_signature("furlong"),
        Err(UnitError::UnknownUnit(String::from("furlong")))
    );
    assert!(matches!(
        parse_signature("m/"),
        Err(UnitError::ParseError(_))
    ));
    assert!(matches!(
        parse_signature("m^(1/0)"),
        Err(UnitError::ParseError(_))
    ));
}

#[test]
fn quantities() {
    let q = Quantity::parse("10 m/s").unwrap();
    assert_eq!(q.value(), 10.0);
    assert_eq!(q.signature(), &Signature::ratio(&[METERS], &[SECONDS]));

    let t = Quantity::parse("21.5 °C").unwrap();
    assert_eq!(t, Quantity::of(21.5, CELSIUS));

    assert_eq!(Quantity::parse("-3e2kg").unwrap(), Quantity::of(-300.0, KILOGRAMS));
    assert_eq!(Quantity::parse("4").unwrap(), Quantity::dimensionless(4.0));
    assert!(matches!(
        Quantity::parse("m/s"),
        Err(UnitError::ParseError(_))
    ));
}

#[test]
fn display_parses_back() {
    for input in ["9.81 m/s²", "2 kg⋅m", "0.5 1/s", "3 m#1"] {
        let q = Quantity::parse(input).unwrap();
        assert_eq!(Quantity::parse(&q.to_string()).unwrap(), q, "{}", input);
    }
}

#[test]
fn huge_exponents_are_errors() {
    let q = Quantity::parse("2 m^2000000000").unwrap();
    assert!(matches!(q.powi(2), Err(UnitError::MalformedSignature(_))));
    assert!(matches!(
        Quantity::parse("1 m^2000000000*m^2000000000"),
        Err(UnitError::MalformedSignature(_))
    ));
    assert_eq!(q.to_bytes(HashPolicy::Fnv1a32).unwrap().len(), 12);
}

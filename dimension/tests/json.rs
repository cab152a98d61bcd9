/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use dimension::units::{CELSIUS, METERS, SECONDS};
use dimension::{Quantity, Signature, UnitError};

#[cfg(not(feature = "serialize_as_string"))]
#[test]
fn quantity_json() {
    let q = Quantity::of(9.81, Signature::ratio(&[METERS], &[SECONDS, SECONDS]));
    let json = serde_json::to_string(&q).unwrap();
    assert_eq!(serde_json::from_str::<Quantity>(&json).unwrap(), q);

    let reading = Quantity::absolute(21.0, CELSIUS);
    let json = serde_json::to_value(&reading).unwrap();
    assert_eq!(json[1]["absolute"], serde_json::Value::Bool(true));
}

#[cfg(feature = "serialize_as_string")]
#[test]
fn quantity_json_as_string() {
    let q = Quantity::of(9.81, Signature::ratio(&[METERS], &[SECONDS, SECONDS]));
    let json = serde_json::to_string(&q).unwrap();
    assert_eq!(json, r#"[9.81,"m/s²"]"#);
    assert_eq!(serde_json::from_str::<Quantity>(&json).unwrap(), q);
}

#[test]
fn error_json() {
    assert_eq!(
        serde_json::to_string(&UnitError::DivisionByZero).unwrap(),
        r#""DivisionByZero""#
    );
    let err = UnitError::SerializationTagMismatch {
        expected: 1,
        found: 2,
    };
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(serde_json::from_str::<UnitError>(&json).unwrap(), err);
}

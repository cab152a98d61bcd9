/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::exponent::{self, Exponent};
use crate::parser::parse_signature;
use crate::registry::Registry;
use crate::{Unit, UnitError};

/// A unit raised to a rational power. Negative exponents place
/// the term in the denominator.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Term {
    pub unit: Unit,
    pub exponent: Exponent,
}

impl Term {
    pub fn new(unit: Unit, exponent: Exponent) -> Self {
        Term { unit, exponent }
    }

    pub fn powi(unit: Unit, n: i32) -> Self {
        Term::new(unit, exponent::integer(n))
    }

    pub fn inverse(self) -> Self {
        Term::new(self.unit, -self.exponent)
    }
}

impl From<Unit> for Term {
    fn from(unit: Unit) -> Self {
        Term::new(unit, exponent::one())
    }
}

/// Dimensional signature of a quantity: a multiset of units with
/// rational exponents.
///
/// A signature built through the constructors below is canonical:
/// every unit handle appears at most once, no exponent is zero and
/// the terms are ordered by declaration order of their units. Derived
/// units are kept as declared; they are expanded only when the
/// simplifier runs.
///
/// With the `serialize_as_string` feature, signatures serialize as
/// their display form ("m/s²"), resolved through the process-wide
/// registry. The absolute marker is not kept in that form.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
#[cfg_attr(
    not(feature = "serialize_as_string"),
    derive(Serialize, Deserialize)
)]
#[cfg_attr(
    feature = "serialize_as_string",
    derive(serde_with::SerializeDisplay, serde_with::DeserializeFromStr)
)]
pub struct Signature {
    terms: Vec<Term>,
    /// Absolute (point) quantity, such as a temperature reading.
    #[cfg_attr(
        not(feature = "serialize_as_string"),
        serde(default, skip_serializing_if = "std::ops::Not::not")
    )]
    absolute: bool,
}

impl Signature {
    pub fn dimensionless() -> Self {
        Signature::default()
    }

    pub fn unit(unit: Unit) -> Self {
        Signature {
            terms: vec![Term::from(unit)],
            absolute: false,
        }
    }

    /// Signature of an absolute quantity in `unit`. It cannot be
    /// combined with other terms.
    pub fn absolute(unit: Unit) -> Self {
        Signature {
            terms: vec![Term::from(unit)],
            absolute: true,
        }
    }

    /// Product of `num` divided by the product of `den`.
    pub fn ratio(num: &[Unit], den: &[Unit]) -> Self {
        Signature::from_terms(
            num.iter()
                .map(|u| Term::from(*u))
                .chain(den.iter().map(|u| Term::from(*u).inverse())),
        )
    }

    /// Merge repeated units and drop zero exponents. Different units
    /// of the same dimension are left alone. Exponent overflow
    /// panics; see [`Signature::try_from_terms`] for untrusted input.
    pub fn from_terms<I: IntoIterator<Item = Term>>(terms: I) -> Self {
        let mut merged: Vec<Term> = Vec::new();
        for term in terms {
            match merged.iter_mut().find(|t| t.unit == term.unit) {
                Some(t) => t.exponent += term.exponent,
                None => merged.push(term),
            }
        }
        Signature::canonical(merged)
    }

    /// Like [`Signature::from_terms`], but an exponent overflow is
    /// an error.
    pub fn try_from_terms<I: IntoIterator<Item = Term>>(
        terms: I,
    ) -> Result<Self, UnitError> {
        let mut merged: Vec<Term> = Vec::new();
        for term in terms {
            match merged.iter_mut().find(|t| t.unit == term.unit) {
                Some(t) => {
                    t.exponent = exponent::checked_add(t.exponent, term.exponent)?
                }
                None => merged.push(term),
            }
        }
        Ok(Signature::canonical(merged))
    }

    fn canonical(mut terms: Vec<Term>) -> Self {
        terms.retain(|t| !exponent::is_zero(&t.exponent));
        terms.sort_by_key(|t| t.unit);
        Signature {
            terms,
            absolute: false,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The unit, if this is a single unit with exponent one.
    pub fn single_unit(&self) -> Option<Unit> {
        match self.terms.as_slice() {
            [t] if t.exponent == exponent::one() => Some(t.unit),
            _ => None,
        }
    }

    /// Numerator terms.
    pub fn num(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms
            .iter()
            .filter(|t| t.exponent > Exponent::from_integer(0))
            .copied()
    }

    /// Denominator terms, with their exponents made positive.
    pub fn den(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms
            .iter()
            .filter(|t| t.exponent < Exponent::from_integer(0))
            .map(|t| t.inverse())
    }

    pub fn recip(&self) -> Result<Self, UnitError> {
        self.pow(exponent::integer(-1))
    }

    /// Scale every exponent by `n`. Absolute signatures only allow
    /// `n == 1`, or `n == 0` which leaves nothing to combine.
    pub fn pow(&self, n: Exponent) -> Result<Self, UnitError> {
        if exponent::is_zero(&n) {
            return Ok(Signature::dimensionless());
        }
        if self.absolute && n != exponent::one() {
            return Err(UnitError::MalformedSignature(format!(
                "absolute signature raised to the power {}",
                n
            )));
        }
        Ok(Signature {
            terms: self
                .terms
                .iter()
                .map(|t| Ok(Term::new(t.unit, exponent::checked_mul(t.exponent, n)?)))
                .collect::<Result<_, UnitError>>()?,
            absolute: self.absolute,
        })
    }
}

impl From<Unit> for Signature {
    fn from(unit: Unit) -> Self {
        Signature::unit(unit)
    }
}

impl FromStr for Signature {
    type Err = UnitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_signature(s)
    }
}

impl Registry {
    /// Render a signature with the unit symbols of this registry:
    /// `kg⋅m/s²`.
    pub fn format_signature(&self, signature: &Signature) -> String {
        let part = |terms: Vec<Term>| {
            terms
                .iter()
                .map(|t| {
                    format!(
                        "{}{}{}",
                        self.unit(t.unit)
                            .map(|def| def.symbol.as_str())
                            .unwrap_or("?"),
                        match t.unit.subscript() {
                            0 => String::new(),
                            n => format!("#{}", n),
                        },
                        superscript(t.exponent)
                    )
                })
                .collect::<Vec<String>>()
                .join("\u{22c5}")
        };

        let num = part(signature.num().collect());
        let den: Vec<Term> = signature.den().collect();
        match (num.is_empty(), den.is_empty()) {
            (_, true) => num,
            (true, false) => format!("1/{}", part(den)),
            (false, false) => format!("{}/{}", num, part(den)),
        }
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", Registry::current().format_signature(self))
    }
}

static SS: [char; 10] = [
    '\u{2070}', '\u{00b9}', '\u{00b2}', '\u{00b3}', '\u{2074}', '\u{2075}',
    '\u{2076}', '\u{2077}', '\u{2078}', '\u{2079}',
];

fn superscript(exponent: Exponent) -> String {
    if !exponent.is_integer() {
        return format!("^({})", exponent);
    }
    match exponent.to_integer() {
        1 => String::new(),
        n => n
            .to_string()
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(n) => SS[n as usize],
                None => '\u{207b}',
            })
            .collect(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::{FEET, METERS, SECONDS};

    #[test]
    fn repeated_units_merge() {
        let sig = Signature::from_terms([
            Term::from(SECONDS),
            Term::from(METERS),
            Term::powi(SECONDS, -3),
        ]);
        assert_eq!(
            sig.terms(),
            &[Term::from(METERS), Term::powi(SECONDS, -2)]
        );
    }

    #[test]
    fn same_dimension_does_not_merge() {
        let sig = Signature::ratio(&[METERS], &[FEET]);
        assert_eq!(sig.terms().len(), 2);
        assert!(Signature::ratio(&[METERS], &[METERS]).is_dimensionless());
    }

    #[test]
    fn pow_rejects_overflow() {
        let sig = Signature::from_terms([Term::powi(METERS, 2_000_000_000)]);
        assert!(matches!(
            sig.pow(exponent::integer(2)),
            Err(UnitError::MalformedSignature(_))
        ));
        assert_eq!(
            sig.pow(exponent::integer(0)),
            Ok(Signature::dimensionless())
        );
    }

    #[test]
    fn absolute_powers() {
        let sig = Signature::absolute(FEET);
        assert_eq!(sig.pow(exponent::integer(0)), Ok(Signature::dimensionless()));
        assert_eq!(sig.pow(exponent::one()), Ok(sig.clone()));
        assert!(sig.pow(exponent::integer(2)).is_err());
    }

    #[test]
    fn superscripts() {
        assert_eq!(superscript(exponent::integer(2)), "²");
        assert_eq!(superscript(exponent::integer(-12)), "⁻¹²");
        assert_eq!(superscript(Exponent::new(1, 2)), "^(1/2)");
    }

    #[test]
    fn display() {
        let registry = Registry::standard();
        let sig = Signature::from_terms([
            Term::from(METERS),
            Term::powi(SECONDS, -2),
        ]);
        assert_eq!(registry.format_signature(&sig), "m/s²");
        assert_eq!(
            registry.format_signature(&Signature::ratio(&[], &[SECONDS])),
            "1/s"
        );
        assert_eq!(
            registry.format_signature(&Signature::unit(
                METERS.with_subscript(1)
            )),
            "m#1"
        );
    }
}

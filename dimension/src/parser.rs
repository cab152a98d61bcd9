/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use nom::{
    self,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0},
    combinator::{map, map_res, opt, value},
    multi::{fold_many1, separated_list1},
    number::complete::double,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::exponent::{self, Exponent};
use crate::registry::Registry;
use crate::signature::{Signature, Term};
use crate::{Quantity, UnitError};

/// A unit as written: symbol or name, subscript and power.
type RawTerm<'a> = (&'a str, Option<u16>, Option<Exponent>);

/// Parse a quantity ("9.81 m/s²") in the process-wide registry.
pub fn parse_quantity(input: &str) -> Result<Quantity, UnitError> {
    Registry::global().parse_quantity(input)
}

/// Parse a signature ("kg*m/s^2") in the process-wide registry.
pub fn parse_signature(input: &str) -> Result<Signature, UnitError> {
    Registry::global().parse_signature(input)
}

impl Registry {
    pub fn parse_quantity(&self, input: &str) -> Result<Quantity, UnitError> {
        match quantity(input) {
            Ok(("", (val, sig))) => {
                Ok(Quantity::of(val, self.resolve_signature(sig)?))
            }
            Ok((r, _)) => {
                Err(UnitError::ParseError(format!("Leftover input: {}", r)))
            }
            Err(err) => Err(UnitError::ParseError(format!("{}", err))),
        }
    }

    /// An empty input is the dimensionless signature.
    pub fn parse_signature(&self, input: &str) -> Result<Signature, UnitError> {
        if input.is_empty() {
            return Ok(Signature::dimensionless());
        }
        match signature(input) {
            Ok(("", sig)) => self.resolve_signature(sig),
            Ok((r, _)) => {
                Err(UnitError::ParseError(format!("Leftover input: {}", r)))
            }
            Err(err) => Err(UnitError::ParseError(format!("{}", err))),
        }
    }

    fn resolve_signature(
        &self,
        (num, den): (Vec<RawTerm<'_>>, Vec<RawTerm<'_>>),
    ) -> Result<Signature, UnitError> {
        let mut terms = Vec::with_capacity(num.len() + den.len());
        for (raw, invert) in num
            .into_iter()
            .map(|t| (t, false))
            .chain(den.into_iter().map(|t| (t, true)))
        {
            let (name, subscript, power) = raw;
            let unit = self
                .lookup(name)
                .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))?
                .with_subscript(subscript.unwrap_or(0));
            let exponent = power.unwrap_or_else(exponent::one);
            terms.push(Term::new(
                unit,
                match invert {
                    true => -exponent,
                    false => exponent,
                },
            ));
        }
        Signature::try_from_terms(terms)
    }
}

/// Parser for quantities (number and optional signature).
fn quantity(input: &str) -> IResult<&str, (f64, (Vec<RawTerm<'_>>, Vec<RawTerm<'_>>))> {
    let (input, (val, _, sig)) = tuple((double, space0, opt(signature)))(input)?;
    Ok((input, (val, sig.unwrap_or_default())))
}

/// Parser for signatures: `m*kg/s^2`, `1/s`, `m⋅kg/s²`.
fn signature(input: &str) -> IResult<&str, (Vec<RawTerm<'_>>, Vec<RawTerm<'_>>)> {
    let (input, (num, den)) = tuple((
        opt(alt((unit_list(product_sep), value(Vec::new(), char('1'))))),
        opt(preceded(char('/'), unit_list(char('/')))),
    ))(input)?;

    match (num, den) {
        (None, None) => Err(nom::Err::Error(nom::error::Error {
            input,
            code: nom::error::ErrorKind::Alt,
        })),
        (num, den) => Ok((input, (num.unwrap_or_default(), den.unwrap_or_default()))),
    }
}

fn product_sep(input: &str) -> IResult<&str, char> {
    alt((char('*'), char('·'), char('\u{22c5}')))(input)
}

fn unit_list<'a, S>(sep: S) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<RawTerm<'a>>>
where
    S: FnMut(&'a str) -> IResult<&'a str, char>,
{
    separated_list1(sep, tuple((unit_name, opt(subscript), opt(power))))
}

fn unit_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| {
        !(c.is_ascii_digit()
            || c.is_whitespace()
            || "*/^()#+-·\u{22c5}⁰¹²³⁴⁵⁶⁷⁸⁹⁻⁺".contains(c))
    })(input)
}

fn subscript(input: &str) -> IResult<&str, u16> {
    preceded(char('#'), map_res(digit1, |n: &str| n.parse::<u16>()))(input)
}

fn power(input: &str) -> IResult<&str, Exponent> {
    alt((hat_power, map(superscript_power, exponent::integer)))(input)
}

fn hat_power(input: &str) -> IResult<&str, Exponent> {
    preceded(
        char('^'),
        alt((
            map_res(
                delimited(
                    char('('),
                    separated_pair(signed_int, char('/'), signed_int),
                    char(')'),
                ),
                |(n, d)| match d {
                    0 => Err(UnitError::ParseError(String::from("zero root"))),
                    d => Ok(Exponent::new(n, d)),
                },
            ),
            map(delimited(char('('), signed_int, char(')')), exponent::integer),
            map(signed_int, exponent::integer),
        )),
    )(input)
}

fn signed_int(input: &str) -> IResult<&str, i32> {
    let (input, (s, n)) = tuple((
        opt(sign),
        map_res(digit1, |n: &str| n.parse::<i32>()),
    ))(input)?;
    Ok((input, s.unwrap_or(1) * n))
}

fn superscript_power(input: &str) -> IResult<&str, i32> {
    let (input, (s, n)) =
        tuple((opt(superscript_sign), superscript_digit1))(input)?;
    Ok((input, s.unwrap_or(1) * n))
}

fn superscript_sign(input: &str) -> IResult<&str, i32> {
    alt((value(-1, char('⁻')), value(1, char('⁺'))))(input)
}

fn superscript_digit1(input: &str) -> IResult<&str, i32> {
    fold_many1(superscript_digit, || 0, |n, i| n * 10 + i)(input)
}

fn superscript_digit(input: &str) -> IResult<&str, i32> {
    alt((
        value(0, char('⁰')),
        value(1, char('¹')),
        value(2, char('²')),
        value(3, char('³')),
        value(4, char('⁴')),
        value(5, char('⁵')),
        value(6, char('⁶')),
        value(7, char('⁷')),
        value(8, char('⁸')),
        value(9, char('⁹')),
    ))(input)
}

fn sign(input: &str) -> IResult<&str, i32> {
    alt((value(-1, char('-')), value(1, char('+'))))(input)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn raw_powers() {
        assert_eq!(power("^2"), Ok(("", exponent::integer(2))));
        assert_eq!(power("^-1"), Ok(("", exponent::integer(-1))));
        assert_eq!(power("^(1/2)"), Ok(("", Exponent::new(1, 2))));
        assert_eq!(power("⁻²"), Ok(("", exponent::integer(-2))));
        assert!(power("^(1/0)").is_err());
    }

    #[test]
    fn raw_signature() {
        let (rest, (num, den)) = signature("kg*m/s^2").unwrap();
        assert_eq!(rest, "");
        assert_eq!(num, vec![("kg", None, None), ("m", None, None)]);
        assert_eq!(den, vec![("s", None, Some(exponent::integer(2)))]);

        let (_, (num, den)) = signature("1/s").unwrap();
        assert!(num.is_empty());
        assert_eq!(den.len(), 1);

        let (_, (num, _)) = signature("m#2").unwrap();
        assert_eq!(num, vec![("m", Some(2), None)]);
    }
}

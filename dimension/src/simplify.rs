/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use crate::exponent::{self, Exponent};
use crate::registry::Registry;
use crate::signature::{Signature, Term};
use crate::UnitError;

impl Registry {
    /// Reduce `numerator / denominator` to a canonical signature,
    /// scaling `scalar` for every conversion this requires.
    ///
    /// All terms are expanded to fundamental units first. Repeated
    /// units are merged by summing their exponents, which cancels
    /// identical units across the fraction bar without touching the
    /// value. A numerator unit and a denominator unit that differ but
    /// share dimension and subscript then cancel as far as their
    /// exponents allow: the numerator term is kept and the denominator
    /// term is converted into it. Numerator terms are tried in order
    /// (first the left operand's, each in declaration order of the
    /// units), and each is matched with the first eligible
    /// denominator term.
    ///
    /// Offsets are never applied here.
    pub fn simplify(
        &self,
        numerator: &[Term],
        denominator: &[Term],
        scalar: f64,
    ) -> Result<(Signature, f64), UnitError> {
        let mut scalar = scalar;
        let mut terms: Vec<Term> = Vec::new();

        let signed = numerator
            .iter()
            .copied()
            .chain(denominator.iter().map(|t| t.inverse()));
        for term in signed {
            let expansion = self.expand(term)?;
            scalar *= expansion.coefficient;
            for part in expansion.terms {
                match terms.iter_mut().find(|t| t.unit == part.unit) {
                    Some(t) => {
                        t.exponent = exponent::checked_add(t.exponent, part.exponent)?
                    }
                    None => terms.push(part),
                }
            }
        }
        terms.retain(|t| !exponent::is_zero(&t.exponent));

        while let Some((winner, loser)) = self.cancellation(&terms)? {
            let amount = exponent::cancelled(
                terms[winner].exponent,
                terms[loser].exponent,
            );
            let conv = self.resolve(terms[loser].unit, terms[winner].unit)?;
            let factor = exponent::scale(conv.slope, -amount);
            log::trace!(
                "cancel {}^{} against {}: value scaled by {}",
                self.unit(terms[loser].unit)
                    .map(|d| d.qualified_name.as_str())
                    .unwrap_or("?"),
                -amount,
                self.unit(terms[winner].unit)
                    .map(|d| d.qualified_name.as_str())
                    .unwrap_or("?"),
                factor
            );
            scalar *= factor;
            terms[winner].exponent -= amount;
            terms[loser].exponent += amount;
            terms.retain(|t| !exponent::is_zero(&t.exponent));
        }

        Ok((Signature::from_terms(terms), scalar))
    }

    /// The first (numerator, denominator) pair that can cancel.
    fn cancellation(
        &self,
        terms: &[Term],
    ) -> Result<Option<(usize, usize)>, UnitError> {
        let zero = Exponent::from_integer(0);
        for (i, num) in terms.iter().enumerate() {
            if num.exponent < zero {
                continue;
            }
            let dim = self.dimension_of(num.unit)?;
            for (j, den) in terms.iter().enumerate() {
                if den.exponent > zero
                    || den.unit.subscript() != num.unit.subscript()
                {
                    continue;
                }
                if self.dimension_of(den.unit)? == dim {
                    return Ok(Some((i, j)));
                }
            }
        }
        Ok(None)
    }

    /// Express a value given in `from` in `to`.
    ///
    /// Identical signatures return the value untouched. Two single
    /// fundamental units with exponent one use the full affine
    /// conversion. Everything else goes through [`Registry::simplify`]
    /// of `from / to`, which must leave no unit behind.
    pub fn convert(
        &self,
        value: f64,
        from: &Signature,
        to: &Signature,
    ) -> Result<f64, UnitError> {
        if from.terms() == to.terms() {
            return Ok(value);
        }

        if let (Some(a), Some(b)) = (from.single_unit(), to.single_unit()) {
            if self.def(a)?.is_fundamental() && self.def(b)?.is_fundamental() {
                if a.subscript() != b.subscript() {
                    return Err(self.mismatch(from, to));
                }
                return Ok(self.resolve(a, b)?.apply(value));
            }
        }

        let numerator: Vec<Term> = from.num().chain(to.den()).collect();
        let denominator: Vec<Term> = from.den().chain(to.num()).collect();
        let (rest, value) = self.simplify(&numerator, &denominator, value)?;
        match rest.is_dimensionless() {
            true => Ok(value),
            false => Err(self.mismatch(from, to)),
        }
    }

    /// Express a difference given in `from` in `to`. Like
    /// [`Registry::convert`], but offsets never apply: a 9 °F
    /// difference is a 5 °C difference.
    pub fn convert_delta(
        &self,
        value: f64,
        from: &Signature,
        to: &Signature,
    ) -> Result<f64, UnitError> {
        if let (Some(a), Some(b)) = (from.single_unit(), to.single_unit()) {
            if self.def(a)?.is_fundamental() && self.def(b)?.is_fundamental() {
                if a.subscript() != b.subscript() {
                    return Err(self.mismatch(from, to));
                }
                return Ok(value * self.resolve(a, b)?.slope);
            }
        }
        self.convert(value, from, to)
    }

    pub(crate) fn mismatch(&self, a: &Signature, b: &Signature) -> UnitError {
        UnitError::DimensionMismatch(
            self.format_signature(a),
            self.format_signature(b),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::{FEET, INCHES, METERS, MINUTES, NEWTONS, SECONDS};

    #[test]
    fn identical_units_cancel_exactly() {
        let registry = Registry::standard();
        let (sig, value) = registry
            .simplify(
                &[Term::from(METERS), Term::from(SECONDS)],
                &[Term::from(SECONDS)],
                3.0,
            )
            .unwrap();
        assert_eq!(sig, Signature::unit(METERS));
        assert_eq!(value, 3.0);
    }

    #[test]
    fn same_dimension_cancels_with_conversion() {
        let registry = Registry::standard();
        let (sig, value) = registry
            .simplify(&[Term::from(MINUTES)], &[Term::from(SECONDS)], 1.0)
            .unwrap();
        assert!(sig.is_dimensionless());
        assert!((value - 60.0).abs() < 1e-12);
    }

    #[test]
    fn partial_cancellation_keeps_rest() {
        let registry = Registry::standard();
        let (sig, value) = registry
            .simplify(&[Term::powi(FEET, 2)], &[Term::powi(INCHES, 1)], 1.0)
            .unwrap();
        assert_eq!(sig, Signature::unit(FEET));
        assert!((value - 12.0).abs() < 1e-9);
    }

    #[test]
    fn subscripts_block_cancellation() {
        let registry = Registry::standard();
        let x = METERS.with_subscript(1);
        let y = METERS.with_subscript(2);
        let (sig, value) = registry
            .simplify(&[Term::from(x)], &[Term::from(y)], 2.0)
            .unwrap();
        assert_eq!(sig.terms().len(), 2);
        assert_eq!(value, 2.0);
    }

    #[test]
    fn differences_ignore_offsets() {
        let registry = Registry::standard();
        let f = Signature::unit(crate::units::FAHRENHEIT);
        let c = Signature::unit(crate::units::CELSIUS);
        let delta = registry.convert_delta(9.0, &f, &c).unwrap();
        assert!((delta - 5.0).abs() < 1e-12);
        let reading = registry.convert(9.0, &f, &c).unwrap();
        assert!((reading - -12.777777777777779).abs() < 1e-9);
    }

    #[test]
    fn derived_units_expand() {
        let registry = Registry::standard();
        let (sig, value) = registry
            .simplify(&[Term::from(NEWTONS)], &[Term::from(NEWTONS)], 5.0)
            .unwrap();
        assert!(sig.is_dimensionless());
        assert_eq!(value, 5.0);
    }
}

/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use crate::exponent;
use crate::registry::Registry;
use crate::signature::Term;
use crate::{UnitError, UnitKind};

/// A term rewritten in fundamental units: the product of
/// `coefficient` and `terms`.
#[derive(PartialEq, Clone, Debug)]
pub struct Expansion {
    pub coefficient: f64,
    pub terms: Vec<Term>,
}

impl Registry {
    /// Expand a term into fundamental units. Constituent exponents
    /// are multiplied by the term's exponent; a subscript on a derived
    /// unit is passed on to constituents that have none.
    ///
    /// The order of the constituents is that of the definitions,
    /// depth first. Repeated units are not merged.
    pub fn expand(&self, term: Term) -> Result<Expansion, UnitError> {
        let mut coefficient = 1.0;
        let mut terms = Vec::new();
        let mut work = vec![(term, 0usize)];
        let max_depth = self.units().count();

        while let Some((term, depth)) = work.pop() {
            let def = self.def(term.unit)?;
            match &def.kind {
                UnitKind::Fundamental => terms.push(term),
                UnitKind::Derived { .. } if depth > max_depth => {
                    return Err(UnitError::MalformedSignature(format!(
                        "cyclic definition of {}",
                        def.qualified_name
                    )))
                }
                UnitKind::Derived {
                    coefficient: c,
                    terms: parts,
                } => {
                    coefficient *= exponent::scale(*c, term.exponent);
                    /* Reversed so that the first constituent is
                     * popped first. */
                    for part in parts.iter().rev() {
                        let unit = match part.unit.subscript() {
                            0 => part.unit.with_subscript(term.unit.subscript()),
                            _ => part.unit,
                        };
                        work.push((
                            Term::new(
                                unit,
                                exponent::checked_mul(part.exponent, term.exponent)?,
                            ),
                            depth + 1,
                        ));
                    }
                }
            }
        }

        Ok(Expansion { coefficient, terms })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::units::{JOULES, KILOGRAMS, LITERS, METERS, NEWTONS, SECONDS};
    use crate::{exponent::integer, RegistryBuilder};

    #[test]
    fn fundamental_is_itself() {
        let registry = Registry::standard();
        let exp = registry.expand(Term::powi(METERS, 2)).unwrap();
        assert_eq!(exp.coefficient, 1.0);
        assert_eq!(exp.terms, vec![Term::powi(METERS, 2)]);
    }

    #[test]
    fn nested_derived() {
        let registry = Registry::standard();
        let exp = registry.expand(Term::powi(JOULES, -1)).unwrap();
        assert_eq!(exp.coefficient, 1.0);
        assert_eq!(
            exp.terms,
            vec![
                Term::powi(KILOGRAMS, -1),
                Term::powi(METERS, -1),
                Term::powi(SECONDS, 2),
                Term::powi(METERS, -1),
            ]
        );
        let exp = registry.expand(Term::powi(NEWTONS, 2)).unwrap();
        assert_eq!(exp.terms[2], Term::new(SECONDS, integer(-4)));
    }

    #[test]
    fn coefficient_scales_with_exponent() {
        let registry = Registry::standard();
        let exp = registry.expand(Term::powi(LITERS, 2)).unwrap();
        assert!((exp.coefficient - 1e-6).abs() < 1e-18);
        assert_eq!(exp.terms, vec![Term::powi(METERS, 6)]);
    }

    #[test]
    fn subscript_propagates() {
        let registry = Registry::standard();
        let exp = registry
            .expand(Term::from(NEWTONS.with_subscript(2)))
            .unwrap();
        assert!(exp.terms.iter().all(|t| t.unit.subscript() == 2));
    }

    #[test]
    fn cycle_is_rejected() {
        let mut builder = RegistryBuilder::new();
        let dim = builder.define_dimension("Weird");
        let a = builder.define_derived_unit("A", "a", dim, 1.0, &[]);
        let b = builder.define_derived_unit("B", "b", dim, 1.0, &[Term::from(a)]);
        builder.set_derived_terms(a, 2.0, &[Term::from(b)]);
        let registry = builder.finish();
        assert!(matches!(
            registry.expand(Term::from(a)),
            Err(UnitError::MalformedSignature(_))
        ));
    }
}

/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::signature::Term;
use crate::Dimension;

/// Handle to a unit declared in a [`Registry`].
///
/// The subscript marks non-interchangeable axes of the same unit
/// (x-length vs. y-length). Handles with different subscripts
/// share conversions but never cancel against each other.
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
pub struct Unit {
    id: u16,
    #[serde(default, skip_serializing_if = "is_zero")]
    subscript: u16,
}

fn is_zero(n: &u16) -> bool {
    *n == 0
}

impl Unit {
    pub(crate) const fn new(id: u16) -> Self {
        Unit { id, subscript: 0 }
    }

    pub const fn with_subscript(self, subscript: u16) -> Self {
        Unit {
            id: self.id,
            subscript,
        }
    }

    pub const fn id(&self) -> u16 {
        self.id
    }

    pub const fn subscript(&self) -> u16 {
        self.subscript
    }

    /// The same unit without subscript.
    pub const fn base(&self) -> Self {
        Unit::new(self.id)
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match Registry::current().unit(*self) {
            Some(def) => write!(f, "{}", def.symbol)?,
            None => write!(f, "unit#{}", self.id)?,
        }
        match self.subscript {
            0 => Ok(()),
            n => write!(f, "#{}", n),
        }
    }
}

/// Registry entry of a unit.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct UnitDef {
    pub name: String,
    pub symbol: String,
    pub dimension: Dimension,
    pub kind: UnitKind,
    /// "Dimension::Name", used for hashing and error messages.
    pub qualified_name: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub enum UnitKind {
    Fundamental,
    /// `coefficient` times the product of `terms`
    /// (Liters = 0.001 m³).
    Derived { coefficient: f64, terms: Vec<Term> },
}

impl UnitDef {
    pub fn is_fundamental(&self) -> bool {
        matches!(self.kind, UnitKind::Fundamental)
    }
}

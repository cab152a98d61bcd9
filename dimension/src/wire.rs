/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! Flat binary encoding of a quantity: an optional 32-bit tag
//! identifying the signature, followed by the value as an IEEE-754
//! double. Both are little-endian.

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::signature::Signature;
use crate::{Quantity, UnitError};

const FNV_OFFSET_BASIS: u32 = 0x811C9DC5;
const FNV_PRIME: u32 = 0x01000193;

/// Integer exponents up to this magnitude repeat the unit name;
/// larger ones are written as `name^n`.
const MAX_REPEAT: i32 = 16;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum HashPolicy {
    /// Prefix the value with the FNV-1a hash of the canonical
    /// signature name.
    #[default]
    Fnv1a32,
    /// Value only.
    NoHash,
}

impl HashPolicy {
    pub const fn tag_len(&self) -> usize {
        match self {
            HashPolicy::Fnv1a32 => 4,
            HashPolicy::NoHash => 0,
        }
    }

    pub const fn encoded_len(&self) -> usize {
        self.tag_len() + 8
    }
}

pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, b| {
        (hash ^ *b as u32).wrapping_mul(FNV_PRIME)
    })
}

impl Registry {
    /// Canonical name of a signature: the qualified unit names of the
    /// numerator, one per unit of exponent and sorted, joined by `|`,
    /// followed by the denominator built the same way. Fractional
    /// and very large exponents are written as `name^p/q`.
    pub fn canonical_name(&self, signature: &Signature) -> Result<String, UnitError> {
        Ok(format!(
            "{}{}",
            self.canonical_part(signature.num())?,
            self.canonical_part(signature.den())?
        ))
    }

    fn canonical_part(
        &self,
        terms: impl Iterator<Item = crate::Term>,
    ) -> Result<String, UnitError> {
        let mut names = Vec::new();
        for term in terms {
            let mut name = self.def(term.unit)?.qualified_name.clone();
            if term.unit.subscript() != 0 {
                name = format!("{}#{}", name, term.unit.subscript());
            }
            match term.exponent.is_integer()
                && term.exponent.to_integer() <= MAX_REPEAT
            {
                true => {
                    for _ in 0..term.exponent.to_integer() {
                        names.push(name.clone());
                    }
                }
                false => names.push(format!("{}^{}", name, term.exponent)),
            }
        }
        names.sort();
        Ok(names.join("|"))
    }

    /// The tag stored in front of values of this signature. The hash
    /// includes a terminating NUL byte.
    pub fn type_tag(&self, signature: &Signature) -> Result<u32, UnitError> {
        let mut bytes = self.canonical_name(signature)?.into_bytes();
        bytes.push(0);
        Ok(fnv1a_32(&bytes))
    }

    pub fn serialize(
        &self,
        q: &Quantity,
        policy: HashPolicy,
    ) -> Result<Vec<u8>, UnitError> {
        let mut buf = Vec::with_capacity(policy.encoded_len());
        if policy == HashPolicy::Fnv1a32 {
            buf.extend_from_slice(&self.type_tag(q.signature())?.to_le_bytes());
        }
        buf.extend_from_slice(&q.value().to_le_bytes());
        Ok(buf)
    }

    /// Decode a value of signature `target`. With a tag, it must
    /// match the tag of `target`.
    pub fn deserialize(
        &self,
        bytes: &[u8],
        target: &Signature,
        policy: HashPolicy,
    ) -> Result<Quantity, UnitError> {
        if bytes.len() < policy.encoded_len() {
            return Err(UnitError::BufferSize {
                expected: policy.encoded_len(),
                found: bytes.len(),
            });
        }
        let (tag, value) = bytes.split_at(policy.tag_len());
        if policy == HashPolicy::Fnv1a32 {
            let expected = self.type_tag(target)?;
            let found = u32::from_le_bytes([tag[0], tag[1], tag[2], tag[3]]);
            if found != expected {
                return Err(UnitError::SerializationTagMismatch { expected, found });
            }
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&value[..8]);
        Ok(Quantity::of(f64::from_le_bytes(raw), target.clone()))
    }
}

impl Quantity {
    pub fn to_bytes(&self, policy: HashPolicy) -> Result<Vec<u8>, UnitError> {
        Registry::global().serialize(self, policy)
    }

    pub fn from_bytes(
        bytes: &[u8],
        target: &Signature,
        policy: HashPolicy,
    ) -> Result<Quantity, UnitError> {
        Registry::global().deserialize(bytes, target, policy)
    }
}

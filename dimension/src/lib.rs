/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

pub mod conversion;
pub mod dimension;
pub mod error;
pub mod expand;
pub mod exponent;
pub mod math;
pub mod parser;
pub mod prefix;
pub mod quantity;
pub mod registry;
pub mod signature;
pub mod simplify;
pub mod unit;
pub mod units;
pub mod wire;

pub use conversion::Conversion;
pub use dimension::Dimension;
pub use error::UnitError;
pub use expand::Expansion;
pub use exponent::Exponent;
pub use prefix::SiPrefix;
pub use quantity::Quantity;
pub use registry::{Registry, RegistryBuilder, RegistryConfig};
pub use signature::{Signature, Term};
pub use unit::{Unit, UnitDef, UnitKind};
pub use wire::HashPolicy;

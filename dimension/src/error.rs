/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Error, PartialEq, Eq, Clone, Debug)]
pub enum UnitError {
    #[error("Incompatible dimensions: {0} <-> {1}")]
    DimensionMismatch(String, String),
    #[error("No conversion path: {0} -> {1}")]
    MissingConversion(String, String),
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    #[error("Argument out of domain: {0}")]
    OutOfDomain(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Type tag mismatch: expected {expected:#010x}, found {found:#010x}")]
    SerializationTagMismatch { expected: u32, found: u32 },
    #[error("Buffer too small: need {expected} bytes, got {found}")]
    BufferSize { expected: usize, found: usize },
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
    #[error("Unit parse error: {0}")]
    ParseError(String),
    #[error("A unit registry was already installed")]
    AlreadyInstalled,
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Core types for the enumattr workspace
//!
//! This crate defines the foundational types used throughout the system:
//! - Token: symbolic name drawn from an enumeration's key set
//! - Value: untyped attribute value surface (plain columns, raw assignment input)
//! - EnumValue: tagged value held by an enumerated attribute (Unset / Member / Unvalidated)
//! - RecordId: store-assigned record identifier
//! - Error: error type hierarchy
//!
//! Deferred validation is expressed in the type system: assignment never
//! fails, it only moves an attribute into `EnumValue::Unvalidated`, and the
//! store folds that state into a `RecordInvalid` failure at save time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod enum_value;
pub mod error;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use enum_value::EnumValue;
pub use error::{Error, Result, ValidationError, ValidationErrors};
pub use types::RecordId;
pub use value::{sym, Token, Value};

//! Record instances with enumerated attribute bookkeeping
//!
//! This crate defines `Record`: a single instance of a configured record
//! type. A record owns an `EnumValue` per enumerated attribute and a plain
//! `Value` per ordinary column, and carries the store-assigned id once
//! persisted.
//!
//! ## Assignment Semantics
//!
//! Assignment is permissive by design. Setting an enumerated attribute
//! never raises a conversion error:
//! - a string or token matching a declared key normalizes to `Member`
//! - nil becomes `Unset`
//! - anything else is stored as `Unvalidated` with the raw value intact
//!
//! Validation happens later: `is_valid()` inspects every enumerated
//! attribute, and the store rejects a save only when a column-backed
//! attribute is `Unvalidated`.

#![warn(clippy::all)]

pub mod record;

pub use record::Record;

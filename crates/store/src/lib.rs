//! In-memory record store: the persistence collaborator
//!
//! This crate supplies the external collaborator the enumerated attribute
//! extension delegates to:
//! - MemoryStore: per-record-type row storage with save-time validation,
//!   find-by-id, and dynamic finders
//! - Row: the persisted column subset in untyped wire form
//!
//! ## Persistence Contract
//!
//! - `save` rejects a record with `RecordInvalid` when any column-backed
//!   enumerated attribute holds an out-of-set, non-nil value
//! - enumerated column values round-trip as symbols on read
//! - transient enumerated attributes are never persisted; a reloaded
//!   record holds their declared defaults again
//! - plain columns are untyped: they return the literal representation
//!   that was stored, including the serialized text form of a token

#![warn(clippy::all)]

pub mod row;
pub mod store;

pub use row::Row;
pub use store::MemoryStore;

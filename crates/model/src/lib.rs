//! Record-type configuration for enumerated attributes
//!
//! This crate defines everything a record type declares once, at
//! configuration time, and never mutates afterwards:
//! - EnumDef: an ordered, closed set of symbolic keys with labels
//! - ModelDescriptor / ModelBuilder: a record type's full attribute layout
//! - PredicateTable: the per-(attribute, key) query capability table
//! - registry: the process-wide model registry
//!
//! Descriptors are shared as `Arc<ModelDescriptor>`; record instances and
//! stores hold references, never copies, so dynamic capabilities (predicate
//! evaluation, finders) are a property of the record type rather than of
//! any particular instance.

#![warn(clippy::all)]

pub mod def;
pub mod descriptor;
pub mod predicate;
pub mod registry;

pub use def::EnumDef;
pub use descriptor::{ModelBuilder, ModelDescriptor};
pub use predicate::{PredicateKind, PredicateTable};

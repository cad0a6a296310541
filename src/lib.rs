//! enumattr - enumerated attribute semantics for record types
//!
//! enumattr layers closed, ordered sets of symbolic values onto record
//! instances: labels, cyclic next/previous navigation, predicate queries,
//! dynamic finders, and deferred save-time validation, all backed by an
//! in-memory record store.
//!
//! # Quick Start
//!
//! ```ignore
//! use enumattr::{MemoryStore, ModelDescriptor, Record, sym};
//!
//! let model = ModelDescriptor::builder("race_car")
//!     .column("name")
//!     .enum_column("gear", ["reverse", "neutral", "first"], Some("neutral"))?
//!     .build()?
//!     .shared();
//!
//! let store = MemoryStore::new(model.clone());
//! let mut car = store.new_record();
//! car.set("gear", "first")?;          // strings normalize to symbols
//! car.set("gear", sym("drive"))?;     // out-of-set: accepted, not valid
//! assert!(store.save(&mut car).is_err());
//! ```
//!
//! # Architecture
//!
//! Configuration is frozen at record-type declaration time: definitions,
//! defaults, and the predicate capability table live on a shared
//! `ModelDescriptor`, so dynamic capability survives reloads. Instances
//! only carry values; the store persists the column-backed subset.

// Re-export the public API from the member crates
pub use enumattr_core::{
    sym, EnumValue, Error, RecordId, Result, Token, ValidationError, ValidationErrors, Value,
};
pub use enumattr_model::{
    registry, EnumDef, ModelBuilder, ModelDescriptor, PredicateKind, PredicateTable,
};
pub use enumattr_record::Record;
pub use enumattr_store::{MemoryStore, Row};

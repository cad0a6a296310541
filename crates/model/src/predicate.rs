//! Predicate capability table
//!
//! Instead of synthesizing query methods at runtime, predicate capability
//! is an explicit table built once during `ModelBuilder::build()`: a
//! mapping from generated predicate name (`gear_is_in_second`,
//! `gear_is_nil`) to a structural `PredicateKind` that the record layer
//! evaluates against an instance.
//!
//! Because the table lives on the model descriptor, predicates remain
//! available on any instance of the type, including instances re-fetched
//! from the store, without per-instance registration.

use crate::def::EnumDef;
use enumattr_core::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural description of one predicate query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateKind {
    /// "attribute == key"
    IsKey {
        /// Attribute under test
        attribute: String,
        /// Expected member key
        key: Token,
    },
    /// "attribute != key"
    NotKey {
        /// Attribute under test
        attribute: String,
        /// Excluded member key
        key: Token,
    },
    /// "attribute is nil"
    IsNil {
        /// Attribute under test
        attribute: String,
    },
    /// "attribute is not nil"
    IsNotNil {
        /// Attribute under test
        attribute: String,
    },
}

/// Name → predicate mapping for one record type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredicateTable {
    entries: HashMap<String, PredicateKind>,
}

impl PredicateTable {
    /// Build the table for a set of enumerated attribute definitions
    ///
    /// For every (attribute, key) pair two entries are registered,
    /// `{attr}_is_in_{key}` and `{attr}_not_in_{key}`, plus the per
    /// attribute pair `{attr}_is_nil` / `{attr}_is_not_nil`.
    pub fn build_for(defs: &[EnumDef]) -> Self {
        let mut entries = HashMap::new();
        for def in defs {
            let attr = def.name();
            for key in def.keys() {
                entries.insert(
                    format!("{attr}_is_in_{key}"),
                    PredicateKind::IsKey {
                        attribute: attr.to_string(),
                        key: key.clone(),
                    },
                );
                entries.insert(
                    format!("{attr}_not_in_{key}"),
                    PredicateKind::NotKey {
                        attribute: attr.to_string(),
                        key: key.clone(),
                    },
                );
            }
            entries.insert(
                format!("{attr}_is_nil"),
                PredicateKind::IsNil {
                    attribute: attr.to_string(),
                },
            );
            entries.insert(
                format!("{attr}_is_not_nil"),
                PredicateKind::IsNotNil {
                    attribute: attr.to_string(),
                },
            );
        }
        Self { entries }
    }

    /// Look up a predicate by generated name
    pub fn get(&self, name: &str) -> Option<&PredicateKind> {
        self.entries.get(name)
    }

    /// Check whether a predicate name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered predicates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty table
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Model descriptors: a record type's attribute configuration
//!
//! A `ModelDescriptor` is declared once via `ModelBuilder`, frozen by
//! `build()`, and shared as `Arc<ModelDescriptor>` by every instance and
//! store that works with the type. The predicate capability table is
//! constructed during the build pass.

use crate::def::EnumDef;
use crate::predicate::PredicateTable;
use enumattr_core::{Error, Result, Token};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Immutable attribute configuration for one record type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    name: String,
    /// Plain (non-enumerated) persisted columns, untyped
    plain_columns: Vec<String>,
    /// Enumerated attributes (column-backed and transient), declaration order
    enums: Vec<EnumDef>,
    predicates: PredicateTable,
}

impl ModelDescriptor {
    /// Start configuring a record type
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            plain_columns: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Record type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plain column names in declaration order
    pub fn plain_columns(&self) -> &[String] {
        &self.plain_columns
    }

    /// Check whether an attribute is a plain column
    pub fn is_plain_column(&self, attribute: &str) -> bool {
        self.plain_columns.iter().any(|c| c == attribute)
    }

    /// All enumerated attribute definitions in declaration order
    pub fn enum_defs(&self) -> &[EnumDef] {
        &self.enums
    }

    /// Definition of one enumerated attribute
    pub fn enum_def(&self, attribute: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|d| d.name() == attribute)
    }

    /// Enumerated attributes persisted by the store
    pub fn column_enum_defs(&self) -> impl Iterator<Item = &EnumDef> {
        self.enums.iter().filter(|d| d.is_column())
    }

    /// Enumerated attributes that are in-memory only
    pub fn transient_enum_defs(&self) -> impl Iterator<Item = &EnumDef> {
        self.enums.iter().filter(|d| !d.is_column())
    }

    /// Check whether an attribute (plain or enumerated) is declared
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.is_plain_column(attribute) || self.enum_def(attribute).is_some()
    }

    /// All declared attribute names: plain columns first, then enumerated
    /// attributes, each group in declaration order
    pub fn attribute_names(&self) -> Vec<&str> {
        self.plain_columns
            .iter()
            .map(String::as_str)
            .chain(self.enums.iter().map(EnumDef::name))
            .collect()
    }

    /// The predicate capability table built for this type
    pub fn predicates(&self) -> &PredicateTable {
        &self.predicates
    }

    /// Wrap in an `Arc` for sharing
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Configuration-time builder for `ModelDescriptor`
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    plain_columns: Vec<String>,
    enums: Vec<EnumDef>,
}

impl ModelBuilder {
    /// Declare a plain (non-enumerated) persisted column
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.plain_columns.push(name.into());
        self
    }

    /// Declare a column-backed enumerated attribute
    ///
    /// Keys are given in declaration order; `default` must name a declared
    /// key when present.
    pub fn enum_column<I, K>(self, name: impl Into<String>, keys: I, default: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Token>,
    {
        self.push_enum(name, keys, default, true)
    }

    /// Declare a transient (in-memory only) enumerated attribute
    ///
    /// Transient values are never persisted; after a reload they hold the
    /// declared default again.
    pub fn enum_transient<I, K>(self, name: impl Into<String>, keys: I, default: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Token>,
    {
        self.push_enum(name, keys, default, false)
    }

    /// Add a pre-built definition (for label overrides and the like)
    pub fn enum_def(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    fn push_enum<I, K>(mut self, name: impl Into<String>, keys: I, default: Option<&str>, column: bool) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Token>,
    {
        let def = EnumDef::new(name, keys, default.map(Token::new), column)?;
        self.enums.push(def);
        Ok(self)
    }

    /// Freeze the configuration
    ///
    /// Builds the predicate capability table and checks that no attribute
    /// name is declared twice across plain columns and enumerations.
    pub fn build(self) -> Result<ModelDescriptor> {
        let mut seen: Vec<&str> = Vec::new();
        for name in self
            .plain_columns
            .iter()
            .map(String::as_str)
            .chain(self.enums.iter().map(EnumDef::name))
        {
            if seen.contains(&name) {
                return Err(Error::InvalidEnumeration(format!(
                    "attribute '{name}' declared more than once on model '{}'",
                    self.name
                )));
            }
            seen.push(name);
        }
        let predicates = PredicateTable::build_for(&self.enums);
        Ok(ModelDescriptor {
            name: self.name,
            plain_columns: self.plain_columns,
            enums: self.enums,
            predicates,
        })
    }
}

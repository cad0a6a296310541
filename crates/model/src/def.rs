//! Enumerated attribute definitions
//!
//! An `EnumDef` is the closed, ordered set of symbolic keys one attribute
//! may take, together with display labels and an optional declared default.
//! Declaration order is significant: it defines successor/predecessor
//! cycling and select-option ordering.
//!
//! ## Invariants
//!
//! - Keys are unique within a definition (construction rejects duplicates)
//! - Definitions are immutable once a descriptor is built

use enumattr_core::{Error, Result, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered, closed set of keys for one enumerated attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDef {
    name: String,
    /// (key, label) pairs in declaration order
    entries: Vec<(Token, String)>,
    default: Option<Token>,
    column: bool,
}

impl EnumDef {
    /// Create a definition from keys in declaration order
    ///
    /// Labels default to the humanized key name (`over_drive` → "Over
    /// drive"). Duplicate keys are a configuration error.
    pub fn new<I, K>(name: impl Into<String>, keys: I, default: Option<Token>, column: bool) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<Token>,
    {
        let name = name.into();
        let mut entries: Vec<(Token, String)> = Vec::new();
        for key in keys {
            let key = key.into();
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(Error::InvalidEnumeration(format!(
                    "duplicate key '{key}' in attribute '{name}'"
                )));
            }
            let label = humanize(key.as_str());
            entries.push((key, label));
        }
        if let Some(ref d) = default {
            if !entries.iter().any(|(k, _)| k == d) {
                return Err(Error::InvalidEnumeration(format!(
                    "default '{d}' is not a declared key of attribute '{name}'"
                )));
            }
        }
        Ok(Self {
            name,
            entries,
            default,
            column,
        })
    }

    /// Replace the label for one key (configuration-time only)
    pub fn with_label(mut self, key: &str, label: impl Into<String>) -> Result<Self> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => {
                entry.1 = label.into();
                Ok(self)
            }
            None => Err(Error::InvalidEnumeration(format!(
                "no key '{key}' in attribute '{}'",
                self.name
            ))),
        }
    }

    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values of this attribute are persisted by the store
    pub fn is_column(&self) -> bool {
        self.column
    }

    /// The declared default key, if any
    pub fn default(&self) -> Option<&Token> {
        self.default.as_ref()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &Token> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Number of declared keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check for an empty key set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a key is declared
    pub fn contains(&self, key: &Token) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Check whether a name matches a declared key
    pub fn contains_str(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Label strings in declaration order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, l)| l.as_str()).collect()
    }

    /// Label for one key
    ///
    /// # Errors
    /// `InvalidEnumeration` for an undeclared key; this is explicit API
    /// misuse, unlike permissive attribute assignment.
    pub fn label(&self, key: &Token) -> Result<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, l)| l.as_str())
            .ok_or_else(|| {
                Error::InvalidEnumeration(format!(
                    "no key '{key}' in attribute '{}'",
                    self.name
                ))
            })
    }

    /// Key→label mapping over all keys
    pub fn hash(&self) -> BTreeMap<Token, String> {
        self.entries
            .iter()
            .map(|(k, l)| (k.clone(), l.clone()))
            .collect()
    }

    /// (label, key-as-string) pairs in declaration order
    ///
    /// Shaped for UI select population: display text first, submitted
    /// value second.
    pub fn select_options(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, l)| (l.clone(), k.as_str().to_string()))
            .collect()
    }

    /// First key in declaration order
    pub fn first(&self) -> Option<&Token> {
        self.entries.first().map(|(k, _)| k)
    }

    /// Last key in declaration order
    pub fn last(&self) -> Option<&Token> {
        self.entries.last().map(|(k, _)| k)
    }

    /// The next key in declaration order, cyclically
    ///
    /// The successor of the last key is the first key.
    pub fn successor(&self, key: &Token) -> Result<&Token> {
        let pos = self.position(key)?;
        let next = (pos + 1) % self.entries.len();
        Ok(&self.entries[next].0)
    }

    /// The previous key in declaration order, cyclically
    ///
    /// The predecessor of the first key is the last key.
    pub fn predecessor(&self, key: &Token) -> Result<&Token> {
        let pos = self.position(key)?;
        let prev = (pos + self.entries.len() - 1) % self.entries.len();
        Ok(&self.entries[prev].0)
    }

    fn position(&self, key: &Token) -> Result<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| {
                Error::InvalidEnumeration(format!(
                    "no key '{key}' in attribute '{}'",
                    self.name
                ))
            })
    }
}

/// Derive a display label from a key name
///
/// Underscores become spaces and the first character is uppercased:
/// `over_drive` → "Over drive".
fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

//! Persisted row representation
//!
//! Rows hold the column-backed subset of a record in untyped wire form.
//! There is no token variant at this level: enumerated columns are written
//! as their key text and re-tagged as members on read (the descriptor
//! knows which columns are enumerated), while a token written to a plain
//! column is flattened to its serialized text form and stays text forever.
//! Plain columns are untyped storage; they keep representations, not
//! types.

use enumattr_core::{EnumValue, Error, Result, Value};
use enumattr_model::ModelDescriptor;
use enumattr_record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untyped stored form of one column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredValue {
    /// Stored nil
    Null,
    /// Stored boolean
    Bool(bool),
    /// Stored integer
    Int(i64),
    /// Stored float
    Float(f64),
    /// Stored text (also the flattened form of tokens in plain columns)
    Text(String),
}

/// The persisted column subset of one record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: BTreeMap<String, StoredValue>,
}

impl Row {
    /// Build the wire row for a record
    ///
    /// Validates the column-backed enumerated attributes first and fails
    /// with `RecordInvalid` if any holds an out-of-set, non-nil value.
    /// Transient attributes are skipped entirely.
    pub fn from_record(record: &Record) -> Result<Self> {
        let violations = record.column_violations();
        if !violations.is_empty() {
            return Err(Error::RecordInvalid(violations));
        }

        let model = record.model();
        let mut columns = BTreeMap::new();
        for name in model.plain_columns() {
            let value = record.get(name)?;
            columns.insert(name.clone(), flatten(&value));
        }
        for def in model.column_enum_defs() {
            let stored = match record.enum_value(def.name())? {
                EnumValue::Unset => StoredValue::Null,
                EnumValue::Member(key) => StoredValue::Text(key.as_str().to_string()),
                // ruled out by the validation above
                EnumValue::Unvalidated(raw) => {
                    return Err(Error::InvalidEnumeration(format!(
                        "attribute '{}' still holds unvalidated value '{raw}'",
                        def.name()
                    )))
                }
            };
            columns.insert(def.name().to_string(), stored);
        }
        Ok(Self { columns })
    }

    /// Overlay this row onto a freshly constructed record
    ///
    /// Enumerated column text re-normalizes to a member through the
    /// ordinary assignment path; stored nil overwrites any declared
    /// default, so a column saved as nil reloads as nil. Attributes the
    /// row does not mention (transients) are left at their defaults.
    pub fn apply_to(&self, record: &mut Record) -> Result<()> {
        let model = record.model().clone();
        for name in model.plain_columns() {
            let stored = self.columns.get(name).cloned().unwrap_or(StoredValue::Null);
            record.set(name, unflatten(stored))?;
        }
        for def in model.column_enum_defs() {
            let stored = self
                .columns
                .get(def.name())
                .cloned()
                .unwrap_or(StoredValue::Null);
            record.set(def.name(), unflatten(stored))?;
        }
        Ok(())
    }

    /// Stored value for one column (`Null` when absent)
    pub fn column(&self, name: &str) -> StoredValue {
        self.columns.get(name).cloned().unwrap_or(StoredValue::Null)
    }
}

/// Flatten an attribute value into untyped storage
///
/// Tokens do not survive: a token written to a plain column becomes its
/// serialized text form and reads back as text.
pub fn flatten(value: &Value) -> StoredValue {
    match value {
        Value::Null => StoredValue::Null,
        Value::Bool(b) => StoredValue::Bool(*b),
        Value::Int(i) => StoredValue::Int(*i),
        Value::Float(x) => StoredValue::Float(*x),
        Value::Text(s) => StoredValue::Text(s.clone()),
        Value::Token(t) => match serde_json::to_string(t.as_str()) {
            Ok(s) => StoredValue::Text(s),
            Err(_) => StoredValue::Null,
        },
    }
}

/// Lift a stored value back onto the attribute surface
pub fn unflatten(stored: StoredValue) -> Value {
    match stored {
        StoredValue::Null => Value::Null,
        StoredValue::Bool(b) => Value::Bool(b),
        StoredValue::Int(i) => Value::Int(i),
        StoredValue::Float(x) => Value::Float(x),
        StoredValue::Text(s) => Value::Text(s),
    }
}

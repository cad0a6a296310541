//! MemoryStore: per-record-type in-memory persistence
//!
//! ## Design
//!
//! One store instance corresponds to one record type (one "table"). The
//! store holds rows behind a `parking_lot::RwLock` and assigns ids from a
//! monotonically increasing sequence on first save. All operations are
//! synchronous; the store is `Send + Sync` and can be shared across
//! threads.
//!
//! ## API
//!
//! - Identity: `find`
//! - Mutation: `save`, `create`, `update_attribute`, `update_attributes`
//! - Dynamic finders: `find_by`, `find_or_create_by`,
//!   `find_or_initialize_by`, keyed by explicit attribute/value pairs
//!   matched conjunctively

use crate::row::{flatten, Row, StoredValue};
use enumattr_core::{Error, RecordId, Result, Value};
use enumattr_model::ModelDescriptor;
use enumattr_record::Record;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// In-memory row storage for one record type
pub struct MemoryStore {
    model: Arc<ModelDescriptor>,
    rows: RwLock<BTreeMap<RecordId, Row>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store for a record type
    pub fn new(model: Arc<ModelDescriptor>) -> Self {
        Self {
            model,
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The record type this store persists
    pub fn model(&self) -> &Arc<ModelDescriptor> {
        &self.model
    }

    /// Convenience constructor for a new, unsaved instance of this type
    pub fn new_record(&self) -> Record {
        Record::new(self.model.clone())
    }

    /// Number of persisted rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    // ========== Identity ==========

    /// Fetch a record by id
    ///
    /// # Errors
    /// `NotFound` if no row with the id exists.
    ///
    /// Reload semantics: enumerated columns come back as symbols, a
    /// column persisted as nil stays nil (the declared default is not
    /// re-applied), and transient enumerated attributes hold their
    /// declared defaults again.
    pub fn find(&self, id: RecordId) -> Result<Record> {
        let row = self
            .rows
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))?;
        debug!(model = self.model.name(), %id, "found record");
        self.materialize(id, &row)
    }

    // ========== Mutation ==========

    /// Validate and persist a record
    ///
    /// Assigns an id on first save. Only column-backed attributes are
    /// written; transient enumerated values stay in memory.
    ///
    /// # Errors
    /// `RecordInvalid` when any column-backed enumerated attribute holds
    /// an out-of-set, non-nil value. The record is untouched and the save
    /// can be retried after correcting the attribute.
    pub fn save(&self, record: &mut Record) -> Result<RecordId> {
        let row = Row::from_record(record)?;
        let id = match record.id() {
            Some(id) => id,
            None => RecordId::from_u64(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };
        self.rows.write().insert(id, row);
        record.set_id(id);
        debug!(model = self.model.name(), %id, "saved record");
        Ok(id)
    }

    /// Construct from attribute pairs and save immediately
    ///
    /// Propagates `RecordInvalid`: constructing with an out-of-set
    /// enumeration value does not raise, but the save here does.
    pub fn create<'a, I>(&self, pairs: I) -> Result<Record>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut record = Record::with_attrs(self.model.clone(), pairs)?;
        self.save(&mut record)?;
        Ok(record)
    }

    /// Assign one attribute and save
    pub fn update_attribute(&self, record: &mut Record, attribute: &str, value: impl Into<Value>) -> Result<()> {
        record.set(attribute, value)?;
        self.save(record)?;
        Ok(())
    }

    /// Bulk-assign attributes and save
    pub fn update_attributes<'a, I>(&self, record: &mut Record, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        record.assign(pairs)?;
        self.save(record)?;
        Ok(())
    }

    // ========== Dynamic finders ==========

    /// First record matching all attribute/value pairs conjunctively
    ///
    /// Pair values accept the same symbol-or-string forms as assignment;
    /// an enumerated pair value is matched against the stored key text.
    /// Rows are scanned in id order, so the earliest-created match wins.
    pub fn find_by(&self, pairs: &[(&str, Value)]) -> Result<Option<Record>> {
        let targets = self.match_targets(pairs)?;
        let rows = self.rows.read();
        for (id, row) in rows.iter() {
            if targets
                .iter()
                .all(|(name, stored)| row.column(name) == *stored)
            {
                let record = self.materialize(*id, row)?;
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Find by pairs, or construct and persist a record from them
    ///
    /// The create path propagates `RecordInvalid` like `create`.
    pub fn find_or_create_by(&self, pairs: &[(&str, Value)]) -> Result<Record> {
        if let Some(found) = self.find_by(pairs)? {
            return Ok(found);
        }
        self.create(pairs.iter().map(|(n, v)| (*n, v.clone())))
    }

    /// Find by pairs, or return a transient (unsaved) instance built from
    /// them
    pub fn find_or_initialize_by(&self, pairs: &[(&str, Value)]) -> Result<Record> {
        if let Some(found) = self.find_by(pairs)? {
            return Ok(found);
        }
        Record::with_attrs(self.model.clone(), pairs.iter().map(|(n, v)| (*n, v.clone())))
    }

    // ========== Internals ==========

    fn materialize(&self, id: RecordId, row: &Row) -> Result<Record> {
        let mut record = Record::new(self.model.clone());
        row.apply_to(&mut record)?;
        record.set_id(id);
        Ok(record)
    }

    /// Convert finder pairs into stored-form match targets
    ///
    /// Finders only see persisted columns; naming a transient attribute
    /// is explicit misuse, naming an undeclared one is an unknown
    /// attribute.
    fn match_targets(&self, pairs: &[(&str, Value)]) -> Result<Vec<(String, StoredValue)>> {
        let mut targets = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            if let Some(def) = self.model.enum_def(name) {
                if !def.is_column() {
                    return Err(Error::InvalidEnumeration(format!(
                        "attribute '{name}' is not persisted and cannot be used in finders"
                    )));
                }
                let stored = match value.key_candidate() {
                    Some(key) => StoredValue::Text(key.to_string()),
                    None if value.is_null() => StoredValue::Null,
                    None => flatten(value),
                };
                targets.push((name.to_string(), stored));
            } else if self.model.is_plain_column(name) {
                targets.push((name.to_string(), flatten(value)));
            } else {
                return Err(Error::UnknownAttribute(name.to_string()));
            }
        }
        Ok(targets)
    }
}

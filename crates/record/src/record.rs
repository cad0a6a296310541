//! The record instance type

use enumattr_core::{EnumValue, Error, RecordId, Result, Token, ValidationErrors, Value};
use enumattr_model::{EnumDef, ModelDescriptor, PredicateKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One instance of a configured record type
///
/// Records are created against an `Arc<ModelDescriptor>`; all dynamic
/// capability (predicates, definitions, defaults) is resolved through the
/// shared descriptor, so two instances of the same type, including one
/// re-fetched from the store, behave identically.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<ModelDescriptor>,
    id: Option<RecordId>,
    enums: BTreeMap<String, EnumValue>,
    plains: BTreeMap<String, Value>,
}

impl Record {
    /// Create a new, unsaved instance
    ///
    /// Enumerated attributes initialize to their declared defaults (or
    /// `Unset` when the definition declares none); plain columns start
    /// nil.
    pub fn new(model: Arc<ModelDescriptor>) -> Self {
        let mut enums = BTreeMap::new();
        for def in model.enum_defs() {
            let initial = match def.default() {
                Some(key) => EnumValue::Member(key.clone()),
                None => EnumValue::Unset,
            };
            enums.insert(def.name().to_string(), initial);
        }
        let mut plains = BTreeMap::new();
        for column in model.plain_columns() {
            plains.insert(column.clone(), Value::Null);
        }
        Self {
            model,
            id: None,
            enums,
            plains,
        }
    }

    /// Block-style construction: create, then run the configuration closure
    pub fn build(model: Arc<ModelDescriptor>, f: impl FnOnce(&mut Self)) -> Self {
        let mut record = Self::new(model);
        f(&mut record);
        record
    }

    /// Parameter-hash construction
    ///
    /// Accepts any string-like keys with values already lifted into
    /// `Value`, so both symbol-style and string-style parameters work.
    /// Out-of-set enumeration values are accepted without error, exactly
    /// as with `set`.
    pub fn with_attrs<S, I>(model: Arc<ModelDescriptor>, pairs: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, Value)>,
    {
        let mut record = Self::new(model);
        record.assign(pairs)?;
        Ok(record)
    }

    /// The shared descriptor this instance was created against
    pub fn model(&self) -> &Arc<ModelDescriptor> {
        &self.model
    }

    /// Store-assigned id, if the record has been saved
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Check whether the record has never been saved
    pub fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    /// Attach the store-assigned id (store use)
    pub fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Definition lookup from an instance (`enums(:gear)` in the source)
    pub fn enums(&self, attribute: &str) -> Result<&EnumDef> {
        self.model
            .enum_def(attribute)
            .ok_or_else(|| Error::UnknownAttribute(attribute.to_string()))
    }

    // ========== Reads ==========

    /// Current value of an attribute
    ///
    /// Enumerated members come back as tokens and nil as `Null`; an
    /// attribute holding an out-of-set value returns the raw stored value
    /// unconverted. Plain columns return whatever was assigned.
    pub fn get(&self, attribute: &str) -> Result<Value> {
        if let Some(ev) = self.enums.get(attribute) {
            return Ok(ev.to_value());
        }
        if let Some(v) = self.plains.get(attribute) {
            return Ok(v.clone());
        }
        Err(Error::UnknownAttribute(attribute.to_string()))
    }

    /// Typed accessor for enumerated attributes
    ///
    /// Returns `None` for nil and for attributes in the unvalidated
    /// state; use `get` to inspect the raw invalid value.
    pub fn token(&self, attribute: &str) -> Result<Option<Token>> {
        match self.enums.get(attribute) {
            Some(ev) => Ok(ev.token().cloned()),
            None => Err(Error::UnknownAttribute(attribute.to_string())),
        }
    }

    /// The tagged enumeration state of an attribute (store use)
    pub fn enum_value(&self, attribute: &str) -> Result<&EnumValue> {
        self.enums
            .get(attribute)
            .ok_or_else(|| Error::UnknownAttribute(attribute.to_string()))
    }

    /// Indexed read: the `[]` surface, same semantics as `get`
    pub fn index(&self, attribute: &str) -> Result<Value> {
        self.get(attribute)
    }

    /// Full attribute snapshot
    ///
    /// Enumerated members appear in symbol (`Token`) form; plain columns
    /// as assigned.
    pub fn attributes(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();
        for (name, v) in &self.plains {
            out.insert(name.clone(), v.clone());
        }
        for (name, ev) in &self.enums {
            out.insert(name.clone(), ev.to_value());
        }
        out
    }

    // ========== Writes ==========

    /// Assign one attribute
    ///
    /// For enumerated attributes this normalizes but never raises on
    /// out-of-set values (deferred validation). For plain columns the
    /// value is stored as-is.
    pub fn set(&mut self, attribute: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        if let Some(def) = self.model.enum_def(attribute) {
            let normalized = normalize(def, value);
            self.enums.insert(attribute.to_string(), normalized);
            return Ok(());
        }
        if self.model.is_plain_column(attribute) {
            self.plains.insert(attribute.to_string(), value);
            return Ok(());
        }
        Err(Error::UnknownAttribute(attribute.to_string()))
    }

    /// Indexed write: the `[]=` surface, same semantics as `set`
    pub fn set_index(&mut self, attribute: &str, value: impl Into<Value>) -> Result<()> {
        self.set(attribute, value)
    }

    /// Bulk attribute assignment: the `attributes=` surface
    ///
    /// Permissive like `set`: invalid enumeration values are accepted and
    /// left for save-time validation.
    pub fn assign<S, I>(&mut self, pairs: I) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (S, Value)>,
    {
        for (attribute, value) in pairs {
            self.set(attribute.as_ref(), value)?;
        }
        Ok(())
    }

    // ========== Cycling ==========

    /// Advance to the next key in declaration order, cyclically
    ///
    /// Mutates the stored value and returns the new current key. From nil
    /// or an unvalidated state the cycle is entered at the first key.
    pub fn next(&mut self, attribute: &str) -> Result<Token> {
        self.step(attribute, Direction::Forward)
    }

    /// Retreat to the previous key in declaration order, cyclically
    ///
    /// Mutates the stored value and returns the new current key. From nil
    /// or an unvalidated state the cycle is entered at the last key.
    pub fn previous(&mut self, attribute: &str) -> Result<Token> {
        self.step(attribute, Direction::Backward)
    }

    fn step(&mut self, attribute: &str, direction: Direction) -> Result<Token> {
        let def = self.model.enum_def(attribute).ok_or_else(|| {
            Error::InvalidEnumeration(format!("attribute '{attribute}' is not enumerated"))
        })?;
        if def.is_empty() {
            return Err(Error::InvalidEnumeration(format!(
                "attribute '{attribute}' has no declared keys"
            )));
        }
        let current = self.enums.get(attribute).and_then(EnumValue::token);
        let next = match (current, direction) {
            (Some(key), Direction::Forward) => def.successor(key)?.clone(),
            (Some(key), Direction::Backward) => def.predecessor(key)?.clone(),
            (None, Direction::Forward) => def.first().expect("non-empty").clone(),
            (None, Direction::Backward) => def.last().expect("non-empty").clone(),
        };
        self.enums
            .insert(attribute.to_string(), EnumValue::Member(next.clone()));
        Ok(next)
    }

    // ========== Predicates ==========

    /// Evaluate a capability-table predicate by generated name
    ///
    /// Names follow the source pattern: `{attr}_is_in_{key}`,
    /// `{attr}_not_in_{key}`, `{attr}_is_nil`, `{attr}_is_not_nil`.
    /// Unknown names are explicit API misuse.
    pub fn predicate(&self, name: &str) -> Result<bool> {
        let kind = self.model.predicates().get(name).ok_or_else(|| {
            Error::InvalidEnumeration(format!("no predicate '{name}' on model '{}'", self.model.name()))
        })?;
        Ok(match kind {
            PredicateKind::IsKey { attribute, key } => {
                self.current_token(attribute) == Some(key)
            }
            PredicateKind::NotKey { attribute, key } => {
                self.current_token(attribute) != Some(key)
            }
            PredicateKind::IsNil { attribute } => self.is_nil(attribute),
            PredicateKind::IsNotNil { attribute } => !self.is_nil(attribute),
        })
    }

    fn current_token(&self, attribute: &str) -> Option<&Token> {
        self.enums.get(attribute).and_then(EnumValue::token)
    }

    fn is_nil(&self, attribute: &str) -> bool {
        self.enums
            .get(attribute)
            .map(EnumValue::is_unset)
            .unwrap_or(true)
    }

    // ========== Validation ==========

    /// Collect validation failures across all enumerated attributes
    ///
    /// Every attribute in the unvalidated state contributes an error,
    /// column-backed or not. Declaration order keeps the output stable.
    pub fn validate(&self) -> ValidationErrors {
        self.collect_violations(|_| true)
    }

    /// Check overall validity
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Failures on column-backed enumerated attributes only
    ///
    /// This is the subset that blocks a save; transient attributes never
    /// prevent persistence.
    pub fn column_violations(&self) -> ValidationErrors {
        self.collect_violations(EnumDef::is_column)
    }

    fn collect_violations(&self, include: impl Fn(&EnumDef) -> bool) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for def in self.model.enum_defs() {
            if !include(def) {
                continue;
            }
            if let Some(EnumValue::Unvalidated(raw)) = self.enums.get(def.name()) {
                errors.add(def.name(), format!("'{raw}' is not in the declared set"));
            }
        }
        errors
    }
}

enum Direction {
    Forward,
    Backward,
}

/// Normalize raw assignment input against a definition
///
/// A text or token naming a declared key becomes `Member`; nil becomes
/// `Unset`; everything else is carried as `Unvalidated` with the raw value
/// intact. This function cannot fail; that is the deferred-validation
/// contract.
fn normalize(def: &EnumDef, value: Value) -> EnumValue {
    match value {
        Value::Null => EnumValue::Unset,
        other => match other.key_candidate() {
            Some(name) if def.contains_str(name) => EnumValue::Member(Token::new(name)),
            _ => EnumValue::Unvalidated(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumattr_core::sym;

    fn race_car() -> Arc<ModelDescriptor> {
        ModelDescriptor::builder("race_car")
            .column("name")
            .column("lights")
            .enum_column(
                "gear",
                ["reverse", "neutral", "first", "second", "over_drive"],
                Some("neutral"),
            )
            .unwrap()
            .enum_transient("choke", ["none", "medium", "full"], Some("none"))
            .unwrap()
            .build()
            .unwrap()
            .shared()
    }

    #[test]
    fn test_new_applies_declared_defaults() {
        let car = Record::new(race_car());
        assert_eq!(car.get("gear").unwrap(), sym("neutral"));
        assert_eq!(car.get("choke").unwrap(), sym("none"));
        assert!(car.get("lights").unwrap().is_null());
        assert!(car.is_new_record());
    }

    #[test]
    fn test_string_matching_declared_key_normalizes_to_token() {
        let mut car = Record::new(race_car());
        car.set("gear", "second").unwrap();
        assert_eq!(car.get("gear").unwrap(), sym("second"));
        assert_eq!(car.token("gear").unwrap().unwrap(), "second");
    }

    #[test]
    fn test_out_of_set_value_stored_unconverted_without_error() {
        let mut car = Record::new(race_car());
        car.set("gear", sym("drive")).unwrap();
        // the raw value is inspectable, not coerced into the set
        assert_eq!(car.get("gear").unwrap(), sym("drive"));
        assert_eq!(car.token("gear").unwrap(), None);
        assert!(!car.is_valid());
    }

    #[test]
    fn test_nil_assignment_unsets() {
        let mut car = Record::new(race_car());
        car.set("gear", Value::Null).unwrap();
        assert!(car.get("gear").unwrap().is_null());
        assert!(car.predicate("gear_is_nil").unwrap());
    }

    #[test]
    fn test_plain_column_does_not_convert_strings() {
        let mut car = Record::new(race_car());
        car.set("lights", "off").unwrap();
        assert_eq!(car.get("lights").unwrap(), Value::Text("off".into()));
    }

    #[test]
    fn test_unknown_attribute_is_an_error() {
        let mut car = Record::new(race_car());
        assert!(matches!(
            car.set("spoiler", "up").unwrap_err(),
            Error::UnknownAttribute(_)
        ));
        assert!(matches!(
            car.get("spoiler").unwrap_err(),
            Error::UnknownAttribute(_)
        ));
    }

    #[test]
    fn test_next_cycles_in_declaration_order() {
        let mut car = Record::new(race_car());
        car.set("gear", sym("neutral")).unwrap();
        for expected in ["first", "second", "over_drive", "reverse", "neutral"] {
            assert_eq!(car.next("gear").unwrap(), expected);
        }
    }

    #[test]
    fn test_previous_cycles_backwards() {
        let mut car = Record::new(race_car());
        car.set("gear", sym("neutral")).unwrap();
        for expected in ["reverse", "over_drive", "second", "first"] {
            assert_eq!(car.previous("gear").unwrap(), expected);
        }
    }

    #[test]
    fn test_cycling_enters_at_boundary_from_nil() {
        let mut car = Record::new(race_car());
        car.set("gear", Value::Null).unwrap();
        assert_eq!(car.next("gear").unwrap(), "reverse");
        car.set("gear", Value::Null).unwrap();
        assert_eq!(car.previous("gear").unwrap(), "over_drive");
    }

    #[test]
    fn test_cycling_a_plain_column_is_invalid_enumeration() {
        let mut car = Record::new(race_car());
        assert!(matches!(
            car.next("lights").unwrap_err(),
            Error::InvalidEnumeration(_)
        ));
    }

    #[test]
    fn test_predicates_track_current_member() {
        let mut car = Record::new(race_car());
        car.set("gear", sym("second")).unwrap();
        assert!(car.predicate("gear_is_in_second").unwrap());
        assert!(!car.predicate("gear_not_in_second").unwrap());
        assert!(!car.predicate("gear_is_nil").unwrap());
        assert!(car.predicate("gear_is_not_nil").unwrap());
    }

    #[test]
    fn test_unknown_predicate_name_is_invalid_enumeration() {
        let car = Record::new(race_car());
        assert!(matches!(
            car.predicate("gear_is_in_drive").unwrap_err(),
            Error::InvalidEnumeration(_)
        ));
    }

    #[test]
    fn test_transient_violation_fails_validity_but_not_column_check() {
        let mut car = Record::new(race_car());
        car.set("choke", sym("all")).unwrap();
        assert!(!car.is_valid());
        assert!(car.validate().on("choke"));
        assert!(car.column_violations().is_empty());
    }

    #[test]
    fn test_bulk_assign_is_permissive_for_enum_values() {
        let mut car = Record::new(race_car());
        car.assign([("lights", Value::from("off")), ("gear", sym("drive"))])
            .unwrap();
        assert_eq!(car.get("lights").unwrap(), Value::Text("off".into()));
        assert!(!car.column_violations().is_empty());
    }

    #[test]
    fn test_attributes_snapshot_uses_symbol_form() {
        let mut car = Record::new(race_car());
        car.set("gear", "second").unwrap();
        car.set("lights", "on").unwrap();
        let attrs = car.attributes();
        assert_eq!(attrs["gear"], sym("second"));
        assert_eq!(attrs["lights"], Value::Text("on".into()));
    }

    #[test]
    fn test_block_construction() {
        let car = Record::build(race_car(), |car| {
            car.set("gear", sym("first")).unwrap();
            car.set("choke", sym("medium")).unwrap();
            car.set("lights", "on").unwrap();
        });
        assert_eq!(car.get("gear").unwrap(), sym("first"));
        assert_eq!(car.get("choke").unwrap(), sym("medium"));
        assert_eq!(car.get("lights").unwrap(), Value::Text("on".into()));
    }

    #[test]
    fn test_hash_construction_with_string_values() {
        let car = Record::with_attrs(
            race_car(),
            [
                ("name", Value::from("FastFurious")),
                ("gear", Value::from("second")),
                ("lights", Value::from("on")),
                ("choke", Value::from("medium")),
            ],
        )
        .unwrap();
        assert_eq!(car.get("gear").unwrap(), sym("second"));
        assert_eq!(car.get("choke").unwrap(), sym("medium"));
        assert_eq!(car.get("lights").unwrap(), Value::Text("on".into()));
    }
}

//! Error types for the enumattr workspace
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Two failure kinds carry the enumeration semantics:
//! - `InvalidEnumeration`: explicit, non-parametric API misuse (asking for
//!   the label of an undeclared key, cycling a non-enumerated attribute).
//!   Never raised by ordinary assignment, construction, or bulk updates;
//!   mass assignment stays permissive.
//! - `RecordInvalid`: raised only at save time when a column-backed
//!   enumerated attribute holds a non-nil, non-member value. Recoverable
//!   by correcting the attribute and retrying the save.

use crate::types::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for enumattr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the enumerated attribute extension
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Explicit misuse of the enumeration API (undeclared key, unknown
    /// predicate, cycling a non-enumerated attribute)
    #[error("invalid enumeration: {0}")]
    InvalidEnumeration(String),

    /// Save-time rejection: a column-backed enumerated attribute holds a
    /// non-member, non-nil value
    #[error("record invalid: {0}")]
    RecordInvalid(ValidationErrors),

    /// No record with the given id exists in the store
    #[error("record not found: id {0}")]
    NotFound(RecordId),

    /// Access to an attribute the record type never declared
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}

/// A single validation failure on one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Attribute the failure is attached to
    pub attribute: String,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.message)
    }
}

/// Ordered collection of validation failures
///
/// Order follows the record type's attribute declaration order, so error
/// output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure on an attribute
    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            attribute: attribute.into(),
            message: message.into(),
        });
    }

    /// Check if any failures were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the recorded failures
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Check if any failure is attached to the given attribute
    pub fn on(&self, attribute: &str) -> bool {
        self.errors.iter().any(|e| e.attribute == attribute)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no validation errors");
        }
        let joined = self
            .errors
            .iter()
            .map(ValidationError::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_enumeration() {
        let err = Error::InvalidEnumeration("no key 'drive' in attribute 'gear'".to_string());
        let msg = err.to_string();
        assert!(msg.contains("invalid enumeration"));
        assert!(msg.contains("drive"));
    }

    #[test]
    fn test_error_display_record_invalid_joins_attribute_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("gear", "'drive' is not a declared value");
        errors.add("choke", "'all' is not a declared value");
        let err = Error::RecordInvalid(errors);
        let msg = err.to_string();
        assert!(msg.contains("record invalid"));
        assert!(msg.contains("gear: 'drive' is not a declared value"));
        assert!(msg.contains("choke"));
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound(RecordId::from_u64(42));
        assert!(err.to_string().contains("id 42"));
    }

    #[test]
    fn test_validation_errors_track_attributes() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        errors.add("gear", "bad");
        assert_eq!(errors.len(), 1);
        assert!(errors.on("gear"));
        assert!(!errors.on("choke"));
    }
}

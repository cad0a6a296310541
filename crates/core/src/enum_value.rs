//! Tagged value held by an enumerated attribute
//!
//! ## State Machine
//!
//! Per attribute: `Unset → Member` (assignment of a declared key) or
//! `Unset → Unvalidated` (assignment of an undeclared token). `Unvalidated`
//! blocks persistence until corrected back to a member or to `Unset`.
//!
//! Assignment never fails; the invalid state is carried here and folded
//! into a `RecordInvalid` failure only at save time, and only for
//! column-backed attributes.

use crate::value::{Token, Value};
use serde::{Deserialize, Serialize};

/// Value of an enumerated attribute on a record instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnumValue {
    /// The attribute is nil
    Unset,
    /// A declared key of the attribute's definition
    Member(Token),
    /// An out-of-set value accepted at assignment time, pending validation
    ///
    /// Carries the raw assigned value unconverted so callers can inspect
    /// the invalid state.
    Unvalidated(Value),
}

impl EnumValue {
    /// Check if the attribute is nil
    pub fn is_unset(&self) -> bool {
        matches!(self, EnumValue::Unset)
    }

    /// Check if the attribute holds an out-of-set value
    pub fn is_unvalidated(&self) -> bool {
        matches!(self, EnumValue::Unvalidated(_))
    }

    /// The current member key, if the attribute holds one
    pub fn token(&self) -> Option<&Token> {
        match self {
            EnumValue::Member(t) => Some(t),
            _ => None,
        }
    }

    /// Render as the untyped value surface
    ///
    /// `Member` becomes a `Token`, `Unset` becomes `Null`, and
    /// `Unvalidated` yields the raw stored value unconverted, the
    /// explicit escape hatch for inspecting invalid states.
    pub fn to_value(&self) -> Value {
        match self {
            EnumValue::Unset => Value::Null,
            EnumValue::Member(t) => Value::Token(t.clone()),
            EnumValue::Unvalidated(raw) => raw.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::sym;

    #[test]
    fn test_member_renders_as_token() {
        let v = EnumValue::Member(Token::new("second"));
        assert_eq!(v.to_value(), sym("second"));
        assert_eq!(v.token(), Some(&Token::new("second")));
    }

    #[test]
    fn test_unvalidated_returns_raw_value_unconverted() {
        let v = EnumValue::Unvalidated(Value::Text("drive".into()));
        assert_eq!(v.to_value(), Value::Text("drive".into()));
        assert_eq!(v.token(), None);
        assert!(v.is_unvalidated());
    }

    #[test]
    fn test_unset_is_nil() {
        assert!(EnumValue::Unset.is_unset());
        assert!(EnumValue::Unset.to_value().is_null());
    }
}

//! Value types for enumerated and plain attributes
//!
//! This module defines:
//! - Token: a symbolic name (`second`, `over_drive`) drawn from a declared key set
//! - Value: unified enum for the untyped attribute surface
//!
//! ## Coercion Rules
//!
//! The value model performs no implicit coercions on its own. The single
//! deliberate coercion in the system (a `Text` that matches a declared
//! enumeration key becoming a `Token` member) happens at assignment time
//! in the record layer, never here.
//!
//! - Different variants are never equal: `Text("off") != Token(off)`
//! - Float uses IEEE-754 equality: `NaN != NaN`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbolic name drawn from an enumeration's declared key set
///
/// Tokens play the role of interned symbols: cheap to clone, ordered by
/// name, and serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Create a token from a name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The token's name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Unified attribute value for plain columns and raw assignment input
///
/// ## Variant Equality
///
/// Different variants are never equal, even when they render the same:
/// - `Value::Text("off") != Value::Token(Token::new("off"))`
///
/// Float equality follows IEEE-754 semantics (`NaN != NaN`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value (the attribute is nil)
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Symbolic token
    Token(Token),
}

impl Value {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::Token(_) => "Token",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the token payload, if any
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(t) => Some(t),
            _ => None,
        }
    }

    /// The token name or text content, for key matching at assignment time
    ///
    /// Returns `None` for variants that can never name an enumeration key.
    pub fn key_candidate(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Token(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Token(t) => write!(f, ":{t}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Token> for Value {
    fn from(t: Token) -> Self {
        Value::Token(t)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Shorthand for `Value::Token`, mirroring symbol literals in call sites
pub fn sym(name: &str) -> Value {
    Value::Token(Token::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_token_are_never_equal() {
        assert_ne!(Value::Text("off".into()), Value::Token(Token::new("off")));
    }

    #[test]
    fn test_float_nan_is_not_equal_to_itself() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_token_compares_against_str() {
        let t = Token::new("over_drive");
        assert_eq!(t, "over_drive");
        assert_ne!(t, "neutral");
    }

    #[test]
    fn test_key_candidate_covers_text_and_token_only() {
        assert_eq!(Value::Text("second".into()).key_candidate(), Some("second"));
        assert_eq!(sym("second").key_candidate(), Some("second"));
        assert_eq!(Value::Int(2).key_candidate(), None);
        assert_eq!(Value::Null.key_candidate(), None);
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let json = serde_json::to_string(&Token::new("reverse")).unwrap();
        assert_eq!(json, "\"reverse\"");
    }

    #[test]
    fn test_option_converts_to_null() {
        let v: Value = Option::<&str>::None.into();
        assert!(v.is_null());
    }
}

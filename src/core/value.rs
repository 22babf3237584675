//! Value type for structured logging fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value carried by a structured key/value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Render as a JSON value fragment.
    ///
    /// Numbers and booleans come out as unquoted primitives; strings are
    /// escaped. Non-finite floats have no JSON representation and fall back to
    /// their quoted textual form rather than failing the record.
    #[must_use]
    pub fn to_json_fragment(&self) -> String {
        match self {
            FieldValue::String(s) => json_escape(s),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) if f.is_finite() => f.to_string(),
            FieldValue::Float(f) => json_escape(&f.to_string()),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Null => "null".to_string(),
        }
    }

    /// True when the JSON rendering of this value is a quoted string.
    pub(crate) fn renders_as_string(&self) -> bool {
        match self {
            FieldValue::String(_) => true,
            FieldValue::Float(f) => !f.is_finite(),
            _ => false,
        }
    }
}

/// Escape a string into a quoted JSON literal.
pub(crate) fn json_escape(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

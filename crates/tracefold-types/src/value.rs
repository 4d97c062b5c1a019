use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Scalar value carried by a record field.
///
/// Fields hold scalars only; nested structures are rejected at the
/// boundary. `Null` is a *written* value — a field explicitly set to null —
/// and is distinct from a key that was never written at all, which callers
/// observe as an absent lookup.
///
/// Serializes untagged, so JSON adapters see plain scalars
/// (`"x"`, `1.5`, `true`, `null`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

impl FieldValue {
    /// Convert a JSON value, rejecting arrays and objects.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, TypeError> {
        match value {
            serde_json::Value::Null => Ok(FieldValue::Null),
            serde_json::Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Num)
                .ok_or_else(|| TypeError::NonScalar("non-finite number".into())),
            serde_json::Value::String(s) => Ok(FieldValue::Str(s.clone())),
            serde_json::Value::Array(_) => Err(TypeError::NonScalar("array".into())),
            serde_json::Value::Object(_) => Err(TypeError::NonScalar("object".into())),
        }
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for a written null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Num(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Num(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Num(n) => write!(f, "{n}"),
            FieldValue::Str(s) => write!(f, "{s}"),
        }
    }
}

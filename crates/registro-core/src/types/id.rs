//! Opaque record identifiers.
//!
//! Stores may key rows by integers or UUID strings. [`RecordId`] keeps the
//! textual form and remembers whether it came from a JSON number so the
//! value can be written back unchanged.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::filter::FilterValue;

/// Identifier of a stored row. Equality compares the textual form.
#[derive(Debug, Clone)]
pub struct RecordId {
    raw: String,
    numeric: bool,
}

impl RecordId {
    /// Create an identifier from its textual form.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let numeric = raw.parse::<i64>().is_ok_and(|n| n.to_string() == raw);
        Self { raw, numeric }
    }

    /// Read an identifier from a JSON scalar. Other shapes yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                raw: s.clone(),
                numeric: false,
            }),
            Value::Number(n) => Some(Self {
                raw: n.to_string(),
                numeric: true,
            }),
            _ => None,
        }
    }

    /// The identifier as a JSON value (a number when it was numeric).
    pub fn to_json(&self) -> Value {
        if self.numeric {
            if let Ok(n) = self.raw.parse::<i64>() {
                return Value::from(n);
            }
        }
        Value::String(self.raw.clone())
    }

    /// The textual form.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            numeric: true,
        }
    }
}

impl From<&RecordId> for FilterValue {
    fn from(id: &RecordId) -> Self {
        match id.to_json() {
            Value::Number(n) => n.as_i64().map_or_else(|| Self::String(id.raw.clone()), Self::Integer),
            _ => Self::String(id.raw.clone()),
        }
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("identifier must be a string or number"))
    }
}

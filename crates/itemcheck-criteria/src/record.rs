//! Item records and value rendering.
//!
//! A [`Record`] is an ordered mapping from field name to a JSON scalar. The
//! helpers here define how a value is rendered to a string and coerced to a
//! number; both the matcher and the mock store rely on the same rules.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields every created item must carry with a non-blank value.
pub const REQUIRED_FIELDS: [Field; 7] = [
    Field::Id,
    Field::Name,
    Field::Description,
    Field::Category,
    Field::Price,
    Field::Stock,
    Field::Available,
];

/// A single item: field name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Get a field value. JSON `null` is reported as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Insert or overwrite a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    /// The integer `id` of this record, if present and integral.
    pub fn id(&self) -> Option<i64> {
        self.get(Field::Id.name()).and_then(Value::as_i64)
    }

    /// Merge every field of `partial` onto this record (last write wins).
    pub fn merge(&mut self, partial: &Record) {
        for (key, value) in &partial.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Fields that are missing or render to a blank string.
    pub fn missing_fields<'a>(&self, required: &'a [Field]) -> Vec<&'a Field> {
        required
            .iter()
            .filter(|field| {
                self.get(field.name())
                    .map(|v| render_value(v).trim().is_empty())
                    .unwrap_or(true)
            })
            .collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    /// Only JSON objects convert; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Render a value the way criteria compare against it.
///
/// Integers print in decimal, floats keep a fractional part (`150.0`),
/// strings are verbatim and booleans print as `true`/`false`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value to `f64`. Strings are trimmed and parsed; booleans and
/// containers are not numeric.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

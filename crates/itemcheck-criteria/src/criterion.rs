//! Criterion rows and their compiled form.
//!
//! A [`CriterionRow`] is the raw table row a scenario supplies: field name to
//! predicate string. Rows are compiled once into a [`CompiledCriterion`] so
//! numeric operands are parsed a single time rather than per record.

use crate::field::{Field, MatchStrategy, StrategyTable};
use crate::record::{numeric_value, render_value, Record};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One row of criteria: field name to raw predicate string.
///
/// Blank values mean "ignore this field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriterionRow {
    entries: Vec<(String, String)>,
}

impl CriterionRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field's predicate, replacing any earlier value for that field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose trimmed value is non-empty.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .map(|(k, v)| (k, v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    /// True when every value is blank, i.e. the row matches everything.
    pub fn is_blank(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build rows from a header line plus data lines, as Gherkin tables are laid out.
    pub fn from_table(header: &[String], rows: &[Vec<String>]) -> Vec<CriterionRow> {
        rows.iter()
            .map(|cells| {
                header
                    .iter()
                    .zip(cells.iter())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for CriterionRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = CriterionRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl fmt::Display for CriterionRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v:?}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for CriterionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for CriterionRow {
    /// Accepts any mapping of scalars; numbers and booleans are rendered to
    /// their criterion string and `null` becomes a blank (ignored) value.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut row = CriterionRow::new();
        for (key, value) in map {
            let raw = match value {
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(D::Error::custom(format!(
                        "criterion '{key}' must be a scalar value"
                    )))
                }
                scalar => render_value(&scalar),
            };
            row.insert(key, raw);
        }
        Ok(row)
    }
}

/// A compiled predicate for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPredicate {
    /// Rendered value equals the operand.
    Equals(String),
    /// Rendered value contains the operand.
    Contains(String),
    /// Lowercased rendered value equals the (pre-lowercased) operand.
    EqualsIgnoreCase(String),
    /// Numeric value strictly greater than the threshold.
    GreaterThan(f64),
    /// Numeric value strictly less than the threshold.
    LessThan(f64),
    /// Numeric value equal to the operand (native float equality).
    NumericEquals(f64),
    /// Operand failed to parse; nothing matches.
    Never,
}

impl FieldPredicate {
    /// Compile a trimmed, non-empty criterion value under a strategy.
    pub fn compile(strategy: MatchStrategy, raw: &str) -> Self {
        match strategy {
            MatchStrategy::Exact => FieldPredicate::Equals(raw.to_string()),
            MatchStrategy::Substring => FieldPredicate::Contains(raw.to_string()),
            MatchStrategy::CaseInsensitive => FieldPredicate::EqualsIgnoreCase(raw.to_lowercase()),
            MatchStrategy::NumericRange => Self::compile_numeric(raw),
        }
    }

    fn compile_numeric(raw: &str) -> Self {
        let parse = |s: &str| s.trim().parse::<f64>().ok();
        if let Some(rest) = raw.strip_prefix('>') {
            parse(rest).map_or(FieldPredicate::Never, FieldPredicate::GreaterThan)
        } else if let Some(rest) = raw.strip_prefix('<') {
            parse(rest).map_or(FieldPredicate::Never, FieldPredicate::LessThan)
        } else {
            parse(raw).map_or(FieldPredicate::Never, FieldPredicate::NumericEquals)
        }
    }

    /// Check a present field value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldPredicate::Equals(expected) => render_value(value) == *expected,
            FieldPredicate::Contains(needle) => render_value(value).contains(needle.as_str()),
            FieldPredicate::EqualsIgnoreCase(lower) => {
                render_value(value).to_lowercase() == *lower
            }
            FieldPredicate::GreaterThan(threshold) => {
                numeric_value(value).is_some_and(|n| n > *threshold)
            }
            FieldPredicate::LessThan(threshold) => {
                numeric_value(value).is_some_and(|n| n < *threshold)
            }
            #[allow(clippy::float_cmp)]
            FieldPredicate::NumericEquals(expected) => {
                numeric_value(value).is_some_and(|n| n == *expected)
            }
            FieldPredicate::Never => false,
        }
    }
}

/// A field paired with its compiled predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCheck {
    pub field: Field,
    pub predicate: FieldPredicate,
}

impl FieldCheck {
    /// An absent (or null) field never matches.
    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(self.field.name())
            .is_some_and(|value| self.predicate.matches(value))
    }
}

/// A criterion row ready for evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledCriterion {
    pub checks: Vec<FieldCheck>,
}

impl CompiledCriterion {
    /// Compile a row, dropping blank entries.
    pub fn compile(row: &CriterionRow, table: &StrategyTable) -> Self {
        let checks = row
            .active()
            .map(|(name, value)| {
                let field = Field::parse(name);
                let predicate = FieldPredicate::compile(table.strategy_for(&field), value);
                FieldCheck { field, predicate }
            })
            .collect();
        Self { checks }
    }

    /// A record matches when it passes every check; stops at the first failure.
    pub fn matches(&self, record: &Record) -> bool {
        self.checks.iter().all(|check| check.matches(record))
    }
}

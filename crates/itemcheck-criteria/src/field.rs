//! Item fields and the per-field comparison strategy table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A record field name, with the well-known item fields spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Description,
    Category,
    Price,
    Stock,
    Available,
    /// Any field not part of the item schema.
    Other(String),
}

impl Field {
    /// Parse a field name. Names are case-sensitive, as record keys are.
    pub fn parse(name: &str) -> Self {
        match name {
            "id" => Field::Id,
            "name" => Field::Name,
            "description" => Field::Description,
            "category" => Field::Category,
            "price" => Field::Price,
            "stock" => Field::Stock,
            "available" => Field::Available,
            other => Field::Other(other.to_string()),
        }
    }

    /// The record key for this field.
    pub fn name(&self) -> &str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Description => "description",
            Field::Category => "category",
            Field::Price => "price",
            Field::Stock => "stock",
            Field::Available => "available",
            Field::Other(name) => name,
        }
    }

    /// Built-in comparison strategy for this field.
    pub fn default_strategy(&self) -> MatchStrategy {
        match self {
            Field::Description => MatchStrategy::Substring,
            Field::Price | Field::Stock => MatchStrategy::NumericRange,
            Field::Available => MatchStrategy::CaseInsensitive,
            Field::Id | Field::Name | Field::Category | Field::Other(_) => MatchStrategy::Exact,
        }
    }
}

impl FromStr for Field {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Field::parse(s))
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::parse(name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a criterion value is compared against a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Rendered value equals the criterion, case-sensitive.
    Exact,
    /// Criterion is a substring of the rendered value, case-sensitive.
    Substring,
    /// `>n` / `<n` thresholds, otherwise numeric equality.
    NumericRange,
    /// Rendered value equals the criterion ignoring case.
    CaseInsensitive,
}

impl MatchStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Substring => "substring",
            MatchStrategy::NumericRange => "numeric_range",
            MatchStrategy::CaseInsensitive => "case_insensitive",
        }
    }
}

/// Maps fields to comparison strategies.
///
/// Fields without an override use [`Field::default_strategy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyTable {
    overrides: HashMap<String, MatchStrategy>,
}

impl StrategyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the strategy for one field.
    pub fn with_override(mut self, field: impl Into<String>, strategy: MatchStrategy) -> Self {
        self.overrides.insert(field.into(), strategy);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, strategy: MatchStrategy) {
        self.overrides.insert(field.into(), strategy);
    }

    /// Strategy used for `field`.
    pub fn strategy_for(&self, field: &Field) -> MatchStrategy {
        self.overrides
            .get(field.name())
            .copied()
            .unwrap_or_else(|| field.default_strategy())
    }

    pub fn is_default(&self) -> bool {
        self.overrides.is_empty()
    }
}

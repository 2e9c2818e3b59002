//! Criteria files.
//!
//! Two layouts are accepted, in YAML or JSON:
//!
//! ```yaml
//! - { price: ">100" }
//! - { description: "prueba", available: true }
//! ```
//!
//! or, with strategy overrides:
//!
//! ```yaml
//! strategies:
//!   category: case_insensitive
//! criteria:
//!   - { category: "tools" }
//! ```

use crate::criterion::CriterionRow;
use crate::field::StrategyTable;
use crate::matcher::Matcher;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CriteriaFileError {
    #[error("Failed to read criteria file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid criteria in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
}

/// Parsed criteria plus any strategy overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaFile {
    pub criteria: Vec<CriterionRow>,
    pub strategies: StrategyTable,
}

impl CriteriaFile {
    /// A matcher configured with this file's strategy table.
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.strategies.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCriteriaFile {
    Rows(Vec<CriterionRow>),
    Full {
        criteria: Vec<CriterionRow>,
        #[serde(default)]
        strategies: StrategyTable,
    },
}

impl From<RawCriteriaFile> for CriteriaFile {
    fn from(raw: RawCriteriaFile) -> Self {
        match raw {
            RawCriteriaFile::Rows(criteria) => CriteriaFile {
                criteria,
                strategies: StrategyTable::default(),
            },
            RawCriteriaFile::Full {
                criteria,
                strategies,
            } => CriteriaFile {
                criteria,
                strategies,
            },
        }
    }
}

/// Parse criteria from a YAML or JSON string.
pub fn parse_criteria(content: &str, source_name: &str) -> Result<CriteriaFile, CriteriaFileError> {
    let raw: RawCriteriaFile =
        serde_yaml::from_str(content).map_err(|e| CriteriaFileError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    let file = CriteriaFile::from(raw);
    debug!(
        source = source_name,
        rows = file.criteria.len(),
        "Parsed criteria"
    );
    Ok(file)
}

/// Load criteria from a file on disk.
pub fn load_criteria(path: &Path) -> Result<CriteriaFile, CriteriaFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| CriteriaFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_criteria(&content, &path.display().to_string())
}

//! Criteria matching for item collections.
//!
//! This library validates a collection of [`Record`]s against an ordered list
//! of [`CriterionRow`]s. Each row maps field names to predicate strings; the
//! comparison used for a field comes from a [`StrategyTable`]:
//!
//! - `description`: substring match
//! - `price`, `stock`: `>n` / `<n` thresholds, otherwise numeric equality
//! - `available`: case-insensitive equality
//! - anything else: exact equality of the rendered value
//!
//! Blank criterion values are ignored. A missing field never matches, and a
//! value that fails to parse as a number is a non-match rather than an error.
//!
//! # Example
//!
//! ```
//! use itemcheck_criteria::{match_rows, CriterionRow, Record};
//!
//! let items = vec![
//!     Record::new().with("id", 1).with("price", 50).with("available", true),
//!     Record::new().with("id", 2).with("price", 150).with("available", false),
//! ];
//! let criteria = vec![CriterionRow::new().with("price", ">100")];
//!
//! let results = match_rows(&items, &criteria).unwrap();
//! assert_eq!(results[0].matched[0].id(), Some(2));
//! ```

mod criterion;
mod field;
mod file;
mod matcher;
mod record;

// Re-export public types
pub use criterion::{CompiledCriterion, CriterionRow, FieldCheck, FieldPredicate};
pub use field::{Field, MatchStrategy, StrategyTable};
pub use file::{load_criteria, parse_criteria, CriteriaFile, CriteriaFileError};
pub use matcher::{evaluate_rows, match_rows, Matcher, NoMatchError, RowMatch, VerificationReport};
pub use record::{numeric_value, render_value, Record, REQUIRED_FIELDS};

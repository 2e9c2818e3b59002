//! Row-by-row evaluation of criteria against a record collection.
//!
//! [`Matcher::match_rows`] is fail-fast: the first row with no matching record
//! aborts with a [`NoMatchError`]. [`Matcher::evaluate_rows`] evaluates every
//! row and hands back a [`VerificationReport`] for callers that want to list
//! all failing rows.

use crate::criterion::{CompiledCriterion, CriterionRow};
use crate::field::StrategyTable;
use crate::record::Record;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A criterion row matched zero records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no item matches criteria row {index}: {criteria}")]
pub struct NoMatchError {
    /// Zero-based position of the row in the request.
    pub index: usize,
    pub criteria: CriterionRow,
}

/// Records that satisfied one criterion row, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowMatch {
    pub index: usize,
    pub criteria: CriterionRow,
    pub matched: Vec<Record>,
}

impl RowMatch {
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Outcome of evaluating every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationReport {
    pub rows: Vec<RowMatch>,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.rows.iter().all(RowMatch::is_match)
    }

    /// Rows that matched nothing, as errors.
    pub fn failures(&self) -> Vec<NoMatchError> {
        self.rows
            .iter()
            .filter(|row| !row.is_match())
            .map(|row| NoMatchError {
                index: row.index,
                criteria: row.criteria.clone(),
            })
            .collect()
    }

    pub fn first_failure(&self) -> Option<NoMatchError> {
        self.failures().into_iter().next()
    }

    /// Collapse to the fail-fast result shape.
    pub fn into_result(self) -> Result<Vec<RowMatch>, NoMatchError> {
        match self.first_failure() {
            Some(err) => Err(err),
            None => Ok(self.rows),
        }
    }
}

/// Evaluates criterion rows under a strategy table.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    table: StrategyTable,
}

impl Matcher {
    pub fn new(table: StrategyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StrategyTable {
        &self.table
    }

    /// Records satisfying a single row, preserving input order.
    pub fn filter(&self, records: &[Record], row: &CriterionRow) -> Vec<Record> {
        let compiled = CompiledCriterion::compile(row, &self.table);
        records
            .iter()
            .filter(|record| compiled.matches(record))
            .cloned()
            .collect()
    }

    fn evaluate_row(&self, records: &[Record], index: usize, row: &CriterionRow) -> RowMatch {
        let matched = self.filter(records, row);
        debug!(
            row = index,
            criteria = %row,
            matched = matched.len(),
            "Evaluated criteria row"
        );
        RowMatch {
            index,
            criteria: row.clone(),
            matched,
        }
    }

    /// Evaluate rows in order, failing on the first row with no match.
    pub fn match_rows(
        &self,
        records: &[Record],
        criteria: &[CriterionRow],
    ) -> Result<Vec<RowMatch>, NoMatchError> {
        let mut results = Vec::with_capacity(criteria.len());
        for (index, row) in criteria.iter().enumerate() {
            let result = self.evaluate_row(records, index, row);
            if !result.is_match() {
                warn!(row = index, criteria = %row, "No item matches criteria");
                return Err(NoMatchError {
                    index,
                    criteria: row.clone(),
                });
            }
            info!(
                row = index,
                criteria = %row,
                matched = result.matched.len(),
                "Criteria satisfied"
            );
            results.push(result);
        }
        info!(rows = results.len(), "All criteria verified against items");
        Ok(results)
    }

    /// Evaluate every row regardless of failures.
    pub fn evaluate_rows(&self, records: &[Record], criteria: &[CriterionRow]) -> VerificationReport {
        let rows: Vec<RowMatch> = criteria
            .iter()
            .enumerate()
            .map(|(index, row)| self.evaluate_row(records, index, row))
            .collect();
        let report = VerificationReport { rows };
        let failed = report.rows.iter().filter(|r| !r.is_match()).count();
        if failed > 0 {
            warn!(rows = report.rows.len(), failed, "Criteria verification failed");
        } else {
            info!(rows = report.rows.len(), "All criteria verified against items");
        }
        report
    }
}

/// Fail-fast matching with the default strategy table.
pub fn match_rows(
    records: &[Record],
    criteria: &[CriterionRow],
) -> Result<Vec<RowMatch>, NoMatchError> {
    Matcher::default().match_rows(records, criteria)
}

/// Accumulating evaluation with the default strategy table.
pub fn evaluate_rows(records: &[Record], criteria: &[CriterionRow]) -> VerificationReport {
    Matcher::default().evaluate_rows(records, criteria)
}

//! Per-scenario error ledger.
//!
//! Soft failures are recorded here instead of aborting immediately, then
//! reported together when the scenario ends. Each scenario owns its own
//! ledger; nothing is shared between runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEntry {
    pub recorded_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDiagnostics {
    scenario: String,
    started_at: DateTime<Utc>,
    errors: Vec<DiagnosticEntry>,
}

impl ScenarioDiagnostics {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            started_at: Utc::now(),
            errors: Vec::new(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record an error and log it immediately.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!(scenario = %self.scenario, "{}", message);
        self.errors.push(DiagnosticEntry {
            recorded_at: Utc::now(),
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[DiagnosticEntry] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Log the outcome and drain the ledger.
    pub fn finish(&mut self) -> Vec<DiagnosticEntry> {
        let elapsed = Utc::now() - self.started_at;
        if self.errors.is_empty() {
            info!(
                scenario = %self.scenario,
                elapsed_ms = elapsed.num_milliseconds(),
                "Scenario finished without errors"
            );
        } else {
            warn!(
                scenario = %self.scenario,
                errors = self.errors.len(),
                elapsed_ms = elapsed.num_milliseconds(),
                "Scenario accumulated errors"
            );
        }
        std::mem::take(&mut self.errors)
    }
}

//! Audit report for the cleaning pipeline.
//!
//! Every check records what it changed; the report never influences
//! control flow. It exists so the caller can see, per step, how many
//! cells were nulled, how many were filled, and how many rows were
//! dropped on the way to the cleaned table.

use serde::{Deserialize, Serialize};

/// The changes made by one pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepChange {
    /// Name of the step (e.g. "validate_dates").
    pub step: String,

    /// Columns the step operated on.
    pub columns: Vec<String>,

    /// Number of cells converted to null.
    pub values_nulled: usize,

    /// Number of null cells filled in.
    pub values_filled: usize,

    /// Number of rows removed from the table.
    pub rows_dropped: usize,

    /// Human-readable summary of the change.
    pub description: String,
}

/// Accumulated report over a whole cleaning run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanReport {
    /// Per-step changes, in execution order.
    pub steps: Vec<StepChange>,

    /// Total cells converted to null.
    pub total_values_nulled: usize,

    /// Total null cells filled in.
    pub total_values_filled: usize,

    /// Total rows removed.
    pub total_rows_dropped: usize,
}

impl CleanReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step's changes and update the totals.
    pub fn add_step(&mut self, change: StepChange) {
        self.total_values_nulled += change.values_nulled;
        self.total_values_filled += change.values_filled;
        self.total_rows_dropped += change.rows_dropped;
        self.steps.push(change);
    }
}

//! Audit trace models.
//!
//! Every engine stage records an [`AuditStep`] describing what it read and
//! what it produced, so a dashboard figure can be traced back to its inputs.

use serde::{Deserialize, Serialize};

use super::MetricsSnapshot;

/// A single step in the audit trace recording a computation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Stable identifier of the stage (e.g. "turnover").
    pub rule_id: String,
    /// Human-readable stage name.
    pub rule_name: String,
    /// The input figures for this step.
    pub input: serde_json::Value,
    /// The figures produced by this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning generated during computation.
///
/// Warnings flag defaults or estimates that were applied; they never stop
/// the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The stages, in execution order.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during computation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Looks up a step by its rule id.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// A snapshot together with the trace that explains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// The computed metrics.
    pub snapshot: MetricsSnapshot,
    /// How they were computed.
    pub audit_trace: AuditTrace,
}

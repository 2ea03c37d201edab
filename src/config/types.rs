//! Configuration types for the KPI engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the engine configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short name of the configuration set (e.g., "default").
    pub name: String,
    /// The version of the assumptions.
    pub version: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            version: "1".to_string(),
            description: String::new(),
        }
    }
}

/// How the employer total cost accumulates gross payroll over
/// remuneration records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployerCostMode {
    /// Gross payroll total plus the sum of charges.
    #[default]
    Corrected,
    /// Re-adds the running gross payroll on every record, matching the
    /// figures published by the legacy dashboard.
    LegacyCumulative,
}

/// Constants the engine computes with.
#[derive(Debug, Clone, Deserialize)]
pub struct Assumptions {
    /// Working days in a month, used for absenteeism.
    pub working_days_per_month: Decimal,
    /// Employer cost over gross payroll when no remuneration data exists.
    pub employer_charge_multiplier: Decimal,
    /// Age assumed for employees without a birth date.
    pub default_age: i32,
    /// Length of the trailing turnover window, in calendar months.
    pub turnover_window_months: u32,
    /// Multiplier turning the window exit rate into a yearly rate.
    pub turnover_annualization_factor: Decimal,
    /// Number of entries in the ranked site and cost-center lists.
    pub ranking_limit: usize,
    /// Grouping label for employees without a site or cost center.
    pub undefined_label: String,
    /// Employer total cost accumulation.
    #[serde(default)]
    pub employer_cost_mode: EmployerCostMode,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            working_days_per_month: Decimal::from(22),
            employer_charge_multiplier: Decimal::new(145, 2),
            default_age: 30,
            turnover_window_months: 3,
            turnover_annualization_factor: Decimal::from(4),
            ranking_limit: 5,
            undefined_label: "undefined".to_string(),
            employer_cost_mode: EmployerCostMode::Corrected,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Configuration metadata.
    metadata: EngineMetadata,
    /// Computation constants.
    assumptions: Assumptions,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, assumptions: Assumptions) -> Self {
        Self {
            metadata,
            assumptions,
        }
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the computation constants.
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Returns a copy using a different employer cost mode.
    pub fn with_employer_cost_mode(mut self, mode: EmployerCostMode) -> Self {
        self.assumptions.employer_cost_mode = mode;
        self
    }
}

//! Core data models for the HR KPI engine.
//!
//! This module contains the input records read by the engine and the
//! snapshot and audit types it produces.

mod absence;
mod audit;
mod employee;
mod remuneration;
mod snapshot;

pub use absence::AbsenceRecord;
pub use audit::{AuditStep, AuditTrace, AuditWarning, MetricsReport};
pub use employee::{ContractType, Employee, EmploymentStatus, Sex};
pub use remuneration::RemunerationRecord;
pub use snapshot::{
    AbsenceTypeBreakdown, AbsenteeismMetrics, AgeBucket, AgePyramid, CompensationMetrics,
    CostCenterBreakdown, DemographicMetrics, HeadcountMetrics, MetricsSnapshot,
    OrganizationMetrics, PayrollSource, SiteBreakdown, TurnoverMetrics,
};

//! Calculation logic for the HR KPI engine.
//!
//! Each stage of the snapshot lives in its own module and returns its
//! metrics together with the audit step that explains them: headcount and
//! contract mix, turnover, demographics, compensation, absenteeism and the
//! organization breakdown. [`compute_metrics`] validates the inputs and runs
//! the stages in order.

mod absenteeism;
mod compensation;
mod demographics;
mod engine;
mod grouping;
mod headcount;
mod organization;
mod ratio;
mod turnover;
mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use absenteeism::{AbsenteeismResult, calculate_absenteeism, group_absences_by_type};
pub use compensation::{CompensationResult, PayrollTotals, calculate_compensation, sum_remunerations};
pub use demographics::{DAYS_PER_TENURE_YEAR, DemographicsResult, calculate_demographics};
pub use engine::{compute_metrics, compute_snapshot};
pub use headcount::{HeadcountResult, calculate_headcount};
pub use organization::{OrganizationResult, calculate_organization};
pub use ratio::{percent_of, percentage, safe_div};
pub use turnover::{TurnoverResult, calculate_turnover, turnover_rate, turnover_window_start};
pub use validation::validate_inputs;

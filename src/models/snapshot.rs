//! Metrics snapshot models.
//!
//! This module contains the [`MetricsSnapshot`] type produced by the KPI
//! engine and the grouped metric structures it is made of. A snapshot is
//! built fresh on every computation and never mutated afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headcount and contract mix over the active population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountMetrics {
    /// Every employee on the roster, active or not.
    pub total_employees: usize,
    /// Employees with an active status.
    pub active_headcount: usize,
    /// Full-time equivalent (sum of work-time fractions).
    pub fte_total: Decimal,
    /// Active employees on a permanent contract.
    pub permanent_count: usize,
    /// Active employees on a fixed-term contract.
    pub fixed_term_count: usize,
    /// Active apprentices.
    pub apprenticeship_count: usize,
    /// Active interns.
    pub internship_count: usize,
    /// Permanent share of active headcount, in percent.
    pub pct_permanent: Decimal,
    /// Fixed-term share of active headcount, in percent.
    pub pct_fixed_term: Decimal,
    /// Apprenticeship share of active headcount, in percent.
    pub pct_apprenticeship: Decimal,
    /// Internship share of active headcount, in percent.
    pub pct_internship: Decimal,
}

/// Entries, exits and the annualized turnover rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnoverMetrics {
    /// First day of the trailing window (inclusive).
    pub window_start: NaiveDate,
    /// Last day of the trailing window (inclusive), the reference date.
    pub window_end: NaiveDate,
    /// Employees hired inside the window.
    pub entries: usize,
    /// Employees who left inside the window.
    pub exits: usize,
    /// Mean of the current and the window-adjusted headcount.
    pub average_headcount: Decimal,
    /// Quarterly exit rate multiplied by four, in percent.
    pub turnover_rate: Decimal,
}

/// Age bracket used by the age pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    /// Younger than 30.
    Under30,
    /// 30 to 39 inclusive.
    From30To39,
    /// 40 to 49 inclusive.
    From40To49,
    /// 50 and older.
    From50,
}

impl AgeBucket {
    /// Returns the bracket an age falls into.
    ///
    /// ```
    /// use hr_kpi_engine::models::AgeBucket;
    ///
    /// assert_eq!(AgeBucket::for_age(29), AgeBucket::Under30);
    /// assert_eq!(AgeBucket::for_age(30), AgeBucket::From30To39);
    /// assert_eq!(AgeBucket::for_age(50), AgeBucket::From50);
    /// ```
    pub fn for_age(age: i32) -> Self {
        match age {
            a if a < 30 => AgeBucket::Under30,
            30..=39 => AgeBucket::From30To39,
            40..=49 => AgeBucket::From40To49,
            _ => AgeBucket::From50,
        }
    }
}

/// Head counts per age bracket.
///
/// Only employees with a known birth date are counted, so the total may
/// be lower than the active headcount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgePyramid {
    /// Younger than 30.
    pub under_30: usize,
    /// 30 to 39.
    pub from_30_to_39: usize,
    /// 40 to 49.
    pub from_40_to_49: usize,
    /// 50 and older.
    pub from_50: usize,
}

impl AgePyramid {
    /// Adds one employee to the given bracket.
    pub fn record(&mut self, bucket: AgeBucket) {
        match bucket {
            AgeBucket::Under30 => self.under_30 += 1,
            AgeBucket::From30To39 => self.from_30_to_39 += 1,
            AgeBucket::From40To49 => self.from_40_to_49 += 1,
            AgeBucket::From50 => self.from_50 += 1,
        }
    }

    /// Number of employees counted across all brackets.
    pub fn total(&self) -> usize {
        self.under_30 + self.from_30_to_39 + self.from_40_to_49 + self.from_50
    }
}

/// Sex split, age and tenure of the active population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicMetrics {
    /// Active men.
    pub male_count: usize,
    /// Active women.
    pub female_count: usize,
    /// Share of men, in percent.
    pub pct_male: Decimal,
    /// Share of women, in percent.
    pub pct_female: Decimal,
    /// Mean age in years (unknown birth dates count as the default age).
    pub average_age: Decimal,
    /// Mean seniority in 365-day years.
    pub average_tenure_years: Decimal,
    /// Head counts per age bracket.
    pub age_pyramid: AgePyramid,
}

/// Where the payroll figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollSource {
    /// Summed from remuneration records.
    Remunerations,
    /// Estimated from contractual base salaries.
    BaseSalaryEstimate,
}

/// Payroll cost, averages and leave balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationMetrics {
    /// Where the figures came from.
    pub source: PayrollSource,
    /// Gross payroll.
    pub gross_payroll: Decimal,
    /// Gross payroll plus employer charges.
    pub employer_total_cost: Decimal,
    /// Gross payroll per FTE.
    pub average_gross_salary: Decimal,
    /// Employer cost per FTE.
    pub average_employer_cost: Decimal,
    /// Total variable bonuses.
    pub variable_pay_total: Decimal,
    /// Variable bonuses as a share of gross payroll, in percent.
    pub variable_pay_share: Decimal,
    /// Paid-leave days banked.
    pub paid_leave_days: Decimal,
    /// RTT days banked.
    pub rtt_days: Decimal,
    /// Provisioned value of all banked leave.
    pub leave_provision_value: Decimal,
}

/// Absence events grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceTypeBreakdown {
    /// The absence category.
    pub absence_type: String,
    /// Number of events.
    pub events: usize,
    /// Total days absent.
    pub days: Decimal,
}

/// Absenteeism rate, durations and cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenteeismMetrics {
    /// Active headcount times the monthly working days.
    pub theoretical_days: Decimal,
    /// Total days absent.
    pub absence_days: Decimal,
    /// Number of absence events.
    pub absence_events: usize,
    /// Absence days over theoretical days, in percent.
    pub absenteeism_rate: Decimal,
    /// Days per absence event.
    pub average_absence_duration: Decimal,
    /// Employer cost of one FTE working day.
    pub average_daily_cost: Decimal,
    /// Absence days valued at the average daily cost.
    pub absenteeism_cost: Decimal,
    /// Per-category breakdown, most days first.
    pub by_type: Vec<AbsenceTypeBreakdown>,
}

/// Headcount of one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteBreakdown {
    /// Site code, or the undefined label.
    pub site: String,
    /// Active employees on the site.
    pub headcount: usize,
}

/// Headcount and base payroll of one cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterBreakdown {
    /// Cost-center code, or the undefined label.
    pub cost_center: String,
    /// Active employees allocated to it.
    pub headcount: usize,
    /// Sum of their base monthly salaries.
    pub payroll: Decimal,
}

/// Site and cost-center breakdowns of the active population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMetrics {
    /// Sites, largest headcount first.
    pub by_site: Vec<SiteBreakdown>,
    /// Cost centers, largest payroll first.
    pub by_cost_center: Vec<CostCenterBreakdown>,
}

/// The complete KPI snapshot for one tenant at one reference date.
///
/// Ratios are kept at full precision; rounding is left to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// The date the snapshot was computed for.
    pub reference_date: NaiveDate,
    /// Headcount and contract mix.
    pub headcount: HeadcountMetrics,
    /// Entries, exits and turnover.
    pub turnover: TurnoverMetrics,
    /// Sex split, age, tenure.
    pub demographics: DemographicMetrics,
    /// Payroll and leave.
    pub compensation: CompensationMetrics,
    /// Absence figures.
    pub absenteeism: AbsenteeismMetrics,
    /// Site and cost-center breakdowns.
    pub organization: OrganizationMetrics,
}

impl MetricsSnapshot {
    /// The `limit` largest sites by headcount.
    pub fn top_sites(&self, limit: usize) -> &[SiteBreakdown] {
        let sites = &self.organization.by_site;
        &sites[..limit.min(sites.len())]
    }

    /// The `limit` largest cost centers by payroll.
    pub fn top_cost_centers(&self, limit: usize) -> &[CostCenterBreakdown] {
        let centers = &self.organization.by_cost_center;
        &centers[..limit.min(centers.len())]
    }
}

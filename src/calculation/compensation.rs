//! Payroll cost and leave balances.
//!
//! Figures come from remuneration records when the payroll export provides
//! any for the active population. Otherwise gross payroll is estimated from
//! contractual base salaries and employer cost from a flat charge
//! multiplier.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::config::EmployerCostMode;
use crate::models::{
    AuditStep, AuditWarning, CompensationMetrics, Employee, PayrollSource, RemunerationRecord,
};

use super::ratio::{percent_of, safe_div};

/// The result of the compensation stage.
#[derive(Debug, Clone)]
pub struct CompensationResult {
    /// Payroll and leave figures.
    pub metrics: CompensationMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
    /// Estimates or legacy behaviour that were applied.
    pub warnings: Vec<AuditWarning>,
}

/// Sums of one pass over remuneration records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollTotals {
    /// Gross payroll.
    pub gross_payroll: Decimal,
    /// Employer total cost.
    pub employer_total_cost: Decimal,
    /// Variable bonuses.
    pub variable_pay: Decimal,
    /// Paid-leave days banked.
    pub paid_leave_days: Decimal,
    /// RTT days banked.
    pub rtt_days: Decimal,
    /// Provisioned value of banked leave.
    pub leave_provision: Decimal,
}

/// Sums remuneration records in a single pass.
///
/// With [`EmployerCostMode::Corrected`] the employer cost is the gross
/// payroll total plus every charge. With
/// [`EmployerCostMode::LegacyCumulative`] the running gross payroll is added
/// again on every record, which overstates the cost as soon as there is more
/// than one record.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::sum_remunerations;
/// use hr_kpi_engine::config::EmployerCostMode;
/// use hr_kpi_engine::models::RemunerationRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let records = vec![
///     RemunerationRecord {
///         base_salary: Decimal::from(1000),
///         social_contributions: Decimal::from(400),
///         ..RemunerationRecord::new("emp_001", period)
///     },
///     RemunerationRecord {
///         base_salary: Decimal::from(2000),
///         social_contributions: Decimal::from(800),
///         ..RemunerationRecord::new("emp_002", period)
///     },
/// ];
/// let refs: Vec<&RemunerationRecord> = records.iter().collect();
///
/// let corrected = sum_remunerations(&refs, EmployerCostMode::Corrected);
/// assert_eq!(corrected.employer_total_cost, Decimal::from(4200));
///
/// // 1000 + 400, then (1000 + 2000) + 800
/// let legacy = sum_remunerations(&refs, EmployerCostMode::LegacyCumulative);
/// assert_eq!(legacy.employer_total_cost, Decimal::from(5200));
/// ```
pub fn sum_remunerations(
    records: &[&RemunerationRecord],
    mode: EmployerCostMode,
) -> PayrollTotals {
    let mut totals = PayrollTotals::default();
    let mut charges = Decimal::ZERO;

    for record in records {
        totals.gross_payroll += record.gross_salary();
        totals.variable_pay += record.variable_bonus;
        totals.paid_leave_days += record.paid_leave_days;
        totals.rtt_days += record.rtt_days;
        totals.leave_provision += record.leave_provision();

        match mode {
            EmployerCostMode::Corrected => charges += record.employer_charges(),
            EmployerCostMode::LegacyCumulative => {
                totals.employer_total_cost += totals.gross_payroll + record.employer_charges();
            }
        }
    }

    if mode == EmployerCostMode::Corrected {
        totals.employer_total_cost = totals.gross_payroll + charges;
    }

    totals
}

/// Computes payroll figures for the active population.
///
/// Remuneration records belonging to employees outside the active
/// population are ignored. When no record remains, gross payroll is the sum
/// of base monthly salaries and employer cost is gross × `charge_multiplier`.
/// Averages divide by `fte_total` and are 0 when it is 0.
pub fn calculate_compensation(
    active: &[&Employee],
    remunerations: &[RemunerationRecord],
    fte_total: Decimal,
    charge_multiplier: Decimal,
    mode: EmployerCostMode,
    step_number: u32,
) -> CompensationResult {
    let active_ids: HashSet<&str> = active.iter().map(|e| e.id.as_str()).collect();
    let records: Vec<&RemunerationRecord> = remunerations
        .iter()
        .filter(|r| active_ids.contains(r.employee_id.as_str()))
        .collect();
    let ignored_records = remunerations.len() - records.len();

    let mut warnings = Vec::new();
    if ignored_records > 0 {
        warnings.push(AuditWarning::new(
            "IGNORED_REMUNERATION_RECORDS",
            format!(
                "{} remuneration record(s) belong to inactive or unknown employees and were ignored",
                ignored_records
            ),
            "low",
        ));
    }

    let (source, totals) = if records.is_empty() {
        let gross_payroll: Decimal = active.iter().map(|e| e.base_monthly_salary).sum();
        if !active.is_empty() {
            warnings.push(AuditWarning::new(
                "NO_REMUNERATION_DATA",
                format!(
                    "No remuneration records; employer cost estimated as base salaries × {}",
                    charge_multiplier.normalize()
                ),
                "medium",
            ));
        }
        (
            PayrollSource::BaseSalaryEstimate,
            PayrollTotals {
                gross_payroll,
                employer_total_cost: gross_payroll * charge_multiplier,
                ..PayrollTotals::default()
            },
        )
    } else {
        if mode == EmployerCostMode::LegacyCumulative {
            warnings.push(AuditWarning::new(
                "LEGACY_EMPLOYER_COST",
                "Employer cost re-adds the running gross payroll on every record",
                "high",
            ));
        }
        (PayrollSource::Remunerations, sum_remunerations(&records, mode))
    };

    let metrics = CompensationMetrics {
        source,
        gross_payroll: totals.gross_payroll,
        employer_total_cost: totals.employer_total_cost,
        average_gross_salary: safe_div(totals.gross_payroll, fte_total),
        average_employer_cost: safe_div(totals.employer_total_cost, fte_total),
        variable_pay_total: totals.variable_pay,
        variable_pay_share: percent_of(totals.variable_pay, totals.gross_payroll),
        paid_leave_days: totals.paid_leave_days,
        rtt_days: totals.rtt_days,
        leave_provision_value: totals.leave_provision,
    };

    let reasoning = match source {
        PayrollSource::Remunerations => format!(
            "Summed {} remuneration record(s): gross {}, employer cost {}",
            records.len(),
            metrics.gross_payroll.normalize(),
            metrics.employer_total_cost.normalize()
        ),
        PayrollSource::BaseSalaryEstimate => format!(
            "Estimated from {} base salaries: gross {} × {} = {}",
            active.len(),
            metrics.gross_payroll.normalize(),
            charge_multiplier.normalize(),
            metrics.employer_total_cost.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "compensation".to_string(),
        rule_name: "Compensation".to_string(),
        input: serde_json::json!({
            "remuneration_records": remunerations.len(),
            "records_used": records.len(),
            "fte_total": fte_total.to_string(),
            "employer_cost_mode": match mode {
                EmployerCostMode::Corrected => "corrected",
                EmployerCostMode::LegacyCumulative => "legacy_cumulative",
            }
        }),
        output: serde_json::json!({
            "source": match source {
                PayrollSource::Remunerations => "remunerations",
                PayrollSource::BaseSalaryEstimate => "base_salary_estimate",
            },
            "gross_payroll": metrics.gross_payroll.to_string(),
            "employer_total_cost": metrics.employer_total_cost.to_string(),
            "variable_pay_share": metrics.variable_pay_share.to_string()
        }),
        reasoning,
    };

    CompensationResult {
        metrics,
        audit_step,
        warnings,
    }
}

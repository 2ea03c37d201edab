//! Headcount, FTE and contract mix.

use rust_decimal::Decimal;

use crate::models::{AuditStep, ContractType, Employee, HeadcountMetrics};

use super::ratio::percentage;

/// The result of the headcount stage, including the audit step.
#[derive(Debug, Clone)]
pub struct HeadcountResult {
    /// Headcount and contract mix.
    pub metrics: HeadcountMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

/// Computes FTE and the contract mix of the active population.
///
/// `total_employees` is the size of the whole roster; `active` is the
/// already-filtered active population every share is computed against.
/// Shares are 0 when there is no active employee.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::calculate_headcount;
/// use hr_kpi_engine::models::{ContractType, Employee, EmploymentStatus, Sex};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     contract_type: ContractType::FixedTerm,
///     status: EmploymentStatus::Active,
///     work_time_fraction: Decimal::new(5, 1),
///     birth_date: None,
///     hire_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
///     departure_date: None,
///     sex: Sex::Female,
///     base_monthly_salary: Decimal::from(1900),
///     site: None,
///     cost_center: None,
/// };
///
/// let result = calculate_headcount(1, &[&employee], 1);
/// assert_eq!(result.metrics.fte_total, Decimal::new(5, 1));
/// assert_eq!(result.metrics.pct_fixed_term, Decimal::ONE_HUNDRED);
/// ```
pub fn calculate_headcount(
    total_employees: usize,
    active: &[&Employee],
    step_number: u32,
) -> HeadcountResult {
    let active_headcount = active.len();
    let fte_total: Decimal = active.iter().map(|e| e.work_time_fraction).sum();

    let count_of = |contract: ContractType| {
        active
            .iter()
            .filter(|e| e.contract_type == contract)
            .count()
    };
    let permanent_count = count_of(ContractType::Permanent);
    let fixed_term_count = count_of(ContractType::FixedTerm);
    let apprenticeship_count = count_of(ContractType::Apprenticeship);
    let internship_count = count_of(ContractType::Internship);

    let metrics = HeadcountMetrics {
        total_employees,
        active_headcount,
        fte_total,
        permanent_count,
        fixed_term_count,
        apprenticeship_count,
        internship_count,
        pct_permanent: percentage(permanent_count, active_headcount),
        pct_fixed_term: percentage(fixed_term_count, active_headcount),
        pct_apprenticeship: percentage(apprenticeship_count, active_headcount),
        pct_internship: percentage(internship_count, active_headcount),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "headcount".to_string(),
        rule_name: "Headcount & Contract Mix".to_string(),
        input: serde_json::json!({
            "total_employees": total_employees,
            "active_headcount": active_headcount
        }),
        output: serde_json::json!({
            "fte_total": fte_total.to_string(),
            "cdi": permanent_count,
            "cdd": fixed_term_count,
            "alternance": apprenticeship_count,
            "stage": internship_count
        }),
        reasoning: format!(
            "{} active of {} employees, {} FTE",
            active_headcount,
            total_employees,
            fte_total.normalize()
        ),
    };

    HeadcountResult {
        metrics,
        audit_step,
    }
}

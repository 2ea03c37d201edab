//! The KPI aggregation pipeline.
//!
//! Runs validation and then every stage in a fixed order, numbering audit
//! steps as it goes. The pipeline borrows its inputs and performs no I/O.

use chrono::NaiveDate;
use std::time::Instant;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AbsenceRecord, AuditTrace, Employee, MetricsReport, MetricsSnapshot, RemunerationRecord,
};

use super::absenteeism::calculate_absenteeism;
use super::compensation::calculate_compensation;
use super::demographics::calculate_demographics;
use super::headcount::calculate_headcount;
use super::organization::calculate_organization;
use super::turnover::calculate_turnover;
use super::validation::validate_inputs;

/// Computes the metrics snapshot together with its audit trace.
///
/// Stages run in this order: headcount, turnover, demographics,
/// compensation, absenteeism, organization. Absenteeism reads the FTE total
/// and employer cost produced earlier. An empty roster yields an all-zero
/// snapshot.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidEmployee`] or
/// [`crate::error::EngineError::InvalidRecord`] when an input record is
/// malformed, and [`crate::error::EngineError::CalculationError`] when the
/// turnover window cannot be placed before `reference_date`.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::compute_metrics;
/// use hr_kpi_engine::config::EngineConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let reference = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let report = compute_metrics(&[], &[], &[], reference, &EngineConfig::default()).unwrap();
///
/// assert_eq!(report.snapshot.headcount.active_headcount, 0);
/// assert_eq!(report.snapshot.turnover.turnover_rate, Decimal::ZERO);
/// assert_eq!(report.audit_trace.steps.len(), 6);
/// ```
pub fn compute_metrics(
    employees: &[Employee],
    remunerations: &[RemunerationRecord],
    absences: &[AbsenceRecord],
    reference_date: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<MetricsReport> {
    let start_time = Instant::now();
    debug!(
        employees = employees.len(),
        remunerations = remunerations.len(),
        absences = absences.len(),
        reference_date = %reference_date,
        "Computing metrics snapshot"
    );

    validate_inputs(employees, remunerations, absences)?;

    let assumptions = config.assumptions();
    let active: Vec<&Employee> = employees.iter().filter(|e| e.is_active()).collect();

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let headcount = calculate_headcount(employees.len(), &active, step_number);
    trace.steps.push(headcount.audit_step);
    step_number += 1;

    let turnover = calculate_turnover(
        employees,
        active.len(),
        reference_date,
        assumptions.turnover_window_months,
        assumptions.turnover_annualization_factor,
        step_number,
    )?;
    trace.steps.push(turnover.audit_step);
    step_number += 1;

    let demographics =
        calculate_demographics(&active, reference_date, assumptions.default_age, step_number);
    trace.steps.push(demographics.audit_step);
    trace.warnings.extend(demographics.warning);
    step_number += 1;

    let fte_total = headcount.metrics.fte_total;
    let compensation = calculate_compensation(
        &active,
        remunerations,
        fte_total,
        assumptions.employer_charge_multiplier,
        assumptions.employer_cost_mode,
        step_number,
    );
    trace.steps.push(compensation.audit_step);
    trace.warnings.extend(compensation.warnings);
    step_number += 1;

    let absenteeism = calculate_absenteeism(
        absences,
        active.len(),
        fte_total,
        compensation.metrics.employer_total_cost,
        assumptions.working_days_per_month,
        &assumptions.undefined_label,
        step_number,
    );
    trace.steps.push(absenteeism.audit_step);
    step_number += 1;

    let organization = calculate_organization(&active, &assumptions.undefined_label, step_number);
    trace.steps.push(organization.audit_step);

    let snapshot = MetricsSnapshot {
        reference_date,
        headcount: headcount.metrics,
        turnover: turnover.metrics,
        demographics: demographics.metrics,
        compensation: compensation.metrics,
        absenteeism: absenteeism.metrics,
        organization: organization.metrics,
    };

    debug!(
        active_headcount = snapshot.headcount.active_headcount,
        warnings = trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Metrics snapshot computed"
    );

    Ok(MetricsReport {
        snapshot,
        audit_trace: trace,
    })
}

/// Computes the metrics snapshot without keeping the audit trace.
pub fn compute_snapshot(
    employees: &[Employee],
    remunerations: &[RemunerationRecord],
    absences: &[AbsenceRecord],
    reference_date: NaiveDate,
    config: &EngineConfig,
) -> EngineResult<MetricsSnapshot> {
    compute_metrics(employees, remunerations, absences, reference_date, config)
        .map(|report| report.snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fixtures::{absence, date, dec, employee};
    use crate::config::EmployerCostMode;
    use crate::error::EngineError;
    use crate::models::{ContractType, EmploymentStatus, PayrollSource, Sex};
    use rust_decimal::Decimal;

    fn roster() -> Vec<Employee> {
        let mut lyon = employee("emp_002");
        lyon.site = Some("LYON".to_string());
        lyon.cost_center = Some("CC-200".to_string());
        lyon.sex = Sex::Female;
        lyon.contract_type = ContractType::FixedTerm;
        lyon.work_time_fraction = dec("0.5");
        lyon.base_monthly_salary = dec("2000");
        lyon.hire_date = date(2025, 5, 1);

        let mut departed = employee("emp_003");
        departed.status = EmploymentStatus::Inactive;
        departed.departure_date = Some(date(2025, 5, 31));

        vec![employee("emp_001"), lyon, departed]
    }

    #[test]
    fn test_full_pipeline_on_small_roster() {
        let employees = roster();
        let absences = vec![absence("emp_001", "Maladie", "3")];

        let report = compute_metrics(
            &employees,
            &[],
            &absences,
            date(2025, 6, 30),
            &EngineConfig::default(),
        )
        .unwrap();
        let snapshot = &report.snapshot;

        assert_eq!(snapshot.headcount.total_employees, 3);
        assert_eq!(snapshot.headcount.active_headcount, 2);
        assert_eq!(snapshot.headcount.fte_total, dec("1.5"));
        assert_eq!(snapshot.turnover.entries, 1);
        assert_eq!(snapshot.turnover.exits, 1);
        assert_eq!(snapshot.compensation.source, PayrollSource::BaseSalaryEstimate);
        // (3000 + 2000) × 1.45
        assert_eq!(snapshot.compensation.employer_total_cost, dec("7250"));
        assert_eq!(snapshot.absenteeism.theoretical_days, dec("44"));
        assert_eq!(snapshot.organization.by_site.len(), 2);
        assert_eq!(snapshot.top_sites(1)[0].site, "PARIS");
    }

    #[test]
    fn test_steps_are_numbered_in_order() {
        let report = compute_metrics(
            &roster(),
            &[],
            &[],
            date(2025, 6, 30),
            &EngineConfig::default(),
        )
        .unwrap();

        let rule_ids: Vec<&str> = report
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "headcount",
                "turnover",
                "demographics",
                "compensation",
                "absenteeism",
                "organization"
            ]
        );
        for (index, step) in report.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
        assert!(report.audit_trace.has_warning("NO_REMUNERATION_DATA"));
    }

    #[test]
    fn test_rehired_employee_counts_once_as_active() {
        let mut first_stint = employee("emp_001");
        first_stint.status = EmploymentStatus::Inactive;
        first_stint.hire_date = date(2020, 1, 1);
        first_stint.departure_date = Some(date(2021, 6, 30));

        let mut rehired = employee("emp_001");
        rehired.hire_date = date(2023, 3, 1);

        let snapshot = compute_snapshot(
            &[first_stint, rehired],
            &[],
            &[],
            date(2025, 6, 30),
            &EngineConfig::default(),
        )
        .unwrap();

        assert_eq!(snapshot.headcount.total_employees, 2);
        assert_eq!(snapshot.headcount.active_headcount, 1);
    }

    #[test]
    fn test_empty_inputs_produce_zero_snapshot() {
        let snapshot =
            compute_snapshot(&[], &[], &[], date(2025, 6, 30), &EngineConfig::default()).unwrap();

        assert_eq!(snapshot.headcount.fte_total, Decimal::ZERO);
        assert_eq!(snapshot.turnover.turnover_rate, Decimal::ZERO);
        assert_eq!(snapshot.absenteeism.absenteeism_rate, Decimal::ZERO);
        assert_eq!(snapshot.compensation.employer_total_cost, Decimal::ZERO);
        assert!(snapshot.organization.by_site.is_empty());
    }

    #[test]
    fn test_legacy_mode_is_flagged() {
        let employees = vec![employee("emp_001"), employee("emp_002")];
        let mut first = RemunerationRecord::new("emp_001", date(2025, 6, 1));
        first.base_salary = dec("1000");
        let mut second = RemunerationRecord::new("emp_002", date(2025, 6, 1));
        second.base_salary = dec("2000");

        let config = EngineConfig::default().with_employer_cost_mode(EmployerCostMode::LegacyCumulative);
        let report = compute_metrics(
            &employees,
            &[first, second],
            &[],
            date(2025, 6, 30),
            &config,
        )
        .unwrap();

        // 1000, then 1000 + 3000
        assert_eq!(report.snapshot.compensation.employer_total_cost, dec("4000"));
        assert!(report.audit_trace.has_warning("LEGACY_EMPLOYER_COST"));
    }

    #[test]
    fn test_invalid_record_stops_the_pipeline() {
        let mut bad = employee("emp_001");
        bad.work_time_fraction = dec("-1");

        let err = compute_metrics(&[bad], &[], &[], date(2025, 6, 30), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidEmployee { .. }));
    }

    #[test]
    fn test_absenteeism_cost_uses_employer_cost() {
        let employees = vec![employee("emp_001")];
        let absences = vec![absence("emp_001", "Maladie", "2")];

        let snapshot = compute_snapshot(
            &employees,
            &[],
            &absences,
            date(2025, 6, 30),
            &EngineConfig::default(),
        )
        .unwrap();

        // 3000 × 1.45 / 22 per day, 2 days
        let daily = dec("4350") / dec("22");
        assert_eq!(snapshot.absenteeism.average_daily_cost, daily);
        assert_eq!(snapshot.absenteeism.absenteeism_cost, daily * dec("2"));
    }
}

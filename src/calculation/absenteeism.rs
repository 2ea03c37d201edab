//! Absenteeism rate, duration and cost.

use rust_decimal::Decimal;

use crate::models::{AbsenceRecord, AbsenceTypeBreakdown, AbsenteeismMetrics, AuditStep};

use super::grouping::{GroupedAccumulator, group_label};
use super::ratio::{percent_of, safe_div};

/// The result of the absenteeism stage.
#[derive(Debug, Clone)]
pub struct AbsenteeismResult {
    /// Absence figures.
    pub metrics: AbsenteeismMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

#[derive(Debug, Default)]
struct AbsenceAccumulator {
    events: usize,
    days: Decimal,
}

/// Groups absence events by category, most days first.
///
/// Categories with the same total keep the order in which they first
/// appear. Blank categories are grouped under `undefined_label`.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::group_absences_by_type;
/// use hr_kpi_engine::models::AbsenceRecord;
/// use rust_decimal::Decimal;
///
/// let absence = |kind: &str, days: i64| AbsenceRecord {
///     employee_id: "emp_001".to_string(),
///     absence_type: kind.to_string(),
///     start_date: None,
///     days: Decimal::from(days),
/// };
/// let grouped = group_absences_by_type(
///     &[absence("Maladie", 5), absence("Maladie", 3), absence("Congé", 2)],
///     "undefined",
/// );
/// assert_eq!(grouped[0].absence_type, "Maladie");
/// assert_eq!(grouped[0].events, 2);
/// assert_eq!(grouped[0].days, Decimal::from(8));
/// assert_eq!(grouped[1].absence_type, "Congé");
/// ```
pub fn group_absences_by_type(
    absences: &[AbsenceRecord],
    undefined_label: &str,
) -> Vec<AbsenceTypeBreakdown> {
    let mut groups: GroupedAccumulator<AbsenceAccumulator> = GroupedAccumulator::new();
    for absence in absences {
        let label = group_label(Some(absence.absence_type.as_str()), undefined_label);
        let accumulator = groups.entry(label);
        accumulator.events += 1;
        accumulator.days += absence.days;
    }

    let mut breakdown: Vec<AbsenceTypeBreakdown> = groups
        .into_entries()
        .into_iter()
        .map(|(absence_type, acc)| AbsenceTypeBreakdown {
            absence_type,
            events: acc.events,
            days: acc.days,
        })
        .collect();
    breakdown.sort_by(|a, b| b.days.cmp(&a.days));
    breakdown
}

/// Computes absenteeism over the period.
///
/// - theoretical days = active headcount × `working_days_per_month`
/// - rate = absence days / theoretical days × 100
/// - average duration = absence days / number of events
/// - average daily cost = employer cost / (FTE × `working_days_per_month`)
/// - cost = absence days × average daily cost
///
/// Every ratio is 0 when its denominator is 0.
pub fn calculate_absenteeism(
    absences: &[AbsenceRecord],
    active_headcount: usize,
    fte_total: Decimal,
    employer_total_cost: Decimal,
    working_days_per_month: Decimal,
    undefined_label: &str,
    step_number: u32,
) -> AbsenteeismResult {
    let theoretical_days = Decimal::from(active_headcount) * working_days_per_month;
    let absence_days: Decimal = absences.iter().map(|a| a.days).sum();
    let absence_events = absences.len();

    let absenteeism_rate = percent_of(absence_days, theoretical_days);
    let average_absence_duration = safe_div(absence_days, Decimal::from(absence_events));
    let average_daily_cost = safe_div(employer_total_cost, fte_total * working_days_per_month);
    let absenteeism_cost = absence_days * average_daily_cost;

    let by_type = group_absences_by_type(absences, undefined_label);

    let audit_step = AuditStep {
        step_number,
        rule_id: "absenteeism".to_string(),
        rule_name: "Absenteeism".to_string(),
        input: serde_json::json!({
            "absence_events": absence_events,
            "active_headcount": active_headcount,
            "working_days_per_month": working_days_per_month.to_string(),
            "employer_total_cost": employer_total_cost.to_string()
        }),
        output: serde_json::json!({
            "theoretical_days": theoretical_days.to_string(),
            "absence_days": absence_days.to_string(),
            "absenteeism_rate": absenteeism_rate.to_string(),
            "absenteeism_cost": absenteeism_cost.to_string(),
            "absence_types": by_type.len()
        }),
        reasoning: format!(
            "{} absence days / {} theoretical days = {}%",
            absence_days.normalize(),
            theoretical_days.normalize(),
            absenteeism_rate.round_dp(2).normalize()
        ),
    };

    AbsenteeismResult {
        metrics: AbsenteeismMetrics {
            theoretical_days,
            absence_days,
            absence_events,
            absenteeism_rate,
            average_absence_duration,
            average_daily_cost,
            absenteeism_cost,
            by_type,
        },
        audit_step,
    }
}

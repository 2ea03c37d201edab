//! Turnover over a trailing window.
//!
//! The rate is the exit rate of the trailing window multiplied by the
//! annualization factor (4 for a 3-month window), a linear extrapolation.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, TurnoverMetrics};

use super::ratio::safe_div;

/// The result of the turnover stage, including the audit step.
#[derive(Debug, Clone)]
pub struct TurnoverResult {
    /// Entries, exits and rate.
    pub metrics: TurnoverMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

/// Returns the first day of the trailing window ending at `reference_date`.
///
/// Month arithmetic clamps to the end of shorter months
/// (31 May minus 3 months is 28 or 29 February).
pub fn turnover_window_start(
    reference_date: NaiveDate,
    window_months: u32,
) -> EngineResult<NaiveDate> {
    reference_date
        .checked_sub_months(Months::new(window_months))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "cannot move {} back by {} months",
                reference_date, window_months
            ),
        })
}

/// Computes entries, exits and the annualized turnover rate.
///
/// Entries and exits are counted over the whole roster (an employee who
/// left during the window is usually inactive by now). The average
/// headcount is `(active + (active - exits + entries)) / 2` and the rate is
/// `exits / average × factor × 100`, or 0 when nobody is active or the
/// average is not positive.
pub fn calculate_turnover(
    employees: &[Employee],
    active_headcount: usize,
    reference_date: NaiveDate,
    window_months: u32,
    annualization_factor: Decimal,
    step_number: u32,
) -> EngineResult<TurnoverResult> {
    let window_start = turnover_window_start(reference_date, window_months)?;

    let entries = employees
        .iter()
        .filter(|e| e.hired_between(window_start, reference_date))
        .count();
    let exits = employees
        .iter()
        .filter(|e| e.left_between(window_start, reference_date))
        .count();

    let (average_headcount, turnover_rate) =
        turnover_rate(active_headcount, entries, exits, annualization_factor);

    let audit_step = AuditStep {
        step_number,
        rule_id: "turnover".to_string(),
        rule_name: "Turnover".to_string(),
        input: serde_json::json!({
            "window_start": window_start.to_string(),
            "window_end": reference_date.to_string(),
            "active_headcount": active_headcount,
            "annualization_factor": annualization_factor.to_string()
        }),
        output: serde_json::json!({
            "entries": entries,
            "exits": exits,
            "average_headcount": average_headcount.to_string(),
            "turnover_rate": turnover_rate.to_string()
        }),
        reasoning: format!(
            "{} exits / {} average headcount × {} × 100 = {}%",
            exits,
            average_headcount.normalize(),
            annualization_factor.normalize(),
            turnover_rate.round_dp(2).normalize()
        ),
    };

    Ok(TurnoverResult {
        metrics: TurnoverMetrics {
            window_start,
            window_end: reference_date,
            entries,
            exits,
            average_headcount,
            turnover_rate,
        },
        audit_step,
    })
}

/// Average headcount and annualized turnover rate from raw counts.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::turnover_rate;
/// use rust_decimal::Decimal;
///
/// let (average, rate) = turnover_rate(100, 10, 5, Decimal::from(4));
/// assert_eq!(average, Decimal::new(1025, 1));
/// assert_eq!(rate.round_dp(2), Decimal::new(1951, 2));
/// ```
pub fn turnover_rate(
    active_headcount: usize,
    entries: usize,
    exits: usize,
    annualization_factor: Decimal,
) -> (Decimal, Decimal) {
    let active = Decimal::from(active_headcount);
    let start_of_window = active - Decimal::from(exits) + Decimal::from(entries);
    let average_headcount = (active + start_of_window) / Decimal::TWO;

    let turnover_rate = if active_headcount > 0 && average_headcount > Decimal::ZERO {
        safe_div(Decimal::from(exits), average_headcount)
            * annualization_factor
            * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    (average_headcount, turnover_rate)
}

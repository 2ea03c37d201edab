//! Sex split, average age, tenure and age pyramid.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    AgeBucket, AgePyramid, AuditStep, AuditWarning, DemographicMetrics, Employee, Sex,
};

use super::ratio::{percentage, safe_div};

/// Days in the year used for tenure (leap days are not corrected for).
pub const DAYS_PER_TENURE_YEAR: i64 = 365;

/// The result of the demographics stage.
#[derive(Debug, Clone)]
pub struct DemographicsResult {
    /// Sex split, age and tenure.
    pub metrics: DemographicMetrics,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
    /// Raised when employees without a birth date were given the default age.
    pub warning: Option<AuditWarning>,
}

/// Computes the demographic profile of the active population.
///
/// - Age is the reference year minus the birth year. Employees without a
///   birth date count as `default_age` in the average but are left out of
///   the pyramid.
/// - Tenure is the number of days since hire divided by 365.
/// - The sex split is binary, so the female share is the complement of the
///   male share whenever there is at least one active employee.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::calculate_demographics;
/// use hr_kpi_engine::models::{ContractType, Employee, EmploymentStatus, Sex};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     contract_type: ContractType::Permanent,
///     status: EmploymentStatus::Active,
///     work_time_fraction: Decimal::ONE,
///     birth_date: Some(NaiveDate::from_ymd_opt(1980, 3, 1).unwrap()),
///     hire_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
///     departure_date: None,
///     sex: Sex::Female,
///     base_monthly_salary: Decimal::from(4200),
///     site: None,
///     cost_center: None,
/// };
///
/// let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let result = calculate_demographics(&[&employee], reference, 30, 3);
/// assert_eq!(result.metrics.average_age, Decimal::from(45));
/// assert_eq!(result.metrics.age_pyramid.from_40_to_49, 1);
/// assert_eq!(result.metrics.pct_female, Decimal::ONE_HUNDRED);
/// ```
pub fn calculate_demographics(
    active: &[&Employee],
    reference_date: NaiveDate,
    default_age: i32,
    step_number: u32,
) -> DemographicsResult {
    let active_headcount = active.len();

    let male_count = active.iter().filter(|e| e.sex == Sex::Male).count();
    let female_count = active_headcount - male_count;
    let pct_male = percentage(male_count, active_headcount);
    let pct_female = if active_headcount == 0 {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED - pct_male
    };

    let mut age_pyramid = AgePyramid::default();
    let mut total_age: i64 = 0;
    let mut missing_birth_dates = 0usize;
    for employee in active {
        match employee.age_in_years(reference_date) {
            Some(age) => {
                age_pyramid.record(AgeBucket::for_age(age));
                total_age += i64::from(age);
            }
            None => {
                missing_birth_dates += 1;
                total_age += i64::from(default_age);
            }
        }
    }
    let headcount = Decimal::from(active_headcount);
    let average_age = safe_div(Decimal::from(total_age), headcount);

    let total_tenure_days: i64 = active
        .iter()
        .map(|e| (reference_date - e.hire_date).num_days())
        .sum();
    let average_tenure_years = safe_div(
        Decimal::from(total_tenure_days),
        headcount * Decimal::from(DAYS_PER_TENURE_YEAR),
    );

    let warning = (missing_birth_dates > 0).then(|| {
        AuditWarning::new(
            "MISSING_BIRTH_DATE",
            format!(
                "{} active employee(s) have no birth date; age {} assumed and left out of the age pyramid",
                missing_birth_dates, default_age
            ),
            "low",
        )
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "demographics".to_string(),
        rule_name: "Demographics".to_string(),
        input: serde_json::json!({
            "active_headcount": active_headcount,
            "reference_date": reference_date.to_string(),
            "missing_birth_dates": missing_birth_dates,
            "default_age": default_age
        }),
        output: serde_json::json!({
            "male_count": male_count,
            "female_count": female_count,
            "average_age": average_age.to_string(),
            "average_tenure_years": average_tenure_years.to_string(),
            "age_pyramid": {
                "under_30": age_pyramid.under_30,
                "30_39": age_pyramid.from_30_to_39,
                "40_49": age_pyramid.from_40_to_49,
                "50_plus": age_pyramid.from_50
            }
        }),
        reasoning: format!(
            "Average age {} years, average tenure {} years over {} active employees",
            average_age.round_dp(2).normalize(),
            average_tenure_years.round_dp(2).normalize(),
            active_headcount
        ),
    };

    DemographicsResult {
        metrics: DemographicMetrics {
            male_count,
            female_count,
            pct_male,
            pct_female,
            average_age,
            average_tenure_years,
            age_pyramid,
        },
        audit_step,
        warning,
    }
}

//! Input validation run before any metric is computed.
//!
//! Missing optional fields are never rejected here; they get defaults in
//! the stages that read them. Only records that contradict themselves or
//! carry impossible values fail the computation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceRecord, Employee, RemunerationRecord};

/// Checks every input record and returns the first violation found.
///
/// Employees are rejected for a blank id, a negative work-time fraction, a
/// negative base salary or a departure before hire. An id may appear on
/// several rows (a rehired employee keeps their matricule).
/// Remuneration and absence records are rejected for a blank employee id,
/// absences also for a negative number of days. Remuneration amounts may be
/// negative (payroll regularisations).
pub fn validate_inputs(
    employees: &[Employee],
    remunerations: &[RemunerationRecord],
    absences: &[AbsenceRecord],
) -> EngineResult<()> {
    for employee in employees {
        validate_employee(employee)?;
    }

    for record in remunerations {
        if record.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidRecord {
                record: format!("remuneration ({})", record.period),
                field: "employee_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
    }

    for absence in absences {
        if absence.employee_id.trim().is_empty() {
            return Err(EngineError::InvalidRecord {
                record: "absence".to_string(),
                field: "employee_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if absence.days < Decimal::ZERO {
            return Err(EngineError::InvalidRecord {
                record: format!("absence ({})", absence.employee_id),
                field: "days".to_string(),
                message: format!("must not be negative, got {}", absence.days),
            });
        }
    }

    Ok(())
}

fn validate_employee(employee: &Employee) -> EngineResult<()> {
    if employee.id.trim().is_empty() {
        return Err(invalid_employee(employee, "id", "must not be empty"));
    }
    if employee.work_time_fraction < Decimal::ZERO {
        return Err(invalid_employee(
            employee,
            "work_time_fraction",
            format!("must not be negative, got {}", employee.work_time_fraction),
        ));
    }
    if employee.base_monthly_salary < Decimal::ZERO {
        return Err(invalid_employee(
            employee,
            "base_monthly_salary",
            format!("must not be negative, got {}", employee.base_monthly_salary),
        ));
    }
    if let Some(departure) = employee.departure_date {
        if departure < employee.hire_date {
            return Err(invalid_employee(
                employee,
                "departure_date",
                format!(
                    "departure {} is before hire date {}",
                    departure, employee.hire_date
                ),
            ));
        }
    }
    Ok(())
}

fn invalid_employee(
    employee: &Employee,
    field: &str,
    message: impl Into<String>,
) -> EngineError {
    EngineError::InvalidEmployee {
        employee_id: employee.id.clone(),
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fixtures::{absence, date, dec, employee};
    use crate::models::EmploymentStatus;

    #[test]
    fn test_valid_inputs_pass() {
        let employees = vec![employee("emp_001"), employee("emp_002")];
        let remunerations = vec![RemunerationRecord::new("emp_001", date(2025, 6, 1))];
        let absences = vec![absence("emp_002", "Maladie", "2")];

        assert!(validate_inputs(&employees, &remunerations, &absences).is_ok());
    }

    #[test]
    fn test_empty_inputs_pass() {
        assert!(validate_inputs(&[], &[], &[]).is_ok());
    }

    #[test]
    fn test_missing_optional_fields_pass() {
        let mut e = employee("emp_001");
        e.birth_date = None;
        e.site = None;
        e.cost_center = None;
        e.work_time_fraction = Decimal::ZERO;

        assert!(validate_inputs(&[e], &[], &[]).is_ok());
    }

    #[test]
    fn test_negative_work_time_fraction_is_rejected() {
        let mut e = employee("emp_007");
        e.work_time_fraction = dec("-0.5");

        let err = validate_inputs(&[e], &[], &[]).unwrap_err();
        match err {
            EngineError::InvalidEmployee {
                employee_id, field, ..
            } => {
                assert_eq!(employee_id, "emp_007");
                assert_eq!(field, "work_time_fraction");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_salary_is_rejected() {
        let mut e = employee("emp_001");
        e.base_monthly_salary = dec("-1");

        let err = validate_inputs(&[e], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("base_monthly_salary"));
    }

    #[test]
    fn test_departure_before_hire_is_rejected() {
        let mut e = employee("emp_001");
        e.hire_date = date(2024, 5, 1);
        e.departure_date = Some(date(2024, 4, 30));

        let err = validate_inputs(&[e], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("departure_date"));
    }

    #[test]
    fn test_departure_on_hire_date_passes() {
        let mut e = employee("emp_001");
        e.hire_date = date(2024, 5, 1);
        e.departure_date = Some(date(2024, 5, 1));

        assert!(validate_inputs(&[e], &[], &[]).is_ok());
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let err = validate_inputs(&[employee("  ")], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_rehired_employee_with_two_rows_passes() {
        let mut first_stint = employee("emp_001");
        first_stint.status = EmploymentStatus::Inactive;
        first_stint.hire_date = date(2020, 1, 1);
        first_stint.departure_date = Some(date(2021, 6, 30));

        let mut rehired = employee("emp_001");
        rehired.hire_date = date(2023, 3, 1);

        assert!(validate_inputs(&[first_stint, rehired], &[], &[]).is_ok());
    }

    #[test]
    fn test_negative_absence_days_are_rejected() {
        let absences = vec![absence("emp_001", "Maladie", "-2")];
        let err = validate_inputs(&[], &[], &absences).unwrap_err();

        match err {
            EngineError::InvalidRecord { record, field, .. } => {
                assert_eq!(record, "absence (emp_001)");
                assert_eq!(field, "days");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_remuneration_amounts_are_allowed() {
        let mut record = RemunerationRecord::new("emp_001", date(2025, 6, 1));
        record.variable_bonus = dec("-150");

        assert!(validate_inputs(&[employee("emp_001")], &[record], &[]).is_ok());
    }

    #[test]
    fn test_remuneration_without_employee_is_rejected() {
        let record = RemunerationRecord::new("", date(2025, 6, 1));
        let err = validate_inputs(&[], &[record], &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord { .. }));
    }
}

//! Test fixtures shared by the calculation tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{AbsenceRecord, ContractType, Employee, EmploymentStatus, Sex};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Active full-time permanent employee hired on 2020-01-01.
pub(crate) fn employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        contract_type: ContractType::Permanent,
        status: EmploymentStatus::Active,
        work_time_fraction: Decimal::ONE,
        birth_date: Some(date(1985, 6, 15)),
        hire_date: date(2020, 1, 1),
        departure_date: None,
        sex: Sex::Male,
        base_monthly_salary: dec("3000"),
        site: Some("PARIS".to_string()),
        cost_center: Some("CC-100".to_string()),
    }
}

pub(crate) fn absence(employee_id: &str, absence_type: &str, days: &str) -> AbsenceRecord {
    AbsenceRecord {
        employee_id: employee_id.to_string(),
        absence_type: absence_type.to_string(),
        start_date: None,
        days: dec(days),
    }
}

//! Employee model and related types.
//!
//! This module defines the Employee struct together with the ContractType,
//! EmploymentStatus and Sex enums used by the headcount and demographic
//! stages.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The contract under which an employee is hired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Permanent contract (CDI).
    #[serde(rename = "cdi")]
    Permanent,
    /// Fixed-term contract (CDD).
    #[serde(rename = "cdd")]
    FixedTerm,
    /// Apprenticeship or work-study contract (alternance).
    #[serde(rename = "alternance")]
    Apprenticeship,
    /// Internship (stage).
    #[serde(rename = "stage")]
    Internship,
}

/// Whether the employee is currently part of the workforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed.
    Active,
    /// Left the company or suspended.
    Inactive,
}

/// Sex as recorded in the HR roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
}

fn default_work_time_fraction() -> Decimal {
    Decimal::ONE
}

/// An employee of the tenant, as imported from the HR roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (matricule).
    pub id: String,
    /// The contract type.
    pub contract_type: ContractType,
    /// Active or inactive.
    pub status: EmploymentStatus,
    /// Share of a full-time position (1.0 = full time).
    #[serde(default = "default_work_time_fraction")]
    pub work_time_fraction: Decimal,
    /// The employee's date of birth, when known.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The date the employee left, if any.
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    /// Recorded sex.
    pub sex: Sex,
    /// Contractual gross monthly salary.
    #[serde(default)]
    pub base_monthly_salary: Decimal,
    /// Site (establishment) code.
    #[serde(default)]
    pub site: Option<String>,
    /// Cost-center code.
    #[serde(default)]
    pub cost_center: Option<String>,
}

impl Employee {
    /// Returns true if the employee counts towards the active population.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_kpi_engine::models::{ContractType, Employee, EmploymentStatus, Sex};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     contract_type: ContractType::Permanent,
    ///     status: EmploymentStatus::Active,
    ///     work_time_fraction: Decimal::ONE,
    ///     birth_date: None,
    ///     hire_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
    ///     departure_date: None,
    ///     sex: Sex::Female,
    ///     base_monthly_salary: Decimal::from(2500),
    ///     site: None,
    ///     cost_center: None,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Age in calendar years at the reference date (reference year minus
    /// birth year), or `None` when the birth date is unknown.
    pub fn age_in_years(&self, reference_date: NaiveDate) -> Option<i32> {
        self.birth_date
            .map(|birth| reference_date.year() - birth.year())
    }

    /// Returns true if the employee was hired within `[start, end]`.
    pub fn hired_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.hire_date >= start && self.hire_date <= end
    }

    /// Returns true if the employee left within `[start, end]`.
    pub fn left_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.departure_date
            .is_some_and(|departure| departure >= start && departure <= end)
    }
}

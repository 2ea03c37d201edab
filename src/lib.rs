//! HR KPI engine for establishment dashboards.
//!
//! This crate turns an employee roster, monthly payroll records and absence
//! events into a metrics snapshot: headcount and contract mix, turnover,
//! demographics, payroll cost, absenteeism and site and cost-center
//! breakdowns. Each stage records an audit step so every figure can be
//! traced back to its inputs.
//!
//! # Example
//!
//! ```
//! use hr_kpi_engine::calculation::compute_snapshot;
//! use hr_kpi_engine::config::EngineConfig;
//! use hr_kpi_engine::models::{ContractType, Employee, EmploymentStatus, Sex};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let employee = Employee {
//!     id: "emp_001".to_string(),
//!     contract_type: ContractType::Permanent,
//!     status: EmploymentStatus::Active,
//!     work_time_fraction: Decimal::ONE,
//!     birth_date: NaiveDate::from_ymd_opt(1988, 4, 2),
//!     hire_date: NaiveDate::from_ymd_opt(2019, 9, 1).unwrap(),
//!     departure_date: None,
//!     sex: Sex::Female,
//!     base_monthly_salary: Decimal::from(3200),
//!     site: Some("NANTES".to_string()),
//!     cost_center: None,
//! };
//!
//! let reference = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//! let snapshot = compute_snapshot(&[employee], &[], &[], reference, &EngineConfig::default())
//!     .unwrap();
//!
//! assert_eq!(snapshot.headcount.pct_permanent, Decimal::ONE_HUNDRED);
//! // No payroll records: 3200 × 1.45
//! assert_eq!(snapshot.compensation.employer_total_cost, Decimal::from(4640));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod import;
pub mod models;

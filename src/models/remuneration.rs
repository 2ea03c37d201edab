//! Monthly remuneration records.
//!
//! One [`RemunerationRecord`] exists per employee per pay period. Every
//! amount defaults to zero when the payroll export leaves it blank.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payroll line for one employee and one pay period.
///
/// # Example
///
/// ```
/// use hr_kpi_engine::models::RemunerationRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = RemunerationRecord {
///     base_salary: Decimal::from(3000),
///     variable_bonus: Decimal::from(500),
///     social_contributions: Decimal::from(1200),
///     ..RemunerationRecord::new("emp_001", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
/// };
/// assert_eq!(record.gross_salary(), Decimal::from(3500));
/// assert_eq!(record.employer_charges(), Decimal::from(1200));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemunerationRecord {
    /// The employee this line belongs to.
    pub employee_id: String,
    /// First day of the pay period.
    pub period: NaiveDate,

    /// Base salary paid for the period.
    #[serde(default)]
    pub base_salary: Decimal,
    /// Fixed bonuses (13th month, seniority...).
    #[serde(default)]
    pub fixed_bonus: Decimal,
    /// Variable bonuses (objectives, commissions).
    #[serde(default)]
    pub variable_bonus: Decimal,
    /// Overtime pay.
    #[serde(default)]
    pub overtime_pay: Decimal,
    /// Benefits in kind (car, housing...).
    #[serde(default)]
    pub benefits_in_kind: Decimal,
    /// Any other gross component.
    #[serde(default)]
    pub other_pay: Decimal,

    /// Employer social contributions.
    #[serde(default)]
    pub social_contributions: Decimal,
    /// Payroll-based taxes.
    #[serde(default)]
    pub payroll_taxes: Decimal,
    /// Employer share of supplemental health insurance.
    #[serde(default)]
    pub health_employer_share: Decimal,
    /// Employer share of supplemental pension.
    #[serde(default)]
    pub pension_employer_share: Decimal,

    /// Paid-leave days banked at the end of the period.
    #[serde(default)]
    pub paid_leave_days: Decimal,
    /// RTT days banked at the end of the period.
    #[serde(default)]
    pub rtt_days: Decimal,
    /// Provisioned value of the banked paid leave.
    #[serde(default)]
    pub paid_leave_provision: Decimal,
    /// Provisioned value of the banked RTT days.
    #[serde(default)]
    pub rtt_provision: Decimal,
}

impl RemunerationRecord {
    /// Creates an all-zero record for an employee and period.
    pub fn new(employee_id: impl Into<String>, period: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
            base_salary: Decimal::ZERO,
            fixed_bonus: Decimal::ZERO,
            variable_bonus: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            benefits_in_kind: Decimal::ZERO,
            other_pay: Decimal::ZERO,
            social_contributions: Decimal::ZERO,
            payroll_taxes: Decimal::ZERO,
            health_employer_share: Decimal::ZERO,
            pension_employer_share: Decimal::ZERO,
            paid_leave_days: Decimal::ZERO,
            rtt_days: Decimal::ZERO,
            paid_leave_provision: Decimal::ZERO,
            rtt_provision: Decimal::ZERO,
        }
    }

    /// Sum of every gross salary component.
    pub fn gross_salary(&self) -> Decimal {
        self.base_salary
            + self.fixed_bonus
            + self.variable_bonus
            + self.overtime_pay
            + self.benefits_in_kind
            + self.other_pay
    }

    /// Sum of every employer-side charge.
    pub fn employer_charges(&self) -> Decimal {
        self.social_contributions
            + self.payroll_taxes
            + self.health_employer_share
            + self.pension_employer_share
    }

    /// Provisioned value of all banked leave.
    pub fn leave_provision(&self) -> Decimal {
        self.paid_leave_provision + self.rtt_provision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_gross_salary_sums_all_components() {
        let record = RemunerationRecord {
            base_salary: dec("3000"),
            fixed_bonus: dec("250"),
            variable_bonus: dec("400.50"),
            overtime_pay: dec("120"),
            benefits_in_kind: dec("80"),
            other_pay: dec("10"),
            ..RemunerationRecord::new("emp_001", period())
        };
        assert_eq!(record.gross_salary(), dec("3860.50"));
    }

    #[test]
    fn test_employer_charges_sum_all_charges() {
        let record = RemunerationRecord {
            social_contributions: dec("1100"),
            payroll_taxes: dec("90"),
            health_employer_share: dec("45.20"),
            pension_employer_share: dec("60"),
            ..RemunerationRecord::new("emp_001", period())
        };
        assert_eq!(record.employer_charges(), dec("1295.20"));
    }

    #[test]
    fn test_deserialize_blank_amounts_default_to_zero() {
        let json = r#"{
            "employee_id": "emp_001",
            "period": "2025-03-01",
            "base_salary": "2800.00",
            "rtt_days": "3.5"
        }"#;

        let record: RemunerationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.base_salary, dec("2800.00"));
        assert_eq!(record.rtt_days, dec("3.5"));
        assert_eq!(record.variable_bonus, Decimal::ZERO);
        assert_eq!(record.employer_charges(), Decimal::ZERO);
    }

    #[test]
    fn test_leave_provision_adds_both_balances() {
        let record = RemunerationRecord {
            paid_leave_provision: dec("1500"),
            rtt_provision: dec("300"),
            ..RemunerationRecord::new("emp_001", period())
        };
        assert_eq!(record.leave_provision(), dec("1800"));
    }
}

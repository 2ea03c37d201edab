//! Absence events.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single absence event recorded for an employee.
///
/// `absence_type` is a free-text category taken as-is from the HR export
/// (e.g. "Maladie", "Congé", "Accident du travail").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// The absent employee.
    pub employee_id: String,
    /// Category of the absence.
    pub absence_type: String,
    /// First day of the absence, when provided.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Number of working days absent.
    pub days: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_absence_without_start_date() {
        let json = r#"{
            "employee_id": "emp_004",
            "absence_type": "Maladie",
            "days": "5"
        }"#;

        let absence: AbsenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(absence.absence_type, "Maladie");
        assert_eq!(absence.days, Decimal::from(5));
        assert!(absence.start_date.is_none());
    }

    #[test]
    fn test_deserialize_absence_with_start_date() {
        let json = r#"{
            "employee_id": "emp_004",
            "absence_type": "Congé",
            "start_date": "2025-02-10",
            "days": "2.5"
        }"#;

        let absence: AbsenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            absence.start_date,
            NaiveDate::from_ymd_opt(2025, 2, 10)
        );
        assert_eq!(absence.days, Decimal::new(25, 1));
    }
}

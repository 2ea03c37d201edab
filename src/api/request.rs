//! Request types for the HR KPI engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceRecord, Employee, RemunerationRecord};

/// Request body for the `/metrics` endpoint.
///
/// Carries the three record collections of one establishment and the date
/// the snapshot is computed for. Remunerations and absences may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRequest {
    /// Establishment the records belong to, echoed back in the response.
    #[serde(default)]
    pub establishment_id: Option<String>,
    /// The date the snapshot is computed for.
    pub reference_date: NaiveDate,
    /// The employee roster, active and inactive.
    pub employees: Vec<Employee>,
    /// Monthly payroll records.
    #[serde(default)]
    pub remunerations: Vec<RemunerationRecord>,
    /// Absence events.
    #[serde(default)]
    pub absences: Vec<AbsenceRecord>,
}

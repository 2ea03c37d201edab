//! Response types for the HR KPI engine API.
//!
//! This module defines the success payloads, the error response structure
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditTrace, CostCenterBreakdown, MetricsSnapshot, SiteBreakdown};

/// Response body of the `/metrics` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    /// Unique identifier of this computation.
    pub snapshot_id: Uuid,
    /// When the snapshot was computed.
    pub computed_at: DateTime<Utc>,
    /// Version of the engine that produced the snapshot.
    pub engine_version: String,
    /// Version of the assumption set that was applied.
    pub assumptions_version: String,
    /// Establishment echoed from the request.
    pub establishment_id: Option<String>,
    /// The computed metrics.
    pub snapshot: MetricsSnapshot,
    /// Largest sites by headcount, up to the configured ranking limit.
    pub top_sites: Vec<SiteBreakdown>,
    /// Largest cost centers by payroll, up to the configured ranking limit.
    pub top_cost_centers: Vec<CostCenterBreakdown>,
    /// How the snapshot was computed.
    pub audit_trace: AuditTrace,
}

/// Response body of the `/import/*` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse<T> {
    /// Number of records read.
    pub imported: usize,
    /// The records, ready to be sent to `/metrics`.
    pub records: Vec<T>,
}

impl<T> From<Vec<T>> for ImportResponse<T> {
    fn from(records: Vec<T>) -> Self {
        Self {
            imported: records.len(),
            records,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::InvalidEmployee { employee_id, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    format!("Employee '{}' contains invalid information", employee_id),
                ),
            ),
            EngineError::InvalidRecord { record, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_RECORD",
                    message,
                    format!("The {} record contains invalid information", record),
                ),
            ),
            EngineError::Import { row, column, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "IMPORT_ERROR",
                    message,
                    format!("row {}, column '{}'", row, column),
                ),
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_employee_maps_to_bad_request() {
        let engine_error = EngineError::InvalidEmployee {
            employee_id: "emp_009".to_string(),
            field: "work_time_fraction".to_string(),
            message: "must not be negative, got -1".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_EMPLOYEE");
        assert!(api_error.error.message.contains("work_time_fraction"));
    }

    #[test]
    fn test_import_error_details_point_to_cell() {
        let engine_error = EngineError::Import {
            row: 4,
            column: "days".to_string(),
            message: "invalid number 'x'".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "IMPORT_ERROR");
        assert_eq!(api_error.error.details.as_deref(), Some("row 4, column 'days'"));
    }

    #[test]
    fn test_config_and_calculation_errors_are_server_errors() {
        let config: ApiErrorResponse = EngineError::InvalidConfig {
            key: "ranking_limit".to_string(),
            message: "must be positive".to_string(),
        }
        .into();
        assert_eq!(config.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.error.code, "CONFIG_ERROR");

        let calculation: ApiErrorResponse = EngineError::CalculationError {
            message: "window out of range".to_string(),
        }
        .into();
        assert_eq!(calculation.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calculation.error.code, "CALCULATION_ERROR");
    }

    #[test]
    fn test_import_response_counts_records() {
        let response: ImportResponse<u8> = vec![1, 2, 3].into();
        assert_eq!(response.imported, 3);
    }
}

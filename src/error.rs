//! Error types for the HR KPI engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine, the import pipeline and the configuration
//! loader can report.

use thiserror::Error;

/// The main error type for the HR KPI engine.
///
/// Missing optional fields never produce an error: they are replaced by
/// documented defaults. Errors signal a caller-side contract violation
/// (malformed records, unreadable spreadsheets, broken configuration).
///
/// # Example
///
/// ```
/// use hr_kpi_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/assumptions.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/assumptions.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration values were parsed but are not usable.
    #[error("Invalid configuration value '{key}': {message}")]
    InvalidConfig {
        /// The configuration key holding the bad value.
        key: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The identifier of the offending employee.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A remuneration or absence record was invalid.
    #[error("Invalid {record} record field '{field}': {message}")]
    InvalidRecord {
        /// The record kind ("remuneration" or "absence") and its owner.
        record: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A spreadsheet row could not be imported.
    #[error("Import failed at row {row}, column '{column}': {message}")]
    Import {
        /// 1-based spreadsheet line, header included.
        row: usize,
        /// The canonical column name.
        column: String,
        /// A description of the problem.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "config/tenant_42/assumptions.yaml".to_string(),
        };
        assert!(error.to_string().ends_with("config/tenant_42/assumptions.yaml"));
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "engine.yaml".to_string(),
            message: "missing field `version`".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("'engine.yaml'"));
        assert!(rendered.contains("missing field `version`"));
    }

    #[test]
    fn test_invalid_config_displays_key() {
        let error = EngineError::InvalidConfig {
            key: "working_days_per_month".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'working_days_per_month': must be positive"
        );
    }

    #[test]
    fn test_invalid_employee_displays_id_field_and_message() {
        let error = EngineError::InvalidEmployee {
            employee_id: "emp_007".to_string(),
            field: "departure_date".to_string(),
            message: "before hire date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee 'emp_007' field 'departure_date': before hire date"
        );
    }

    #[test]
    fn test_invalid_record_displays_record_kind() {
        let error = EngineError::InvalidRecord {
            record: "absence (emp_001)".to_string(),
            field: "days".to_string(),
            message: "cannot be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid absence (emp_001) record field 'days': cannot be negative"
        );
    }

    #[test]
    fn test_import_error_displays_row_and_column() {
        let error = EngineError::Import {
            row: 4,
            column: "hire_date".to_string(),
            message: "unrecognised date '31-31-2020'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Import failed at row 4, column 'hire_date': unrecognised date '31-31-2020'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_calculation_error() -> EngineResult<()> {
            Err(EngineError::CalculationError {
                message: "boom".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_calculation_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

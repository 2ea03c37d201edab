//! Spreadsheet rows to engine records.
//!
//! Each import reads the header row, resolves it against the built-in
//! [`ColumnMapping`] and converts rows one by one. The first bad row aborts
//! the import. Row numbers in errors are spreadsheet lines, so the header is
//! line 1 and the first data row is line 2.

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::validate_inputs;
use crate::error::{EngineError, EngineResult};
use crate::models::{AbsenceRecord, Employee, RemunerationRecord};

use super::columns::{
    ColumnMapping, ResolvedColumns, parse_contract_type, parse_date, parse_decimal,
    parse_fraction, parse_period, parse_sex, parse_status, resolve_headers,
};

/// A failure tied to one cell of the current row.
struct CellError {
    column: &'static str,
    message: String,
}

/// One data row with its resolved header.
struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a ResolvedColumns,
}

impl<'a> Row<'a> {
    fn optional(&self, column: &'static str) -> Option<&'a str> {
        self.columns.cell(self.record, column)
    }

    fn required(&self, column: &'static str) -> Result<&'a str, CellError> {
        self.optional(column).ok_or(CellError {
            column,
            message: "missing value".to_string(),
        })
    }

    fn parse<T>(
        &self,
        column: &'static str,
        value: &str,
        parser: fn(&str) -> Result<T, String>,
    ) -> Result<T, CellError> {
        parser(value).map_err(|message| CellError { column, message })
    }

    fn required_with<T>(
        &self,
        column: &'static str,
        parser: fn(&str) -> Result<T, String>,
    ) -> Result<T, CellError> {
        let value = self.required(column)?;
        self.parse(column, value, parser)
    }

    fn optional_with<T>(
        &self,
        column: &'static str,
        parser: fn(&str) -> Result<T, String>,
    ) -> Result<Option<T>, CellError> {
        self.optional(column)
            .map(|value| self.parse(column, value, parser))
            .transpose()
    }

    fn amount(&self, column: &'static str) -> Result<Decimal, CellError> {
        Ok(self.optional_with(column, parse_decimal)?.unwrap_or_default())
    }

    fn text(&self, column: &'static str) -> Option<String> {
        self.optional(column).map(str::to_string)
    }
}

/// Picks `;` when the header line has more semicolons than commas.
///
/// French spreadsheet software exports with `;` because `,` is the decimal
/// separator.
pub fn detect_delimiter(input: &str) -> u8 {
    let header = input.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas { b';' } else { b',' }
}

fn read_rows<T>(
    input: &str,
    mapping: &ColumnMapping,
    convert: impl Fn(&Row<'_>) -> Result<T, CellError>,
) -> EngineResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(input))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| EngineError::Import {
            row: 1,
            column: String::new(),
            message: format!("unreadable header row: {e}"),
        })?
        .clone();
    let columns = resolve_headers(&headers, mapping)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| EngineError::Import {
            row: line,
            column: String::new(),
            message: format!("unreadable row: {e}"),
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row = Row {
            record: &record,
            columns: &columns,
        };
        let converted = convert(&row).map_err(|e| EngineError::Import {
            row: line,
            column: e.column.to_string(),
            message: e.message,
        })?;
        rows.push(converted);
    }

    Ok(rows)
}

/// Imports an employee roster.
///
/// Missing work-time fractions default to 1 and missing base salaries to 0.
/// The imported roster must also pass the engine's input validation.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::import::import_employees;
/// use hr_kpi_engine::models::ContractType;
/// use rust_decimal::Decimal;
///
/// let csv = "\
/// Matricule;Contrat;Statut;Date d'entrée;Sexe;Temps de travail;Salaire de base
/// E001;CDI;Actif;01/09/2021;F;80%;2 850,00
/// ";
/// let employees = import_employees(csv).unwrap();
/// assert_eq!(employees[0].id, "E001");
/// assert_eq!(employees[0].contract_type, ContractType::Permanent);
/// assert_eq!(employees[0].work_time_fraction, Decimal::new(8, 1));
/// ```
pub fn import_employees(input: &str) -> EngineResult<Vec<Employee>> {
    let employees = read_rows(input, &ColumnMapping::employees(), |row| {
        Ok(Employee {
            id: row.required("id")?.to_string(),
            contract_type: row.required_with("contract_type", parse_contract_type)?,
            status: row.required_with("status", parse_status)?,
            work_time_fraction: row
                .optional_with("work_time_fraction", parse_fraction)?
                .unwrap_or(Decimal::ONE),
            birth_date: row.optional_with("birth_date", parse_date)?,
            hire_date: row.required_with("hire_date", parse_date)?,
            departure_date: row.optional_with("departure_date", parse_date)?,
            sex: row.required_with("sex", parse_sex)?,
            base_monthly_salary: row.amount("base_monthly_salary")?,
            site: row.text("site"),
            cost_center: row.text("cost_center"),
        })
    })?;

    validate_inputs(&employees, &[], &[])?;
    debug!(count = employees.len(), "Imported employees");
    Ok(employees)
}

/// Imports a payroll export, one row per employee and month.
///
/// Every amount and leave column is optional and defaults to 0. The period
/// may be any date of the month or a bare month (`2025-03`, `03/2025`).
pub fn import_remunerations(input: &str) -> EngineResult<Vec<RemunerationRecord>> {
    let records = read_rows(input, &ColumnMapping::remunerations(), |row| {
        let period: NaiveDate = row.required_with("period", parse_period)?;
        Ok(RemunerationRecord {
            base_salary: row.amount("base_salary")?,
            fixed_bonus: row.amount("fixed_bonus")?,
            variable_bonus: row.amount("variable_bonus")?,
            overtime_pay: row.amount("overtime_pay")?,
            benefits_in_kind: row.amount("benefits_in_kind")?,
            other_pay: row.amount("other_pay")?,
            social_contributions: row.amount("social_contributions")?,
            payroll_taxes: row.amount("payroll_taxes")?,
            health_employer_share: row.amount("health_employer_share")?,
            pension_employer_share: row.amount("pension_employer_share")?,
            paid_leave_days: row.amount("paid_leave_days")?,
            rtt_days: row.amount("rtt_days")?,
            paid_leave_provision: row.amount("paid_leave_provision")?,
            rtt_provision: row.amount("rtt_provision")?,
            ..RemunerationRecord::new(row.required("employee_id")?, period)
        })
    })?;

    validate_inputs(&[], &records, &[])?;
    debug!(count = records.len(), "Imported remuneration records");
    Ok(records)
}

/// Imports an absence log, one row per absence event.
pub fn import_absences(input: &str) -> EngineResult<Vec<AbsenceRecord>> {
    let absences = read_rows(input, &ColumnMapping::absences(), |row| {
        Ok(AbsenceRecord {
            employee_id: row.required("employee_id")?.to_string(),
            absence_type: row.required("absence_type")?.to_string(),
            start_date: row.optional_with("start_date", parse_date)?,
            days: row.required_with("days", parse_decimal)?,
        })
    })?;

    validate_inputs(&[], &[], &absences)?;
    debug!(count = absences.len(), "Imported absence records");
    Ok(absences)
}

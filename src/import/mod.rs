//! Spreadsheet import for employee rosters, payroll exports and absence logs.
//!
//! Imports accept CSV text with `,` or `;` delimiters and French or English
//! headers, and produce the records the calculation engine consumes.

mod columns;
mod records;

pub use columns::{
    ColumnMapping, ColumnSpec, ResolvedColumns, normalize_label, parse_contract_type,
    parse_date, parse_decimal, parse_fraction, parse_period, parse_sex, parse_status,
    resolve_headers,
};
pub use records::{detect_delimiter, import_absences, import_employees, import_remunerations};

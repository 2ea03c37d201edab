//! Column mappings and cell parsers for spreadsheet imports.
//!
//! Payroll and HR exports rarely agree on header names, so every canonical
//! column accepts a set of aliases. Headers and enum cells are compared
//! after [`normalize_label`], which ignores case, accents, punctuation and
//! whitespace.

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::{ContractType, EmploymentStatus, Sex};

/// A canonical column and the header spellings accepted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Canonical column name, matching the record field.
    pub name: &'static str,
    /// Accepted headers, already in normalized form.
    pub aliases: &'static [&'static str],
    /// Whether the header row must contain this column.
    pub required: bool,
}

const fn required(name: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required: true,
    }
}

const fn optional(name: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required: false,
    }
}

const EMPLOYEE_COLUMNS: &[ColumnSpec] = &[
    required("id", &["id", "employee_id", "matricule", "salarie_id", "employee"]),
    required(
        "contract_type",
        &["contract_type", "contract", "contrat", "type_contrat", "type_de_contrat"],
    ),
    required("status", &["status", "statut", "employment_status"]),
    optional(
        "work_time_fraction",
        &["work_time_fraction", "fte", "etp", "taux_activite", "temps_de_travail"],
    ),
    optional(
        "birth_date",
        &["birth_date", "date_of_birth", "dob", "date_naissance", "date_de_naissance"],
    ),
    required(
        "hire_date",
        &["hire_date", "date_entree", "date_d_entree", "date_embauche", "date_d_embauche"],
    ),
    optional(
        "departure_date",
        &["departure_date", "date_sortie", "date_de_sortie", "leave_date"],
    ),
    required("sex", &["sex", "sexe", "gender", "genre"]),
    optional(
        "base_monthly_salary",
        &[
            "base_monthly_salary",
            "base_salary",
            "salaire_base",
            "salaire_de_base",
            "salaire_mensuel",
        ],
    ),
    optional("site", &["site", "site_code", "etablissement", "code_site"]),
    optional(
        "cost_center",
        &["cost_center", "cost_centre", "centre_de_cout", "centre_cout", "code_analytique"],
    ),
];

const REMUNERATION_COLUMNS: &[ColumnSpec] = &[
    required("employee_id", &["employee_id", "matricule", "id", "salarie_id"]),
    required("period", &["period", "periode", "mois", "month", "pay_period"]),
    optional("base_salary", &["base_salary", "salaire_base", "salaire_de_base"]),
    optional("fixed_bonus", &["fixed_bonus", "prime_fixe", "primes_fixes"]),
    optional(
        "variable_bonus",
        &["variable_bonus", "prime_variable", "primes_variables", "bonus"],
    ),
    optional(
        "overtime_pay",
        &["overtime_pay", "overtime", "heures_supplementaires", "heures_sup"],
    ),
    optional(
        "benefits_in_kind",
        &["benefits_in_kind", "avantages_en_nature", "avantages_nature"],
    ),
    optional("other_pay", &["other_pay", "autres_elements", "autres_remunerations"]),
    optional(
        "social_contributions",
        &["social_contributions", "cotisations_sociales", "charges_sociales"],
    ),
    optional(
        "payroll_taxes",
        &["payroll_taxes", "taxes_sur_salaires", "taxe_sur_salaires"],
    ),
    optional(
        "health_employer_share",
        &["health_employer_share", "mutuelle_part_employeur", "mutuelle"],
    ),
    optional(
        "pension_employer_share",
        &["pension_employer_share", "prevoyance_part_employeur", "prevoyance"],
    ),
    optional(
        "paid_leave_days",
        &["paid_leave_days", "cp_acquis", "jours_cp", "conges_payes"],
    ),
    optional("rtt_days", &["rtt_days", "rtt_acquis", "jours_rtt", "rtt"]),
    optional(
        "paid_leave_provision",
        &["paid_leave_provision", "provision_cp", "provision_conges_payes"],
    ),
    optional("rtt_provision", &["rtt_provision", "provision_rtt"]),
];

const ABSENCE_COLUMNS: &[ColumnSpec] = &[
    required("employee_id", &["employee_id", "matricule", "id", "salarie_id"]),
    required(
        "absence_type",
        &["absence_type", "type_absence", "type_d_absence", "motif", "type"],
    ),
    optional("start_date", &["start_date", "date_debut", "date_de_debut"]),
    required("days", &["days", "jours", "nb_jours", "nombre_de_jours", "duree"]),
];

/// The set of columns expected for one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: &'static [ColumnSpec],
}

impl ColumnMapping {
    /// Columns of an employee roster export.
    pub fn employees() -> Self {
        Self {
            columns: EMPLOYEE_COLUMNS,
        }
    }

    /// Columns of a monthly payroll export.
    pub fn remunerations() -> Self {
        Self {
            columns: REMUNERATION_COLUMNS,
        }
    }

    /// Columns of an absence log.
    pub fn absences() -> Self {
        Self {
            columns: ABSENCE_COLUMNS,
        }
    }

    /// All columns, in declaration order.
    pub fn columns(&self) -> &'static [ColumnSpec] {
        self.columns
    }

    /// Returns the canonical column a header refers to, if any.
    ///
    /// ```
    /// use hr_kpi_engine::import::ColumnMapping;
    ///
    /// let mapping = ColumnMapping::employees();
    /// assert_eq!(mapping.canonical_for("Date d'entrée"), Some("hire_date"));
    /// assert_eq!(mapping.canonical_for("Matricule"), Some("id"));
    /// assert_eq!(mapping.canonical_for("Commentaire"), None);
    /// ```
    pub fn canonical_for(&self, header: &str) -> Option<&'static str> {
        let normalized = normalize_label(header);
        self.columns
            .iter()
            .find(|c| c.aliases.contains(&normalized.as_str()))
            .map(|c| c.name)
    }
}

/// Positions of the canonical columns within a header row.
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    indices: HashMap<&'static str, usize>,
}

impl ResolvedColumns {
    /// Position of a canonical column, if the header row contained it.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.indices.get(column).copied()
    }

    /// The trimmed cell for `column`, or `None` when the column is absent or
    /// the cell is blank.
    pub fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        let index = self.index_of(column)?;
        record.get(index).map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Maps each canonical column of `mapping` to its position in `headers`.
///
/// Unknown headers are ignored. When two headers resolve to the same
/// column, the leftmost wins.
///
/// # Errors
///
/// Returns [`EngineError::Import`] on row 1 when a required column is missing.
pub fn resolve_headers(
    headers: &StringRecord,
    mapping: &ColumnMapping,
) -> EngineResult<ResolvedColumns> {
    let mut indices = HashMap::new();
    for (index, header) in headers.iter().enumerate() {
        if let Some(column) = mapping.canonical_for(header) {
            indices.entry(column).or_insert(index);
        }
    }

    if let Some(missing) = mapping
        .columns
        .iter()
        .find(|c| c.required && !indices.contains_key(c.name))
    {
        return Err(EngineError::Import {
            row: 1,
            column: missing.name.to_string(),
            message: format!(
                "missing required column (accepted headers: {})",
                missing.aliases.join(", ")
            ),
        });
    }

    Ok(ResolvedColumns { indices })
}

/// Lowercases, strips accents and turns every run of punctuation or
/// whitespace into a single underscore.
///
/// ```
/// use hr_kpi_engine::import::normalize_label;
///
/// assert_eq!(normalize_label("  Date d'entrée "), "date_d_entree");
/// assert_eq!(normalize_label("\u{feff}Centre de coût"), "centre_de_cout");
/// ```
pub fn normalize_label(label: &str) -> String {
    let mut normalized = String::with_capacity(label.len());
    let mut pending_separator = false;

    for c in label.trim_start_matches('\u{feff}').chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(c);
        if folded.chars().all(char::is_alphanumeric) {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.push_str(folded);
        } else {
            pending_separator = true;
        }
    }

    normalized
}

fn fold_accent(c: char) -> &'static str {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' => "a",
        'ç' => "c",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'î' | 'ï' | 'í' => "i",
        'ô' | 'ö' | 'ó' => "o",
        'ù' | 'û' | 'ü' | 'ú' => "u",
        'ÿ' => "y",
        'œ' => "oe",
        'æ' => "ae",
        _ => ascii_str(c),
    }
}

fn ascii_str(c: char) -> &'static str {
    const ALNUM: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
    match ALNUM.find(c) {
        Some(position) => &ALNUM[position..position + 1],
        None => " ",
    }
}

/// Parses a date written as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY", value))
}

/// Parses a pay period. Accepts any date, or a bare month as `YYYY-MM` or
/// `MM/YYYY`, and returns the first day of that month.
pub fn parse_period(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    let first_of_month = |year: &str, month: &str| {
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    };

    let bare_month = match value.split_once(['-', '/']) {
        Some((year, month)) if year.len() == 4 && !month.contains(['-', '/']) => {
            first_of_month(year, month)
        }
        Some((month, year)) if year.len() == 4 && !year.contains(['-', '/']) => {
            first_of_month(year, month)
        }
        _ => None,
    };

    match bare_month {
        Some(date) => Ok(date),
        None => parse_date(value).map(|date| date.with_day0(0).unwrap_or(date)),
    }
}

/// Parses a decimal using either `,` or `.` as the decimal separator.
///
/// Spaces (including non-breaking ones) are thousands separators. When both
/// `,` and `.` appear, the last one is the decimal separator and the other
/// one is dropped.
///
/// ```
/// use hr_kpi_engine::import::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal("1 234,56").unwrap(), Decimal::new(123456, 2));
/// assert_eq!(parse_decimal("1,234.56").unwrap(), Decimal::new(123456, 2));
/// assert_eq!(parse_decimal("1.234,56").unwrap(), Decimal::new(123456, 2));
/// assert!(parse_decimal("12 jours").is_err());
/// ```
pub fn parse_decimal(value: &str) -> Result<Decimal, String> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{202f}')
        .collect();
    let canonical = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (_, Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        (None, None) => compact,
    };
    Decimal::from_str(&canonical).map_err(|_| format!("invalid number '{}'", value))
}

/// Parses a work-time fraction, either as a fraction (`0.8`) or a
/// percentage (`80%`).
pub fn parse_fraction(value: &str) -> Result<Decimal, String> {
    match value.trim().strip_suffix('%') {
        Some(percent) => parse_decimal(percent).map(|p| p / Decimal::ONE_HUNDRED),
        None => parse_decimal(value),
    }
}

/// Parses a contract type (`CDI`, `permanent`, `CDD`, `alternance`...).
pub fn parse_contract_type(value: &str) -> Result<ContractType, String> {
    match normalize_label(value).as_str() {
        "cdi" | "permanent" => Ok(ContractType::Permanent),
        "cdd" | "fixed_term" | "temporary" => Ok(ContractType::FixedTerm),
        "alternance" | "alternant" | "apprentissage" | "apprenticeship" | "apprentice" => {
            Ok(ContractType::Apprenticeship)
        }
        "stage" | "stagiaire" | "internship" | "intern" => Ok(ContractType::Internship),
        _ => Err(format!("unknown contract type '{}'", value)),
    }
}

/// Parses an employment status (`actif`, `active`, `sorti`...).
pub fn parse_status(value: &str) -> Result<EmploymentStatus, String> {
    match normalize_label(value).as_str() {
        "active" | "actif" | "active_employee" | "en_poste" => Ok(EmploymentStatus::Active),
        "inactive" | "inactif" | "sorti" | "left" | "terminated" => {
            Ok(EmploymentStatus::Inactive)
        }
        _ => Err(format!("unknown employment status '{}'", value)),
    }
}

/// Parses a sex (`M`, `F`, `homme`, `female`...).
pub fn parse_sex(value: &str) -> Result<Sex, String> {
    match normalize_label(value).as_str() {
        "m" | "h" | "male" | "homme" | "masculin" => Ok(Sex::Male),
        "f" | "female" | "femme" | "feminin" => Ok(Sex::Female),
        _ => Err(format!("unknown sex '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Employee ID"), "employee_id");
        assert_eq!(normalize_label("Type d'absence"), "type_d_absence");
        assert_eq!(normalize_label("Prévoyance (part employeur)"), "prevoyance_part_employeur");
        assert_eq!(normalize_label("--"), "");
    }

    #[test]
    fn test_aliases_are_normalized() {
        for mapping in [
            ColumnMapping::employees(),
            ColumnMapping::remunerations(),
            ColumnMapping::absences(),
        ] {
            for column in mapping.columns() {
                for alias in column.aliases {
                    assert_eq!(normalize_label(alias), *alias, "alias of {}", column.name);
                }
            }
        }
    }

    #[test]
    fn test_aliases_are_unique_within_a_mapping() {
        for mapping in [
            ColumnMapping::employees(),
            ColumnMapping::remunerations(),
            ColumnMapping::absences(),
        ] {
            let mut seen = std::collections::HashSet::new();
            for column in mapping.columns() {
                for alias in column.aliases {
                    assert!(seen.insert(*alias), "duplicate alias {}", alias);
                }
            }
        }
    }

    #[test]
    fn test_resolve_french_headers() {
        let row = headers(&[
            "Matricule",
            "Type de contrat",
            "Statut",
            "Date d'entrée",
            "Sexe",
            "Commentaire",
        ]);
        let resolved = resolve_headers(&row, &ColumnMapping::employees()).unwrap();

        assert_eq!(resolved.index_of("id"), Some(0));
        assert_eq!(resolved.index_of("contract_type"), Some(1));
        assert_eq!(resolved.index_of("hire_date"), Some(3));
        assert_eq!(resolved.index_of("site"), None);
    }

    #[test]
    fn test_missing_required_column() {
        let row = headers(&["matricule", "motif"]);
        let err = resolve_headers(&row, &ColumnMapping::absences()).unwrap_err();

        match err {
            EngineError::Import { row, column, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "days");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_leftmost_duplicate_header_wins() {
        let row = headers(&["id", "matricule", "motif", "jours"]);
        let resolved = resolve_headers(&row, &ColumnMapping::absences()).unwrap();
        assert_eq!(resolved.index_of("employee_id"), Some(0));
    }

    #[test]
    fn test_blank_cell_is_none() {
        let row = headers(&["matricule", "motif", "jours"]);
        let resolved = resolve_headers(&row, &ColumnMapping::absences()).unwrap();
        let record = StringRecord::from(vec!["emp_001", "  ", "2"]);

        assert_eq!(resolved.cell(&record, "employee_id"), Some("emp_001"));
        assert_eq!(resolved.cell(&record, "absence_type"), None);
        assert_eq!(resolved.cell(&record, "start_date"), None);
    }

    #[test]
    fn test_parse_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15").unwrap(), expected);
        assert_eq!(parse_date("15/03/2024").unwrap(), expected);
        assert!(parse_date("03/15/2024").is_err());
        assert!(parse_date("hier").is_err());
    }

    #[test]
    fn test_parse_period() {
        let march = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(parse_period("2025-03").unwrap(), march);
        assert_eq!(parse_period("03/2025").unwrap(), march);
        assert_eq!(parse_period("2025-03-31").unwrap(), march);
        assert_eq!(parse_period("31/03/2025").unwrap(), march);
        assert!(parse_period("2025-13").is_err());
    }

    #[test]
    fn test_parse_decimal_separators() {
        assert_eq!(parse_decimal("2500").unwrap(), Decimal::from(2500));
        assert_eq!(parse_decimal("2500,5").unwrap(), Decimal::new(25005, 1));
        assert_eq!(parse_decimal("2500.5").unwrap(), Decimal::new(25005, 1));
        assert_eq!(parse_decimal("2\u{a0}500,50").unwrap(), Decimal::new(250050, 2));
        assert_eq!(parse_decimal("-120,00").unwrap(), Decimal::from(-120));
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn test_parse_decimal_last_separator_is_decimal() {
        assert_eq!(parse_decimal("1.234,56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(parse_decimal("1,234.56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(parse_decimal("12.345.678,9").unwrap(), Decimal::new(123456789, 1));
        assert_eq!(parse_decimal("12,345,678.9").unwrap(), Decimal::new(123456789, 1));
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction("0,8").unwrap(), Decimal::new(8, 1));
        assert_eq!(parse_fraction("80%").unwrap(), Decimal::new(8, 1));
        assert_eq!(parse_fraction("50 %").unwrap(), Decimal::new(5, 1));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(parse_contract_type("CDI").unwrap(), ContractType::Permanent);
        assert_eq!(parse_contract_type("fixed-term").unwrap(), ContractType::FixedTerm);
        assert_eq!(parse_contract_type("Alternance").unwrap(), ContractType::Apprenticeship);
        assert_eq!(parse_contract_type("Stagiaire").unwrap(), ContractType::Internship);
        assert!(parse_contract_type("freelance").is_err());

        assert_eq!(parse_status("Actif").unwrap(), EmploymentStatus::Active);
        assert_eq!(parse_status("SORTI").unwrap(), EmploymentStatus::Inactive);

        assert_eq!(parse_sex("H").unwrap(), Sex::Male);
        assert_eq!(parse_sex("Femme").unwrap(), Sex::Female);
        assert!(parse_sex("x").is_err());
    }
}

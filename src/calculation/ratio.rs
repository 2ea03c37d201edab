//! Guarded ratio helpers.
//!
//! Every KPI ratio goes through these functions so that an empty
//! denominator yields zero instead of a panic.

use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Divides `numerator` by `denominator`, returning zero when the
/// denominator is zero.
///
/// # Examples
///
/// ```
/// use hr_kpi_engine::calculation::safe_div;
/// use rust_decimal::Decimal;
///
/// assert_eq!(safe_div(Decimal::from(10), Decimal::from(4)), Decimal::new(25, 1));
/// assert_eq!(safe_div(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `part / whole × 100` for decimal amounts, zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    // Multiply first so that small counts keep their precision.
    safe_div(part * HUNDRED, whole)
}

/// `count / total × 100` for head counts, zero when `total` is zero.
///
/// ```
/// use hr_kpi_engine::calculation::percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentage(1, 4), Decimal::from(25));
/// assert_eq!(percentage(3, 0), Decimal::ZERO);
/// ```
pub fn percentage(count: usize, total: usize) -> Decimal {
    percent_of(Decimal::from(count), Decimal::from(total))
}

//! Formatting helpers for presenting measurements.

use time::{macros::format_description, Date};

/// `YYYY-MM-DD`, the format date inputs and the measurement API both use.
pub fn format_iso_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| format!("{:04}-{:02}-{:02}", date.year(), date.month() as u8, date.day()))
}

/// Trim trailing zeros so `8.50` shows as `8.5` and `420.0` as `420`.
pub fn format_value(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let fixed = format!("{value:.precision$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

pub fn format_with_unit(value: f64, precision: usize, unit: &str) -> String {
    let number = format_value(value, precision);
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}

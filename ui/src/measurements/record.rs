use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{macros::format_description, PrimitiveDateTime};

use super::MetricKey;

/// Appended to date-only strings before parsing so a calendar day never shifts
/// across midnight when an offset is applied later.
pub const MIDDAY_MARKER: &str = "T12:00:00";

/// One row of `/api/measurements/{id}`.
///
/// Fields stay as raw JSON: the server may send numbers, numeric strings,
/// empty strings or `null`, and validation happens per metric at point build
/// time rather than failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub nitrate: Value,
    #[serde(default)]
    pub phosphate: Value,
    #[serde(default)]
    pub kh: Value,
    #[serde(default)]
    pub magnesium: Value,
    #[serde(default)]
    pub calcium: Value,
}

impl MeasurementRecord {
    pub fn raw(&self, metric: MetricKey) -> &Value {
        match metric {
            MetricKey::Nitrate => &self.nitrate,
            MetricKey::Phosphate => &self.phosphate,
            MetricKey::Kh => &self.kh,
            MetricKey::Magnesium => &self.magnesium,
            MetricKey::Calcium => &self.calcium,
        }
    }

    /// Non-empty date string, if any.
    pub fn date_str(&self) -> Option<&str> {
        self.date.as_str().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn parsed_date(&self) -> Option<PrimitiveDateTime> {
        self.date_str().and_then(parse_midday)
    }

    pub fn value(&self, metric: MetricKey) -> Option<f64> {
        parse_value(self.raw(metric))
    }
}

/// Parse a `YYYY-MM-DD` date pinned to midday.
pub fn parse_midday(date: &str) -> Option<PrimitiveDateTime> {
    let stamped = format!("{}{MIDDAY_MARKER}", date.trim());
    PrimitiveDateTime::parse(
        &stamped,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .ok()
}

/// Finite number from a JSON number or numeric string; anything else is `None`.
pub fn parse_value(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn midday_marker_is_applied() {
        assert_eq!(parse_midday("2024-01-31"), Some(datetime!(2024-01-31 12:00:00)));
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert_eq!(parse_midday("2024-02-30"), None);
        assert_eq!(parse_midday("31/01/2024"), None);
        assert_eq!(parse_midday(""), None);
        assert_eq!(parse_midday("2024-01-31T08:00:00"), None);
    }

    #[test]
    fn values_accept_numbers_and_numeric_strings() {
        assert_eq!(parse_value(&json!(5)), Some(5.0));
        assert_eq!(parse_value(&json!(0.04)), Some(0.04));
        assert_eq!(parse_value(&json!(" 7.5 ")), Some(7.5));
    }

    #[test]
    fn values_reject_empty_and_garbage() {
        assert_eq!(parse_value(&json!(null)), None);
        assert_eq!(parse_value(&json!("")), None);
        assert_eq!(parse_value(&json!("bad")), None);
        assert_eq!(parse_value(&json!("NaN")), None);
        assert_eq!(parse_value(&json!("inf")), None);
        assert_eq!(parse_value(&json!(true)), None);
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let record: MeasurementRecord =
            serde_json::from_value(json!({ "date": "2024-05-01", "kh": 8.1, "id": 3 })).unwrap();
        assert_eq!(record.value(MetricKey::Kh), Some(8.1));
        assert_eq!(record.value(MetricKey::Calcium), None);
        assert!(record.parsed_date().is_some());
    }
}

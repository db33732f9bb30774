use crate::core::format::format_value;
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

impl RangeStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            RangeStatus::Below | RangeStatus::Above => "input--warning",
            RangeStatus::Within => "input--success",
        }
    }
}

/// Parse a numeric input value. Accepts a decimal comma, as the server does.
pub fn parse_input(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Classify an input value against its bounds (both inclusive). `None` when
/// the value does not parse, in which case the input is left untouched.
pub fn classify_range(raw: &str, min: Option<f64>, max: Option<f64>) -> Option<RangeStatus> {
    let value = parse_input(raw)?;
    Some(match (min, max) {
        (Some(min), _) if value < min => RangeStatus::Below,
        (_, Some(max)) if value > max => RangeStatus::Above,
        _ => RangeStatus::Within,
    })
}

/// Localized explanation shown as the input's tooltip.
pub fn range_tooltip(status: RangeStatus, min: Option<f64>, max: Option<f64>) -> String {
    let min = min.map(|v| format_value(v, 3)).unwrap_or_else(|| "—".into());
    let max = max.map(|v| format_value(v, 3)).unwrap_or_else(|| "—".into());
    match status {
        RangeStatus::Below => t!("range-below", min = min),
        RangeStatus::Above => t!("range-above", max = max),
        RangeStatus::Within => t!("range-within", min = min, max = max),
    }
}

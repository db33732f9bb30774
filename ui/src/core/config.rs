//! Dashboard configuration.
//!
//! Every field has a default so the embedding page only needs to override
//! what differs from a stock deployment. The struct travels inside the boot
//! payload (see [`crate::boot`]).

use serde::{Deserialize, Serialize};

use crate::measurements::MetricKey;

/// Path template for the measurement endpoint; `{id}` is the aquarium id.
pub const DEFAULT_MEASUREMENTS_PATH: &str = "/api/measurements/{id}";
/// Day-granularity tick labels on the time axis.
pub const DEFAULT_AXIS_FORMAT: &str = "[day]/[month]";
/// Date shown in chart tooltips.
pub const DEFAULT_TOOLTIP_FORMAT: &str = "[day]/[month]/[year]";
pub const DEFAULT_ANIMATION_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Absolute base for API requests. `None` means the page origin.
    pub api_base: Option<String>,
    pub measurements_path: String,
    pub axis_format: String,
    pub tooltip_format: String,
    /// Metric plotted when no toggle is checked.
    pub default_metric: MetricKey,
    pub animation_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            measurements_path: DEFAULT_MEASUREMENTS_PATH.to_string(),
            axis_format: DEFAULT_AXIS_FORMAT.to_string(),
            tooltip_format: DEFAULT_TOOLTIP_FORMAT.to_string(),
            default_metric: MetricKey::Nitrate,
            animation_ms: DEFAULT_ANIMATION_MS,
        }
    }
}

impl DashboardConfig {
    /// Base URL requests are resolved against, without a trailing slash.
    pub fn resolved_base(&self) -> String {
        self.api_base
            .clone()
            .or_else(crate::core::platform::page_origin)
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string()
    }
}

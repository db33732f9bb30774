use std::collections::BTreeSet;

use tracing::{debug, error, warn};

use super::dataset::{positional, visible_datasets, Dataset};
use super::render::{
    Chart, ChartConfig, ChartError, ChartFailure, TimeUnit, UpdateMode, XAxis, YAxis, BACKGROUND,
};
use super::surface::ChartSurface;
use crate::core::config::DashboardConfig;
use crate::measurements::{MeasurementRecord, MetricKey};

/// Chart settings derived from the dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub axis_format: String,
    pub tooltip_format: String,
    pub begin_at_zero: bool,
    pub default_metric: MetricKey,
    pub animation_ms: u64,
}

impl From<&DashboardConfig> for ChartOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            axis_format: config.axis_format.clone(),
            tooltip_format: config.tooltip_format.clone(),
            begin_at_zero: false,
            default_metric: config.default_metric,
            animation_ms: config.animation_ms,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

/// Time-indexed x axis at day granularity.
pub fn primary_config(datasets: Vec<Dataset>, options: &ChartOptions) -> ChartConfig {
    ChartConfig {
        x_axis: XAxis::Time {
            unit: TimeUnit::Day,
            display_format: options.axis_format.clone(),
            tooltip_format: options.tooltip_format.clone(),
        },
        y_axis: YAxis {
            begin_at_zero: options.begin_at_zero,
        },
        datasets,
        animation_ms: options.animation_ms,
    }
}

/// Linear index x axis with every point placed at its sequence position.
pub fn fallback_config(datasets: &[Dataset], options: &ChartOptions) -> ChartConfig {
    ChartConfig {
        x_axis: XAxis::Index,
        datasets: positional(datasets),
        ..primary_config(Vec::new(), options)
    }
}

/// Wipe whatever an earlier chart left on the surface.
pub fn clear_surface<S: ChartSurface>(surface: &mut S) {
    match surface.prepare() {
        Ok(_) => surface.clear(BACKGROUND),
        Err(err) => debug!(%err, "surface unavailable; nothing to clear"),
    }
}

/// The "no data" notice is shown exactly when the raw record list is empty.
pub fn shows_no_data(records: &[MeasurementRecord]) -> bool {
    records.is_empty()
}

/// Build the chart on a time axis, retrying once on an index axis if that
/// fails. Returns `None` when both attempts fail, leaving the surface blank.
pub fn render_with_fallback<S: ChartSurface>(
    surface: S,
    datasets: Vec<Dataset>,
    options: &ChartOptions,
) -> Option<Chart<S>> {
    let retry = datasets.clone();
    match Chart::new(surface, primary_config(datasets, options)) {
        Ok(chart) => Some(chart),
        Err(ChartFailure { error: first, surface }) => {
            warn!(error = %first, "time-axis chart failed; retrying with index axis");
            match Chart::new(surface, fallback_config(&retry, options)) {
                Ok(chart) => Some(chart),
                Err(ChartFailure { error: second, mut surface }) => {
                    error!(error = %second, "chart construction failed; leaving chart unrendered");
                    if !matches!(second, ChartError::Surface(_)) {
                        clear_surface(&mut surface);
                    }
                    None
                }
            }
        }
    }
}

/// Initial render for the dashboard. An empty record list constructs nothing
/// and blanks the surface; the panel shows its "no data" notice instead.
pub fn render_dashboard_chart<S: ChartSurface>(
    mut surface: S,
    records: &[MeasurementRecord],
    checked: &BTreeSet<MetricKey>,
    options: &ChartOptions,
) -> Option<Chart<S>> {
    if shows_no_data(records) {
        debug!("no measurements; chart not constructed");
        clear_surface(&mut surface);
        return None;
    }
    let datasets = visible_datasets(records, checked, options.default_metric);
    render_with_fallback(surface, datasets, options)
}

/// Toggle change: recompute the visible datasets and request an animated
/// update of the existing chart.
pub fn refresh_chart<S: ChartSurface>(
    chart: &mut Chart<S>,
    records: &[MeasurementRecord],
    checked: &BTreeSet<MetricKey>,
    options: &ChartOptions,
) {
    let datasets = visible_datasets(records, checked, options.default_metric);
    if let Err(err) = chart.update(datasets, UpdateMode::Animated) {
        warn!(%err, "chart update failed; keeping previous datasets");
    }
}

/// Language change: rebuild the datasets so legend and tooltip labels follow
/// the active locale, redrawing without replaying the entry animation.
pub fn relabel_chart<S: ChartSurface>(
    chart: &mut Chart<S>,
    records: &[MeasurementRecord],
    checked: &BTreeSet<MetricKey>,
    options: &ChartOptions,
) {
    let datasets = visible_datasets(records, checked, options.default_metric);
    if let Err(err) = chart.update(datasets, UpdateMode::Immediate) {
        warn!(%err, "chart relabel failed; keeping previous labels");
    }
}

use std::collections::BTreeSet;

use time::PrimitiveDateTime;

use crate::measurements::{build_points, gap_breaks, MeasurementRecord, MetricKey};

/// Horizontal coordinate of a plotted point.
///
/// The index variant is what the fallback chart plots. It still carries the
/// measurement date so tooltips can show it even though the axis cannot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotX {
    Date(PrimitiveDateTime),
    Position { index: usize, date: PrimitiveDateTime },
}

impl PlotX {
    pub fn date(&self) -> PrimitiveDateTime {
        match *self {
            PlotX::Date(date) => date,
            PlotX::Position { date, .. } => date,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match *self {
            PlotX::Date(_) => None,
            PlotX::Position { index, .. } => Some(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: PlotX,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStyle {
    pub point_radius: f64,
    pub line_width: f64,
    /// Bezier smoothing; 0 draws straight segments.
    pub tension: f64,
    pub fill: bool,
    /// When false the line breaks wherever a measurement is missing.
    pub span_gaps: bool,
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self {
            point_radius: 3.0,
            line_width: 2.0,
            tension: 0.25,
            fill: false,
            span_gaps: false,
        }
    }
}

/// One metric's styled series, rebuilt from the records whenever the
/// toggles change.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub metric: MetricKey,
    pub label: String,
    pub color: &'static str,
    pub points: Vec<PlotPoint>,
    /// Point indices that start a new line segment.
    pub breaks: Vec<usize>,
    pub style: DatasetStyle,
}

impl Dataset {
    pub fn from_records(records: &[MeasurementRecord], metric: MetricKey) -> Option<Self> {
        let points = build_points(records, metric);
        if points.is_empty() {
            return None;
        }
        let breaks = gap_breaks(records, metric, &points);

        Some(Self {
            metric,
            label: metric.label(),
            color: metric.color(),
            points: points
                .into_iter()
                .map(|p| PlotPoint {
                    x: PlotX::Date(p.x),
                    y: p.y,
                })
                .collect(),
            breaks,
            style: DatasetStyle::default(),
        })
    }

    /// Same series with every x replaced by its position in the sorted sequence.
    pub fn positional(&self) -> Self {
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| PlotPoint {
                x: PlotX::Position {
                    index,
                    date: p.x.date(),
                },
                y: p.y,
            })
            .collect();
        Self {
            points,
            ..self.clone()
        }
    }
}

/// Toggle `value` attributes to metric keys; unknown values are ignored.
pub fn checked_from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> BTreeSet<MetricKey> {
    values.into_iter().filter_map(MetricKey::from_key).collect()
}

/// Metrics to plot, in table order. An empty selection falls back to the
/// single default metric so the chart is never blank by omission.
pub fn visible_metrics(checked: &BTreeSet<MetricKey>, default_metric: MetricKey) -> Vec<MetricKey> {
    if checked.is_empty() {
        vec![default_metric]
    } else {
        checked.iter().copied().collect()
    }
}

/// Datasets for the visible metrics that have at least one valid point.
pub fn visible_datasets(
    records: &[MeasurementRecord],
    checked: &BTreeSet<MetricKey>,
    default_metric: MetricKey,
) -> Vec<Dataset> {
    visible_metrics(checked, default_metric)
        .into_iter()
        .filter_map(|metric| Dataset::from_records(records, metric))
        .collect()
}

pub fn positional(datasets: &[Dataset]) -> Vec<Dataset> {
    datasets.iter().map(Dataset::positional).collect()
}

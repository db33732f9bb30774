//! Measurement records as served by the API, the metric table, and the
//! conversion from raw records into chart-ready point series.

mod loader;
mod metrics;
mod points;
mod record;

pub use loader::{decode_body, fetch_measurements, load_measurements, measurements_url, LoadError};
pub use metrics::{MetricDescriptor, MetricKey, RecommendedRange, METRICS};
pub use points::{build_points, gap_breaks, ChartPoint};
pub use record::{parse_midday, parse_value, MeasurementRecord, MIDDAY_MARKER};

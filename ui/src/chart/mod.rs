//! Measurement chart: dataset construction, scales, the chart instance and
//! the render-with-fallback policy the dashboard uses.

mod controller;
mod dataset;
mod render;
mod scale;
mod surface;

pub use controller::{
    clear_surface, fallback_config, primary_config, refresh_chart, relabel_chart,
    render_dashboard_chart, render_with_fallback, shows_no_data, ChartOptions,
};
pub use dataset::{
    checked_from_values, positional, visible_datasets, visible_metrics, Dataset, DatasetStyle,
    PlotPoint, PlotX,
};
pub use render::{
    Chart, ChartConfig, ChartError, ChartFailure, TimeUnit, Tooltip, UpdateMode, XAxis, YAxis,
};
pub use scale::{IndexScale, LinearScale, Tick, TimeScale, XScale};
#[cfg(target_arch = "wasm32")]
pub use surface::CanvasSurface;
pub use surface::{ChartSurface, DrawCommand, PathOp, RecordingSurface, SurfaceError, TextAlign};

use tracing::debug;

use super::dataset::{positional, Dataset, PlotPoint};
use super::scale::{IndexScale, LinearScale, TimeScale, XScale};
use super::surface::{ChartSurface, PathOp, SurfaceError, TextAlign};
use crate::core::format::{format_iso_date, format_with_unit};

pub(crate) const BACKGROUND: &str = "#fbfdff";
const GRID: &str = "#e3e8ef";
const AXIS_TEXT: &str = "#5b6472";
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 32.0;
const LEGEND_SWATCH: f64 = 10.0;
const LEGEND_GAP: f64 = 120.0;
/// Pointer distance within which a point counts as hovered.
const HIT_RADIUS: f64 = 12.0;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("invalid date format `{format}`: {source}")]
    TimeFormat {
        format: String,
        source: time::error::InvalidFormatDescription,
    },

    #[error("could not format axis date: {0}")]
    Format(#[from] time::error::Format),

    #[error("time axis requires dated points")]
    UndatedPoint,
}

/// A failed construction hands the surface back so the caller can retry on it.
#[derive(Debug)]
pub struct ChartFailure<S> {
    pub error: ChartError,
    pub surface: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    Time {
        unit: TimeUnit,
        display_format: String,
        tooltip_format: String,
    },
    /// Plain linear index axis; datasets must be positional.
    Index,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YAxis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub datasets: Vec<Dataset>,
    pub animation_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Animated,
    Immediate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub body: String,
    pub color: &'static str,
    pub anchor: (f64, f64),
}

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

#[derive(Debug, Clone)]
struct Layout {
    area: PlotArea,
    x: XScale,
    y: LinearScale,
}

impl Layout {
    fn build(size: (f64, f64), config: &ChartConfig) -> Result<Self, ChartError> {
        let x = match &config.x_axis {
            XAxis::Time {
                unit: TimeUnit::Day,
                display_format,
                tooltip_format,
            } => XScale::Time(TimeScale::build(
                &config.datasets,
                display_format,
                tooltip_format,
            )?),
            XAxis::Index => XScale::Index(IndexScale::build(&config.datasets)),
        };
        let y = LinearScale::fit(
            config
                .datasets
                .iter()
                .flat_map(|d| d.points.iter().map(|p| p.y)),
            config.y_axis.begin_at_zero,
        );
        let area = PlotArea {
            left: MARGIN_LEFT,
            right: (size.0 - MARGIN_RIGHT).max(MARGIN_LEFT + 1.0),
            top: MARGIN_TOP,
            bottom: (size.1 - MARGIN_BOTTOM).max(MARGIN_TOP + 1.0),
        };
        Ok(Self { area, x, y })
    }

    fn pixel(&self, point: &PlotPoint) -> (f64, f64) {
        let a = self.area;
        (
            self.x.project(self.x.value_of(&point.x), a.left, a.right),
            self.y.project(point.y, a.top, a.bottom),
        )
    }
}

/// A constructed chart bound to its surface.
pub struct Chart<S: ChartSurface> {
    surface: S,
    config: ChartConfig,
    layout: Layout,
    size: (f64, f64),
    /// Entry animation progress in `0.0..=1.0`.
    progress: f64,
}

impl<S: ChartSurface> Chart<S> {
    /// Prepare the surface, build the scales and draw the first frame.
    pub fn new(mut surface: S, config: ChartConfig) -> Result<Self, ChartFailure<S>> {
        let size = match surface.prepare() {
            Ok(size) => size,
            Err(err) => {
                return Err(ChartFailure {
                    error: err.into(),
                    surface,
                })
            }
        };
        let layout = match Layout::build(size, &config) {
            Ok(layout) => layout,
            Err(error) => return Err(ChartFailure { error, surface }),
        };

        let mut chart = Self {
            surface,
            config,
            layout,
            size,
            progress: 1.0,
        };
        chart.draw();
        Ok(chart)
    }

    pub fn is_index_axis(&self) -> bool {
        matches!(self.config.x_axis, XAxis::Index)
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.config.datasets
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    /// Swap in new datasets on the existing instance. On an index axis the
    /// datasets are re-indexed first. On error the previous datasets stay.
    pub fn update(&mut self, datasets: Vec<Dataset>, mode: UpdateMode) -> Result<(), ChartError> {
        let datasets = if self.is_index_axis() {
            positional(&datasets)
        } else {
            datasets
        };
        let next = ChartConfig {
            datasets,
            ..self.config.clone()
        };
        self.layout = Layout::build(self.size, &next)?;
        self.config = next;

        self.progress = match mode {
            UpdateMode::Animated if self.config.animation_ms > 0 => 0.0,
            _ => 1.0,
        };
        debug!(
            datasets = self.config.datasets.len(),
            animated = self.is_animating(),
            "chart updated"
        );
        self.draw();
        Ok(())
    }

    /// Step the entry animation and redraw. Returns true while frames remain.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        if !self.is_animating() {
            return false;
        }
        let duration = self.config.animation_ms.max(1) as f64;
        self.progress = (self.progress + elapsed_ms / duration).min(1.0);
        self.draw();
        self.is_animating()
    }

    /// Nearest point to a pointer position, if one is close enough.
    pub fn tooltip_at(&self, px: f64, py: f64) -> Option<Tooltip> {
        let (dataset, point, anchor) = self
            .config
            .datasets
            .iter()
            .flat_map(|d| d.points.iter().map(move |p| (d, p)))
            .map(|(d, p)| (d, p, self.layout.pixel(p)))
            .map(|(d, p, at)| (d, p, at, (at.0 - px).hypot(at.1 - py)))
            .filter(|(.., dist)| *dist <= HIT_RADIUS)
            .min_by(|a, b| a.3.total_cmp(&b.3))
            .map(|(d, p, at, _)| (d, p, at))?;

        let date = point.x.date();
        let title = match (&self.layout.x, point.x.position()) {
            (XScale::Time(scale), _) => scale
                .format_tooltip(date)
                .unwrap_or_else(|_| format_iso_date(date.date())),
            (XScale::Index(_), Some(index)) => {
                format!("#{} · {}", index + 1, format_iso_date(date.date()))
            }
            (XScale::Index(_), None) => format_iso_date(date.date()),
        };
        let descriptor = dataset.metric.descriptor();
        let body = format!(
            "{}: {}",
            dataset.label,
            format_with_unit(point.y, descriptor.precision, descriptor.unit)
        );

        Some(Tooltip {
            title,
            body,
            color: dataset.color,
            anchor,
        })
    }

    fn draw(&mut self) {
        let layout = &self.layout;
        let area = layout.area;
        let surface = &mut self.surface;

        surface.clear(BACKGROUND);

        for tick in &layout.y.ticks {
            let y = layout.y.project(tick.value, area.top, area.bottom);
            surface.stroke_path(
                &[PathOp::MoveTo(area.left, y), PathOp::LineTo(area.right, y)],
                GRID,
                1.0,
            );
            surface.fill_text(&tick.label, (area.left - 8.0, y + 4.0), AXIS_TEXT, TextAlign::Right);
        }
        for tick in layout.x.ticks() {
            let x = layout.x.project(tick.value, area.left, area.right);
            surface.fill_text(&tick.label, (x, area.bottom + 20.0), AXIS_TEXT, TextAlign::Center);
        }

        let eased = ease_out_quart(self.progress);
        for dataset in &self.config.datasets {
            let pixels: Vec<(f64, f64)> = dataset
                .points
                .iter()
                .map(|p| {
                    let (x, y) = layout.pixel(p);
                    (x, area.bottom + (y - area.bottom) * eased)
                })
                .collect();

            for segment in segments(&pixels, &dataset.breaks, dataset.style.span_gaps) {
                if segment.len() > 1 {
                    let ops = spline_path(segment, dataset.style.tension);
                    surface.stroke_path(&ops, dataset.color, dataset.style.line_width);
                }
            }
            for &center in &pixels {
                surface.fill_circle(center, dataset.style.point_radius, dataset.color);
            }
        }

        // Legend across the top margin.
        for (idx, dataset) in self.config.datasets.iter().enumerate() {
            let x = area.left + idx as f64 * LEGEND_GAP;
            surface.fill_rect((x, 12.0), (LEGEND_SWATCH, LEGEND_SWATCH), dataset.color);
            surface.fill_text(&dataset.label, (x + LEGEND_SWATCH + 6.0, 21.0), AXIS_TEXT, TextAlign::Left);
        }
    }
}

fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(4)
}

/// Split pixel points into contiguous runs at the break indices.
fn segments<'a>(pixels: &'a [(f64, f64)], breaks: &[usize], span_gaps: bool) -> Vec<&'a [(f64, f64)]> {
    if span_gaps || breaks.is_empty() {
        return vec![pixels];
    }
    let mut out = Vec::with_capacity(breaks.len() + 1);
    let mut start = 0;
    for &brk in breaks.iter().filter(|&&b| b > 0 && b < pixels.len()) {
        out.push(&pixels[start..brk]);
        start = brk;
    }
    out.push(&pixels[start..]);
    out
}

/// Cardinal spline through the points; `tension == 0` gives straight lines.
fn spline_path(points: &[(f64, f64)], tension: f64) -> Vec<PathOp> {
    let mut ops = Vec::with_capacity(points.len());
    let Some(&(x0, y0)) = points.first() else {
        return ops;
    };
    ops.push(PathOp::MoveTo(x0, y0));
    if tension <= 0.0 || points.len() < 3 {
        ops.extend(points[1..].iter().map(|&(x, y)| PathOp::LineTo(x, y)));
        return ops;
    }

    // (incoming, outgoing) control point per vertex.
    let controls: Vec<((f64, f64), (f64, f64))> = (0..points.len())
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let cur = points[i];
            let next = points[(i + 1).min(points.len() - 1)];
            let d01 = (cur.0 - prev.0).hypot(cur.1 - prev.1);
            let d12 = (next.0 - cur.0).hypot(next.1 - cur.1);
            let total = d01 + d12;
            if total == 0.0 {
                return (cur, cur);
            }
            let fa = tension * d01 / total;
            let fb = tension * d12 / total;
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            ((cur.0 - fa * dx, cur.1 - fa * dy), (cur.0 + fb * dx, cur.1 + fb * dy))
        })
        .collect();

    for i in 1..points.len() {
        ops.push(PathOp::CurveTo {
            c1: controls[i - 1].1,
            c2: controls[i].0,
            to: points[i],
        });
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::dataset::{DatasetStyle, PlotX};
    use crate::chart::surface::RecordingSurface;
    use crate::measurements::MetricKey;
    use time::macros::datetime;

    fn nitrate() -> Dataset {
        Dataset {
            metric: MetricKey::Nitrate,
            label: "Nitrate".into(),
            color: MetricKey::Nitrate.color(),
            points: vec![
                PlotPoint { x: PlotX::Date(datetime!(2024-01-01 12:00:00)), y: 5.0 },
                PlotPoint { x: PlotX::Date(datetime!(2024-01-02 12:00:00)), y: 7.0 },
                PlotPoint { x: PlotX::Date(datetime!(2024-01-04 12:00:00)), y: 6.0 },
            ],
            breaks: vec![2],
            style: DatasetStyle::default(),
        }
    }

    fn time_config(datasets: Vec<Dataset>) -> ChartConfig {
        ChartConfig {
            x_axis: XAxis::Time {
                unit: TimeUnit::Day,
                display_format: "[day]/[month]".into(),
                tooltip_format: "[year]-[month]-[day]".into(),
            },
            y_axis: YAxis { begin_at_zero: false },
            datasets,
            animation_ms: 300,
        }
    }

    #[test]
    fn construction_draws_points_and_legend() {
        let chart = Chart::new(RecordingSurface::default(), time_config(vec![nitrate()]))
            .unwrap_or_else(|f| panic!("{}", f.error));
        let surface = chart.surface();
        assert_eq!(surface.prepare_calls, 1);
        assert_eq!(surface.circles(MetricKey::Nitrate.color()).len(), 3);
        assert!(surface.texts().contains(&"Nitrate"));
        assert!(surface.texts().contains(&"01/01"));
    }

    #[test]
    fn break_splits_the_line() {
        let chart = Chart::new(RecordingSurface::default(), time_config(vec![nitrate()]))
            .unwrap_or_else(|f| panic!("{}", f.error));
        // Points 0..2 form one path; point 2 stands alone (dot only).
        let paths = chart.surface().paths(MetricKey::Nitrate.color());
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
    }

    #[test]
    fn surface_failure_returns_surface() {
        let failure = Chart::new(RecordingSurface::unavailable(), time_config(vec![nitrate()]))
            .err()
            .unwrap();
        assert!(matches!(failure.error, ChartError::Surface(SurfaceError::NoContext)));
        assert_eq!(failure.surface.prepare_calls, 1);
    }

    #[test]
    fn animated_update_reuses_instance_and_finishes() {
        let mut chart = Chart::new(RecordingSurface::default(), time_config(vec![nitrate()]))
            .unwrap_or_else(|f| panic!("{}", f.error));
        let mut single = nitrate();
        single.points.truncate(1);
        single.breaks.clear();
        chart.update(vec![single], UpdateMode::Animated).unwrap();

        assert!(chart.is_animating());
        assert_eq!(chart.surface().prepare_calls, 1);
        let mut frames = 0;
        while chart.advance(16.0) {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(!chart.is_animating());
        assert_eq!(chart.surface().circles(MetricKey::Nitrate.color()).len(), 1);
    }

    #[test]
    fn animated_points_rise_from_baseline() {
        let mut chart = Chart::new(RecordingSurface::default(), time_config(vec![nitrate()]))
            .unwrap_or_else(|f| panic!("{}", f.error));
        let settled = chart.surface().circles(MetricKey::Nitrate.color());
        chart.update(vec![nitrate()], UpdateMode::Animated).unwrap();
        let start = chart.surface().circles(MetricKey::Nitrate.color());
        assert!(start.iter().zip(&settled).all(|(a, b)| a.1 >= b.1));
        chart.advance(10_000.0);
        assert_eq!(chart.surface().circles(MetricKey::Nitrate.color()), settled);
    }

    #[test]
    fn index_axis_reindexes_on_update() {
        let config = ChartConfig {
            x_axis: XAxis::Index,
            datasets: positional(&[nitrate()]),
            ..time_config(Vec::new())
        };
        let mut chart = Chart::new(RecordingSurface::default(), config)
            .unwrap_or_else(|f| panic!("{}", f.error));
        chart.update(vec![nitrate()], UpdateMode::Immediate).unwrap();
        let positions: Vec<_> = chart.datasets()[0].points.iter().map(|p| p.x.position()).collect();
        assert_eq!(positions, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn tooltip_reports_nearest_point() {
        let chart = Chart::new(RecordingSurface::default(), time_config(vec![nitrate()]))
            .unwrap_or_else(|f| panic!("{}", f.error));
        let (x, y) = chart.surface().circles(MetricKey::Nitrate.color())[1];
        let tip = chart.tooltip_at(x + 2.0, y - 2.0).unwrap();
        assert_eq!(tip.title, "2024-01-02");
        assert_eq!(tip.body, "Nitrate: 7 mg/L");
        assert!(chart.tooltip_at(-50.0, -50.0).is_none());
    }

    #[test]
    fn straight_lines_without_tension() {
        let ops = spline_path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], 0.0);
        assert_eq!(
            ops,
            vec![PathOp::MoveTo(0.0, 0.0), PathOp::LineTo(1.0, 1.0), PathOp::LineTo(2.0, 0.0)]
        );
        let curved = spline_path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)], 0.25);
        assert!(matches!(curved[1], PathOp::CurveTo { to: (1.0, 1.0), .. }));
    }
}

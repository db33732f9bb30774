//! Axis scales: value-to-pixel projection plus tick generation.

use time::{format_description::OwnedFormatItem, Duration, PrimitiveDateTime};

use super::dataset::{Dataset, PlotX};
use super::ChartError;
use crate::core::format::format_value;

/// Upper bound on labelled ticks per axis.
const MAX_X_TICKS: i64 = 8;
const TARGET_Y_TICKS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Time-indexed horizontal scale with day granularity.
#[derive(Debug, Clone)]
pub struct TimeScale {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
    tooltip: OwnedFormatItem,
}

/// Plain linear index scale used by the fallback chart.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexScale {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone)]
pub enum XScale {
    Time(TimeScale),
    Index(IndexScale),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

pub fn compile_format(format: &str) -> Result<OwnedFormatItem, ChartError> {
    time::format_description::parse_owned::<1>(format).map_err(|source| ChartError::TimeFormat {
        format: format.to_string(),
        source,
    })
}

fn seconds(date: PrimitiveDateTime) -> f64 {
    date.assume_utc().unix_timestamp() as f64
}

impl TimeScale {
    pub fn build(
        datasets: &[Dataset],
        display_format: &str,
        tooltip_format: &str,
    ) -> Result<Self, ChartError> {
        let display = compile_format(display_format)?;
        let tooltip = compile_format(tooltip_format)?;

        let mut dates = Vec::new();
        for point in datasets.iter().flat_map(|d| d.points.iter()) {
            match point.x {
                PlotX::Date(date) => dates.push(date),
                PlotX::Position { .. } => return Err(ChartError::UndatedPoint),
            }
        }

        let (Some(first), Some(last)) = (dates.iter().min().copied(), dates.iter().max().copied())
        else {
            return Ok(Self {
                min: 0.0,
                max: 1.0,
                ticks: Vec::new(),
                tooltip,
            });
        };

        let first_day = first.date().midnight() + Duration::hours(12);
        let span_days = (last.date() - first.date()).whole_days();
        let step = ((span_days + 1) + MAX_X_TICKS - 1) / MAX_X_TICKS;

        let mut ticks = Vec::new();
        let mut offset = 0;
        while offset <= span_days {
            let day = first_day + Duration::days(offset);
            ticks.push(Tick {
                value: seconds(day),
                label: day.format(&display)?,
            });
            offset += step.max(1);
        }

        // Half a day of padding keeps edge points off the plot border.
        let pad = Duration::hours(12).whole_seconds() as f64;
        Ok(Self {
            min: seconds(first) - pad,
            max: seconds(last) + pad,
            ticks,
            tooltip,
        })
    }

    pub fn format_tooltip(&self, date: PrimitiveDateTime) -> Result<String, ChartError> {
        Ok(date.format(&self.tooltip)?)
    }
}

impl IndexScale {
    pub fn build(datasets: &[Dataset]) -> Self {
        let len = datasets.iter().map(|d| d.points.len()).max().unwrap_or(0);
        let step = ((len as i64 + MAX_X_TICKS - 1) / MAX_X_TICKS).max(1) as usize;
        let ticks = (0..len)
            .step_by(step)
            .map(|idx| Tick {
                value: idx as f64,
                label: idx.to_string(),
            })
            .collect();
        Self {
            min: -0.5,
            max: (len.max(1) as f64) - 0.5,
            ticks,
        }
    }
}

impl XScale {
    pub fn value_of(&self, x: &PlotX) -> f64 {
        match (self, x) {
            (XScale::Index(_), PlotX::Position { index, .. }) => *index as f64,
            (_, x) => seconds(x.date()),
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            XScale::Time(scale) => (scale.min, scale.max),
            XScale::Index(scale) => (scale.min, scale.max),
        }
    }

    pub fn ticks(&self) -> &[Tick] {
        match self {
            XScale::Time(scale) => &scale.ticks,
            XScale::Index(scale) => &scale.ticks,
        }
    }

    pub fn project(&self, value: f64, left: f64, right: f64) -> f64 {
        let (min, max) = self.bounds();
        left + (value - min) / (max - min) * (right - left)
    }
}

impl LinearScale {
    /// Fit "nice" bounds around the values. Without `begin_at_zero` the
    /// scale hugs the data instead of stretching down to zero.
    pub fn fit(values: impl IntoIterator<Item = f64>, begin_at_zero: bool) -> Self {
        let (mut lo, mut hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !lo.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        if begin_at_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if (hi - lo).abs() < f64::EPSILON {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            lo -= pad;
            hi += pad;
        }

        let step = nice_step((hi - lo) / TARGET_Y_TICKS);
        let min = (lo / step).floor() * step;
        let max = (hi / step).ceil() * step;
        let decimals = step_decimals(step);

        let count = ((max - min) / step).round() as usize;
        let ticks = (0..=count)
            .map(|i| {
                let value = min + i as f64 * step;
                Tick {
                    value,
                    label: format_value(value, decimals),
                }
            })
            .collect();

        Self { min, max, ticks }
    }

    /// Canvas y grows downward, so `max` maps to `top`.
    pub fn project(&self, value: f64, top: f64, bottom: f64) -> f64 {
        bottom - (value - self.min) / (self.max - self.min) * (bottom - top)
    }
}

/// Round a raw step to 1, 2 or 5 times a power of ten.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn step_decimals(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    }
}

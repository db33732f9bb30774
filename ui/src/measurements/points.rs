use time::PrimitiveDateTime;
use tracing::debug;

use super::{MeasurementRecord, MetricKey};

/// One plotted sample of a single metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: PrimitiveDateTime,
    pub y: f64,
}

/// Valid `{date, value}` pairs for `metric`, sorted ascending by date.
///
/// Records without a date or without a value for the metric are skipped, as
/// are records whose date or value fails to parse. The sort is stable, so
/// several readings on the same day keep their server order.
pub fn build_points(records: &[MeasurementRecord], metric: MetricKey) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = records
        .iter()
        .filter(|record| record.date_str().is_some() && !record.raw(metric).is_null())
        .filter_map(|record| match (record.parsed_date(), record.value(metric)) {
            (Some(x), Some(y)) => Some(ChartPoint { x, y }),
            (date, value) => {
                if !matches!(record.raw(metric).as_str(), Some(s) if s.trim().is_empty()) {
                    debug!(
                        metric = metric.as_str(),
                        date = ?record.date,
                        raw = %record.raw(metric),
                        date_ok = date.is_some(),
                        value_ok = value.is_some(),
                        "dropping unparseable measurement"
                    );
                }
                None
            }
        })
        .collect();

    points.sort_by_key(|point| point.x);
    points
}

/// Indices `i` where the line from `points[i - 1]` to `points[i]` must break
/// because a dated record in between has no usable value for `metric`.
pub fn gap_breaks(
    records: &[MeasurementRecord],
    metric: MetricKey,
    points: &[ChartPoint],
) -> Vec<usize> {
    let mut missing: Vec<PrimitiveDateTime> = records
        .iter()
        .filter(|record| record.value(metric).is_none())
        .filter_map(MeasurementRecord::parsed_date)
        .collect();
    if missing.is_empty() {
        return Vec::new();
    }
    missing.sort();

    points
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            let (from, to) = (pair[0].x, pair[1].x);
            let first_after = missing.partition_point(|d| *d <= from);
            missing.get(first_after).is_some_and(|d| *d < to)
        })
        .map(|(idx, _)| idx + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use time::macros::datetime;

    fn records(raw: Value) -> Vec<MeasurementRecord> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn invalid_value_dropped_and_rest_sorted() {
        let input = records(json!([
            { "date": "2024-01-01", "nitrate": "5" },
            { "date": "2024-01-03", "nitrate": "bad" },
            { "date": "2024-01-02", "nitrate": "7" },
        ]));
        let points = build_points(&input, MetricKey::Nitrate);
        assert_eq!(
            points,
            vec![
                ChartPoint { x: datetime!(2024-01-01 12:00:00), y: 5.0 },
                ChartPoint { x: datetime!(2024-01-02 12:00:00), y: 7.0 },
            ]
        );
    }

    #[test]
    fn missing_dates_and_values_are_skipped() {
        let input = records(json!([
            { "nitrate": 3 },
            { "date": "", "nitrate": 3 },
            { "date": "2024-02-01", "nitrate": null },
            { "date": "2024-02-02", "nitrate": "" },
            { "date": "2024-02-31", "nitrate": 4 },
            { "date": "2024-02-03", "phosphate": 0.05 },
        ]));
        assert!(build_points(&input, MetricKey::Nitrate).is_empty());
        assert_eq!(build_points(&input, MetricKey::Phosphate).len(), 1);
    }

    #[test]
    fn output_is_sorted_for_any_input_order() {
        let dates = ["2024-03-09", "2023-12-30", "2024-01-15", "2024-03-01", "2024-01-02"];
        let input: Vec<MeasurementRecord> = dates
            .iter()
            .enumerate()
            .map(|(i, d)| MeasurementRecord {
                date: json!(d),
                kh: json!(7.0 + i as f64),
                ..Default::default()
            })
            .collect();
        let points = build_points(&input, MetricKey::Kh);
        assert_eq!(points.len(), dates.len());
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
        assert!(points.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn same_day_readings_keep_server_order() {
        let input = records(json!([
            { "date": "2024-04-01", "calcium": 420 },
            { "date": "2024-04-01", "calcium": 410 },
        ]));
        let ys: Vec<f64> = build_points(&input, MetricKey::Calcium).iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![420.0, 410.0]);
    }

    #[test]
    fn breaks_only_across_missing_values() {
        let input = records(json!([
            { "date": "2024-01-01", "nitrate": 5 },
            { "date": "2024-01-02", "nitrate": 6 },
            { "date": "2024-01-03", "phosphate": 0.03 },
            { "date": "2024-01-04", "nitrate": 8 },
            { "date": "2024-01-05", "nitrate": 9 },
        ]));
        let points = build_points(&input, MetricKey::Nitrate);
        assert_eq!(gap_breaks(&input, MetricKey::Nitrate, &points), vec![2]);

        let phosphate = build_points(&input, MetricKey::Phosphate);
        assert!(gap_breaks(&input, MetricKey::Phosphate, &phosphate).is_empty());
    }

    #[test]
    fn same_day_missing_reading_does_not_break() {
        let input = records(json!([
            { "date": "2024-01-01", "nitrate": 5 },
            { "date": "2024-01-02", "nitrate": null },
            { "date": "2024-01-02", "nitrate": 6 },
        ]));
        let points = build_points(&input, MetricKey::Nitrate);
        assert!(gap_breaks(&input, MetricKey::Nitrate, &points).is_empty());
    }
}

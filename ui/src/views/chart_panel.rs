use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::chart::{
    refresh_chart, relabel_chart, render_dashboard_chart, shows_no_data, Chart, ChartOptions,
    Tooltip,
};
use crate::core::timing::{sleep_ms, FRAME_MS};
use crate::measurements::{MeasurementRecord, MetricKey};
use crate::t;

pub const CHART_CANVAS_ID: &str = "measurement-chart";

#[cfg(target_arch = "wasm32")]
type PageSurface = crate::chart::CanvasSurface;
#[cfg(not(target_arch = "wasm32"))]
type PageSurface = crate::chart::RecordingSurface;

#[cfg(target_arch = "wasm32")]
fn page_surface() -> PageSurface {
    crate::chart::CanvasSurface::new(CHART_CANVAS_ID)
}

#[cfg(not(target_arch = "wasm32"))]
fn page_surface() -> PageSurface {
    crate::chart::RecordingSurface::default()
}

/// Step the chart's entry animation until it settles. A newer run cancels
/// the one in flight.
fn drive_animation(
    mut chart: Signal<Option<Chart<PageSurface>>>,
    mut animation: Signal<Option<Task>>,
) {
    if let Some(task) = animation.take() {
        task.cancel();
    }
    let task = spawn(async move {
        loop {
            sleep_ms(FRAME_MS).await;
            let running = chart
                .write()
                .as_mut()
                .map(|c| c.advance(FRAME_MS as f64))
                .unwrap_or(false);
            if !running {
                break;
            }
        }
    });
    animation.set(Some(task));
}

/// Metric toggles, the chart canvas and its tooltip.
///
/// The chart is constructed once per record list; an empty list blanks the
/// canvas. Toggling a metric or switching language updates the existing
/// instance instead of rebuilding it.
#[component]
pub fn ChartPanel(records: ReadOnlySignal<Vec<MeasurementRecord>>, options: ChartOptions) -> Element {
    let checked = use_signal(BTreeSet::<MetricKey>::new);
    let mut chart = use_signal(|| Option::<Chart<PageSurface>>::None);
    let mut tooltip = use_signal(|| Option::<Tooltip>::None);
    let animation = use_signal(|| Option::<Task>::None);

    let options = use_signal(|| options);
    let language = try_use_context::<Signal<String>>();

    use_effect(move || {
        let records = records.read();
        tooltip.set(None);
        chart.set(render_dashboard_chart(
            page_surface(),
            &records,
            &checked.peek(),
            &options.peek(),
        ));
    });

    // Labels are resolved when datasets are built.
    use_effect(move || {
        let Some(language) = language else {
            return;
        };
        let _ = language.read();
        tooltip.set(None);
        chart.with_mut(|slot| {
            if let Some(instance) = slot.as_mut() {
                relabel_chart(instance, &records.peek(), &checked.peek(), &options.peek());
            }
        });
    });

    let on_toggle = move |metric: MetricKey, on: bool| {
        let (mut checked, mut chart) = (checked, chart);
        checked.with_mut(|set| {
            if on {
                set.insert(metric);
            } else {
                set.remove(&metric);
            }
        });
        let animating = chart.with_mut(|slot| match slot.as_mut() {
            Some(instance) => {
                refresh_chart(instance, &records.read(), &checked.peek(), &options.peek());
                instance.is_animating()
            }
            None => false,
        });
        if animating {
            drive_animation(chart, animation);
        }
    };

    let on_move = move |evt: MouseEvent| {
        let point = evt.element_coordinates();
        let hit = chart
            .read()
            .as_ref()
            .and_then(|c| c.tooltip_at(point.x, point.y));
        tooltip.set(hit);
    };

    let is_empty = shows_no_data(&records.read());
    let current = checked();

    rsx! {
        section { class: "chart-panel",
            fieldset { class: "chart-panel__toggles",
                legend { class: "visually-hidden", {t!("chart-toggles-legend")} }
                for metric in MetricKey::ALL {
                    label {
                        key: "{metric.as_str()}",
                        class: "chart-panel__toggle",
                        style: "--metric-color: {metric.color()}",
                        input {
                            r#type: "checkbox",
                            class: "metric-toggle",
                            value: "{metric.as_str()}",
                            checked: current.contains(&metric),
                            onchange: move |evt: FormEvent| on_toggle(metric, evt.checked()),
                        }
                        span { "{metric.label()}" }
                    }
                }
            }

            div { class: "chart-panel__stage",
                canvas {
                    id: CHART_CANVAS_ID,
                    class: "chart-panel__canvas",
                    aria_label: t!("chart-aria-label"),
                    onmousemove: on_move,
                    onmouseleave: move |_| tooltip.set(None),
                }
                if let Some(tip) = tooltip() {
                    div {
                        class: "chart-panel__tooltip",
                        style: "left: {tip.anchor.0}px; top: {tip.anchor.1}px; border-color: {tip.color}",
                        strong { "{tip.title}" }
                        span { "{tip.body}" }
                    }
                }
            }

            if is_empty {
                p { class: "chart-panel__empty", {t!("chart-no-data")} }
            }
        }
    }
}

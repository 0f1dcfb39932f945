//! Chart Component
//!
//! History chart on HTML5 Canvas: temperature overlaid on the set-point
//! bands, split by heating state. The configuration is built declaratively
//! and drawn once per change; there are no animations, tooltips, or hover
//! handlers.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;
use crate::state::sync;

const TEMP_COLOR: &str = "rgb(75, 192, 192)";
const SET_POINT_HEAT_OFF_COLOR: &str = "rgba(54, 162, 235, .5)";
const SET_POINT_HEAT_ON_COLOR: &str = "rgba(255, 99, 132, .5)";
const SET_POINT_HEAT_ON_FILL: &str = "rgba(255, 99, 132, .2)";
const SERIES_WIDTH: f64 = 5.0;

/// Soft y-axis bounds; the axis extends beyond them when data requires
const Y_SUGGESTED_MIN: f64 = 60.0;
const Y_SUGGESTED_MAX: f64 = 80.0;

/// One line series and its fixed visual styling
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<Option<f64>>,
    pub border_color: &'static str,
    /// Area fill under the line; `None` leaves the area unfilled
    pub fill_color: Option<&'static str>,
    pub border_width: f64,
    /// Whether the line interpolates across `None` entries or breaks
    pub span_gaps: bool,
}

/// Declarative chart configuration: three datasets over one shared label
/// sequence, soft y bounds, and the responsive toggle.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub y_min: f64,
    pub y_max: f64,
    pub responsive: bool,
}

/// Build the chart configuration for the three thermostat series.
///
/// Temperature interpolates across gaps; the set-point bands break at
/// gaps, since a set point is only defined while its heating state holds.
/// The heat-on band alone fills the area beneath its line.
pub fn chart_config(
    labels: Vec<String>,
    temp_values: Vec<Option<f64>>,
    set_points_heat_on: Vec<Option<f64>>,
    set_points_heat_off: Vec<Option<f64>>,
    y_min: f64,
    y_max: f64,
    responsive: bool,
) -> ChartConfig {
    debug_assert_eq!(labels.len(), temp_values.len());
    debug_assert_eq!(labels.len(), set_points_heat_on.len());
    debug_assert_eq!(labels.len(), set_points_heat_off.len());

    ChartConfig {
        labels,
        datasets: vec![
            Dataset {
                label: "Temperature",
                data: temp_values,
                border_color: TEMP_COLOR,
                fill_color: None,
                border_width: SERIES_WIDTH,
                span_gaps: true,
            },
            Dataset {
                label: "Set point",
                data: set_points_heat_off,
                border_color: SET_POINT_HEAT_OFF_COLOR,
                fill_color: None,
                border_width: SERIES_WIDTH,
                span_gaps: false,
            },
            Dataset {
                label: "Set point",
                data: set_points_heat_on,
                border_color: SET_POINT_HEAT_ON_COLOR,
                fill_color: Some(SET_POINT_HEAT_ON_FILL),
                border_width: SERIES_WIDTH,
                span_gaps: false,
            },
        ],
        y_min,
        y_max,
        responsive,
    }
}

/// Opaque handle to a drawn chart. Each [`make_chart`] call constructs a
/// fresh chart; there is no update method.
pub struct ChartHandle {
    canvas: HtmlCanvasElement,
    config: ChartConfig,
}

impl ChartHandle {
    /// The configuration this chart was drawn with.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Clear the canvas and drop the chart.
    pub fn destroy(self) {
        if let Some(ctx) = context_2d(&self.canvas) {
            ctx.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }
    }
}

/// Draw a chart on the given canvas and return its handle.
pub fn make_chart(canvas: &HtmlCanvasElement, config: ChartConfig) -> ChartHandle {
    draw(canvas, &config);
    ChartHandle {
        canvas: canvas.clone(),
        config,
    }
}

/// Split a series into drawable polyline segments.
///
/// With `span_gaps` every known point joins one continuous segment; without
/// it the line breaks at each `None`.
pub(crate) fn segments(values: &[Option<f64>], span_gaps: bool) -> Vec<Vec<(usize, f64)>> {
    let mut segs = Vec::new();
    let mut current: Vec<(usize, f64)> = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i, *v)),
            None if span_gaps => {}
            None => {
                if !current.is_empty() {
                    segs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segs.push(current);
    }
    segs
}

/// Soft axis bounds: start from the suggested range and extend to any data
/// outside it; pad a degenerate range.
pub(crate) fn suggested_bounds(datasets: &[Dataset], y_min: f64, y_max: f64) -> (f64, f64) {
    let mut lo = y_min;
    let mut hi = y_max;
    for dataset in datasets {
        for value in dataset.data.iter().flatten() {
            lo = lo.min(*value);
            hi = hi.max(*value);
        }
    }
    if lo >= hi {
        lo -= 1.0;
        hi += 1.0;
    }
    (lo, hi)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Draw the chart on canvas
fn draw(canvas: &HtmlCanvasElement, config: &ChartConfig) {
    let ctx = match context_2d(canvas) {
        Some(ctx) => ctx,
        None => return,
    };

    // Fill the container instead of keeping the canvas aspect ratio
    if config.responsive {
        let w = canvas.client_width();
        let h = canvas.client_height();
        if w > 0 && h > 0 {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }
    }

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style_str("#1f2937"); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let (y_lo, y_hi) = suggested_bounds(&config.datasets, config.y_min, config.y_max);

    let n = config.labels.len();
    let x_for = |i: usize| {
        if n > 1 {
            margin_left + (i as f64 / (n - 1) as f64) * chart_width
        } else {
            margin_left + chart_width / 2.0
        }
    };
    // Canvas y grows downward
    let y_for = |v: f64| margin_top + ((y_hi - v) / (y_hi - y_lo)) * chart_height;

    // Horizontal grid lines and y-axis labels (5 lines)
    ctx.set_stroke_style_str("#374151"); // gray-700
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_hi - (i as f64 / 5.0) * (y_hi - y_lo);
        ctx.set_fill_style_str("#9ca3af"); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    // x-axis baseline
    let baseline = margin_top + chart_height;
    ctx.set_stroke_style_str("#9ca3af");
    ctx.begin_path();
    ctx.move_to(margin_left, baseline);
    ctx.line_to(width - margin_right, baseline);
    ctx.stroke();

    // Draw each dataset: filled area first, then the line on top
    for dataset in &config.datasets {
        let segs = segments(&dataset.data, dataset.span_gaps);

        if let Some(fill) = dataset.fill_color {
            ctx.set_fill_style_str(fill);
            for seg in &segs {
                if seg.len() < 2 {
                    continue;
                }
                ctx.begin_path();
                for (k, (i, v)) in seg.iter().enumerate() {
                    if k == 0 {
                        ctx.move_to(x_for(*i), y_for(*v));
                    } else {
                        ctx.line_to(x_for(*i), y_for(*v));
                    }
                }
                ctx.line_to(x_for(seg[seg.len() - 1].0), baseline);
                ctx.line_to(x_for(seg[0].0), baseline);
                ctx.close_path();
                ctx.fill();
            }
        }

        ctx.set_stroke_style_str(dataset.border_color);
        ctx.set_line_width(dataset.border_width);
        for seg in &segs {
            ctx.begin_path();
            for (k, (i, v)) in seg.iter().enumerate() {
                if k == 0 {
                    ctx.move_to(x_for(*i), y_for(*v));
                } else {
                    ctx.line_to(x_for(*i), y_for(*v));
                }
            }
            ctx.stroke();
        }
        // point radius is zero: line emphasis only, no markers
    }

    // x-axis labels (always displayed)
    ctx.set_fill_style_str("#9ca3af");
    ctx.set_font("12px sans-serif");
    if n > 0 {
        let num_labels = n.saturating_sub(1).clamp(1, 5);
        for i in 0..=num_labels {
            let idx = (i * (n - 1)) / num_labels;
            let x = x_for(idx);
            let _ = ctx.fill_text(&config.labels[idx], x - 15.0, height - 10.0);
        }
    }

    // Empty-series message
    if config
        .datasets
        .iter()
        .all(|d| d.data.iter().all(|v| v.is_none()))
    {
        ctx.set_fill_style_str("#6b7280");
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for selected window", width / 2.0 - 100.0, height / 2.0);
    }
}

/// History chart component
#[component]
pub fn HistoryChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the assembled history changes
    create_effect(move |_| {
        let series = state.history.get();

        if let (Some(canvas), Some(series)) = (canvas_ref.get(), series) {
            let config = chart_config(
                series.labels,
                series.temps,
                series.set_points_heat_on,
                series.set_points_heat_off,
                Y_SUGGESTED_MIN,
                Y_SUGGESTED_MAX,
                true,
            );
            let _chart = make_chart(&canvas, config);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />

            <ChartLegend />

            // Window selector
            <div class="flex justify-center space-x-2 mt-4">
                <WindowButton label="3H" hours=3.0 />
                <WindowButton label="12H" hours=12.0 />
                <WindowButton label="24H" hours=24.0 />
                <WindowButton label="2D" hours=48.0 />
            </div>
        </div>
    }
}

/// Chart legend showing series colors
#[component]
fn ChartLegend() -> impl IntoView {
    let entries = [
        ("Temperature", TEMP_COLOR),
        ("Set point (heat off)", SET_POINT_HEAT_OFF_COLOR),
        ("Set point (heat on)", SET_POINT_HEAT_ON_COLOR),
    ];

    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {entries
                .into_iter()
                .map(|(label, color)| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-300">{label}</span>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// Chart window selection button
#[component]
fn WindowButton(label: &'static str, hours: f64) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_memo = state.clone();
    let is_active = create_memo(move |_| state_for_memo.window_hours.get() == hours);

    let state_for_click = state;
    let on_click = move |_| {
        state_for_click.window_hours.set(hours);
        crate::api::set_window_hours(hours);
        sync::refresh_history(state_for_click.clone(), hours);
    };

    view! {
        <button
            on:click=on_click
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if is_active.get() {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(
        temps: Vec<Option<f64>>,
        heat_on: Vec<Option<f64>>,
        heat_off: Vec<Option<f64>>,
    ) -> ChartConfig {
        let labels = (0..temps.len()).map(|i| format!("{:02}:00", i)).collect();
        chart_config(labels, temps, heat_on, heat_off, 60.0, 80.0, false)
    }

    #[test]
    fn test_dataset_order_and_styles() {
        let config = config_for(
            vec![Some(65.0)],
            vec![Some(70.0)],
            vec![None],
        );

        assert_eq!(config.datasets.len(), 3);

        let temp = &config.datasets[0];
        assert_eq!(temp.label, "Temperature");
        assert!(temp.span_gaps);
        assert!(temp.fill_color.is_none());

        let heat_off = &config.datasets[1];
        assert_eq!(heat_off.label, "Set point");
        assert!(!heat_off.span_gaps);
        assert!(heat_off.fill_color.is_none());

        let heat_on = &config.datasets[2];
        assert_eq!(heat_on.label, "Set point");
        assert!(!heat_on.span_gaps);
        assert_eq!(heat_on.fill_color, Some(SET_POINT_HEAT_ON_FILL));
        assert_ne!(heat_on.fill_color, Some(heat_on.border_color));
    }

    #[test]
    fn test_temperature_spans_gaps() {
        // one continuous segment across the missing middle entry
        let segs = segments(&[Some(1.0), None, Some(3.0)], true);
        assert_eq!(segs, vec![vec![(0, 1.0), (2, 3.0)]]);
    }

    #[test]
    fn test_set_point_breaks_at_gaps() {
        // two disjoint segments around the missing middle entry
        let segs = segments(&[Some(5.0), None, Some(5.0)], false);
        assert_eq!(segs, vec![vec![(0, 5.0)], vec![(2, 5.0)]]);
    }

    #[test]
    fn test_segments_empty_and_all_gaps() {
        assert!(segments(&[], false).is_empty());
        assert!(segments(&[None, None], true).is_empty());
    }

    #[test]
    fn test_suggested_bounds_are_soft() {
        let config = config_for(
            vec![Some(95.0), Some(55.0)],
            vec![None, None],
            vec![None, None],
        );
        let (lo, hi) = suggested_bounds(&config.datasets, 60.0, 80.0);
        assert_eq!(lo, 55.0);
        assert_eq!(hi, 95.0);
    }

    #[test]
    fn test_suggested_bounds_hold_when_data_fits() {
        let config = config_for(vec![Some(65.0)], vec![Some(70.0)], vec![None]);
        let (lo, hi) = suggested_bounds(&config.datasets, 60.0, 80.0);
        assert_eq!((lo, hi), (60.0, 80.0));
    }

    #[test]
    fn test_suggested_bounds_pad_degenerate_range() {
        let config = config_for(vec![Some(70.0)], vec![None], vec![None]);
        let (lo, hi) = suggested_bounds(&config.datasets, 70.0, 70.0);
        assert!(lo < hi);
    }

    #[test]
    fn test_chart_config_is_idempotent() {
        let a = config_for(vec![Some(65.0), None], vec![None, Some(70.0)], vec![None, None]);
        let b = config_for(vec![Some(65.0), None], vec![None, Some(70.0)], vec![None, None]);
        assert_eq!(a, b);
    }
}

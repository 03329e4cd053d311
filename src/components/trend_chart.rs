//! Trend Chart Component
//!
//! Daily mentee registration line chart using HTML5 Canvas. Points are
//! evenly spaced in day order (categorical axis); segments are straight
//! lines with no smoothing and missing days are not zero-filled.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::dashboard::{DashboardState, TrendPoint};

/// Series color (indigo)
const LINE_COLOR: &str = "#6366f1";

/// Registration trend chart component
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the series changes
    create_effect(move |_| {
        let points = state.trend.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_trend(&canvas, &points);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            height="320"
            class="w-full h-64 md:h-80 rounded-lg"
        />
    }
}

/// Draw the registration series on canvas
fn draw_trend(canvas: &HtmlCanvasElement, points: &[TrendPoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
        return;
    }

    // Y axis runs from zero to the padded series maximum; counts are
    // non-negative so the baseline is always zero.
    let max_total = points.iter().map(|p| p.total).max().unwrap_or(0) as f64;
    let y_max = if max_total > 0.0 { max_total * 1.1 } else { 1.0 };

    // Horizontal grid lines (5 lines) with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Points are evenly spaced across the chart width in day order
    let x_at = |i: usize| {
        if points.len() == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (points.len() - 1) as f64) * chart_width
        }
    };
    let y_at = |total: u64| margin_top + ((y_max - total as f64) / y_max) * chart_height;

    // Series polyline
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();

    for (i, point) in points.iter().enumerate() {
        let x = x_at(i);
        let y = y_at(point.total);
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();

    // Point dots
    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, point) in points.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(x_at(i), y_at(point.total), 2.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X-axis day labels, at most 6 across the series
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let step = (points.len() / 6).max(1);
    for (i, point) in points.iter().enumerate().step_by(step) {
        let _ = ctx.fill_text(&day_label(&point.day), x_at(i) - 15.0, height - 10.0);
    }
}

/// Short axis label for an ISO day
fn day_label(day: &str) -> String {
    chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%m/%d").to_string())
        .unwrap_or_else(|_| day.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label_shortens_iso_days() {
        assert_eq!(day_label("2024-01-31"), "01/31");
        assert_eq!(day_label("not-a-date"), "not-a-date");
    }
}

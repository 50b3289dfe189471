//! Bar chart rendering to SVG.
//! Bars only: no captions or axis labels, so no font backend is needed.

use plotters::prelude::*;

use crate::domain::error::{AppError, Result};
use crate::domain::workflow::ChartData;

const SERIES_COLORS: [RGBColor; 2] = [RGBColor(31, 119, 180), RGBColor(255, 127, 14)];
const AXIS_COLOR: RGBColor = RGBColor(90, 90, 90);
const MARGIN: i32 = 10;

/// Render grouped bars: one group per row, one bar per series
pub fn render_bar_chart_svg(chart: &ChartData, width: u32, height: u32) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        if !chart.is_empty() && !chart.labels.is_empty() {
            draw_bars(&root, chart, width as i32, height as i32)?;
        }

        root.present().map_err(draw_error)?;
    }
    Ok(svg)
}

fn draw_bars(
    root: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    chart: &ChartData,
    width: i32,
    height: i32,
) -> Result<()> {
    let (lo, hi) = chart.value_range();
    let span = if hi - lo > 0.0 { hi - lo } else { 1.0 };

    let plot_top = MARGIN;
    let plot_bottom = (height - MARGIN).max(plot_top + 1);
    let plot_height = (plot_bottom - plot_top) as f64;
    let to_y = |value: f64| plot_bottom - ((value - lo) / span * plot_height).round() as i32;
    let baseline = to_y(0.0);

    let plot_width = (width - 2 * MARGIN).max(1) as f64;
    let group_width = plot_width / chart.labels.len() as f64;
    let bar_width = group_width * 0.8 / chart.series.len() as f64;

    for (s, series) in chart.series.iter().enumerate() {
        let color = SERIES_COLORS[s % SERIES_COLORS.len()];
        for (row, value) in series.values.iter().enumerate() {
            let Some(value) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let x0 = MARGIN as f64 + row as f64 * group_width + group_width * 0.1 + s as f64 * bar_width;
            let x1 = x0 + bar_width;
            let y = to_y(value);
            root.draw(&Rectangle::new(
                [(x0.round() as i32, y.min(baseline)), (x1.round() as i32, y.max(baseline))],
                color.filled(),
            ))
            .map_err(draw_error)?;
        }
    }

    root.draw(&PathElement::new(
        vec![(MARGIN, baseline), (width - MARGIN, baseline)],
        AXIS_COLOR.stroke_width(1),
    ))
    .map_err(draw_error)
}

fn draw_error<E: std::fmt::Debug>(err: E) -> AppError {
    AppError::Internal(format!("Failed to render chart: {:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Table;

    fn chart(headers: &[&str], rows: &[&[&str]]) -> ChartData {
        let table = Table::from_raw_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| Some(v.to_string())).collect())
                .collect(),
        )
        .unwrap();
        ChartData::from_table(&table)
    }

    #[test]
    fn test_renders_one_rect_per_present_value() {
        let data = chart(&["a", "b"], &[&["1", "2"], &["3", ""], &["-1", "4"]]);
        let svg = render_bar_chart_svg(&data, 400, 200).unwrap();
        assert!(svg.contains("<svg"));
        // background + 5 bars
        assert_eq!(svg.matches("<rect").count(), 6);
    }

    #[test]
    fn test_empty_chart_is_blank_canvas() {
        let data = chart(&["name"], &[&["x"]]);
        let svg = render_bar_chart_svg(&data, 100, 50).unwrap();
        assert_eq!(svg.matches("<rect").count(), 1);
    }
}

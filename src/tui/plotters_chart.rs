//! Plotters-powered monthly series chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct SeriesChart<'a> {
    /// Monthly % change, x in fractional years (`2024.0` = Jan 2024).
    pub monthly: &'a [(f64, f64)],
    /// Horizontal reference line (the current annual assumption, de-annualized).
    pub reference: Option<f64>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for SeriesChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let series_color = RGBColor(0, 255, 255); // cyan
            let zero_color = RGBColor(128, 128, 128);
            let reference_color = RGBColor(255, 255, 0); // yellow

            if y0 < 0.0 && y1 > 0.0 {
                chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &zero_color))?;
            }

            if let Some(r) = self.reference.filter(|r| *r > y0 && *r < y1) {
                chart.draw_series(LineSeries::new([(x0, r), (x1, r)], &reference_color))?;
            }

            chart.draw_series(LineSeries::new(self.monthly.iter().copied(), &series_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

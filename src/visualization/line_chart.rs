//! Marker-connected line charts, one line per series

use super::ChartRenderer;
use crate::chart::Chart;
use crate::error::ReportError;
use anyhow::{bail, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

/// Series colors, cycled in series order
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color of the series at `idx`
pub fn series_color(idx: usize) -> RGBColor {
    PALETTE[idx % PALETTE.len()]
}

/// PNG line chart renderer
#[derive(Debug, Clone, Copy)]
pub struct LineChartPlotter {
    size: (u32, u32),
}

impl Default for LineChartPlotter {
    fn default() -> Self {
        Self { size: (1200, 800) }
    }
}

impl LineChartPlotter {
    /// Create a plotter producing images of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
        }
    }

    /// Plot the chart as a PNG
    pub fn plot(&self, chart: &Chart, path: &Path) -> Result<()> {
        if !chart.has_drawable_axes() {
            bail!("axis range too wide to draw");
        }

        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 32))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(chart.x_range(), chart.y_range())?;

        let scientific = chart.scientific_y;
        let y_formatter = move |y: &f64| {
            if scientific {
                format_scientific(*y)
            } else {
                format_plain(*y)
            }
        };
        let x_formatter = |x: &f64| format_plain(*x);

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        for (idx, line) in chart.lines.iter().enumerate() {
            let color = series_color(idx);

            ctx.draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(line.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            // Markers
            ctx.draw_series(
                line.points
                    .iter()
                    .map(|&point| Circle::new(point, 4, color.filled())),
            )?;

            if let Some(trend) = &line.trend {
                ctx.draw_series(DashedLineSeries::new(
                    trend.iter().copied(),
                    8,
                    6,
                    color.stroke_width(1),
                ))?;
            }
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for LineChartPlotter {
    fn render(&self, chart: &Chart, path: &Path) -> crate::error::Result<()> {
        self.plot(chart, path)
            .map_err(|e| ReportError::Render(format!("{}: {:#}", path.display(), e)))
    }
}

/// Tick label without trailing zeros
fn format_plain(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Tick label in `1.5e6` notation
fn format_scientific(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{:.1e}", value)
    }
}

//! Visualization and plotting

pub mod line_chart;

pub use line_chart::LineChartPlotter;

use crate::chart::Chart;
use crate::error::Result;
use std::path::Path;

/// Writes a [`Chart`] to an image file
pub trait ChartRenderer {
    /// Render the chart to `path`, replacing any existing file
    fn render(&self, chart: &Chart, path: &Path) -> Result<()>;
}

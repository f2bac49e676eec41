//! Chart model
//!
//! A [`Chart`] is the renderer-independent description of one output image:
//! labels, one [`SeriesLine`] per series and optional trendlines.

use crate::config::{ReportConfig, CONCURRENCY_COLUMN};
use crate::table::ResultTable;
use crate::trend::LinearFit;
use std::ops::Range;

/// Points of one series, sorted by concurrency level
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Linear fit evaluated at the series' own x values
    pub trend: Option<Vec<(f64, f64)>>,
}

/// Description of one line chart
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Scientific notation on the y axis
    pub scientific_y: bool,
    pub lines: Vec<SeriesLine>,
}

impl Chart {
    /// Build the chart of a table for one run
    pub fn from_table(table: &ResultTable, config: &ReportConfig, run_label: &str) -> Self {
        let lines = table
            .series_labels()
            .into_iter()
            .map(|label| {
                let points = table.series_points(label);
                let trend = if config.trendlines {
                    LinearFit::fit(&points)
                        .map(|fit| points.iter().map(|&(x, _)| (x, fit.at(x))).collect())
                } else {
                    None
                };
                SeriesLine {
                    label: label.to_string(),
                    points,
                    trend,
                }
            })
            .collect();

        Self {
            title: config.chart_title(run_label),
            x_label: CONCURRENCY_COLUMN.to_string(),
            y_label: config.metric_column.clone(),
            scientific_y: config.scientific_y,
            lines,
        }
    }

    /// Check if the chart has no series
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All data points, trendlines excluded
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lines.iter().flat_map(|line| line.points.iter().copied())
    }

    /// Padded x range covering every point
    pub fn x_range(&self) -> Range<f64> {
        padded_range(self.points().map(|(x, _)| x))
    }

    /// Padded y range covering every point and trendline
    pub fn y_range(&self) -> Range<f64> {
        let trend_ys = self
            .lines
            .iter()
            .filter_map(|line| line.trend.as_ref())
            .flat_map(|trend| trend.iter().map(|&(_, y)| y));
        padded_range(self.points().map(|(_, y)| y).chain(trend_ys))
    }

    /// Check if both axes span a finite width
    pub fn has_drawable_axes(&self) -> bool {
        let (x, y) = (self.x_range(), self.y_range());
        (x.end - x.start).is_finite() && (y.end - y.start).is_finite()
    }
}

/// Range spanning the finite values with a 5% margin on both ends.
///
/// Falls back to the unpadded bounds when the margin would overflow.
pub fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }

    let span = max - min;
    let margin = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.05
    } else {
        0.5
    };
    let (start, end) = (min - margin, max + margin);
    if !margin.is_finite() || !start.is_finite() || !end.is_finite() {
        return min..max;
    }
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ResultRecord;

    fn sample_table() -> ResultTable {
        ResultTable::from_records(vec![
            ResultRecord::new("A", 2.0, 50.0),
            ResultRecord::new("B", 1.0, 200.0),
            ResultRecord::new("A", 1.0, 100.0),
        ])
    }

    #[test]
    fn test_one_line_per_series() {
        let chart = Chart::from_table(&sample_table(), &ReportConfig::latency(), "10");

        assert_eq!(chart.lines.len(), 2);
        assert_eq!(chart.lines[0].label, "A");
        assert_eq!(chart.lines[0].points, vec![(1.0, 100.0), (2.0, 50.0)]);
        assert_eq!(chart.lines[1].label, "B");
        assert_eq!(chart.lines[1].points, vec![(1.0, 200.0)]);
        assert!(chart.lines.iter().all(|l| l.trend.is_none()));
    }

    #[test]
    fn test_labels() {
        let chart = Chart::from_table(&sample_table(), &ReportConfig::throughput(), "1000");
        assert_eq!(chart.title, "Throughput per Thread vs. P/C Count (1000 Jobs)");
        assert_eq!(chart.x_label, "Producer/Consumer Count");
        assert_eq!(
            chart.y_label,
            "Average Throughput per Thread (jobs/sec/thread)"
        );
        assert!(chart.scientific_y);
    }

    #[test]
    fn test_points_non_decreasing() {
        let table = ResultTable::from_records(vec![
            ResultRecord::new("A", 16.0, 1.0),
            ResultRecord::new("A", 4.0, 2.0),
            ResultRecord::new("A", 4.0, 3.0),
            ResultRecord::new("A", 1.0, 4.0),
        ]);
        let chart = Chart::from_table(&table, &ReportConfig::latency(), "x");
        let xs: Vec<f64> = chart.lines[0].points.iter().map(|p| p.0).collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_trendlines() {
        let config = ReportConfig::latency().with_trendlines(true);
        let chart = Chart::from_table(&sample_table(), &config, "10");

        let trend = chart.lines[0].trend.as_ref().unwrap();
        assert_eq!(trend.len(), 2);
        assert!((trend[0].1 - 100.0).abs() < 1e-9);
        assert!((trend[1].1 - 50.0).abs() < 1e-9);
        // single point series has no fit
        assert!(chart.lines[1].trend.is_none());
    }

    #[test]
    fn test_padded_range() {
        let range = padded_range([0.0, 100.0].into_iter());
        assert!((range.start + 5.0).abs() < 1e-9);
        assert!((range.end - 105.0).abs() < 1e-9);

        let single = padded_range([200.0].into_iter());
        assert!(single.start < 200.0 && single.end > 200.0);

        let zero = padded_range([0.0].into_iter());
        assert_eq!(zero, -0.5..0.5);

        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_padded_range_near_float_limits() {
        let range = padded_range([1.7e308, -1.7e308].into_iter());
        assert!(range.start.is_finite() && range.end.is_finite());
        assert_eq!(range, -1.7e308..1.7e308);

        let with_inf = padded_range([f64::INFINITY, 0.0, 10.0].into_iter());
        assert!((with_inf.start + 0.5).abs() < 1e-9);
        assert!((with_inf.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_span_is_not_drawable() {
        let table = ResultTable::from_records(vec![
            ResultRecord::new("A", 1.0, 1.7e308),
            ResultRecord::new("A", 2.0, -1.7e308),
        ]);
        let chart = Chart::from_table(&table, &ReportConfig::throughput(), "1");
        assert!(!chart.has_drawable_axes());
        assert!(Chart::from_table(&sample_table(), &ReportConfig::latency(), "1").has_drawable_axes());
    }
}

//! Report configuration
//!
//! Each report (latency, throughput) is described by a [`ReportConfig`]: where
//! its results live, where its plots go, which column holds the metric, and how
//! the charts are titled and named.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Column holding the series label
pub const QUEUE_COLUMN: &str = "Queue";

/// Column holding the concurrency level
pub const CONCURRENCY_COLUMN: &str = "Producer/Consumer Count";

/// Metric column of latency results
pub const LATENCY_COLUMN: &str = "Average Latency (ns)";

/// Metric column of throughput results
pub const THROUGHPUT_COLUMN: &str = "Average Throughput per Thread (jobs/sec/thread)";

/// Baseline queue left out of the throughput variant chart
pub const BLOCKING_QUEUE_SERIES: &str = "std::queue (Blocking)";

/// Default parent directory of the per-report results directories
pub const DEFAULT_RESULTS_ROOT: &str = "results";

/// Default parent directory of the per-report plots directories
pub const DEFAULT_PLOTS_ROOT: &str = "plots";

/// Which benchmark report is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Latency,
    Throughput,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Latency => write!(f, "latency"),
            ReportKind::Throughput => write!(f, "throughput"),
        }
    }
}

/// A series excluded from a second, rescaled chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedSeries {
    /// Series label to drop
    pub label: String,
    /// Appended to the output file stem of the variant chart
    pub file_suffix: String,
}

/// Settings for one report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub kind: ReportKind,

    /// Directory scanned for `*.csv` results
    pub results_dir: PathBuf,

    /// Directory the charts are written to
    pub plots_dir: PathBuf,

    /// Filename prefix stripped to obtain the run label
    pub file_prefix: String,

    /// Column holding the y value
    pub metric_column: String,

    /// Output file stem, the run label is appended to it
    pub output_stem: String,

    /// Chart title, followed by ` (<label> Jobs)`
    pub title: String,

    /// Format y tick labels in scientific notation
    pub scientific_y: bool,

    /// Optional series dropped from a second chart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_series: Option<ExcludedSeries>,

    /// Overlay a linear fit per series
    pub trendlines: bool,
}

impl ReportConfig {
    /// Latency report rooted at the default directories
    pub fn latency() -> Self {
        Self {
            kind: ReportKind::Latency,
            results_dir: Path::new(DEFAULT_RESULTS_ROOT).join("latency"),
            plots_dir: Path::new(DEFAULT_PLOTS_ROOT).join("latency"),
            file_prefix: "latency_job_count_".into(),
            metric_column: LATENCY_COLUMN.into(),
            output_stem: "producer_consumer_count_vs_latency".into(),
            title: "Average Latency vs. P/C Count".into(),
            scientific_y: false,
            excluded_series: None,
            trendlines: false,
        }
    }

    /// Throughput report rooted at the default directories
    pub fn throughput() -> Self {
        Self {
            kind: ReportKind::Throughput,
            results_dir: Path::new(DEFAULT_RESULTS_ROOT).join("throughput"),
            plots_dir: Path::new(DEFAULT_PLOTS_ROOT).join("throughput_all_queues"),
            file_prefix: "throughput_job_count_".into(),
            metric_column: THROUGHPUT_COLUMN.into(),
            output_stem: "producer_consumer_count_vs_throughput_per_thread".into(),
            title: "Throughput per Thread vs. P/C Count".into(),
            scientific_y: true,
            excluded_series: Some(ExcludedSeries {
                label: BLOCKING_QUEUE_SERIES.into(),
                file_suffix: "_no_std_queue".into(),
            }),
            trendlines: false,
        }
    }

    /// Default configuration for a report kind
    pub fn for_kind(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Latency => Self::latency(),
            ReportKind::Throughput => Self::throughput(),
        }
    }

    /// Re-root the results and plots directories, keeping their leaf names
    pub fn with_roots(mut self, results_root: &Path, plots_root: &Path) -> Self {
        let (results_leaf, plots_leaf) = match self.kind {
            ReportKind::Latency => ("latency", "latency"),
            ReportKind::Throughput => ("throughput", "throughput_all_queues"),
        };
        self.results_dir = results_root.join(results_leaf);
        self.plots_dir = plots_root.join(plots_leaf);
        self
    }

    /// Set the results directory
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Set the plots directory
    pub fn with_plots_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plots_dir = dir.into();
        self
    }

    /// Enable or disable trendline overlays
    pub fn with_trendlines(mut self, enabled: bool) -> Self {
        self.trendlines = enabled;
        self
    }

    /// Strip the known prefix and `.csv` suffix from a results filename
    pub fn run_label(&self, file_name: &str) -> String {
        let name = file_name
            .strip_prefix(self.file_prefix.as_str())
            .unwrap_or(file_name);
        name.strip_suffix(".csv").unwrap_or(name).to_string()
    }

    /// Chart title for a run label
    pub fn chart_title(&self, run_label: &str) -> String {
        format!("{} ({} Jobs)", self.title, run_label)
    }

    /// Path of the full chart for a run label
    pub fn chart_path(&self, run_label: &str) -> PathBuf {
        self.plots_dir
            .join(format!("{}_{}.png", self.output_stem, run_label))
    }

    /// Path of the excluded-series chart for a run label, if the report has one
    pub fn variant_chart_path(&self, run_label: &str) -> Option<PathBuf> {
        self.excluded_series.as_ref().map(|excluded| {
            self.plots_dir.join(format!(
                "{}_{}{}.png",
                self.output_stem, run_label, excluded.file_suffix
            ))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.metric_column.trim().is_empty() {
            return Err(ReportError::Config("metric column must not be empty".into()));
        }

        if self.file_prefix.is_empty() {
            return Err(ReportError::Config("file prefix must not be empty".into()));
        }

        if self.output_stem.is_empty() {
            return Err(ReportError::Config("output stem must not be empty".into()));
        }

        if self.results_dir == self.plots_dir {
            return Err(ReportError::Config(format!(
                "results and plots directories must differ: {}",
                self.results_dir.display()
            )));
        }

        if let Some(excluded) = &self.excluded_series {
            if excluded.file_suffix.is_empty() {
                return Err(ReportError::Config(
                    "excluded series needs a file suffix".into(),
                ));
            }
        }

        Ok(())
    }
}

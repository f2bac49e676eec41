//! Report generation
//!
//! A [`ReportGenerator`] runs one report end to end:
//! - discover the results files
//! - load and clean each file
//! - build and render the charts
//! - record what was written and what was skipped
//!
//! Every file is independent. A file that cannot be loaded, or whose chart
//! cannot be written, is logged and skipped; the rest of the batch continues.

use crate::chart::Chart;
use crate::config::ReportConfig;
use crate::discovery::discover_csv_files;
use crate::error::ReportError;
use crate::table::ResultTable;
use crate::visualization::ChartRenderer;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};


/// A results file or chart that produced no output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one report run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub kind: crate::config::ReportKind,
    pub files_found: usize,
    pub charts_written: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

impl ReportSummary {
    fn new(config: &ReportConfig) -> Self {
        Self {
            kind: config.kind,
            files_found: 0,
            charts_written: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        self.skipped.push(Skipped {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }
}

/// Runs one report with a given renderer
pub struct ReportGenerator<R: ChartRenderer> {
    config: ReportConfig,
    renderer: R,
}

impl<R: ChartRenderer> ReportGenerator<R> {
    /// Create a generator, validating the configuration
    pub fn new(config: ReportConfig, renderer: R) -> Result<Self> {
        config
            .validate()
            .with_context(|| format!("Invalid {} report configuration", config.kind))?;
        Ok(Self { config, renderer })
    }

    /// The report configuration
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Process every results file of the report
    pub fn run(&self) -> Result<ReportSummary> {
        let mut summary = ReportSummary::new(&self.config);

        fs::create_dir_all(&self.config.plots_dir).with_context(|| {
            format!(
                "Failed to create plots directory: {}",
                self.config.plots_dir.display()
            )
        })?;

        let files = discover_csv_files(&self.config.results_dir).with_context(|| {
            format!(
                "Failed to read results directory: {}",
                self.config.results_dir.display()
            )
        })?;
        summary.files_found = files.len();

        if files.is_empty() {
            info!(
                "No CSV files found in {}",
                self.config.results_dir.display()
            );
            return Ok(summary);
        }

        for path in &files {
            self.process_file(path, &mut summary);
        }

        info!(
            report = %self.config.kind,
            files = summary.files_found,
            charts = summary.charts_written.len(),
            skipped = summary.skipped.len(),
            "Report finished"
        );
        Ok(summary)
    }

    /// Load one results file and write its charts
    fn process_file(&self, path: &Path, summary: &mut ReportSummary) {
        info!("Processing {}...", path.display());

        let table = match ResultTable::load(path, &self.config.metric_column) {
            Ok(table) => table,
            Err(ReportError::NotFound(_)) => {
                warn!("Error: The file {} was not found.", path.display());
                summary.skip(path, "file not found");
                return;
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.skip(path, e.to_string());
                return;
            }
        };

        if table.dropped() > 0 {
            debug!(
                "Dropped {} incomplete rows from {}",
                table.dropped(),
                path.display()
            );
        }

        if table.is_empty() {
            info!("Skipping {} due to no valid data.", path.display());
            summary.skip(path, "no valid data");
            return;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let run_label = self.config.run_label(&file_name);

        let chart = Chart::from_table(&table, &self.config, &run_label);
        self.write_chart(&chart, self.config.chart_path(&run_label), summary);

        if let (Some(excluded), Some(variant_path)) = (
            &self.config.excluded_series,
            self.config.variant_chart_path(&run_label),
        ) {
            let remaining = table.without_series(&excluded.label);
            if remaining.series_labels().is_empty() {
                info!(
                    "Skipping second plot for {} as no other queues are present.",
                    path.display()
                );
                summary.skip(&variant_path, format!("only `{}` present", excluded.label));
                return;
            }

            let variant = Chart::from_table(&remaining, &self.config, &run_label);
            self.write_chart(&variant, variant_path, summary);
        }
    }

    fn write_chart(&self, chart: &Chart, path: PathBuf, summary: &mut ReportSummary) {
        match self.renderer.render(chart, &path) {
            Ok(()) => {
                info!("Saved plot to {}", path.display());
                summary.charts_written.push(path);
            }
            Err(e) => {
                warn!("Failed to save plot {}: {}", path.display(), e);
                summary.skip(&path, e.to_string());
            }
        }
    }
}

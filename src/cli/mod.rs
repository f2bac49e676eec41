//! CLI argument parsing and command dispatch

use crate::config::{ReportConfig, ReportKind, DEFAULT_PLOTS_ROOT, DEFAULT_RESULTS_ROOT};
use crate::output::JsonExporter;
use crate::report::{ReportGenerator, ReportSummary};
use crate::visualization::LineChartPlotter;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render latency and throughput charts from queue benchmark results
#[derive(Parser, Debug)]
#[command(name = "queue-bench-plots")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the `latency/` and `throughput/` result folders
    #[arg(long, global = true, default_value = DEFAULT_RESULTS_ROOT)]
    pub results_root: PathBuf,

    /// Directory the `latency/` and `throughput_all_queues/` plot folders are written to
    #[arg(long, global = true, default_value = DEFAULT_PLOTS_ROOT)]
    pub plots_root: PathBuf,

    /// Overlay a linear trendline on every series
    #[arg(long, global = true)]
    pub trendlines: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long, global = true)]
    pub summary: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Plot average latency against producer/consumer count
    Latency,
    /// Plot per-thread throughput against producer/consumer count
    Throughput,
    /// Run the latency and throughput reports (default)
    All,
}

impl Cli {
    /// Report kinds selected by the subcommand
    pub fn kinds(&self) -> Vec<ReportKind> {
        match self.command.unwrap_or(Commands::All) {
            Commands::Latency => vec![ReportKind::Latency],
            Commands::Throughput => vec![ReportKind::Throughput],
            Commands::All => vec![ReportKind::Latency, ReportKind::Throughput],
        }
    }

    /// Configuration of one report from the CLI options
    pub fn report_config(&self, kind: ReportKind) -> ReportConfig {
        ReportConfig::for_kind(kind)
            .with_roots(&self.results_root, &self.plots_root)
            .with_trendlines(self.trendlines)
    }

    /// Run the selected reports
    pub fn run(&self) -> Result<Vec<ReportSummary>> {
        let mut summaries = Vec::new();

        for kind in self.kinds() {
            tracing::info!("Generating {} plots", kind);
            let generator = ReportGenerator::new(self.report_config(kind), LineChartPlotter::default())?;
            let summary = generator
                .run()
                .with_context(|| format!("Failed to generate {} report", kind))?;
            summaries.push(summary);
        }

        if let Some(path) = &self.summary {
            JsonExporter::export(&summaries, path)
                .with_context(|| format!("Failed to export summary to: {}", path.display()))?;
            tracing::info!("Summary written to {}", path.display());
        }

        Ok(summaries)
    }
}

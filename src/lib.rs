//! queue-bench-plots - chart rendering for concurrent queue benchmarks
//!
//! Reads the latency and throughput CSV files produced by the queue benchmark
//! and renders one comparison chart per file, one line per queue
//! implementation.
//!
//! # Architecture
//!
//! - **Discovery**: finds the `*.csv` results of a report
//! - **Table**: loads a results file and drops incomplete rows
//! - **Chart**: groups rows into one sorted line per series
//! - **Visualization**: renders charts to PNG with plotters
//! - **Report**: runs the pipeline per file, skipping failures
//!
//! # Example
//!
//! ```rust,no_run
//! use queue_bench_plots::config::ReportConfig;
//! use queue_bench_plots::report::ReportGenerator;
//! use queue_bench_plots::visualization::LineChartPlotter;
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = ReportGenerator::new(ReportConfig::throughput(), LineChartPlotter::default())?;
//!     let summary = generator.run()?;
//!     println!("wrote {} charts", summary.charts_written.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod report;
pub mod table;
pub mod trend;
pub mod visualization;

// Re-export commonly used types
pub use chart::{Chart, SeriesLine};
pub use config::{ReportConfig, ReportKind};
pub use error::ReportError;
pub use report::{ReportGenerator, ReportSummary};
pub use table::{ResultRecord, ResultTable};
pub use visualization::{ChartRenderer, LineChartPlotter};

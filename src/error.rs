//! Error types for report generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a results file or rendering its charts
#[derive(Error, Debug)]
pub enum ReportError {
    /// The results file disappeared between discovery and loading
    #[error("results file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A required column is absent from the CSV header
    #[error("missing column `{column}` in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid report configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Chart could not be drawn or written
    #[error("render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;

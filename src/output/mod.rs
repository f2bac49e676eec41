//! Output formats for report results

pub mod json_export;

pub use json_export::JsonExporter;

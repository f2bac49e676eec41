//! JSON export of report summaries

use crate::report::ReportSummary;
use anyhow::Result;
use serde_json::json;
use std::fs::File;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    /// Write the summaries of all reports run to a JSON file
    pub fn export(summaries: &[ReportSummary], path: &Path) -> Result<()> {
        let charts: usize = summaries.iter().map(|s| s.charts_written.len()).sum();
        let skipped: usize = summaries.iter().map(|s| s.skipped.len()).sum();

        let output = json!({
            "totals": {
                "files_found": summaries.iter().map(|s| s.files_found).sum::<usize>(),
                "charts_written": charts,
                "skipped": skipped,
            },
            "reports": summaries,
        });

        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &output)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportKind;
    use crate::report::Skipped;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_export_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summaries = vec![
            ReportSummary {
                kind: ReportKind::Latency,
                files_found: 2,
                charts_written: vec![PathBuf::from("plots/latency/a.png")],
                skipped: vec![Skipped {
                    path: PathBuf::from("results/latency/b.csv"),
                    reason: "no valid data".into(),
                }],
            },
            ReportSummary {
                kind: ReportKind::Throughput,
                files_found: 0,
                charts_written: vec![],
                skipped: vec![],
            },
        ];

        JsonExporter::export(&summaries, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["totals"]["files_found"], 2);
        assert_eq!(value["totals"]["charts_written"], 1);
        assert_eq!(value["totals"]["skipped"], 1);
        assert_eq!(value["reports"][0]["kind"], "latency");
        assert_eq!(value["reports"][0]["skipped"][0]["reason"], "no valid data");
        assert_eq!(value["reports"][1]["kind"], "throughput");
    }
}

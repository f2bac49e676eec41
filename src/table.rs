//! Loading and cleaning benchmark result tables
//!
//! A results CSV is read by column name. Only three columns matter: the series
//! label (`Queue`), the concurrency level and one metric column. Header names
//! must match exactly. Any field that is empty or an NA token is missing; the
//! numeric columns are trimmed before parsing and are also missing when they
//! are not a finite number. Rows with a missing field are dropped.

use crate::config::{CONCURRENCY_COLUMN, QUEUE_COLUMN};
use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Tokens read as missing values, matched against the whole field
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One cleaned row of a results table
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Series label (queue implementation)
    pub series: String,
    /// Producer/consumer count
    pub concurrency: f64,
    /// Latency or throughput value
    pub value: f64,
}

impl ResultRecord {
    pub fn new(series: impl Into<String>, concurrency: f64, value: f64) -> Self {
        Self {
            series: series.into(),
            concurrency,
            value,
        }
    }
}

/// Cleaned rows of one results file, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<ResultRecord>,
    /// Rows dropped during cleaning
    dropped: usize,
}

impl ResultTable {
    /// Build a table from already clean records
    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        Self {
            records,
            dropped: 0,
        }
    }

    /// Load and clean a results file
    pub fn load(path: &Path, metric_column: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::NotFound(path.to_path_buf()),
            _ => ReportError::Io(e),
        })?;
        Self::from_reader(file, metric_column).map_err(|e| match e {
            ReportError::MissingColumn { column, .. } => ReportError::MissingColumn {
                column,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Parse and clean CSV data from any reader
    pub fn from_reader<R: Read>(reader: R, metric_column: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        let series_idx = column_index(&headers, QUEUE_COLUMN)?;
        let concurrency_idx = column_index(&headers, CONCURRENCY_COLUMN)?;
        let value_idx = column_index(&headers, metric_column)?;

        let mut table = Self::default();
        for row in reader.records() {
            let row = row?;
            let series = row.get(series_idx).and_then(text_field);
            let concurrency = row.get(concurrency_idx).and_then(numeric_field);
            let value = row.get(value_idx).and_then(numeric_field);

            match (series, concurrency, value) {
                (Some(series), Some(concurrency), Some(value)) => {
                    table.records.push(ResultRecord {
                        series: series.to_string(),
                        concurrency,
                        value,
                    });
                }
                _ => table.dropped += 1,
            }
        }

        Ok(table)
    }

    /// Number of retained rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no rows survived cleaning
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped during cleaning
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Iterate over the retained rows
    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }

    /// Distinct series labels in order of first appearance
    pub fn series_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for record in &self.records {
            if !labels.contains(&record.series.as_str()) {
                labels.push(&record.series);
            }
        }
        labels
    }

    /// Points of one series as `(concurrency, value)`, sorted by concurrency
    pub fn series_points(&self, label: &str) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .records
            .iter()
            .filter(|r| r.series == label)
            .map(|r| (r.concurrency, r.value))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    /// Copy of the table without the rows of one series
    pub fn without_series(&self, label: &str) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.series != label)
                .cloned()
                .collect(),
            dropped: self.dropped,
        }
    }
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| ReportError::MissingColumn {
            column: column.to_string(),
            path: Default::default(),
        })
}

fn is_missing(field: &str) -> bool {
    NA_TOKENS.contains(&field)
}

fn text_field(field: &str) -> Option<&str> {
    if is_missing(field) {
        None
    } else {
        Some(field)
    }
}

fn numeric_field(field: &str) -> Option<f64> {
    let field = field.trim();
    if is_missing(field) {
        return None;
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LATENCY_COLUMN;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn latency_table(csv: &str) -> ResultTable {
        ResultTable::from_reader(csv.as_bytes(), LATENCY_COLUMN).unwrap()
    }

    #[test]
    fn test_load_clean_rows() {
        let table = latency_table(
            ",Producer/Consumer Count,Average Latency (ns),Queue\n\
             0,1,100,A\n\
             1,2,50,A\n\
             2,1,200,B\n",
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.dropped(), 0);
        assert_eq!(table.series_labels(), vec!["A", "B"]);
        assert_eq!(table.series_points("A"), vec![(1.0, 100.0), (2.0, 50.0)]);
        assert_eq!(table.series_points("B"), vec![(1.0, 200.0)]);
    }

    #[test]
    fn test_malformed_numbers_are_dropped() {
        let table = latency_table(
            "Queue,Producer/Consumer Count,Average Latency (ns)\n\
             A,1,100\n\
             A,two,50\n\
             A,3,fast\n\
             A,4,\n\
             A,5,NaN\n\
             A,6,inf\n\
             A, 7 , 70 \n",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped(), 5);
        assert_eq!(table.series_points("A"), vec![(1.0, 100.0), (7.0, 70.0)]);
    }

    #[test]
    fn test_missing_series_label_dropped() {
        let table = latency_table(
            "Queue,Producer/Consumer Count,Average Latency (ns)\n\
             ,1,100\n\
             NA,2,100\n\
             B,3,300\n",
        );
        assert_eq!(table.series_labels(), vec!["B"]);
        assert_eq!(table.dropped(), 2);
    }

    #[test]
    fn test_padded_labels_are_kept() {
        let table = latency_table(
            "Queue,Producer/Consumer Count,Average Latency (ns)\n   ,1,100\n NA ,2,5\n#NA,3,7\nA,1.#QNAN,9\n",
        );
        assert_eq!(table.series_labels(), vec!["   ", " NA "]);
        assert_eq!(table.dropped(), 2);
    }

    #[test]
    fn test_headers_match_exactly() {
        let err = ResultTable::from_reader(
            " Queue,Producer/Consumer Count,Average Latency (ns)\nA,1,100\n".as_bytes(),
            LATENCY_COLUMN,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn { column, .. } if column == "Queue"));
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let table = latency_table(
            "Producer/Consumer Count,Queue,Average Latency (ns)\n\
             1,A\n\
             2,A,20\n",
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped(), 1);
    }

    #[test]
    fn test_all_invalid_yields_empty_table() {
        let table = latency_table(
            "Queue,Producer/Consumer Count,Average Latency (ns)\n\
             A,x,y\n",
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let err = ResultTable::from_reader(
            "Queue,Producer/Consumer Count\nA,1\n".as_bytes(),
            LATENCY_COLUMN,
        )
        .unwrap_err();
        match err {
            ReportError::MissingColumn { column, .. } => assert_eq!(column, LATENCY_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_points_sorted_by_concurrency() {
        let table = latency_table(
            "Queue,Producer/Consumer Count,Average Latency (ns)\n\
             A,8,80\n\
             A,2,20\n\
             A,4,40\n",
        );
        assert_eq!(
            table.series_points("A"),
            vec![(2.0, 20.0), (4.0, 40.0), (8.0, 80.0)]
        );
    }

    #[test]
    fn test_without_series() {
        let table = ResultTable::from_records(vec![
            ResultRecord::new("std::queue (Blocking)", 1.0, 10.0),
            ResultRecord::new("Moodycamel", 1.0, 1000.0),
        ]);
        let rest = table.without_series("std::queue (Blocking)");
        assert_eq!(rest.series_labels(), vec!["Moodycamel"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Queue,Producer/Consumer Count,Average Latency (ns)").unwrap();
        writeln!(file, "A,1,100").unwrap();

        let table = ResultTable::load(file.path(), LATENCY_COLUMN).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gone.csv");
        let err = ResultTable::load(&path, LATENCY_COLUMN).unwrap_err();
        assert!(matches!(err, ReportError::NotFound(p) if p == path));
    }
}

//! Results file discovery

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// List the `*.csv` files directly inside `dir`, sorted by path.
///
/// A directory that does not exist yields an empty list.
pub fn discover_csv_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map(|ext| ext == "csv")
            .unwrap_or(false);
        if is_csv && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_only_csv_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(dir.path().join("a.csv"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("data.csv.bak"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let files = discover_csv_files(&dir.path().join("absent")).unwrap();
        assert!(files.is_empty());
    }
}

//! Enumerates the statement files in a directory.

use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Lists the bank statement files directly inside `dir`: regular files whose extension is
/// exactly `csv` or `CSV`. Other casings such as `Csv` are not recognized. Subdirectories are
/// ignored, never recursed into.
pub(crate) fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Unable to list statement directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Unable to read an entry of {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match path.extension() {
            Some(ext) if ext == "csv" || ext == "CSV" => files.push(path),
            _ => {}
        }
    }
    // The OS makes no ordering promise for directory entries; the report order is name-sorted.
    files.sort();
    Ok(files)
}

#[test]
fn csv_files_extension_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let dir = tempdir.path();
    for name in ["a.csv", "B.CSV", "c.Csv", "d.txt", "e.csv.bak"] {
        std::fs::write(dir.join(name), "x,y\n").unwrap();
    }
    std::fs::create_dir(dir.join("sub.csv")).unwrap();
    let files = csv_files(dir).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["B.CSV", "a.csv"]);
}

#[test]
fn csv_files_ignores_subdirectories_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let dir = tempdir.path();
    std::fs::create_dir(dir.join("nested")).unwrap();
    std::fs::write(dir.join("nested").join("chase.csv"), "x,y\n").unwrap();
    assert!(csv_files(dir).unwrap().is_empty());
}

#[test]
fn csv_files_missing_dir_test() {
    let tempdir = tempfile::TempDir::new().unwrap();
    assert!(csv_files(&tempdir.path().join("nope")).is_err());
}

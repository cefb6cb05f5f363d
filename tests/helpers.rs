// Shared test helpers for input files, configs and output inspection.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use etl_bench::{BenchConfig, BenchInput, StagingMode};

/// Writes `n` valid five-field rows to `dir/name` and returns the path.
#[allow(dead_code)] // Used by other test files
pub fn write_input(dir: &Path, name: &str, n: usize) -> PathBuf {
    let rows: String = (0..n)
        .map(|i| {
            format!(
                "{i},name{i},user{i}@example.com,user{i}@backup.example.com,profession{}\n",
                i % 7
            )
        })
        .collect();
    write_raw(dir, name, &rows)
}

/// Writes raw CSV text to `dir/name` and returns the path.
#[allow(dead_code)] // Used by other test files
pub fn write_raw(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write input file");
    path
}

/// Config writing outputs and the staging store under `dir`.
#[allow(dead_code)] // Used by other test files
pub fn config_in(dir: &Path, inputs: Vec<BenchInput>, mode: StagingMode) -> BenchConfig {
    BenchConfig {
        inputs,
        output_dir: dir.join("out"),
        staging_db_path: dir.join("staging.db"),
        staging_mode: mode,
        ..Default::default()
    }
}

/// Reads an output file as rows of fields.
#[allow(dead_code)] // Used by other test files
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open output file");
    reader
        .records()
        .map(|r| {
            r.expect("Failed to read output row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

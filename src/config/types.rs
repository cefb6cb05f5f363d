//! Configuration types.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::config::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_STAGING_DB_PATH, DEFAULT_WORKER_COUNT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the shared staging table is treated between staged runs.
///
/// The staging store is one file reused by every staged run of an invocation.
/// `Isolated` empties the table when a run starts so the full-table scan only
/// sees the current file. `Accumulate` never clears it, so every later run
/// re-reads (and re-exports) the rows of all earlier runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingMode {
    /// Clear the staging table at the start of every staged run
    Isolated,
    /// Keep appending; rows from earlier runs contaminate later scans
    Accumulate,
}

/// One benchmark point: an input file and its known record count.
///
/// When `record_count` is `None` the driver counts the rows before timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchInput {
    /// Input CSV file
    pub path: PathBuf,
    /// Number of data rows in the file, if known
    pub record_count: Option<usize>,
}

impl BenchInput {
    /// Creates an input with a known record count.
    pub fn new(path: impl Into<PathBuf>, record_count: usize) -> Self {
        Self {
            path: path.into(),
            record_count: Some(record_count),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use etl_bench::{BenchConfig, BenchInput};
///
/// let config = BenchConfig {
///     inputs: vec![BenchInput::new("file1.csv", 1000)],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Ordered list of benchmark inputs
    pub inputs: Vec<BenchInput>,

    /// Directory receiving `<strategy>/new_<file>` outputs
    pub output_dir: PathBuf,

    /// Staging store path (SQLite file)
    pub staging_db_path: PathBuf,

    /// Staging table lifecycle between runs
    pub staging_mode: StagingMode,

    /// Worker count for the staged+parallel transform
    pub worker_count: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            staging_db_path: PathBuf::from(DEFAULT_STAGING_DB_PATH),
            staging_mode: StagingMode::Isolated,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

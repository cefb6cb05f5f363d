//! etl_bench library: CSV ETL strategy benchmarking
//!
//! This library times three ways of extracting rows from a CSV file,
//! transforming each row and loading the result into an output CSV:
//!
//! - **Streaming**: record by record, source to sink
//! - **Staged**: through a file-backed SQLite staging table, then a bulk
//!   transform and export
//! - **Staged+Parallel**: staged, with the transform split into contiguous
//!   chunks over a fixed-size worker pool
//!
//! Every strategy calls the same row transformer, so their outputs are
//! byte-identical and only the elapsed times differ.
//!
//! # Example
//!
//! ```no_run
//! use etl_bench::{run_benchmark, BenchConfig, BenchInput, TextRenderer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BenchConfig {
//!     inputs: vec![
//!         BenchInput::new("file1.csv", 1000),
//!         BenchInput::new("file2.csv", 10000),
//!     ],
//!     ..Default::default()
//! };
//!
//! let report = run_benchmark(&config, &TextRenderer).await?;
//! println!("Benchmark took {:.1}s", report.elapsed_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The staging store and worker pool need a Tokio runtime.

#![warn(missing_docs)]

pub mod bench;
pub mod config;
mod error_handling;
pub mod generate;
pub mod initialization;
pub mod io;
pub mod report;
pub mod storage;
pub mod strategy;
pub mod transform;

// Re-export public API
pub use bench::{run_benchmark, BenchmarkReport, TimingPoint, TimingSeries};
pub use config::{BenchConfig, BenchInput, LogFormat, LogLevel, StagingMode};
pub use error_handling::{DatabaseError, EtlError, InitializationError};
pub use report::{JsonRenderer, ReportRenderer, TextRenderer};
pub use strategy::{run_strategy, Strategy, StrategyOutcome};
pub use transform::{process_chunk, transform_record, RawRecord, TransformedRecord};

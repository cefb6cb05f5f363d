//! ETL strategy runners.
//!
//! Each strategy reads one input file, transforms every record with the shared
//! row transformer and writes `<output_dir>/<slug>/new_<file>`, timing the whole
//! run with a monotonic clock:
//!
//! - [`Strategy::Streaming`]: one record at a time, straight from source to sink
//! - [`Strategy::Staged`]: load into the SQLite staging table, read it back,
//!   transform the batch, bulk write
//! - [`Strategy::StagedParallel`]: as `Staged`, with the transform fanned out
//!   over a fixed-size worker pool

mod parallel;
mod pool;
mod staged;
mod streaming;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use strum_macros::EnumIter;

use crate::config::BenchConfig;
use crate::error_handling::EtlError;
use crate::io::output_path;

pub use parallel::run_staged_parallel;
pub use pool::WorkerPool;
pub use staged::{run_staged, stage_input, StagingOptions};
pub use streaming::run_streaming;

/// The three benchmarked strategies, in benchmark order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Row-by-row streaming transform
    Streaming,
    /// Staging store, then bulk transform and export
    Staged,
    /// Staging store, then parallel chunked transform and export
    StagedParallel,
}

impl Strategy {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Streaming => "Streaming",
            Strategy::Staged => "Staged",
            Strategy::StagedParallel => "Staged+Parallel",
        }
    }

    /// Directory name for this strategy's output files.
    pub fn slug(&self) -> &'static str {
        match self {
            Strategy::Streaming => "streaming",
            Strategy::Staged => "staged",
            Strategy::StagedParallel => "staged_parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running one strategy against one input file.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    /// Strategy that produced this outcome
    pub strategy: Strategy,
    /// Input file
    pub input: PathBuf,
    /// Output file
    pub output: PathBuf,
    /// Records fed to the transformer (staged runs count what the store returned)
    pub records_read: usize,
    /// Rows written to the output file
    pub records_written: usize,
    /// Wall-clock duration of the run in seconds
    pub elapsed_seconds: f64,
}

/// Runs `strategy` against `input` using the paths and settings in `config`.
pub async fn run_strategy(
    strategy: Strategy,
    input: &Path,
    config: &BenchConfig,
) -> Result<StrategyOutcome, EtlError> {
    let output = output_path(&config.output_dir, strategy.slug(), input);
    let staging = StagingOptions::from(config);

    let result = match strategy {
        Strategy::Streaming => run_streaming(input, &output),
        Strategy::Staged => run_staged(input, &output, &staging).await,
        Strategy::StagedParallel => {
            run_staged_parallel(input, &output, &staging, config.worker_count).await
        }
    };
    let outcome = result.inspect_err(|e| {
        log::error!(
            "{} failed on {} ({}): {}",
            strategy,
            input.display(),
            e.as_str(),
            e
        )
    })?;

    log::info!(
        "{} processed {} ({} records) in {:.4}s",
        strategy,
        input.display(),
        outcome.records_written,
        outcome.elapsed_seconds
    );
    Ok(outcome)
}

//! Configuration constants.
//!
//! Default values for the benchmark harness. All of these can be overridden
//! through [`BenchConfig`](super::BenchConfig) or the CLI.

/// Number of positional fields a raw input record must carry.
pub const RAW_RECORD_FIELDS: usize = 5;

/// Fixed degree of parallelism for the staged+parallel transform phase.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Default path of the file-backed staging store (SQLite).
pub const DEFAULT_STAGING_DB_PATH: &str = "./etl_bench_staging.db";

/// Default directory under which per-strategy output directories are created.
pub const DEFAULT_OUTPUT_DIR: &str = "./etl_bench_output";

/// Prefix prepended to the input file name to form the output file name.
pub const OUTPUT_FILE_PREFIX: &str = "new_";

/// Separator placed between the primary and secondary email.
pub const EMAIL_SEPARATOR: &str = "; ";

/// Record counts of the six benchmark files the harness was built around
/// (`file1.csv` .. `file6.csv`).
pub const DEFAULT_INPUT_SIZES: &[usize] = &[1000, 10000, 20000, 30000, 40000, 50000];

/// Seed used for generated input files unless another is requested.
pub const DEFAULT_GENERATOR_SEED: u64 = 42;

//! Benchmark orchestration.
//!
//! This module provides:
//! - Input parsing and validation (`PATH[:COUNT]`, fail-fast existence checks)
//! - The strategy-major benchmark driver
//! - Timing series and report types handed to renderers

mod driver;
mod input;
mod types;

pub use driver::run_benchmark;
pub use input::{parse_input_spec, resolve_record_counts, validate_inputs};
pub use types::{BenchmarkReport, TimingPoint, TimingSeries};

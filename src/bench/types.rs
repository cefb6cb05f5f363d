//! Benchmark result types.

use serde::Serialize;

use crate::config::StagingMode;
use crate::strategy::{Strategy, StrategyOutcome};

/// One measurement: how long a strategy took on a file of `record_count` rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingPoint {
    /// Configured record count of the input file
    pub record_count: usize,
    /// Wall-clock seconds for the run
    pub elapsed_seconds: f64,
}

/// Timings of one strategy across every configured input, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSeries {
    /// Strategy measured
    pub strategy: Strategy,
    /// Display label
    pub label: String,
    /// One point per input file
    pub points: Vec<TimingPoint>,
}

impl TimingSeries {
    /// Empty series for `strategy`.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            label: strategy.label().to_string(),
            points: Vec::new(),
        }
    }

    /// Appends a measurement.
    pub fn push(&mut self, record_count: usize, elapsed_seconds: f64) {
        self.points.push(TimingPoint {
            record_count,
            elapsed_seconds,
        });
    }

    /// Record counts, aligned with [`elapsed`](Self::elapsed).
    pub fn record_counts(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.record_count).collect()
    }

    /// Elapsed seconds per input, in input order.
    pub fn elapsed(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.elapsed_seconds).collect()
    }

    /// Sum of all elapsed times.
    pub fn total_seconds(&self) -> f64 {
        self.points.iter().map(|p| p.elapsed_seconds).sum()
    }
}

/// Everything a benchmark invocation measured.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// One series per strategy, in benchmark order
    pub series: Vec<TimingSeries>,
    /// Per (strategy, file) details, in execution order
    pub outcomes: Vec<StrategyOutcome>,
    /// Staging table lifecycle used
    pub staging_mode: StagingMode,
    /// Worker count used by the parallel strategy
    pub worker_count: usize,
    /// Start time, RFC 3339
    pub started_at: String,
    /// Wall-clock seconds for the whole benchmark
    pub elapsed_seconds: f64,
}

impl BenchmarkReport {
    /// Series for `strategy`, if it was run.
    pub fn series_for(&self, strategy: Strategy) -> Option<&TimingSeries> {
        self.series.iter().find(|s| s.strategy == strategy)
    }
}

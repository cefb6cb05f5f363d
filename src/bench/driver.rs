//! Benchmark driver.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use strum::IntoEnumIterator;

use super::input::{resolve_record_counts, validate_inputs};
use super::types::{BenchmarkReport, TimingSeries};
use crate::config::{BenchConfig, StagingMode};
use crate::report::ReportRenderer;
use crate::strategy::{run_strategy, Strategy};

/// Runs every strategy against every configured input and renders the timings.
///
/// Strategy-major: all files for `Streaming`, then all for `Staged`, then all for
/// `StagedParallel`. Each series holds one point per input, in input order.
///
/// # Errors
///
/// Fails before any timing if an input is missing, and otherwise on the first
/// failed run. Nothing is retried and no partial report is rendered.
pub async fn run_benchmark(
    config: &BenchConfig,
    renderer: &dyn ReportRenderer,
) -> Result<BenchmarkReport> {
    validate_inputs(&config.inputs)?;
    let record_counts = resolve_record_counts(&config.inputs)?;

    let started_at = Utc::now().to_rfc3339();
    let start = Instant::now();
    info!(
        "Benchmarking {} input file{} (staging: {:?}, workers: {})",
        config.inputs.len(),
        if config.inputs.len() == 1 { "" } else { "s" },
        config.staging_mode,
        config.worker_count
    );

    let mut series = Vec::new();
    let mut outcomes = Vec::new();

    for strategy in Strategy::iter() {
        let mut timings = TimingSeries::new(strategy);

        for (input, &record_count) in config.inputs.iter().zip(&record_counts) {
            let outcome = run_strategy(strategy, &input.path, config)
                .await
                .with_context(|| {
                    format!("{} strategy failed on {}", strategy, input.path.display())
                })?;

            if config.staging_mode == StagingMode::Isolated
                && outcome.records_written != record_count
            {
                warn!(
                    "{} wrote {} records for {} but {} were expected",
                    strategy,
                    outcome.records_written,
                    input.path.display(),
                    record_count
                );
            }

            timings.push(record_count, outcome.elapsed_seconds);
            outcomes.push(outcome);
        }

        info!(
            "{} execution times: {:?}",
            timings.label,
            timings.elapsed()
        );
        series.push(timings);
    }

    renderer
        .render(&series)
        .context("Failed to render benchmark report")?;

    Ok(BenchmarkReport {
        series,
        outcomes,
        staging_mode: config.staging_mode,
        worker_count: config.worker_count,
        started_at,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

//! Benchmark input resolution.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::config::BenchInput;
use crate::io::count_records;

/// Parses a `PATH[:COUNT]` argument.
///
/// The count is taken from the text after the last `:` only when it parses as
/// an integer, so paths containing colons still work without one.
pub fn parse_input_spec(spec: &str) -> Result<BenchInput> {
    if spec.is_empty() {
        bail!("Empty input specification");
    }

    if let Some((path, count)) = spec.rsplit_once(':') {
        if let Ok(count) = count.parse::<usize>() {
            if path.is_empty() {
                bail!("Input specification '{spec}' has a count but no path");
            }
            return Ok(BenchInput::new(path, count));
        }
    }

    Ok(BenchInput {
        path: PathBuf::from(spec),
        record_count: None,
    })
}

/// Checks every input up front so a missing file aborts before any timing starts.
pub fn validate_inputs(inputs: &[BenchInput]) -> Result<()> {
    if inputs.is_empty() {
        bail!("No input files configured");
    }
    for input in inputs {
        let metadata = std::fs::metadata(&input.path)
            .with_context(|| format!("Input file not readable: {}", input.path.display()))?;
        if !metadata.is_file() {
            bail!("Input path is not a file: {}", input.path.display());
        }
    }
    Ok(())
}

/// Returns each input's record count, counting rows where none was configured.
pub fn resolve_record_counts(inputs: &[BenchInput]) -> Result<Vec<usize>> {
    inputs
        .iter()
        .map(|input| match input.record_count {
            Some(count) => Ok(count),
            None => {
                let count = count_records(&input.path)
                    .with_context(|| format!("Failed to count rows of {}", input.path.display()))?;
                debug!("Counted {} records in {}", count, input.path.display());
                Ok(count)
            }
        })
        .collect()
}

use std::path::Path;
use std::time::Instant;

use super::{Strategy, StrategyOutcome};
use crate::error_handling::EtlError;
use crate::io::{RecordSink, RecordSource};
use crate::transform::transform_record;

/// Streams records from `input` to `output` one at a time.
///
/// Holds at most one record in memory; nothing is staged.
pub fn run_streaming(input: &Path, output: &Path) -> Result<StrategyOutcome, EtlError> {
    let start = Instant::now();

    let source = RecordSource::open(input)?;
    let mut sink = RecordSink::create(output)?;
    let mut records_read = 0;

    for (line, record) in source.enumerate() {
        let transformed = transform_record(&record?, line)?;
        sink.write(&transformed)?;
        records_read += 1;
    }
    let records_written = sink.finish()?;

    Ok(StrategyOutcome {
        strategy: Strategy::Streaming,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read,
        records_written,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

use std::path::Path;
use std::time::Instant;

use log::debug;

use super::pool::WorkerPool;
use super::staged::{stage_input, StagingOptions};
use super::{Strategy, StrategyOutcome};
use crate::error_handling::EtlError;
use crate::io::RecordSink;
use crate::transform::{process_chunk, split_into_chunks, RawRecord, TransformedRecord};

/// Stages `input`, then transforms the table in `worker_count` contiguous chunks
/// on a per-run worker pool and bulk-writes the reassembled batch.
///
/// Chunks are joined in submission order, so output order equals input order.
/// The first failing chunk fails the run and nothing is written.
pub async fn run_staged_parallel(
    input: &Path,
    output: &Path,
    staging: &StagingOptions,
    worker_count: usize,
) -> Result<StrategyOutcome, EtlError> {
    let start = Instant::now();

    let records = stage_input(input, staging).await?;
    let records_read = records.len();
    let transformed = transform_parallel(records, worker_count).await?;

    let mut sink = RecordSink::create(output)?;
    sink.write_all(&transformed)?;
    let records_written = sink.finish()?;

    Ok(StrategyOutcome {
        strategy: Strategy::StagedParallel,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read,
        records_written,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

/// Splits `records` into contiguous owned chunks and transforms them on a
/// fixed-size pool, returning the concatenation in original order.
pub async fn transform_parallel(
    records: Vec<RawRecord>,
    worker_count: usize,
) -> Result<Vec<TransformedRecord>, EtlError> {
    let total = records.len();
    let ranges = split_into_chunks(total, worker_count);

    // Peel chunks off the tail so each worker owns its slice without copying.
    let mut rest = records;
    let mut chunks = Vec::with_capacity(ranges.len());
    for range in ranges.iter().rev() {
        chunks.push((range.start, rest.split_off(range.start)));
    }
    chunks.reverse();

    let mut pool = WorkerPool::new(worker_count);
    for (offset, chunk) in chunks {
        pool.dispatch(move || process_chunk(&chunk, offset)).await?;
    }
    debug!(
        "Dispatched {} chunks of {} records to {} workers",
        pool.dispatched(),
        total,
        pool.size()
    );

    let transformed: Vec<TransformedRecord> = pool.join().await?.into_iter().flatten().collect();
    debug_assert_eq!(transformed.len(), total);
    Ok(transformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| {
                RawRecord::new([
                    i.to_string(),
                    format!("name{i}"),
                    format!("p{i}@x.com"),
                    format!("s{i}@x.com"),
                    "tester".to_string(),
                ])
            })
            .collect()
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        for n in [0, 1, 3, 4, 5, 10, 101] {
            let records = batch(n);
            let sequential = process_chunk(&records, 0).unwrap();
            let parallel = transform_parallel(records, 4).await.unwrap();
            assert_eq!(parallel, sequential, "n = {n}");
        }
    }

    #[tokio::test]
    async fn test_parallel_reports_global_line_of_malformed_record() {
        let mut records = batch(10);
        records[8] = RawRecord::new(["8", "broken"]);
        let err = transform_parallel(records, 4).await.unwrap_err();
        assert_eq!(err.line(), Some(8));
    }
}

//! Batch transformation and chunk splitting.

use std::ops::Range;

use super::record::{transform_record, RawRecord, TransformedRecord};
use crate::error_handling::EtlError;

/// Transforms an ordered batch, preserving order.
///
/// `offset` is the position of `records[0]` in the full batch, so a malformed
/// record is reported at the same line whichever chunk it landed in.
///
/// # Errors
///
/// Stops at the first malformed record and returns its error.
pub fn process_chunk(
    records: &[RawRecord],
    offset: usize,
) -> Result<Vec<TransformedRecord>, EtlError> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| transform_record(record, offset + i))
        .collect()
}

/// Splits `len` items into at most `workers` contiguous ranges.
///
/// Every range but the last holds `len / workers` items and the last one absorbs
/// the remainder. When `len < workers` each item gets its own range. `len == 0`
/// yields no ranges, and a `workers` of 0 is treated as 1.
pub fn split_into_chunks(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.max(1);
    let size = len / workers;
    if size == 0 {
        return (0..len).map(|i| i..i + 1).collect();
    }

    (0..workers)
        .map(|w| {
            let start = w * size;
            let end = if w + 1 == workers { len } else { start + size };
            start..end
        })
        .collect()
}

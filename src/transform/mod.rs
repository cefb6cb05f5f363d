//! Record transformation.
//!
//! The row transformer is the unit of work every strategy shares, so all three
//! produce byte-identical output for the same input.

mod chunk;
mod record;

pub use chunk::{process_chunk, split_into_chunks};
pub use record::{transform_record, RawRecord, TransformedRecord};

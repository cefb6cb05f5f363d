//! CSV input and output.
//!
//! Input files have no header and at least five fields per row; output files have
//! no header and exactly four fields per row.

mod sink;
mod source;

pub use sink::{output_path, RecordSink};
pub use source::{count_records, RecordSource};

//! Lazy CSV record source.
//!
//! The `csv` reader drops blank lines. Here a blank line is a record with no
//! fields, so [`LineTracker`] watches the raw bytes on their way into the
//! reader and notes where the blank lines sit between real records.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter};

use crate::error_handling::EtlError;
use crate::transform::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    StartRecord,
    StartField,
    InField,
    InQuoted,
    QuoteInQuoted,
}

/// Byte-level shadow of the CSV grammar (`,` delimiter, `"` quoting with
/// doubled escapes, `\r`, `\n` and `\r\n` terminators).
///
/// For every blank line it queues the number of non-blank records seen
/// before it.
struct LineTracker<R> {
    inner: R,
    state: LexState,
    after_cr: bool,
    records: u64,
    blanks: VecDeque<u64>,
}

impl<R> LineTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            state: LexState::StartRecord,
            after_cr: false,
            records: 0,
            blanks: VecDeque::new(),
        }
    }

    fn observe(&mut self, b: u8) {
        let after_cr = std::mem::replace(&mut self.after_cr, false);
        self.state = match (self.state, b) {
            (LexState::StartRecord, b'\n') => {
                // a `\n` right after `\r` closes the same line
                if !after_cr {
                    self.blanks.push_back(self.records);
                }
                LexState::StartRecord
            }
            (LexState::StartRecord, b'\r') => {
                self.blanks.push_back(self.records);
                self.after_cr = true;
                LexState::StartRecord
            }
            (LexState::StartRecord, first) => {
                self.records += 1;
                match first {
                    b'"' => LexState::InQuoted,
                    b',' => LexState::StartField,
                    _ => LexState::InField,
                }
            }
            (LexState::InQuoted, b'"') => LexState::QuoteInQuoted,
            (LexState::InQuoted, _) => LexState::InQuoted,
            (LexState::QuoteInQuoted, b'"') => LexState::InQuoted,
            (LexState::StartField, b'"') => LexState::InQuoted,
            (_, b',') => LexState::StartField,
            (_, b'\r') => {
                self.after_cr = true;
                LexState::StartRecord
            }
            (_, b'\n') => LexState::StartRecord,
            (_, _) => LexState::InField,
        };
    }
}

impl<R: Read> Read for LineTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        for &b in &buf[..n] {
            self.observe(b);
        }
        Ok(n)
    }
}

/// Single-pass iterator over the records of one input file.
///
/// There is no header row: the first line is data. Rows of any width are
/// accepted here so that short rows, and blank lines as zero-field rows,
/// surface as malformed records in the transformer rather than as CSV errors.
pub struct RecordSource {
    records: StringRecordsIntoIter<LineTracker<File>>,
    yielded: u64,
    pending: Option<RawRecord>,
}

impl RecordSource {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    pub fn open(path: &Path) -> Result<Self, EtlError> {
        let file = File::open(path)?;
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(LineTracker::new(file));
        Ok(Self {
            records: reader.into_records(),
            yielded: 0,
            pending: None,
        })
    }

    fn take_blank(&mut self, upto: Option<u64>) -> bool {
        let blanks = &mut self.records.reader_mut().get_mut().blanks;
        match blanks.front() {
            Some(&before) if upto.map_or(true, |limit| before <= limit) => {
                blanks.pop_front();
                true
            }
            _ => false,
        }
    }
}

impl Iterator for RecordSource {
    type Item = Result<RawRecord, EtlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.pending.take() {
            if self.take_blank(Some(self.yielded)) {
                self.pending = Some(record);
                return Some(Ok(RawRecord::default()));
            }
            self.yielded += 1;
            return Some(Ok(record));
        }

        match self.records.next() {
            Some(Ok(record)) => {
                let record = RawRecord::from(record);
                if self.take_blank(Some(self.yielded)) {
                    self.pending = Some(record);
                    return Some(Ok(RawRecord::default()));
                }
                self.yielded += 1;
                Some(Ok(record))
            }
            Some(Err(e)) => Some(Err(EtlError::from(e))),
            // trailing blank lines
            None if self.take_blank(None) => Some(Ok(RawRecord::default())),
            None => None,
        }
    }
}

/// Counts the data rows of a CSV file without keeping them.
pub fn count_records(path: &Path) -> Result<usize, EtlError> {
    let mut count = 0;
    for record in RecordSource::open(path)? {
        record?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[test]
    fn test_first_row_is_data() {
        let file = write_csv("1,alice,a@x.com,a2@x.com,engineer\n2,bob,b@x.com,b2@x.com,chef\n");
        let records: Vec<RawRecord> = RecordSource::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields()[1], "alice");
    }

    #[test]
    fn test_short_rows_are_passed_through() {
        let file = write_csv("1,alice,a@x.com,a2@x.com,engineer\n2,bob\n");
        let records: Vec<RawRecord> = RecordSource::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records[1].len(), 2);
    }

    #[test]
    fn test_quoted_fields() {
        let file = write_csv("1,\"Smith, Jr\",a@x.com,a2@x.com,\"data, science\"\n");
        let records: Vec<RawRecord> = RecordSource::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records[0].fields()[1], "Smith, Jr");
        assert_eq!(records[0].fields()[4], "data, science");
    }

    #[test]
    fn test_blank_lines_become_empty_records() {
        let file = write_csv("1,a,b,c,d\n\n2,a,b,c,d\n\n\n3,a,b,c,d\n\n");
        let widths: Vec<usize> = RecordSource::open(file.path())
            .unwrap()
            .map(|r| r.unwrap().len())
            .collect();
        assert_eq!(widths, vec![5, 0, 5, 0, 0, 5, 0]);
    }

    #[test]
    fn test_leading_blank_line_and_crlf() {
        let file = write_csv("\r\n1,a,b,c,d\r\n2,a,b,c,d\r\n");
        let widths: Vec<usize> = RecordSource::open(file.path())
            .unwrap()
            .map(|r| r.unwrap().len())
            .collect();
        assert_eq!(widths, vec![0, 5, 5]);
    }

    #[test]
    fn test_newlines_inside_quotes_are_not_blank_lines() {
        let file = write_csv("1,\"line one\n\nline three\",b,c,d\n2,a,b,c,d");
        let records: Vec<RawRecord> = RecordSource::open(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields()[1], "line one\n\nline three");
    }

    #[test]
    fn test_missing_file() {
        let err = RecordSource::open(Path::new("/nonexistent/input.csv"))
            .err()
            .expect("open should fail");
        assert!(matches!(err, EtlError::Io(_)));
    }

    #[test]
    fn test_count_records() {
        let file = write_csv("1,a,b,c,d\n2,a,b,c,d\n3,a,b,c,d\n");
        assert_eq!(count_records(file.path()).unwrap(), 3);

        let empty = write_csv("");
        assert_eq!(count_records(empty.path()).unwrap(), 0);

        let with_blank = write_csv("1,a,b,c,d\n\n2,a,b,c,d\n");
        assert_eq!(count_records(with_blank.path()).unwrap(), 3);
    }
}

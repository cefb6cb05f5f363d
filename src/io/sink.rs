//! CSV record sink.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use crate::config::OUTPUT_FILE_PREFIX;
use crate::error_handling::EtlError;
use crate::transform::TransformedRecord;

/// Writes transformed records, four fields per row, no header.
pub struct RecordSink {
    writer: Writer<File>,
    written: usize,
}

impl RecordSink {
    /// Creates (or truncates) the output file, creating parent directories.
    pub fn create(path: &Path) -> Result<Self, EtlError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        Ok(Self { writer, written: 0 })
    }

    /// Writes a single record.
    pub fn write(&mut self, record: &TransformedRecord) -> Result<(), EtlError> {
        self.writer.write_record(record.as_fields())?;
        self.written += 1;
        Ok(())
    }

    /// Writes a whole batch in order.
    pub fn write_all(&mut self, records: &[TransformedRecord]) -> Result<(), EtlError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flushes and closes the file, returning the number of rows written.
    pub fn finish(mut self) -> Result<usize, EtlError> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Output location for one (strategy, input) pair:
/// `<output_dir>/<strategy_slug>/new_<input file name>`.
pub fn output_path(output_dir: &Path, strategy_slug: &str, input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.csv".to_string());
    output_dir
        .join(strategy_slug)
        .join(format!("{OUTPUT_FILE_PREFIX}{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_naming() {
        let path = output_path(Path::new("/out"), "staged", Path::new("/data/file1.csv"));
        assert_eq!(path, PathBuf::from("/out/staged/new_file1.csv"));
    }

    #[test]
    fn test_write_records_without_header() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("new_file.csv");

        let mut sink = RecordSink::create(&path).unwrap();
        sink.write_all(&[
            TransformedRecord {
                identifier: "1".to_string(),
                initial: "A".to_string(),
                combined_email: "a@x.com; a2@x.com".to_string(),
                profession: "engineer".to_string(),
            },
            TransformedRecord {
                identifier: "2".to_string(),
                initial: "B".to_string(),
                combined_email: "b@x.com; b2@x.com".to_string(),
                profession: "data, science".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(sink.finish().unwrap(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "1,A,a@x.com; a2@x.com,engineer\n2,B,b@x.com; b2@x.com,\"data, science\"\n"
        );
    }

    #[test]
    fn test_empty_sink_creates_empty_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("new_empty.csv");
        let sink = RecordSink::create(&path).unwrap();
        assert_eq!(sink.finish().unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;

use super::{Strategy, StrategyOutcome};
use crate::config::{BenchConfig, StagingMode};
use crate::error_handling::EtlError;
use crate::io::{RecordSink, RecordSource};
use crate::storage::StagingStore;
use crate::transform::{process_chunk, RawRecord};

/// Where and how staged runs keep their intermediate rows.
#[derive(Debug, Clone)]
pub struct StagingOptions {
    /// SQLite file shared by every staged run
    pub db_path: PathBuf,
    /// Whether a run clears the table before loading
    pub mode: StagingMode,
}

impl From<&BenchConfig> for StagingOptions {
    fn from(config: &BenchConfig) -> Self {
        Self {
            db_path: config.staging_db_path.clone(),
            mode: config.staging_mode,
        }
    }
}

/// Load phase shared by both staged strategies.
///
/// Inserts every record of `input` into the staging table in one transaction,
/// then reads the full table back in insertion order. In
/// [`StagingMode::Accumulate`] the result also holds rows from earlier runs.
pub async fn stage_input(
    input: &Path,
    staging: &StagingOptions,
) -> Result<Vec<RawRecord>, EtlError> {
    let source = RecordSource::open(input)?;
    let source_name = input.to_string_lossy();

    let mut store = StagingStore::open(&staging.db_path).await?;
    match staging.mode {
        StagingMode::Isolated => {
            store.clear().await?;
        }
        StagingMode::Accumulate => {
            let carried = store.row_count().await?;
            if carried > 0 {
                debug!("{carried} staged rows carried over from earlier runs");
            }
        }
    }
    let loaded = store.load(&source_name, source).await?;
    let records = store.fetch_all().await?;
    store.close().await?;

    debug!(
        "Staged {} records from {}, table now holds {}",
        loaded,
        input.display(),
        records.len()
    );
    Ok(records)
}

/// Stages `input`, transforms the full table in one pass and bulk-writes it.
pub async fn run_staged(
    input: &Path,
    output: &Path,
    staging: &StagingOptions,
) -> Result<StrategyOutcome, EtlError> {
    let start = Instant::now();

    let records = stage_input(input, staging).await?;
    let transformed = process_chunk(&records, 0)?;

    let mut sink = RecordSink::create(output)?;
    sink.write_all(&transformed)?;
    let records_written = sink.finish()?;

    Ok(StrategyOutcome {
        strategy: Strategy::Staged,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records_read: records.len(),
        records_written,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &Path, mode: StagingMode) -> StagingOptions {
        StagingOptions {
            db_path: dir.join("staging.db"),
            mode,
        }
    }

    #[tokio::test]
    async fn test_staged_output_matches_input_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input = temp_dir.path().join("file1.csv");
        let output = temp_dir.path().join("new_file1.csv");
        std::fs::write(
            &input,
            "1,alice,a@x.com,a2@x.com,engineer\n2,bob,b@x.com,b2@x.com,chef\n",
        )
        .unwrap();

        let outcome = run_staged(&input, &output, &options(temp_dir.path(), StagingMode::Isolated))
            .await
            .unwrap();
        assert_eq!(outcome.records_written, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "1,A,a@x.com; a2@x.com,engineer\n2,B,b@x.com; b2@x.com,chef\n"
        );
    }

    #[tokio::test]
    async fn test_isolated_mode_does_not_carry_rows_between_runs() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input = temp_dir.path().join("file1.csv");
        std::fs::write(&input, "1,alice,a@x.com,a2@x.com,engineer\n").unwrap();
        let staging = options(temp_dir.path(), StagingMode::Isolated);

        assert_eq!(stage_input(&input, &staging).await.unwrap().len(), 1);
        assert_eq!(stage_input(&input, &staging).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accumulate_mode_rereads_earlier_rows() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let input = temp_dir.path().join("file1.csv");
        std::fs::write(&input, "1,alice,a@x.com,a2@x.com,engineer\n").unwrap();
        let staging = options(temp_dir.path(), StagingMode::Accumulate);

        assert_eq!(stage_input(&input, &staging).await.unwrap().len(), 1);
        assert_eq!(stage_input(&input, &staging).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_input_does_not_touch_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let staging = options(temp_dir.path(), StagingMode::Isolated);

        let err = stage_input(&temp_dir.path().join("missing.csv"), &staging)
            .await
            .unwrap_err();
        assert!(matches!(err, EtlError::Io(_)));
        assert!(!staging.db_path.exists());
    }
}

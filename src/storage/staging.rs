//! The staging table.
//!
//! One table, three untyped positional columns: source file name, line ordinal
//! and the raw record re-encoded as a single CSV line. No indices. Rows are read
//! back in insertion (`rowid`) order.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::debug;
use sqlx::{Connection, Row, SqliteConnection};

use super::pool::open_staging_connection;
use crate::error_handling::{DatabaseError, EtlError};
use crate::transform::RawRecord;

/// A staging store session: one connection, used sequentially.
pub struct StagingStore {
    conn: SqliteConnection,
}

impl StagingStore {
    /// Opens the store and creates the staging table if it is missing.
    pub async fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        let mut conn = open_staging_connection(db_path).await?;
        sqlx::query("CREATE TABLE IF NOT EXISTS staged_records (source, line_no, record)")
            .execute(&mut conn)
            .await?;
        Ok(Self { conn })
    }

    /// Deletes every staged row.
    pub async fn clear(&mut self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM staged_records")
            .execute(&mut self.conn)
            .await?;
        debug!("Cleared {} staged rows", result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Inserts every record from `records`, one statement per record, inside a
    /// single transaction committed once at the end.
    ///
    /// On error the transaction is dropped uncommitted and SQLite rolls it back.
    pub async fn load<I>(&mut self, source: &str, records: I) -> Result<usize, EtlError>
    where
        I: IntoIterator<Item = Result<RawRecord, EtlError>>,
    {
        let mut tx = self.conn.begin().await.map_err(DatabaseError::SqlError)?;
        let mut inserted = 0usize;

        for record in records {
            let record = record?;
            let encoded = encode_record(&record)?;
            sqlx::query("INSERT INTO staged_records (source, line_no, record) VALUES (?, ?, ?)")
                .bind(source)
                .bind(inserted as i64)
                .bind(encoded)
                .execute(&mut *tx)
                .await
                .map_err(DatabaseError::SqlError)?;
            inserted += 1;
        }

        tx.commit().await.map_err(DatabaseError::SqlError)?;
        debug!("Staged {inserted} records from {source}");
        Ok(inserted)
    }

    /// Reads the whole table back into memory, in insertion order.
    pub async fn fetch_all(&mut self) -> Result<Vec<RawRecord>, DatabaseError> {
        let rows = sqlx::query("SELECT line_no, record FROM staged_records ORDER BY rowid")
            .fetch_all(&mut self.conn)
            .await?;

        rows.iter()
            .map(|row| {
                let line_no: i64 = row.try_get("line_no")?;
                let encoded: String = row.try_get("record")?;
                decode_record(&encoded)
                    .map_err(|source| DatabaseError::DecodeError { line_no, source })
            })
            .collect()
    }

    /// Number of staged rows.
    pub async fn row_count(&mut self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staged_records")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(count)
    }

    /// Closes the underlying connection.
    pub async fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().await?;
        Ok(())
    }
}

fn encode_record(record: &RawRecord) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(record.fields())?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

fn decode_record(line: &str) -> Result<RawRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(RawRecord::from(&record))
    } else {
        Ok(RawRecord::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn records(n: usize) -> Vec<Result<RawRecord, EtlError>> {
        (0..n)
            .map(|i| {
                Ok(RawRecord::new([
                    i.to_string(),
                    format!("name{i}"),
                    format!("p{i}@x.com"),
                    format!("s{i}@x.com"),
                    "tester".to_string(),
                ]))
            })
            .collect()
    }

    #[test]
    fn test_encode_decode_preserves_awkward_fields() {
        let record = RawRecord::new(["1", "Smith, Jr", "say \"hi\"", "", "multi\nline"]);
        let encoded = encode_record(&record).unwrap();
        assert_eq!(decode_record(&encoded).unwrap(), record);
    }

    #[tokio::test]
    async fn test_load_and_fetch_in_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = StagingStore::open(&temp_dir.path().join("staging.db"))
            .await
            .unwrap();

        let loaded = store.load("file1.csv", records(25)).await.unwrap();
        assert_eq!(loaded, 25);
        assert_eq!(store.row_count().await.unwrap(), 25);

        let fetched = store.fetch_all().await.unwrap();
        let ids: Vec<&str> = fetched.iter().map(|r| r.fields()[0].as_str()).collect();
        let expected: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_rows_persist_across_sessions_until_cleared() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("staging.db");

        let mut store = StagingStore::open(&db_path).await.unwrap();
        store.load("file1.csv", records(3)).await.unwrap();
        store.close().await.unwrap();

        let mut store = StagingStore::open(&db_path).await.unwrap();
        store.load("file2.csv", records(2)).await.unwrap();
        assert_eq!(store.fetch_all().await.unwrap().len(), 5);

        assert_eq!(store.clear().await.unwrap(), 5);
        assert!(store.fetch_all().await.unwrap().is_empty());
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_load_is_not_committed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let mut store = StagingStore::open(&temp_dir.path().join("staging.db"))
            .await
            .unwrap();

        let mut input = records(3);
        input.push(Err(EtlError::Io(std::io::Error::other("read failed"))));
        let err = store.load("file1.csv", input).await.unwrap_err();
        assert!(matches!(err, EtlError::Io(_)));
        assert_eq!(store.row_count().await.unwrap(), 0);
    }
}

//! Staging store connection management.
//!
//! Every staged run talks to the store over exactly one connection. The
//! database file is created on first use and reused afterwards, so its contents
//! persist across runs of the same invocation.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, error};
use sqlx::{Connection, SqliteConnection};

use crate::error_handling::DatabaseError;

/// Opens a single connection to the staging database at `db_path`.
///
/// Creates the database file if it doesn't exist and enables WAL mode.
pub async fn open_staging_connection(db_path: &Path) -> Result<SqliteConnection, DatabaseError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DatabaseError::FileCreationError(e.to_string()))?;
        }
    }

    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => debug!("Staging database file created at {db_path_str}"),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Staging database file already exists at {db_path_str}")
        }
        Err(e) => {
            error!("Failed to create staging database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let mut conn = SqliteConnection::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to staging database: {e}");
            DatabaseError::SqlError(e)
        })?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&mut conn)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(conn)
}

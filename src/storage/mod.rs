//! Staging store (SQLite).

pub mod pool;
pub mod staging;

// Re-export commonly used items
pub use pool::open_staging_connection;
pub use staging::StagingStore;

//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared process-level resources.
//! Per-run resources (staging connection, worker pool) are created by the
//! strategies themselves.

mod logger;

// Re-export public API
pub use logger::init_logger_with;

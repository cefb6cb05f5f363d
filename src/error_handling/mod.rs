//! Error handling.
//!
//! This module provides the typed errors used throughout the crate:
//! - [`EtlError`] for record extraction, transformation, loading and worker failures
//! - [`DatabaseError`] for staging store failures
//! - [`InitializationError`] for start-up failures (logger)
//!
//! None of these errors are retried. A malformed record or a failed worker aborts
//! the strategy run it occurred in, and the benchmark driver propagates it.

mod types;

// Re-export public API
pub use types::{DatabaseError, EtlError, InitializationError};

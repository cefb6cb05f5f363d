//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (worker count, default paths, output naming)
//! - Configuration types and CLI value enums

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{BenchConfig, BenchInput, LogFormat, LogLevel, StagingMode};

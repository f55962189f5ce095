//! Logging utilities for output and progress tracking
//!
//! This module provides standardized log messages and a spinner for
//! one-time artifact loading.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_spinner, finish_and_clear};

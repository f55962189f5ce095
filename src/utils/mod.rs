//! Utility functions shared across the crate

pub mod arrow_utils;
pub mod logging;

pub use arrow_utils::{extract_f64_column, extract_string_column, get_column};
pub use logging::{
    create_spinner, finish_and_clear, log_operation_complete, log_operation_start, log_warning,
};

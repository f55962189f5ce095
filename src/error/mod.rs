//! Error handling for the survey predictor.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors raised while loading artifacts or processing a submission
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A raw record or reference file lacks expected columns, or a column
    /// carries a value of the wrong kind
    #[error("Schema mismatch: {}", describe_mismatch(.missing, .details))]
    SchemaMismatch {
        /// Columns that were expected but absent
        missing: Vec<String>,
        /// Further problems (wrong value kinds, wrong column types)
        details: Vec<String>,
    },

    /// The aligned vector does not match the model's expected columns
    #[error("Alignment error: {0}")]
    AlignmentError(String),

    /// The classifier could not produce a prediction
    #[error("Prediction error: {0}")]
    PredictionError(String),

    /// A form answer is outside its allowed range
    #[error("Invalid answer for '{field}': {reason}")]
    InvalidAnswer {
        /// The survey field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The model artifact is malformed
    #[error("Model artifact error: {0}")]
    ModelArtifact(String),

    /// A column requested for comparison does not exist
    #[error("Column '{0}' not found in reference data")]
    ColumnNotFound(String),

    /// A column exists but holds the wrong kind of data
    #[error("Column '{column}' is not {expected}")]
    ColumnType {
        /// The column name
        column: String,
        /// Description of the expected kind
        expected: String,
    },

    /// The reference table cannot be used (empty, unsupported format)
    #[error("Reference data error: {0}")]
    ReferenceData(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening or reading a file
    #[error("IO error for {} ({purpose}): {source}", .path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// Why the file was being accessed
        purpose: String,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error decoding JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SurveyError {
    /// Schema mismatch caused only by missing columns
    #[must_use]
    pub fn missing_columns(missing: Vec<String>) -> Self {
        Self::SchemaMismatch {
            missing,
            details: Vec::new(),
        }
    }

    /// Whether this error means the submission itself was unusable, as
    /// opposed to a broken artifact or environment
    #[must_use]
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaMismatch { .. } | Self::InvalidAnswer { .. }
        )
    }
}

fn describe_mismatch(missing: &[String], details: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing columns [{}]", missing.join(", ")));
    }
    parts.extend(details.iter().cloned());
    if parts.is_empty() {
        "cannot process this input".to_string()
    } else {
        parts.join("; ")
    }
}

/// Result type for survey predictor operations
pub type Result<T> = std::result::Result<T, SurveyError>;

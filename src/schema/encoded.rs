//! The post-encoding column layout a trained model expects.

use rustc_hash::FxHashMap;

use crate::error::{Result, SurveyError};

/// Ordered feature names the model was fit on
///
/// Ground truth for which columns the aligned vector carries and in which
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSchema {
    columns: Vec<String>,
}

impl EncodedSchema {
    /// Build a schema, rejecting empty or duplicate column lists
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(SurveyError::ModelArtifact(
                "model declares no input features".to_string(),
            ));
        }

        let mut seen = FxHashMap::default();
        for (idx, name) in columns.iter().enumerate() {
            if let Some(first) = seen.insert(name.as_str(), idx) {
                return Err(SurveyError::ModelArtifact(format!(
                    "feature '{name}' appears at positions {first} and {idx}"
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Column names in model order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a constructed schema
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether the schema includes `column`
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

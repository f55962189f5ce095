//! Survey schema definitions and reference-file compatibility checks.

use arrow::datatypes::{DataType, Schema};
use itertools::Itertools;

pub mod encoded;
pub mod fields;

pub use encoded::EncodedSchema;
pub use fields::{
    ColumnKind, DEFAULT_ENCODED_COLUMNS, SURVEY_COLUMNS, SurveyColumn, dummy_column_name,
    survey_column,
};

use crate::error::{Result, SurveyError};

/// Compatibility of a reference file's schema with the survey columns
#[derive(Debug, Default)]
pub struct SchemaCompatibilityReport {
    /// Whether the schema can be used as reference data
    pub compatible: bool,
    /// List of incompatibility issues, if any
    pub issues: Vec<SchemaIssue>,
}

/// A schema compatibility issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// The column the issue concerns
    pub column: String,
    /// What is wrong with it
    pub kind: SchemaIssueKind,
}

/// Kinds of schema problems
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssueKind {
    /// The column is absent
    Missing,
    /// The column is present with an unusable type
    WrongType {
        /// Expected kind of data
        expected: String,
        /// Type found in the file
        actual: String,
    },
}

impl SchemaCompatibilityReport {
    fn push(&mut self, column: &str, kind: SchemaIssueKind) {
        self.compatible = false;
        self.issues.push(SchemaIssue {
            column: column.to_string(),
            kind,
        });
    }

    /// Columns reported missing
    #[must_use]
    pub fn missing_columns(&self) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == SchemaIssueKind::Missing)
            .map(|issue| issue.column.clone())
            .collect()
    }

    /// Turn an incompatible report into a `SchemaMismatch` error
    pub fn into_result(self) -> Result<()> {
        if self.compatible {
            return Ok(());
        }

        let missing = self.missing_columns();
        let details = self
            .issues
            .into_iter()
            .filter_map(|issue| match issue.kind {
                SchemaIssueKind::Missing => None,
                SchemaIssueKind::WrongType { expected, actual } => Some(format!(
                    "column '{}' should be {expected} but is {actual}",
                    issue.column
                )),
            })
            .collect();

        Err(SurveyError::SchemaMismatch { missing, details })
    }
}

/// Whether an Arrow type holds text
#[must_use]
pub fn is_text_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

/// Whether an Arrow type holds numbers
#[must_use]
pub fn is_numeric_type(data_type: &DataType) -> bool {
    data_type.is_numeric() || matches!(data_type, DataType::Null)
}

/// Check a reference file schema against the survey columns
///
/// Categorical and encoded (one-hot) columns must be text; every other
/// survey column must be numeric. An all-null column (`Null` type) is accepted as numeric.
#[must_use]
pub fn check_reference_schema(schema: &Schema, encoded_columns: &[String]) -> SchemaCompatibilityReport {
    let mut report = SchemaCompatibilityReport {
        compatible: true,
        issues: Vec::new(),
    };

    let required = SURVEY_COLUMNS
        .iter()
        .map(|c| c.name)
        .chain(encoded_columns.iter().map(String::as_str))
        .collect::<Vec<_>>();

    for name in required.into_iter().unique() {
        let Ok(field) = schema.field_with_name(name) else {
            report.push(name, SchemaIssueKind::Missing);
            continue;
        };

        let data_type = field.data_type();
        let text = encoded_columns.iter().any(|c| c == name)
            || survey_column(name).is_some_and(|c| c.kind == ColumnKind::Categorical);
        if text && !is_text_type(data_type) {
            report.push(
                name,
                SchemaIssueKind::WrongType {
                    expected: "text".to_string(),
                    actual: data_type.to_string(),
                },
            );
        } else if !text && !is_numeric_type(data_type) {
            report.push(
                name,
                SchemaIssueKind::WrongType {
                    expected: "numeric".to_string(),
                    actual: data_type.to_string(),
                },
            );
        }
    }

    report
}

//! Feature alignment
//!
//! Turns one raw survey record into the exact feature vector the model was
//! trained on. Categorical values are one-hot encoded through a mapping
//! built once from the reference population, then the expanded record is
//! reindexed onto the model's column list.
//!
//! A categorical value the reference population never produced has no
//! dummy column, so that field contributes all zeros. The loss is logged
//! but not treated as an error.

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Result, SurveyError};
use crate::record::{RawRecord, RawValue};
use crate::reference::ReferenceTable;
use crate::schema::{EncodedSchema, dummy_column_name};
use crate::utils::log_warning;

/// How a reference column is carried into the feature vector
#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnRole {
    /// Numeric value passed through unchanged
    PassThrough,
    /// One-hot encoded into `{field}_{value}` columns
    OneHot,
    /// Text column the model cannot consume
    Unencoded,
}

/// A feature row aligned to a model's expected columns
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl AlignedVector {
    /// Build a vector from already encoded features
    ///
    /// Used for rows encoded outside the pipeline, such as training rows.
    #[must_use]
    pub fn from_parts(columns: Vec<String>, values: Vec<f64>) -> Self {
        Self { columns, values }
    }

    /// Column names, in model order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature values, parallel to `columns`
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of features
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named feature
    #[must_use]
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }
}

/// One-hot encoder fitted on the reference population
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    /// Reference columns in table order with their role
    columns: Vec<(String, ColumnRole)>,
    /// field -> observed value -> dummy column
    dummies: FxHashMap<String, FxHashMap<String, String>>,
}

impl FeatureEncoder {
    /// Build the encoder from the reference table
    ///
    /// Every distinct non-null value of each encoded column gets a dummy
    /// column; no level is dropped.
    pub fn new(reference: &ReferenceTable, encoded_columns: &[String]) -> Result<Self> {
        let mut columns = Vec::with_capacity(reference.column_names().len());
        let mut dummies = FxHashMap::default();

        for name in reference.column_names() {
            let Some(column) = reference.column(name) else {
                return Err(SurveyError::ColumnNotFound(name.clone()));
            };

            let role = if encoded_columns.contains(name) {
                let values: FxHashMap<String, String> = reference
                    .categories(name)?
                    .into_iter()
                    .map(|value| (value.to_string(), dummy_column_name(name, value)))
                    .collect();
                dummies.insert(name.clone(), values);
                ColumnRole::OneHot
            } else if column.is_numeric() {
                ColumnRole::PassThrough
            } else {
                ColumnRole::Unencoded
            };
            columns.push((name.clone(), role));
        }

        for encoded in encoded_columns {
            if !dummies.contains_key(encoded) {
                return Err(SurveyError::ColumnNotFound(encoded.clone()));
            }
        }

        log::debug!(
            "Feature encoder: {} raw columns, {} dummy columns",
            columns.len(),
            dummies.values().map(FxHashMap::len).sum::<usize>()
        );
        Ok(Self { columns, dummies })
    }

    /// Raw columns every record must carry, in reference order
    pub fn raw_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Dummy columns produced by the encoder, sorted by field order then value
    #[must_use]
    pub fn dummy_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, role)| *role == ColumnRole::OneHot)
            .flat_map(|(name, _)| {
                self.dummies[name]
                    .values()
                    .map(String::as_str)
                    .sorted_unstable()
            })
            .collect()
    }

    /// Dummy column for an encoded field value, if the reference has seen it
    #[must_use]
    pub fn dummy_for(&self, field: &str, value: &str) -> Option<&str> {
        self.dummies.get(field)?.get(value).map(String::as_str)
    }

    /// Whether `field` is one-hot encoded
    #[must_use]
    pub fn is_encoded(&self, field: &str) -> bool {
        self.dummies.contains_key(field)
    }

    /// Log where the model's columns and the encoder's output disagree
    ///
    /// Returns the number of disagreements. Neither case is fatal: unknown
    /// schema columns are filled with 0 and unknown dummies are dropped.
    pub fn audit_schema(&self, schema: &EncodedSchema) -> usize {
        let produced: FxHashSet<&str> = self
            .columns
            .iter()
            .filter(|(_, role)| *role == ColumnRole::PassThrough)
            .map(|(name, _)| name.as_str())
            .chain(self.dummy_columns())
            .collect();

        let never_set: Vec<&str> = schema
            .columns()
            .iter()
            .map(String::as_str)
            .filter(|c| !produced.contains(c))
            .collect();
        if !never_set.is_empty() {
            log_warning(
                &format!(
                    "{} model column(s) are never produced by the reference data and will always be 0: {}",
                    never_set.len(),
                    never_set.join(", ")
                ),
                None,
            );
        }

        let unused: Vec<&str> = self
            .dummy_columns()
            .into_iter()
            .filter(|c| !schema.contains(c))
            .collect();
        if !unused.is_empty() {
            log_warning(
                &format!(
                    "{} reference category column(s) are unknown to the model and will be dropped: {}",
                    unused.len(),
                    unused.join(", ")
                ),
                None,
            );
        }

        never_set.len() + unused.len()
    }

    /// Align one raw record onto `schema`
    ///
    /// # Errors
    /// * `SchemaMismatch` if reference columns are missing from `raw` or
    ///   carry the wrong kind of value
    /// * `AlignmentError` if a schema column cannot be represented or the
    ///   result does not match the schema
    pub fn align(&self, raw: &RawRecord, schema: &EncodedSchema) -> Result<AlignedVector> {
        let expanded = self.expand(raw)?;

        let mut columns = Vec::with_capacity(schema.len());
        let mut values = Vec::with_capacity(schema.len());
        for column in schema.columns() {
            let value = match expanded.get(column.as_str()) {
                Some(value) => *value,
                None if self.is_unencoded(column) => {
                    return Err(SurveyError::AlignmentError(format!(
                        "model column '{column}' is a text column that is not one-hot encoded"
                    )));
                }
                None => 0.0,
            };
            columns.push(column.clone());
            values.push(value);
        }

        if columns.len() != schema.len() || columns.as_slice() != schema.columns() {
            return Err(SurveyError::AlignmentError(format!(
                "aligned vector has {} columns, model expects {}",
                columns.len(),
                schema.len()
            )));
        }

        Ok(AlignedVector { columns, values })
    }

    fn is_unencoded(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|(name, role)| name == column && *role == ColumnRole::Unencoded)
    }

    /// Validate `raw` and expand it into named numeric features
    fn expand<'a>(&'a self, raw: &RawRecord) -> Result<FxHashMap<&'a str, f64>> {
        let mut missing = Vec::new();
        let mut details = Vec::new();
        let mut expanded = FxHashMap::default();

        for (name, role) in &self.columns {
            let Some(value) = raw.get(name) else {
                missing.push(name.clone());
                continue;
            };

            match (role, value) {
                (ColumnRole::PassThrough, RawValue::Number(number)) => {
                    expanded.insert(name.as_str(), *number);
                }
                (ColumnRole::OneHot, RawValue::Text(text)) => {
                    match self.dummy_for(name, text) {
                        Some(dummy) => {
                            expanded.insert(dummy, 1.0);
                        }
                        None => log_warning(
                            &format!(
                                "value '{text}' for '{name}' does not occur in the reference data; its indicator columns are all 0"
                            ),
                            None,
                        ),
                    }
                }
                (ColumnRole::Unencoded, RawValue::Text(_)) => {}
                (ColumnRole::PassThrough, RawValue::Text(text)) => {
                    details.push(format!("column '{name}' expects a number, got '{text}'"));
                }
                (ColumnRole::OneHot | ColumnRole::Unencoded, RawValue::Number(number)) => {
                    details.push(format!("column '{name}' expects text, got {number}"));
                }
            }
        }

        if !missing.is_empty() || !details.is_empty() {
            return Err(SurveyError::SchemaMismatch { missing, details });
        }

        let extra: Vec<&str> = raw
            .columns()
            .filter(|c| !self.columns.iter().any(|(name, _)| name == c))
            .collect();
        if !extra.is_empty() {
            log_warning(
                &format!("ignoring unknown column(s): {}", extra.join(", ")),
                None,
            );
        }

        Ok(expanded)
    }
}

/// Align a raw record in one call, building the encoder on the fly
///
/// Prefer keeping a [`FeatureEncoder`] around when aligning many records.
pub fn align(
    raw: &RawRecord,
    reference: &ReferenceTable,
    encoded_columns: &[String],
    schema: &EncodedSchema,
) -> Result<AlignedVector> {
    FeatureEncoder::new(reference, encoded_columns)?.align(raw, schema)
}

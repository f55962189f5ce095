//! The historical reference population.
//!
//! The raw training table is loaded once per process and kept column-wise.
//! It fixes the authoritative column order, the universe of categorical
//! values used for one-hot encoding and the population behind the
//! demographic percentages.

use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{Result, SurveyError};
use crate::reader::{ReadOptions, read_reference_file};
use crate::record::{RawRecord, RawValue};
use crate::schema::{check_reference_schema, is_numeric_type, survey_column};
use crate::utils::{extract_f64_column, extract_string_column, log_operation_complete};

/// Values of one reference column
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceColumn {
    /// Numeric values, `None` where missing
    Numeric(Vec<Option<f64>>),
    /// Text values, `None` where missing
    Categorical(Vec<Option<String>>),
}

impl ReferenceColumn {
    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    /// Whether the column has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column holds numbers
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    fn extend(&mut self, other: Self) -> Result<()> {
        match (self, other) {
            (Self::Numeric(values), Self::Numeric(more)) => values.extend(more),
            (Self::Categorical(values), Self::Categorical(more)) => values.extend(more),
            _ => {
                return Err(SurveyError::ReferenceData(
                    "column type changes between record batches".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Immutable reference table
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    names: Vec<String>,
    columns: Vec<ReferenceColumn>,
    index: FxHashMap<String, usize>,
    rows: usize,
}

impl ReferenceTable {
    /// Load and validate a reference file
    pub fn load(path: &Path, options: ReadOptions, encoded_columns: &[String]) -> Result<Self> {
        let start = Instant::now();
        let batches = read_reference_file(path, options)?;
        let table = Self::from_batches(&batches, encoded_columns)?;
        log_operation_complete("loaded", path, table.num_rows(), Some(start.elapsed()));
        Ok(table)
    }

    /// Build a table from record batches
    ///
    /// Every survey column must be present with a usable type; encoded and
    /// categorical columns are read as text, the rest as numbers. Columns
    /// beyond the survey set are kept in file order.
    pub fn from_batches(batches: &[RecordBatch], encoded_columns: &[String]) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(SurveyError::ReferenceData(
                "reference data contains no record batches".to_string(),
            ));
        };

        let schema = first.schema();
        check_reference_schema(&schema, encoded_columns).into_result()?;

        let text_columns: Vec<bool> = schema
            .fields()
            .iter()
            .map(|field| {
                let name = field.name().as_str();
                encoded_columns.iter().any(|c| c == name)
                    || survey_column(name).map_or(!is_numeric_type(field.data_type()), |c| {
                        !c.kind.is_numeric()
                    })
            })
            .collect();

        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        if let Some(duplicate) = names.iter().duplicates().next() {
            return Err(SurveyError::ReferenceData(format!(
                "column '{duplicate}' appears more than once"
            )));
        }

        let mut columns: Vec<Option<ReferenceColumn>> = vec![None; names.len()];
        for batch in batches {
            for (idx, name) in names.iter().enumerate() {
                let values = if text_columns[idx] {
                    ReferenceColumn::Categorical(extract_string_column(batch, name)?)
                } else {
                    ReferenceColumn::Numeric(extract_f64_column(batch, name)?)
                };
                match columns[idx].as_mut() {
                    Some(column) => column.extend(values)?,
                    None => columns[idx] = Some(values),
                }
            }
        }

        let columns: Vec<ReferenceColumn> = columns.into_iter().flatten().collect();
        let rows = columns.first().map_or(0, ReferenceColumn::len);
        if rows == 0 {
            return Err(SurveyError::ReferenceData(
                "reference data contains no rows".to_string(),
            ));
        }

        let index = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Ok(Self {
            names,
            columns,
            index,
            rows,
        })
    }

    /// Column names in file order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Values of a column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ReferenceColumn> {
        self.index.get(name).map(|&idx| &self.columns[idx])
    }

    /// Number of historical rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Distinct non-null values of a text column, sorted
    pub fn categories(&self, name: &str) -> Result<Vec<&str>> {
        match self.column(name) {
            Some(ReferenceColumn::Categorical(values)) => Ok(values
                .iter()
                .flatten()
                .map(String::as_str)
                .unique()
                .sorted_unstable()
                .collect()),
            Some(ReferenceColumn::Numeric(_)) => Err(SurveyError::ColumnType {
                column: name.to_string(),
                expected: "categorical".to_string(),
            }),
            None => Err(SurveyError::ColumnNotFound(name.to_string())),
        }
    }

    /// One historical row as a raw record; missing values are left out
    #[must_use]
    pub fn row(&self, row: usize) -> Option<RawRecord> {
        if row >= self.rows {
            return None;
        }

        let record = self
            .names
            .iter()
            .zip(&self.columns)
            .filter_map(|(name, column)| {
                let value = match column {
                    ReferenceColumn::Numeric(values) => values[row].map(RawValue::Number),
                    ReferenceColumn::Categorical(values) => {
                        values[row].clone().map(RawValue::Text)
                    }
                }?;
                Some((name.clone(), value))
            })
            .collect();
        Some(record)
    }
}

//! Arrow utility functions for column extraction
//!
//! Columns are normalised with Arrow's cast kernel before extraction, so
//! integer CSV columns and float Parquet columns read the same way.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::kernels::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{Result, SurveyError};

/// Get a column from a record batch cast to `expected_type`
///
/// # Errors
/// Returns `ColumnNotFound` if the column is absent, or an Arrow error if
/// the cast is not supported.
pub fn get_column(batch: &RecordBatch, column_name: &str, expected_type: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| SurveyError::ColumnNotFound(column_name.to_string()))?;

    let column = batch.column(idx);
    if column.data_type() == expected_type {
        return Ok(column.clone());
    }

    log::debug!(
        "Converting column '{column_name}' from {:?} to {expected_type:?}",
        column.data_type()
    );
    Ok(cast::cast(column, expected_type)?)
}

/// Downcast a column to a specific array type with a clear error message
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| SurveyError::ColumnType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Extract a column as nullable `f64` values
///
/// NaN values are treated as missing, matching how pandas stores gaps in
/// float columns.
pub fn extract_f64_column(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<f64>>> {
    let array = get_column(batch, column_name, &DataType::Float64)?;
    let values = downcast_array::<Float64Array>(&array, column_name, "numeric")?;

    Ok(values
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Extract a column as nullable strings
pub fn extract_string_column(batch: &RecordBatch, column_name: &str) -> Result<Vec<Option<String>>> {
    let array = get_column(batch, column_name, &DataType::Utf8)?;
    let values = downcast_array::<StringArray>(&array, column_name, "text")?;

    Ok(values.iter().map(|v| v.map(str::to_string)).collect())
}

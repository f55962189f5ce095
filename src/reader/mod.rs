//! Reading reference data files into Arrow record batches.
//!
//! Supports the CSV the training table is exported to and Parquet.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::PredictorConfig;
use crate::error::util::safe_open_file;
use crate::error::{Result, SurveyError};
use crate::utils::{log_operation_complete, log_operation_start};

/// Supported reference file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFormat {
    /// Comma separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl ReferenceFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "pq") => Ok(Self::Parquet),
            _ => Err(SurveyError::ReferenceData(format!(
                "unsupported reference file {}; expected .csv or .parquet",
                path.display()
            ))),
        }
    }
}

/// Options for reading reference files
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Rows used to infer CSV column types (`None` reads the whole file)
    pub csv_infer_rows: Option<usize>,
    /// Rows per record batch
    pub batch_size: usize,
}

impl From<&PredictorConfig> for ReadOptions {
    fn from(config: &PredictorConfig) -> Self {
        Self {
            csv_infer_rows: config.csv_infer_rows,
            batch_size: config.batch_size,
        }
    }
}

/// Read a reference file, choosing the reader from its extension
pub fn read_reference_file(path: &Path, options: ReadOptions) -> Result<Vec<RecordBatch>> {
    log_operation_start("Reading reference data from", path);
    let start = Instant::now();

    let batches = match ReferenceFormat::from_path(path)? {
        ReferenceFormat::Csv => read_csv(path, options)?,
        ReferenceFormat::Parquet => read_parquet(path, options)?,
    };

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok(batches)
}

/// Read a CSV file with a header row, inferring the column types
pub fn read_csv(path: &Path, options: ReadOptions) -> Result<Vec<RecordBatch>> {
    let mut file = safe_open_file(path, "reading reference CSV")?;

    let format = Format::default().with_header(true);
    let (schema, inferred_rows) = format.infer_schema(&mut file, options.csv_infer_rows)?;
    log::debug!(
        "Inferred {} columns from {inferred_rows} rows of {}",
        schema.fields().len(),
        path.display()
    );

    file.rewind().map_err(|e| SurveyError::Io {
        path: path.to_path_buf(),
        purpose: "rewinding reference CSV".to_string(),
        source: e,
    })?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(options.batch_size)
        .build(file)?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

/// Read a Parquet file into record batches
pub fn read_parquet(path: &Path, options: ReadOptions) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading reference parquet file")?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(options.batch_size)
        .build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

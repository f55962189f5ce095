//! Configuration for the survey predictor.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::algorithm::demographics::AgeBins;
use crate::error::{Result, SurveyError};
use crate::schema::DEFAULT_ENCODED_COLUMNS;

/// Default batch size for reading reference data
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Default number of CSV rows used to infer column types
pub const DEFAULT_CSV_INFER_ROWS: usize = 1000;

/// Configuration for loading artifacts and processing submissions
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Path to the trained model artifact (JSON)
    pub model_path: PathBuf,
    /// Path to the raw reference table (CSV or Parquet)
    pub reference_path: PathBuf,
    /// Nominal columns one-hot encoded at training time
    pub encoded_columns: Vec<String>,
    /// Age groups for the demographic comparison
    pub age_bins: AgeBins,
    /// Rows read to infer CSV column types (`None` reads the whole file)
    pub csv_infer_rows: Option<usize>,
    /// Batch size for reading reference data
    pub batch_size: usize,
    /// Show a spinner while loading artifacts
    pub show_progress: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("decision_tree_airline.json"),
            reference_path: PathBuf::from("airline_train_raw.csv"),
            encoded_columns: DEFAULT_ENCODED_COLUMNS
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            age_bins: AgeBins::default(),
            csv_infer_rows: Some(DEFAULT_CSV_INFER_ROWS),
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: true,
        }
    }
}

impl PredictorConfig {
    /// Defaults overridden by `SURVEY_*` environment variables
    ///
    /// * `SURVEY_MODEL_PATH`, `SURVEY_REFERENCE_PATH` - artifact locations
    /// * `SURVEY_CSV_INFER_ROWS` - row count, or `all`
    /// * `SURVEY_BATCH_SIZE` - reader batch size
    /// * `SURVEY_PROGRESS` - `0`/`false` disables the spinner
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SURVEY_MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SURVEY_REFERENCE_PATH") {
            config.reference_path = PathBuf::from(path);
        }
        if let Some(rows) = lookup("SURVEY_CSV_INFER_ROWS") {
            config.csv_infer_rows = if rows.eq_ignore_ascii_case("all") {
                None
            } else {
                Some(parse_var("SURVEY_CSV_INFER_ROWS", &rows)?)
            };
        }
        if let Some(size) = lookup("SURVEY_BATCH_SIZE") {
            config.batch_size = parse_var("SURVEY_BATCH_SIZE", &size)?;
        }
        if let Some(flag) = lookup("SURVEY_PROGRESS") {
            config.show_progress = !matches!(flag.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SurveyError::Config("batch size must be positive".to_string()));
        }
        if self.csv_infer_rows == Some(0) {
            return Err(SurveyError::Config(
                "CSV type inference needs at least one row".to_string(),
            ));
        }
        if self.encoded_columns.is_empty() {
            return Err(SurveyError::Config(
                "at least one encoded column is required".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SurveyError::Config(format!("invalid value for {name}: '{value}'")))
}

impl fmt::Display for PredictorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predictor Configuration:")?;
        writeln!(f, "  Model: {}", self.model_path.display())?;
        writeln!(f, "  Reference Data: {}", self.reference_path.display())?;
        writeln!(f, "  Encoded Columns: {}", self.encoded_columns.join(", "))?;
        writeln!(f, "  Age Groups: {}", self.age_bins)?;
        match self.csv_infer_rows {
            Some(rows) => writeln!(f, "  CSV Inference Rows: {rows}")?,
            None => writeln!(f, "  CSV Inference Rows: all")?,
        }
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        Ok(())
    }
}

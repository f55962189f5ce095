//! Raw (pre-encoding) survey records.
//!
//! A `RawRecord` is the unit handed to the alignment pipeline: one value per
//! raw column, named exactly as in the reference table.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw answer value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Numeric answer (age, distance, ratings, delays)
    Number(f64),
    /// Categorical answer
    Text(String),
}

impl RawValue {
    /// Numeric value, if this is a number
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this is categorical
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

macro_rules! raw_number_from {
    ($($ty:ty),*) => {
        $(
            impl From<&$ty> for RawValue {
                fn from(value: &$ty) -> Self {
                    Self::Number(f64::from(*value))
                }
            }
        )*
    };
}

raw_number_from!(u8, u16, u32, i32, f64);

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One row of raw survey answers keyed by column name
///
/// Input order does not matter; the alignment step imposes the reference
/// table's column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, returning the previous one
    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) -> Option<RawValue> {
        self.values.insert(column.into(), value)
    }

    /// Remove a column
    pub fn remove(&mut self, column: &str) -> Option<RawValue> {
        self.values.remove(column)
    }

    /// Look up a column value
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.values.get(column)
    }

    /// Whether the record has a value for `column`
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Column names present in the record (sorted)
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Typed forms that can be flattened into a `RawRecord`
///
/// Implemented through `#[derive(SurveyRecord)]`.
pub trait SurveyFields {
    /// Raw column names in declaration order
    const COLUMNS: &'static [&'static str];

    /// Flatten the form into raw column values
    fn to_raw_record(&self) -> RawRecord;
}

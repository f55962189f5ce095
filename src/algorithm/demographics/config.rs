//! Age group binning used for demographic comparisons

use std::fmt;

use crate::error::{Result, SurveyError};

/// Default age group boundaries
pub const DEFAULT_AGE_EDGES: [f64; 8] = [0.0, 18.0, 30.0, 40.0, 50.0, 60.0, 70.0, 120.0];

/// Default age group labels, one per interval
pub const DEFAULT_AGE_LABELS: [&str; 7] = ["<18", "18–30", "31–40", "41–50", "51–60", "61–70", "70+"];

/// Left-open, right-closed age intervals with one label each
///
/// The same bins are applied to the user's age and to the reference
/// population, so the resulting percentage is self-consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBins {
    edges: Vec<f64>,
    labels: Vec<String>,
}

impl Default for AgeBins {
    fn default() -> Self {
        Self {
            edges: DEFAULT_AGE_EDGES.to_vec(),
            labels: DEFAULT_AGE_LABELS.iter().map(|l| (*l).to_string()).collect(),
        }
    }
}

impl AgeBins {
    /// Create bins from boundaries and labels
    ///
    /// Boundaries must be finite and strictly increasing, with exactly one
    /// label per interval.
    pub fn new(edges: Vec<f64>, labels: Vec<String>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(SurveyError::Config(
                "age bins need at least two boundaries".to_string(),
            ));
        }
        if labels.len() != edges.len() - 1 {
            return Err(SurveyError::Config(format!(
                "{} age boundaries define {} groups but {} labels were given",
                edges.len(),
                edges.len() - 1,
                labels.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(SurveyError::Config(
                "age boundaries must be finite".to_string(),
            ));
        }
        if let Some(pair) = edges.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SurveyError::Config(format!(
                "age boundaries must be strictly increasing ({} >= {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self { edges, labels })
    }

    /// Interval boundaries
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Group labels
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the interval `(edges[i], edges[i + 1]]` containing `age`
    #[must_use]
    pub fn bin_index(&self, age: f64) -> Option<usize> {
        if age.is_nan() {
            return None;
        }
        self.edges
            .windows(2)
            .position(|w| age > w[0] && age <= w[1])
    }

    /// Label of the group containing `age`
    #[must_use]
    pub fn label_for(&self, age: f64) -> Option<&str> {
        self.bin_index(age).map(|idx| self.labels[idx].as_str())
    }
}

impl fmt::Display for AgeBins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self
            .edges
            .windows(2)
            .zip(&self.labels)
            .map(|(w, label)| format!("{label} ({}, {}]", w[0], w[1]))
            .collect::<Vec<_>>();
        write!(f, "{}", groups.join(", "))
    }
}

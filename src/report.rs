//! What a passenger sees after submitting the survey.

use std::fmt;

use serde::Serialize;

use crate::algorithm::demographics::DemographicSummary;
use crate::algorithm::prediction::PredictionResult;

/// Prediction and demographic comparison for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReport {
    pub prediction: PredictionResult,
    pub demographics: DemographicSummary,
}

impl SubmissionReport {
    /// Machine-readable form of the report
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction Result")?;
        writeln!(
            f,
            "Your predicted satisfaction level is {}.",
            self.prediction.label
        )?;
        if let Some(confidence) = self.prediction.confidence_display() {
            writeln!(f, "With a confidence of {confidence}.")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.demographics)
    }
}

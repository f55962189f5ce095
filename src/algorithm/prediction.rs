//! Single-row prediction with optional confidence

use std::fmt;

use serde::Serialize;

use crate::algorithm::alignment::AlignedVector;
use crate::error::{Result, SurveyError};
use crate::model::Classifier;

/// Predicted label and, for probabilistic models, its confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// The predicted satisfaction label
    pub label: String,
    /// Highest class probability in percent, `None` if the model has no
    /// probability estimates
    pub confidence: Option<f64>,
}

impl PredictionResult {
    /// Confidence formatted with two decimals, e.g. `87.50%`
    #[must_use]
    pub fn confidence_display(&self) -> Option<String> {
        self.confidence.map(|c| format!("{c:.2}%"))
    }

    /// Whether the label is one of the dissatisfied classes
    #[must_use]
    pub fn is_dissatisfied(&self) -> bool {
        let label = self.label.to_lowercase();
        label.starts_with("diss") || label.contains("dissatisfied")
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if let Some(confidence) = self.confidence_display() {
            write!(f, " ({confidence})")?;
        }
        Ok(())
    }
}

/// Run the model on one aligned vector
///
/// The vector's columns must equal the model's feature names, in order.
pub fn predict(vector: &AlignedVector, model: &dyn Classifier) -> Result<PredictionResult> {
    if vector.columns() != model.feature_names() {
        let first_difference = vector
            .columns()
            .iter()
            .zip(model.feature_names())
            .position(|(a, b)| a != b);
        return Err(SurveyError::PredictionError(match first_difference {
            Some(idx) => format!(
                "feature {idx} is '{}' but the model expects '{}'",
                vector.columns()[idx],
                model.feature_names()[idx]
            ),
            None => format!(
                "got {} features, model expects {}",
                vector.len(),
                model.feature_names().len()
            ),
        }));
    }

    let label = model.predict(vector.values())?;
    let confidence = match model.predict_proba(vector.values())? {
        Some(proba) => {
            let best = proba.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if !best.is_finite() {
                return Err(SurveyError::PredictionError(
                    "model returned no usable probabilities".to_string(),
                ));
            }
            Some(best * 100.0)
        }
        None => None,
    };

    log::debug!("Predicted '{label}' with confidence {confidence:?}");
    Ok(PredictionResult { label, confidence })
}

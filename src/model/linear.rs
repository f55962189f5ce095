//! Linear classifiers: logistic regression and linear SVC.

use serde::Deserialize;

use crate::error::{Result, SurveyError};
use crate::model::{Classifier, check_classes, check_input};
use crate::schema::EncodedSchema;

/// Linear model artifact as exported
///
/// Binary models carry a single coefficient row whose positive side is the
/// second class. Multiclass models carry one row per class.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearArtifact {
    pub feature_names_in: Vec<String>,
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// How decision scores map to probabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearLink {
    /// Sigmoid for binary, softmax for multiclass
    Logistic,
    /// Margins only; no probabilities
    Margin,
}

#[derive(Debug, Clone)]
pub struct LinearClassifier {
    schema: EncodedSchema,
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    link: LinearLink,
}

impl LinearClassifier {
    pub fn new(artifact: LinearArtifact, link: LinearLink) -> Result<Self> {
        let schema = EncodedSchema::new(artifact.feature_names_in)?;
        check_classes(&artifact.classes)?;

        let expected_rows = if artifact.classes.len() == 2 {
            1
        } else {
            artifact.classes.len()
        };
        if artifact.coef.len() != expected_rows || artifact.intercept.len() != expected_rows {
            return Err(SurveyError::ModelArtifact(format!(
                "expected {expected_rows} coefficient rows and intercepts for {} classes, found {} and {}",
                artifact.classes.len(),
                artifact.coef.len(),
                artifact.intercept.len()
            )));
        }
        if let Some(row) = artifact.coef.iter().position(|r| r.len() != schema.len()) {
            return Err(SurveyError::ModelArtifact(format!(
                "coefficient row {row} has {} weights for {} features",
                artifact.coef[row].len(),
                schema.len()
            )));
        }
        let all_finite = artifact
            .coef
            .iter()
            .flatten()
            .chain(&artifact.intercept)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(SurveyError::ModelArtifact(
                "coefficients must be finite".to_string(),
            ));
        }

        Ok(Self {
            schema,
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
            link,
        })
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>> {
        check_input(&self.schema, features)?;
        Ok(self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                weights
                    .iter()
                    .zip(features)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias
            })
            .collect())
    }

    #[must_use]
    pub fn link(&self) -> LinearLink {
        self.link
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exp.iter().sum();
    exp.into_iter().map(|e| e / total).collect()
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        match self.link {
            LinearLink::Logistic => "logistic_regression",
            LinearLink::Margin => "linear_svc",
        }
    }

    fn schema(&self) -> &EncodedSchema {
        &self.schema
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<String> {
        let scores = self.decision_function(features)?;
        let best = if let [score] = scores.as_slice() {
            usize::from(*score > 0.0)
        } else {
            let mut best = 0;
            for (idx, score) in scores.iter().enumerate() {
                if *score > scores[best] {
                    best = idx;
                }
            }
            best
        };
        Ok(self.classes[best].clone())
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Option<Vec<f64>>> {
        if self.link == LinearLink::Margin {
            return Ok(None);
        }
        let scores = self.decision_function(features)?;
        let proba = if let [score] = scores.as_slice() {
            let positive = sigmoid(*score);
            vec![1.0 - positive, positive]
        } else {
            softmax(&scores)
        };
        Ok(Some(proba))
    }
}

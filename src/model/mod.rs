//! Trained classifier artifacts.
//!
//! A model is read once from a JSON artifact exported at training time. The
//! artifact carries the ordered feature names the model was fit on, the
//! class labels, and the fitted parameters.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

pub mod linear;
pub mod tree;

pub use linear::{LinearArtifact, LinearClassifier, LinearLink};
pub use tree::{DecisionTree, TreeArtifact, TreeNode};

use crate::error::util::safe_read_to_string;
use crate::error::{Result, SurveyError};
use crate::schema::EncodedSchema;
use crate::utils::{log_operation_complete, log_operation_start};

/// A fitted classifier taking one encoded row at a time
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Short name of the model family, for logs
    fn kind(&self) -> &'static str;

    /// The post-encoding columns the model expects, in order
    fn schema(&self) -> &EncodedSchema;

    /// Class labels in model order
    fn classes(&self) -> &[String];

    /// Predict the label of one row
    fn predict(&self, features: &[f64]) -> Result<String>;

    /// Per-class probabilities of one row, in `classes()` order
    ///
    /// Returns `Ok(None)` when the model has no probability estimates.
    fn predict_proba(&self, features: &[f64]) -> Result<Option<Vec<f64>>>;

    /// Ordered feature names, as exported at training time
    fn feature_names(&self) -> &[String] {
        self.schema().columns()
    }
}

/// Check a feature row against the model's input width
pub(crate) fn check_input(schema: &EncodedSchema, features: &[f64]) -> Result<()> {
    if features.len() != schema.len() {
        return Err(SurveyError::PredictionError(format!(
            "feature length mismatch: got {}, expected {}",
            features.len(),
            schema.len()
        )));
    }
    if let Some(idx) = features.iter().position(|v| !v.is_finite()) {
        return Err(SurveyError::PredictionError(format!(
            "feature '{}' is not a finite number",
            schema.columns()[idx]
        )));
    }
    Ok(())
}

/// Check the class list shared by all artifact kinds
pub(crate) fn check_classes(classes: &[String]) -> Result<()> {
    if classes.len() < 2 {
        return Err(SurveyError::ModelArtifact(format!(
            "a classifier needs at least two classes, found {}",
            classes.len()
        )));
    }
    let mut sorted: Vec<&String> = classes.iter().collect();
    sorted.sort();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(SurveyError::ModelArtifact(
            "class labels must be unique".to_string(),
        ));
    }
    Ok(())
}

/// On-disk model artifact, tagged by model family
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// CART decision tree with per-leaf class counts
    DecisionTree(TreeArtifact),
    /// Logistic regression (probabilistic)
    LogisticRegression(LinearArtifact),
    /// Linear support vector classifier (labels only)
    LinearSvc(LinearArtifact),
}

impl ModelArtifact {
    /// Parse an artifact from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the artifact and build the classifier
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>> {
        let model: Box<dyn Classifier> = match self {
            Self::DecisionTree(artifact) => Box::new(DecisionTree::try_from(artifact)?),
            Self::LogisticRegression(artifact) => {
                Box::new(LinearClassifier::new(artifact, LinearLink::Logistic)?)
            }
            Self::LinearSvc(artifact) => {
                Box::new(LinearClassifier::new(artifact, LinearLink::Margin)?)
            }
        };
        Ok(model)
    }
}

/// Load a model artifact from a JSON file
pub fn load_model(path: &Path) -> Result<Box<dyn Classifier>> {
    log_operation_start("Loading model artifact from", path);
    let start = Instant::now();

    let text = safe_read_to_string(path, "loading model artifact")?;
    let model = ModelArtifact::from_json(&text)?.into_classifier()?;

    log_operation_complete("loaded", path, model.feature_names().len(), Some(start.elapsed()));
    log::info!(
        "Model is a {} over {} features predicting {:?}",
        model.kind(),
        model.feature_names().len(),
        model.classes()
    );
    Ok(model)
}

//! Decision tree classifier in scikit-learn's flat node layout.

use serde::Deserialize;

use crate::error::{Result, SurveyError};
use crate::model::{Classifier, check_classes, check_input};
use crate::schema::EncodedSchema;

/// Marker used for leaf children
pub const TREE_LEAF: i64 = -1;

/// One node of the exported tree
#[derive(Debug, Clone, Deserialize)]
pub struct TreeNode {
    /// Feature index tested at this node (ignored for leaves)
    #[serde(default)]
    pub feature: i64,
    /// Split threshold; `x[feature] <= threshold` goes left
    #[serde(default)]
    pub threshold: f64,
    /// Left child index, `-1` for leaves
    pub left: i64,
    /// Right child index, `-1` for leaves
    pub right: i64,
    /// Per-class training counts (or fractions) reaching this node
    pub value: Vec<f64>,
}

impl TreeNode {
    fn is_leaf(&self) -> bool {
        self.left == TREE_LEAF && self.right == TREE_LEAF
    }
}

/// Decision tree artifact as exported
#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    /// Ordered training feature names
    pub feature_names_in: Vec<String>,
    /// Class labels
    pub classes: Vec<String>,
    /// Nodes, root first
    pub nodes: Vec<TreeNode>,
}

/// A validated decision tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    schema: EncodedSchema,
    classes: Vec<String>,
    nodes: Vec<TreeNode>,
}

impl TryFrom<TreeArtifact> for DecisionTree {
    type Error = SurveyError;

    fn try_from(artifact: TreeArtifact) -> Result<Self> {
        let schema = EncodedSchema::new(artifact.feature_names_in)?;
        check_classes(&artifact.classes)?;

        if artifact.nodes.is_empty() {
            return Err(SurveyError::ModelArtifact("tree has no nodes".to_string()));
        }

        let n_nodes = artifact.nodes.len() as i64;
        for (idx, node) in artifact.nodes.iter().enumerate() {
            if node.value.len() != artifact.classes.len() {
                return Err(SurveyError::ModelArtifact(format!(
                    "node {idx} has {} class values for {} classes",
                    node.value.len(),
                    artifact.classes.len()
                )));
            }
            if node.value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(SurveyError::ModelArtifact(format!(
                    "node {idx} has negative or non-finite class values"
                )));
            }
            if node.is_leaf() {
                if node.value.iter().sum::<f64>() <= 0.0 {
                    return Err(SurveyError::ModelArtifact(format!(
                        "leaf {idx} has no class weight"
                    )));
                }
                continue;
            }

            // Children come after their parent, so traversal always ends.
            let idx = idx as i64;
            if !(idx < node.left && node.left < n_nodes && idx < node.right && node.right < n_nodes) {
                return Err(SurveyError::ModelArtifact(format!(
                    "node {idx} has invalid children ({}, {})",
                    node.left, node.right
                )));
            }
            if node.feature < 0 || node.feature as usize >= schema.len() {
                return Err(SurveyError::ModelArtifact(format!(
                    "node {idx} tests feature {} but the model has {} features",
                    node.feature,
                    schema.len()
                )));
            }
            if !node.threshold.is_finite() {
                return Err(SurveyError::ModelArtifact(format!(
                    "node {idx} has a non-finite threshold"
                )));
            }
        }

        Ok(Self {
            schema,
            classes: artifact.classes,
            nodes: artifact.nodes,
        })
    }
}

impl DecisionTree {
    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest leaf (root alone is depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = vec![0usize; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            if !node.is_leaf() {
                depth[node.left as usize] = depth[idx] + 1;
                depth[node.right as usize] = depth[idx] + 1;
            }
        }
        depth.into_iter().max().unwrap_or(0)
    }

    fn leaf(&self, features: &[f64]) -> &TreeNode {
        let mut node = &self.nodes[0];
        while !node.is_leaf() {
            // scikit-learn evaluates splits on float32 inputs
            let value = f64::from(features[node.feature as usize] as f32);
            let next = if value <= node.threshold {
                node.left
            } else {
                node.right
            };
            node = &self.nodes[next as usize];
        }
        node
    }
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
    }

    fn schema(&self) -> &EncodedSchema {
        &self.schema
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<String> {
        check_input(&self.schema, features)?;
        let leaf = self.leaf(features);

        // First maximum wins, as with numpy's argmax
        let mut best = 0;
        for (idx, value) in leaf.value.iter().enumerate() {
            if *value > leaf.value[best] {
                best = idx;
            }
        }
        Ok(self.classes[best].clone())
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Option<Vec<f64>>> {
        check_input(&self.schema, features)?;
        let leaf = self.leaf(features);
        let total: f64 = leaf.value.iter().sum();
        Ok(Some(leaf.value.iter().map(|v| v / total).collect()))
    }
}

//! Decision-tree ensemble

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ModelLoadError, QualityModel};

/// How leaf values of the individual trees are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Majority class; ties go to the lowest class
    #[default]
    Vote,
    /// Average of leaf values
    Mean,
}

/// Tree node. Splits send `x[feature] <= threshold` to `left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single tree, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Check structure: non-empty, children in bounds and after their parent
    fn validate(&self, tree_idx: usize, n_features: usize) -> Result<(), ModelLoadError> {
        let invalid = |msg: String| ModelLoadError::InvalidArtifact(format!("tree {}: {}", tree_idx, msg));

        if self.nodes.is_empty() {
            return Err(invalid("no nodes".into()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split { feature, threshold, left, right } => {
                    if feature >= n_features {
                        return Err(invalid(format!(
                            "node {} splits on feature {} (model has {})",
                            idx, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {} has a non-finite threshold", idx)));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(format!(
                                "node {} points to invalid child {}",
                                idx, child
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!("leaf {} is not finite", idx)));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf
    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { value } => return value,
                Node::Split { feature, threshold, left, right } => {
                    idx = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Ensemble of decision trees
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    n_features: usize,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new(
        n_features: usize,
        aggregation: Aggregation,
        trees: Vec<Tree>,
    ) -> Result<Self, ModelLoadError> {
        if trees.is_empty() {
            return Err(ModelLoadError::InvalidArtifact("forest has no trees".into()));
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.validate(idx, n_features)?;
        }
        Ok(Self {
            n_features,
            aggregation,
            trees,
        })
    }

    fn vote(&self, features: &[f64]) -> f64 {
        // Leaf values are class labels; BTreeMap keeps classes ordered for ties.
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.evaluate(features).round() as i64).or_default() += 1;
        }

        let mut best = (0_i64, 0_usize);
        for (class, count) in votes {
            if count > best.1 {
                best = (class, count);
            }
        }
        best.0 as f64
    }

    fn mean(&self, features: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        sum / self.trees.len() as f64
    }
}

impl QualityModel for Forest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, String> {
        if features.len() != self.n_features {
            return Err(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            ));
        }
        Ok(match self.aggregation {
            Aggregation::Vote => self.vote(features),
            Aggregation::Mean => self.mean(features),
        })
    }

    fn kind(&self) -> &str {
        "forest"
    }

    fn tree_count(&self) -> Option<usize> {
        Some(self.trees.len())
    }
}

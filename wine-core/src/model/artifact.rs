//! Persisted model artifact (JSON)
//!
//! ```json
//! {
//!   "format": "wine-quality-model",
//!   "version": 1,
//!   "feature_names": ["wine_type", "fixed_acidity", "..."],
//!   "model": { "kind": "forest", "aggregation": "vote", "trees": [{ "nodes": [] }] }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::forest::{Aggregation, Forest, Tree};
use super::linear::LinearModel;
use super::{ModelLoadError, QualityModel};
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};

/// Value of the `format` tag
pub const ARTIFACT_FORMAT: &str = "wine-quality-model";

/// Highest artifact version this crate reads
pub const ARTIFACT_VERSION: u32 = 1;

fn default_n_features() -> usize {
    FEATURE_COUNT
}

/// On-disk model description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: String,
    pub version: u32,
    /// Training-time feature order; must match the builder's order when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Input width the model was trained on (ignored when `feature_names` is set)
    #[serde(default = "default_n_features")]
    pub n_features: usize,
    pub model: ModelSpec,
}

/// Model body, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {
    Forest {
        #[serde(default)]
        aggregation: Aggregation,
        trees: Vec<Tree>,
    },
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelLoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn read(path: &Path) -> Result<Self, ModelLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Effective input width
    pub fn input_width(&self) -> usize {
        self.feature_names
            .as_ref()
            .map_or(self.n_features, |names| names.len())
    }

    /// Check header fields and build the in-memory model
    pub fn into_model(self) -> Result<Box<dyn QualityModel>, ModelLoadError> {
        if self.format != ARTIFACT_FORMAT {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "unexpected format '{}' (expected '{}')",
                self.format, ARTIFACT_FORMAT
            )));
        }
        if self.version == 0 || self.version > ARTIFACT_VERSION {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "unsupported version {} (supported: 1..={})",
                self.version, ARTIFACT_VERSION
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ModelLoadError::InvalidArtifact(format!(
                    "feature order {:?} does not match expected {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }

        let n_features = self.input_width();
        let model: Box<dyn QualityModel> = match self.model {
            ModelSpec::Forest { aggregation, trees } => {
                Box::new(Forest::new(n_features, aggregation, trees)?)
            }
            ModelSpec::Linear {
                intercept,
                coefficients,
            } => Box::new(LinearModel::new(n_features, intercept, coefficients)?),
        };
        Ok(model)
    }
}

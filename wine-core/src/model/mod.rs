//! # Model Adapter
//!
//! Owns the trained model loaded at startup and exposes one operation,
//! [`ModelAdapter::predict`]. The adapter hands the feature vector to the
//! model unchanged and rounds the scalar output to the nearest quality
//! integer; it does not interpret the score.
//!
//! A failed load does not abort construction: [`ModelAdapter::load`] returns an
//! adapter in the unavailable state, and every `predict` call then reports
//! [`WineError::ModelUnavailable`].

mod artifact;
mod forest;
mod linear;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::error::{Result, WineError};
use crate::features::FeatureVector;

pub use artifact::{ARTIFACT_FORMAT, ARTIFACT_VERSION, ModelArtifact, ModelSpec};
pub use forest::{Aggregation, Forest, Node, Tree};
pub use linear::LinearModel;

/// Trained model seam
pub trait QualityModel: Send + Sync {
    /// Input width the model was trained on
    fn n_features(&self) -> usize;
    /// Single-sample inference; `Err` when the model rejects the input
    fn predict(&self, features: &[f64]) -> std::result::Result<f64, String>;
    /// Short model family name
    fn kind(&self) -> &str;

    fn tree_count(&self) -> Option<usize> {
        None
    }
}

/// Failure to read or accept a model artifact
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),
}

/// Summary of the loaded model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub n_features: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

enum ModelState {
    Loaded(Box<dyn QualityModel>),
    Unavailable(String),
}

/// Single-inference boundary around the trained model
pub struct ModelAdapter {
    state: ModelState,
    source: Option<PathBuf>,
}

impl ModelAdapter {
    /// Load an artifact; a failure leaves the adapter unavailable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(adapter) => adapter,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "model artifact failed to load");
                Self {
                    state: ModelState::Unavailable(err.to_string()),
                    source: Some(path.to_path_buf()),
                }
            }
        }
    }

    /// Load an artifact, surfacing the load error
    pub fn try_load(path: impl AsRef<Path>) -> std::result::Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let model = ModelArtifact::read(path)?.into_model()?;
        tracing::info!(
            path = %path.display(),
            kind = model.kind(),
            n_features = model.n_features(),
            "model artifact loaded"
        );
        Ok(Self {
            state: ModelState::Loaded(model),
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap an in-memory model
    pub fn from_model<M: QualityModel + 'static>(model: M) -> Self {
        Self {
            state: ModelState::Loaded(Box::new(model)),
            source: None,
        }
    }

    /// Adapter with no model behind it
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
            source: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    /// Why the model is not available, if it is not
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ModelState::Loaded(_) => None,
            ModelState::Unavailable(reason) => Some(reason),
        }
    }

    pub fn describe(&self) -> Option<ModelInfo> {
        match &self.state {
            ModelState::Loaded(model) => Some(ModelInfo {
                kind: model.kind().to_string(),
                n_features: model.n_features(),
                tree_count: model.tree_count(),
                source: self.source.as_ref().map(|p| p.display().to_string()),
            }),
            ModelState::Unavailable(_) => None,
        }
    }

    /// Run the model on one vector and round to the nearest quality integer
    pub fn predict(&self, vector: &FeatureVector) -> Result<i64> {
        let model = match &self.state {
            ModelState::Loaded(model) => model,
            ModelState::Unavailable(reason) => {
                return Err(WineError::ModelUnavailable(reason.clone()));
            }
        };

        if vector.len() != model.n_features() {
            return Err(WineError::Inference(format!(
                "model expects {} features, got {}",
                model.n_features(),
                vector.len()
            )));
        }

        let raw = model
            .predict(vector.as_slice())
            .map_err(WineError::Inference)?;

        if !raw.is_finite() {
            return Err(WineError::Inference(format!("model returned {}", raw)));
        }
        let rounded = raw.round();
        if rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
            return Err(WineError::Inference(format!(
                "model output {} is not a representable score",
                raw
            )));
        }
        Ok(rounded as i64)
    }
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ModelAdapter");
        match &self.state {
            ModelState::Loaded(model) => s.field("model", &model.kind()),
            ModelState::Unavailable(reason) => s.field("unavailable", reason),
        };
        s.field("source", &self.source).finish()
    }
}

//! Inference Pipeline - End-to-End Quality Prediction
//!
//! 1. Feature vector assembly (validation, ordering)
//! 2. Model inference through the adapter
//! 3. Catalog lookup
//!
//! Errors from each stage propagate unchanged; a call either returns a
//! complete [`PredictionOutcome`] or the first error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog;
use crate::error::{Result, WineError};
use crate::features::{self, WineSample};
use crate::model::ModelAdapter;

/// Result of one inference call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub predicted_quality: i64,
    pub heading: String,
    pub description: String,
}

impl PredictionOutcome {
    /// Build the outcome for a raw score
    pub fn for_score(score: i64) -> Self {
        let category = catalog::lookup(score);
        Self {
            predicted_quality: score,
            heading: category.heading.to_string(),
            description: category.description.to_string(),
        }
    }

    /// Whether the score fell inside the known taxonomy
    pub fn is_known(&self) -> bool {
        !catalog::lookup(self.predicted_quality).is_unknown()
    }
}

/// Stateless orchestrator over a shared, already-loaded model
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    adapter: Arc<ModelAdapter>,
}

impl InferencePipeline {
    pub fn new(adapter: Arc<ModelAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &ModelAdapter {
        &self.adapter
    }

    /// Whether a model is loaded and calls can succeed past validation
    pub fn is_ready(&self) -> bool {
        self.adapter.is_loaded()
    }

    /// Validate, predict and describe one sample
    pub fn infer(&self, sample: &WineSample) -> Result<PredictionOutcome> {
        let vector = features::build(sample).inspect_err(|err| {
            tracing::debug!(field = err.field(), error = %err, "sample rejected");
        })?;

        let score = self.adapter.predict(&vector)?;
        tracing::debug!(score, wine_type = %sample.wine_type, "quality predicted");

        Ok(PredictionOutcome::for_score(score))
    }

    /// Parse a JSON object with [`WineSample::from_json`], then [`infer`](Self::infer)
    pub fn infer_json(&self, value: &Value) -> Result<PredictionOutcome> {
        let sample = WineSample::from_json(value).map_err(WineError::Validation)?;
        self.infer(&sample)
    }

    /// Independent inference per sample, results in input order
    pub fn infer_batch(&self, samples: &[WineSample]) -> Vec<Result<PredictionOutcome>> {
        samples.iter().map(|sample| self.infer(sample)).collect()
    }
}

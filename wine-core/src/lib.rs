//! # wine-core - Wine Quality Inference
//!
//! Predicts a wine's quality score from eleven chemical measurements plus the
//! wine type, using a previously trained model, and maps the score to a fixed
//! taxonomy of quality categories.
//!
//! ## Components
//!
//! - **catalog**: static score -> (heading, description) table
//! - **features**: the field ruleset, sample parsing and feature vector assembly
//! - **model**: model artifact loading and the single-inference adapter
//! - **pipeline**: builder -> adapter -> catalog in one request/response call
//! - **config**: `.env`-backed settings
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wine_core::prelude::*;
//!
//! let adapter = Arc::new(ModelAdapter::load(config::model_path()));
//! let pipeline = InferencePipeline::new(adapter);
//!
//! let outcome = pipeline.infer(&sample)?;
//! println!("{}: {}", outcome.predicted_quality, outcome.heading);
//! ```

pub mod error;
pub use error::{Result, ValidationError, WineError};

pub mod catalog;
pub use catalog::{QualityCategory, lookup};

pub mod features;
pub use features::{FeatureVector, FieldSpec, WineSample, WineType, FEATURE_COUNT, FIELDS};

pub mod model;
pub use model::{ModelAdapter, ModelInfo, ModelLoadError, QualityModel};

pub mod pipeline;
pub use pipeline::{InferencePipeline, PredictionOutcome};

pub mod config;


/// Prelude module with common re-exports
pub mod prelude {
    pub use crate::catalog::{QualityCategory, lookup};
    pub use crate::config;
    pub use crate::error::{Result, ValidationError, WineError};
    pub use crate::features::{FeatureVector, FieldSpec, WineSample, WineType, FIELDS};
    pub use crate::model::{ModelAdapter, ModelInfo, QualityModel};
    pub use crate::pipeline::{InferencePipeline, PredictionOutcome};
}

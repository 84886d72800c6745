//! Error types for wine-core

use thiserror::Error;

/// Result type for wine-core operations
pub type Result<T> = std::result::Result<T, WineError>;

/// Caller-supplied input that cannot be turned into a feature vector.
///
/// Always names the first offending field in declaration order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    Missing { field: &'static str },

    #[error("Field '{field}' is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error("Field '{field}' out of range: {value} (expected {min} - {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown wine type: {0} (expected red or white)")]
    UnknownWineType(String),
}

impl ValidationError {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::NotNumeric { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
            ValidationError::UnknownWineType(_) => "wine_type",
        }
    }
}

/// wine-core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference error: {0}")]
    Inference(String),
}

impl WineError {
    /// Stable machine-readable code for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            WineError::Validation(_) => "VALIDATION_ERROR",
            WineError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            WineError::Inference(_) => "INFERENCE_ERROR",
        }
    }
}

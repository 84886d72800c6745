//! Data models for API requests and responses

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wine_core::{FieldSpec, PredictionOutcome, QualityCategory, WineError};

// ============================================================================
// Request Models
// ============================================================================

/// Wine sample to score.
///
/// Documents the expected shape; the handler reads the raw JSON so that
/// missing or non-numeric fields are reported by the shared validation rules.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct PredictRequest {
    /// "red" or "white" (also accepts 0 / 1)
    #[schema(example = "red")]
    pub wine_type: String,
    #[schema(example = 7.4)]
    pub fixed_acidity: f64,
    #[schema(example = 0.7)]
    pub volatile_acidity: f64,
    #[schema(example = 0.0)]
    pub citric_acid: f64,
    #[schema(example = 1.9)]
    pub residual_sugar: f64,
    #[schema(example = 0.076)]
    pub chlorides: f64,
    #[schema(example = 11.0)]
    pub free_sulfur_dioxide: f64,
    #[schema(example = 34.0)]
    pub total_sulfur_dioxide: f64,
    #[schema(example = 0.9978)]
    pub density: f64,
    #[serde(rename = "pH")]
    #[schema(example = 3.51)]
    pub ph: f64,
    #[schema(example = 0.56)]
    pub sulphates: f64,
    #[schema(example = 9.4)]
    pub alcohol: f64,
}

/// Several samples scored independently
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchPredictRequest {
    /// Samples, same shape as the single predict body
    #[schema(value_type = Vec<PredictRequest>)]
    pub samples: Vec<serde_json::Value>,
}

// ============================================================================
// Response Models
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error information (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error information in API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// Error kind: VALIDATION_ERROR, MODEL_UNAVAILABLE, INFERENCE_ERROR or INVALID_REQUEST
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "Validation error: Field 'alcohol' out of range: 20 (expected 8 - 16)")]
    pub message: String,

    /// Offending input field (validation errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "alcohol")]
    pub field: Option<String>,
}

impl ApiError {
    /// Request body that could not be read as JSON of the expected shape
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: "INVALID_REQUEST".to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl From<&WineError> for ApiError {
    fn from(err: &WineError) -> Self {
        let field = match err {
            WineError::Validation(v) => Some(v.field().to_string()),
            _ => None,
        };
        Self {
            code: err.kind().to_string(),
            message: err.to_string(),
            field,
        }
    }
}

/// Prediction result
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResult {
    /// Score returned by the model
    #[schema(example = 5)]
    pub predicted_quality: i64,

    #[schema(example = "Below Average Quality Wine")]
    pub heading: String,

    pub description: String,

    /// False when the score falls outside the 3-9 taxonomy
    pub known: bool,
}

impl From<PredictionOutcome> for PredictionResult {
    fn from(outcome: PredictionOutcome) -> Self {
        let known = outcome.is_known();
        Self {
            predicted_quality: outcome.predicted_quality,
            heading: outcome.heading,
            description: outcome.description,
            known,
        }
    }
}

/// Per-sample entry of a batch prediction
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchItem {
    /// Position in the request
    pub index: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PredictionResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Batch prediction result
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

/// Quality category
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryInfo {
    /// Score (absent for the fallback entry)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 6)]
    pub score: Option<i64>,

    #[schema(example = "Average Quality Wine")]
    pub heading: &'static str,

    pub description: &'static str,
}

impl From<&QualityCategory> for CategoryInfo {
    fn from(category: &QualityCategory) -> Self {
        Self {
            score: category.score,
            heading: category.heading,
            description: category.description,
        }
    }
}

/// Full quality catalog
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResult {
    pub categories: Vec<CategoryInfo>,

    /// Returned for any other score
    pub fallback: CategoryInfo,
}

/// Accepted range of one input field
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldInfo {
    #[schema(example = "alcohol")]
    pub name: &'static str,

    #[schema(example = "Alcohol content")]
    pub label: &'static str,

    #[schema(example = "% vol")]
    pub unit: &'static str,

    #[schema(example = 8.0)]
    pub min: f64,

    #[schema(example = 16.0)]
    pub max: f64,

    pub description: &'static str,
}

impl From<&FieldSpec> for FieldInfo {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name,
            label: spec.label,
            unit: spec.unit,
            min: spec.min,
            max: spec.max,
            description: spec.description,
        }
    }
}

/// Input ruleset
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldsResult {
    /// Accepted wine types
    pub wine_types: Vec<String>,

    /// Chemical fields in model input order
    pub fields: Vec<FieldInfo>,
}

/// Loaded model details
#[derive(Debug, Serialize, ToSchema)]
pub struct ModelSummary {
    #[schema(example = "forest")]
    pub kind: String,

    #[schema(example = 12)]
    pub n_features: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_count: Option<usize>,
}

/// Service information
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "wine-api")]
    pub name: &'static str,

    #[schema(example = "2026.10.18")]
    pub version: &'static str,

    /// Present when a model is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelSummary>,

    /// Why no model is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_error: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    #[schema(example = "healthy")]
    pub status: &'static str,

    #[schema(example = "2026.10.18")]
    pub version: &'static str,
}

/// Readiness check response
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyCheck {
    pub ready: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

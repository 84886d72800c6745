//! Request handlers for API endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use wine_core::catalog;
use wine_core::{WineError, WineType, FIELDS};

use crate::models::*;
use crate::routes::AppState;

/// HTTP status for each error kind
fn status_for(err: &WineError) -> StatusCode {
    match err {
        WineError::Validation(_) => StatusCode::BAD_REQUEST,
        WineError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        WineError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Envelope error for a body the JSON extractor refused
fn rejected<T: serde::Serialize>(rejection: JsonRejection) -> (StatusCode, Json<ApiResponse<T>>) {
    tracing::debug!(error = %rejection.body_text(), "request body rejected");
    (
        rejection.status(),
        Json(ApiResponse::error(ApiError::invalid_request(rejection.body_text()))),
    )
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Predict the quality of one wine sample
#[utoipa::path(
    post,
    path = "/api/predict",
    tag = "prediction",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Prediction successful", body = ApiResponse<PredictionResult>),
        (status = 400, description = "Invalid sample or malformed JSON", body = ApiResponse<()>),
        (status = 500, description = "Model rejected the input", body = ApiResponse<()>),
        (status = 503, description = "No model loaded", body = ApiResponse<()>),
    )
)]
pub async fn predict_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<PredictionResult>>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection),
    };

    match state.pipeline.infer_json(&body) {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(PredictionResult::from(outcome))),
        ),
        Err(err) => {
            if !matches!(err, WineError::Validation(_)) {
                tracing::warn!(error = %err, "prediction failed");
            }
            (status_for(&err), Json(ApiResponse::error(ApiError::from(&err))))
        }
    }
}

/// Predict several samples; each one succeeds or fails on its own
#[utoipa::path(
    post,
    path = "/api/predict/batch",
    tag = "prediction",
    request_body = BatchPredictRequest,
    responses(
        (status = 200, description = "Per-sample results", body = ApiResponse<BatchResult>),
        (status = 400, description = "Malformed JSON", body = ApiResponse<()>),
    )
)]
pub async fn batch_predict_handler(
    State(state): State<AppState>,
    req: Result<Json<BatchPredictRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<BatchResult>>) {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return rejected(rejection),
    };

    let results: Vec<BatchItem> = req
        .samples
        .iter()
        .enumerate()
        .map(|(index, sample)| match state.pipeline.infer_json(sample) {
            Ok(outcome) => BatchItem {
                index,
                data: Some(PredictionResult::from(outcome)),
                error: None,
            },
            Err(err) => BatchItem {
                index,
                data: None,
                error: Some(ApiError::from(&err)),
            },
        })
        .collect();

    let succeeded = results.iter().filter(|item| item.data.is_some()).count();
    let failed = results.len() - succeeded;

    (
        StatusCode::OK,
        Json(ApiResponse::success(BatchResult {
            succeeded,
            failed,
            results,
        })),
    )
}

/// List the quality categories
#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "reference",
    responses(
        (status = 200, description = "Quality catalog", body = ApiResponse<CatalogResult>),
    )
)]
pub async fn catalog_handler() -> Json<ApiResponse<CatalogResult>> {
    Json(ApiResponse::success(CatalogResult {
        categories: catalog::entries().iter().map(CategoryInfo::from).collect(),
        fallback: CategoryInfo::from(&catalog::UNKNOWN),
    }))
}

/// List input fields with their accepted ranges
#[utoipa::path(
    get,
    path = "/api/fields",
    tag = "reference",
    responses(
        (status = 200, description = "Input ruleset", body = ApiResponse<FieldsResult>),
    )
)]
pub async fn fields_handler() -> Json<ApiResponse<FieldsResult>> {
    Json(ApiResponse::success(FieldsResult {
        wine_types: [WineType::Red, WineType::White]
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
        fields: FIELDS.iter().map(FieldInfo::from).collect(),
    }))
}

/// Service and model information
#[utoipa::path(
    get,
    path = "/api/info",
    tag = "reference",
    responses(
        (status = 200, description = "Service information", body = ApiResponse<ServiceInfo>),
    )
)]
pub async fn info_handler(State(state): State<AppState>) -> Json<ApiResponse<ServiceInfo>> {
    let adapter = state.pipeline.adapter();
    Json(ApiResponse::success(ServiceInfo {
        name: "wine-api",
        version: env!("CARGO_PKG_VERSION"),
        model: adapter.describe().map(|info| ModelSummary {
            kind: info.kind,
            n_features: info.n_features,
            tree_count: info.tree_count,
        }),
        model_error: adapter.unavailable_reason().map(str::to_string),
    }))
}

/// Health check endpoint for monitoring
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck),
    )
)]
pub async fn health_handler() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness: a model is loaded and predictions can be served
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Model loaded", body = ReadyCheck),
        (status = 503, description = "No model loaded", body = ReadyCheck),
    )
)]
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<ReadyCheck>) {
    let adapter = state.pipeline.adapter();
    if adapter.is_loaded() {
        (
            StatusCode::OK,
            Json(ReadyCheck {
                ready: true,
                reason: None,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyCheck {
                ready: false,
                reason: adapter.unavailable_reason().map(str::to_string),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use wine_core::model::LinearModel;
    use wine_core::{InferencePipeline, ModelAdapter};

    fn state_with_score(score: f64) -> AppState {
        let model = LinearModel::new(12, score, vec![0.0; 12]).unwrap();
        AppState {
            pipeline: InferencePipeline::new(Arc::new(ModelAdapter::from_model(model))),
        }
    }

    fn unavailable_state() -> AppState {
        AppState {
            pipeline: InferencePipeline::new(Arc::new(ModelAdapter::unavailable("no artifact"))),
        }
    }

    fn red_body() -> Value {
        json!({
            "wine_type": "red",
            "fixed_acidity": 7.4,
            "volatile_acidity": 0.7,
            "citric_acid": 0.0,
            "residual_sugar": 1.9,
            "chlorides": 0.076,
            "free_sulfur_dioxide": 11,
            "total_sulfur_dioxide": 34,
            "density": 0.9978,
            "pH": 3.51,
            "sulphates": 0.56,
            "alcohol": 9.4
        })
    }

    #[tokio::test]
    async fn test_predict_handler_success() {
        let (status, Json(response)) = predict_handler(State(state_with_score(5.0)), Ok(Json(red_body()))).await;

        assert_eq!(status, StatusCode::OK);
        let data = response.data.unwrap();
        assert_eq!(data.predicted_quality, 5);
        assert_eq!(data.heading, "Below Average Quality Wine");
        assert!(data.known);
    }

    #[tokio::test]
    async fn test_predict_handler_unknown_score() {
        let (status, Json(response)) = predict_handler(State(state_with_score(12.0)), Ok(Json(red_body()))).await;

        assert_eq!(status, StatusCode::OK);
        let data = response.data.unwrap();
        assert_eq!(data.heading, "Unknown Quality");
        assert!(!data.known);
    }

    #[tokio::test]
    async fn test_predict_handler_validation_error() {
        let mut body = red_body();
        body["alcohol"] = json!(20.0);

        let (status, Json(response)) = predict_handler(State(state_with_score(5.0)), Ok(Json(body))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        let error = response.error.unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.field.as_deref(), Some("alcohol"));
    }

    #[tokio::test]
    async fn test_predict_handler_model_unavailable() {
        let (status, Json(response)) = predict_handler(State(unavailable_state()), Ok(Json(red_body()))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.error.unwrap().code, "MODEL_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_batch_predict_handler() {
        let mut bad = red_body();
        bad.as_object_mut().unwrap().remove("density");

        let req = BatchPredictRequest {
            samples: vec![red_body(), bad],
        };
        let (status, Json(response)) = batch_predict_handler(State(state_with_score(6.0)), Ok(Json(req))).await;

        assert_eq!(status, StatusCode::OK);
        let data = response.data.unwrap();
        assert_eq!(data.succeeded, 1);
        assert_eq!(data.failed, 1);
        assert_eq!(data.results[0].data.as_ref().unwrap().heading, "Average Quality Wine");
        assert_eq!(data.results[1].error.as_ref().unwrap().field.as_deref(), Some("density"));
    }

    #[tokio::test]
    async fn test_batch_predict_handler_without_model() {
        let mut out_of_range = red_body();
        out_of_range["alcohol"] = json!(20.0);

        let req = BatchPredictRequest {
            samples: vec![out_of_range, red_body()],
        };
        let (status, Json(response)) = batch_predict_handler(State(unavailable_state()), Ok(Json(req))).await;

        assert_eq!(status, StatusCode::OK);
        let data = response.data.unwrap();
        assert_eq!(data.succeeded, 0);
        assert_eq!(data.failed, 2);

        let first = data.results[0].error.as_ref().unwrap();
        assert_eq!(first.code, "VALIDATION_ERROR");
        assert_eq!(first.field.as_deref(), Some("alcohol"));
        assert_eq!(data.results[1].error.as_ref().unwrap().code, "MODEL_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_catalog_handler() {
        let Json(response) = catalog_handler().await;
        let data = response.data.unwrap();

        assert_eq!(data.categories.len(), 7);
        assert_eq!(data.categories[0].score, Some(3));
        assert_eq!(data.fallback.heading, "Unknown Quality");
    }

    #[tokio::test]
    async fn test_fields_handler() {
        let Json(response) = fields_handler().await;
        let data = response.data.unwrap();

        assert_eq!(data.wine_types, vec!["red", "white"]);
        assert_eq!(data.fields.len(), 11);
        assert_eq!(data.fields[10].name, "alcohol");
        assert_eq!(data.fields[10].min, 8.0);
        assert_eq!(data.fields[10].max, 16.0);
    }

    #[tokio::test]
    async fn test_info_and_ready_handlers() {
        let Json(info) = info_handler(State(state_with_score(6.0))).await;
        let info = info.data.unwrap();
        assert_eq!(info.model.unwrap().kind, "linear");
        assert!(info.model_error.is_none());

        let (status, Json(ready)) = ready_handler(State(state_with_score(6.0))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(ready.ready);

        let (status, Json(ready)) = ready_handler(State(unavailable_state())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ready.reason.as_deref(), Some("no artifact"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(health) = health_handler().await;
        assert_eq!(health.status, "healthy");
        assert!(!health.version.is_empty());
    }
}

//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wine Quality API",
        version = "2026.10.18",
        description = "REST API for wine quality prediction - validate a sample, score it with the trained model, and describe the quality category",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "prediction", description = "Score wine samples"),
        (name = "reference", description = "Quality catalog, input ranges and service information"),
        (name = "health", description = "Health and readiness checks")
    ),
    paths(
        handlers::predict_handler,
        handlers::batch_predict_handler,
        handlers::catalog_handler,
        handlers::fields_handler,
        handlers::info_handler,
        handlers::health_handler,
        handlers::ready_handler,
    ),
    components(
        schemas(
            PredictRequest,
            BatchPredictRequest,
            ApiError,
            PredictionResult,
            BatchItem,
            BatchResult,
            CategoryInfo,
            CatalogResult,
            FieldInfo,
            FieldsResult,
            ModelSummary,
            ServiceInfo,
            HealthCheck,
            ReadyCheck,
        )
    )
)]
pub struct ApiDoc;

//! Wine Quality REST API Server
//!
//! Exposes wine quality prediction via HTTP endpoints.
//!
//! The model artifact is loaded once before the listener is bound; every
//! request shares it read-only.
//!
//! ## Environment Variables
//! - `WINE_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `WINE_API_PORT`: Port to listen on (default: 3000)
//! - `WINE_MODEL_PATH`: Model artifact (default: assets/wine_quality.json)
//! - `WINE_REQUIRE_MODEL`: Refuse to start without a model (default: false)

pub mod handlers;
pub mod models;
mod openapi;
mod routes;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{bail, Context};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use wine_core::{config, InferencePipeline, ModelAdapter};

use openapi::ApiDoc;
use routes::AppState;

#[derive(Parser)]
#[command(name = "wine-api")]
#[command(author = "Wine Quality Contributors")]
#[command(version = "2026.10.18")]
#[command(about = "REST API server for wine quality prediction", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "WINE_API_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "WINE_API_PORT")]
    port: u16,

    /// Model artifact (defaults to WINE_MODEL_PATH or assets/wine_quality.json)
    #[arg(short, long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Enable CORS for all origins
    #[arg(long, default_value_t = false)]
    cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wine_api=info,wine_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load the model before accepting any request
    let model_path = args.model.clone().unwrap_or_else(config::model_path);
    let adapter = Arc::new(ModelAdapter::load(&model_path));
    if !adapter.is_loaded() && config::require_model() {
        bail!(
            "model {} failed to load: {}",
            model_path.display(),
            adapter.unavailable_reason().unwrap_or("unknown error")
        );
    }

    let state = AppState {
        pipeline: InferencePipeline::new(Arc::clone(&adapter)),
    };

    // Build router with API routes
    let mut app = routes::create_router(state);

    // Add Swagger UI
    app = app.merge(
        SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    // Add CORS if enabled
    if args.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Add tracing layer
    app = app.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid address {}:{}", args.host, args.port))?;

    tracing::info!("Wine Quality API starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/docs", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  POST /api/predict        - Predict one sample");
    tracing::info!("  POST /api/predict/batch  - Predict several samples");
    tracing::info!("  GET  /api/catalog        - Quality categories");
    tracing::info!("  GET  /api/fields         - Accepted input ranges");
    tracing::info!("  GET  /api/info           - Service and model information");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  GET  /ready              - Readiness check");
    tracing::info!("  GET  /docs               - Swagger UI");
    tracing::info!("");
    tracing::info!(
        "Model: {}",
        match adapter.describe() {
            Some(info) => format!("{} ({} features) from {}", info.kind, info.n_features, model_path.display()),
            None => format!("unavailable ({})", adapter.unavailable_reason().unwrap_or("unknown error")),
        }
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

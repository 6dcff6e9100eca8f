use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use rod_optimizer::catalog::CatalogData;
use rod_optimizer::config::ServerConfig;
use rod_optimizer::types::{OptimizeRequest, ProjectSummary};
use rod_optimizer::{Optimizer, ProductCatalog};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

struct AppState {
    catalog: ProductCatalog,
    raw_length: f64,
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "Window Material Optimizer API is running" }))
}

async fn product_options(State(state): State<Arc<AppState>>) -> Json<CatalogData> {
    Json(state.catalog.list().clone())
}

async fn optimize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<ProjectSummary>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let optimizer = Optimizer::with_raw_length(&state.catalog, state.raw_length)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let summary = optimizer.optimize(&req.configurations).map_err(|e| {
        tracing::info!(error = %e, "optimization rejected");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok(Json(summary))
}

/// Browser frontends call the API from another origin, so every origin is allowed.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/up", get(|| async { "ok" }))
        .route("/product-options", get(product_options))
        .route("/optimize", post(optimize))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to open {}: {e}", config.log_file.display());
            std::process::exit(1);
        });

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let catalog = ProductCatalog::load(&config.catalog_path).unwrap_or_else(|e| {
        eprintln!("Error: {}: {e}", config.catalog_path.display());
        std::process::exit(1);
    });
    tracing::info!(
        path = %config.catalog_path.display(),
        products = catalog.product_count(),
        "catalog loaded"
    );

    let state = Arc::new(AppState {
        catalog,
        raw_length: config.raw_length,
    });

    let addr = config.addr();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        eprintln!("Error: failed to bind {addr}: {e}");
        std::process::exit(1);
    });
    eprintln!("Listening on {addr}");
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

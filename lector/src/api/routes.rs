use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/webhook", post(handlers::webhook::webhook))
        .route("/webhook_json", post(handlers::webhook::webhook_json))
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::health_detailed))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Lector - WhatsApp OCR API",
        "docs": "/docs",
        "health": "/health"
    }))
}

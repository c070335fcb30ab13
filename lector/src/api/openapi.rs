use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lector API",
        version = "1.0.0",
        description = "WhatsApp OCR bot: extracts text from images sent over Twilio WhatsApp using Mistral OCR.",
    ),
    paths(
        handlers::webhook::webhook,
        handlers::webhook::webhook_json,
        handlers::health::health_check,
        handlers::health::health_detailed,
    ),
    components(schemas(
        handlers::health::HealthResponse,
        models::WebhookJsonPayload,
    )),
    tags(
        (name = "webhook", description = "Inbound Twilio WhatsApp webhooks"),
        (name = "health", description = "Health checks"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}

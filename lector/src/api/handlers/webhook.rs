use std::collections::BTreeMap;

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Uri},
    Form, Json,
};
use tracing::{info, warn};

use crate::api::AppState;
use crate::error::{LectorError, Result};
use crate::models::{InboundMessage, WebhookJsonPayload};
use crate::reply;
use crate::signature;
use crate::twiml::MessagingResponse;

/// Inbound Twilio WhatsApp webhook.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "webhook",
    request_body(
        content = String,
        content_type = "application/x-www-form-urlencoded",
        description = "Twilio webhook form fields (Body, From, To, NumMedia, MediaUrl0, MediaContentType0)"
    ),
    responses(
        (status = 200, description = "TwiML reply", content_type = "application/xml", body = String),
        (status = 400, description = "Malformed webhook payload"),
        (status = 403, description = "Invalid Twilio signature"),
    )
)]
pub async fn webhook(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Form(params): Form<BTreeMap<String, String>>,
) -> Result<MessagingResponse> {
    if state.config.twilio.validate_signature {
        let url = request_url(&headers, &uri);
        let provided = headers
            .get(signature::SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !signature::validate(&state.config.twilio.auth_token, &url, &params, provided) {
            warn!(
                from = params.get("From").map(String::as_str).unwrap_or("<unknown>"),
                %url, "rejected webhook with invalid Twilio signature"
            );
            return Err(LectorError::InvalidSignature);
        }
    }

    let message = InboundMessage::from_params(&params)?;
    info!(from = %message.from, num_media = message.num_media, "message received");

    let mut resp = MessagingResponse::new();

    match message.first_media_url() {
        Some(media_url) => {
            resp.message(reply::PROCESSING_MESSAGE);

            match state.media.fetch(media_url).await {
                Ok(media) => {
                    let result = state.ocr.process(&media.base64, &media.content_type).await;
                    resp.message(reply::compose(&result));
                }
                Err(e) => {
                    warn!(from = %message.from, error = %e, "could not download media");
                    resp.message(reply::DOWNLOAD_ERROR_MESSAGE);
                }
            }
        }
        None => {
            resp.message(reply::WELCOME_MESSAGE);
        }
    }

    Ok(resp)
}

/// JSON variant of the webhook, for testing. No signature validation and no
/// pipeline: declared media is only acknowledged.
#[utoipa::path(
    post,
    path = "/webhook_json",
    tag = "webhook",
    request_body = WebhookJsonPayload,
    responses(
        (status = 200, description = "TwiML reply", content_type = "application/xml", body = String),
    )
)]
pub async fn webhook_json(Json(payload): Json<WebhookJsonPayload>) -> MessagingResponse {
    info!(from = %payload.from, num_media = payload.num_media, "JSON webhook received");

    let mut resp = MessagingResponse::new();
    if payload.num_media > 0 {
        let declared = payload.media_url0.iter().count();
        if declared > 0 {
            resp.message(format!("Recibí {declared} imagen(es). Procesando..."));
        }
    }
    resp
}

/// Reconstruct the public URL Twilio signed: scheme from the proxy header
/// (https when absent), host from the Host header, then path and query.
fn request_url(headers: &HeaderMap, uri: &Uri) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("https");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");
    format!("{scheme}://{host}{path}")
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LectorError {
    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("media fetch error: {0}")]
    MediaFetch(String),

    #[error("{0}")]
    Ocr(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for LectorError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LectorError::InvalidSignature => (StatusCode::FORBIDDEN, self.to_string()),
            LectorError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LectorError::MediaFetch(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            LectorError::Ocr(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            LectorError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            LectorError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, LectorError>;

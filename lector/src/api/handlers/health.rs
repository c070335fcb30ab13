use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::AppState;

pub const SERVICE_NAME: &str = "lector";

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_connected: Option<bool>,
}

/// `GET /health` — liveness, always healthy.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
        ocr_connected: None,
    })
}

/// `GET /health/detailed` — additionally probes OCR provider reachability.
#[utoipa::path(
    get,
    path = "/health/detailed",
    tag = "health",
    responses(
        (status = 200, description = "Service health including OCR connectivity", body = HealthResponse),
    )
)]
pub async fn health_detailed(State(state): State<AppState>) -> Json<HealthResponse> {
    let ocr_ok = state.ocr.probe().await;

    Json(HealthResponse {
        status: if ocr_ok { "healthy" } else { "degraded" }.to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now(),
        ocr_connected: Some(ocr_ok),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocr_connected_is_omitted_when_absent() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
            ocr_connected: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("ocr_connected").is_none());
        assert_eq!(json["service"], "lector");
    }

    #[test]
    fn ocr_connected_is_present_when_probed() {
        let resp = HealthResponse {
            status: "degraded".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
            ocr_connected: Some(false),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ocr_connected"], false);
        assert_eq!(json["status"], "degraded");
    }
}

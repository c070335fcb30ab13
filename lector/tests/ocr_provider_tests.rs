use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lector::config::OcrConfig;
use lector::models::PageDimensions;
use lector::ocr::OcrProvider;

fn ocr_config(base_url: &str, timeout_secs: u64) -> OcrConfig {
    OcrConfig {
        api_key: "mk-test".to_string(),
        base_url: Some(base_url.to_string()),
        model: "mistral-ocr-latest".to_string(),
        timeout_secs,
    }
}

#[tokio::test]
async fn process_normalizes_provider_pages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .and(body_partial_json(json!({
            "model": "mistral-ocr-latest",
            "include_image_base64": false,
            "document": {"type": "image_url"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pages": [
                {"index": 0, "markdown": "# Título", "dimensions": {"dpi": 200, "height": 300, "width": 200}},
                {"index": 1, "markdown": "segunda"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    let result = provider.process("QUJD", "image/png").await;

    assert!(result.is_success());
    assert_eq!(result.pages.len(), 2);
    assert_eq!(result.pages[0].index, 0);
    assert_eq!(result.pages[0].markdown, "# Título");
    assert_eq!(
        result.pages[0].dimensions,
        Some(PageDimensions {
            width: 200,
            height: 300,
            dpi: 200
        })
    );
    assert!(result.pages[1].dimensions.is_none());
    assert!(result.elapsed_secs.is_some());
}

#[tokio::test]
async fn provider_error_becomes_failure_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    let result = provider.process("QUJD", "image/jpeg").await;

    assert!(!result.is_success());
    assert!(result.pages.is_empty());
    let error = result.error.unwrap();
    assert!(error.contains("401"), "{error}");
    assert!(error.contains("unauthorized"), "{error}");
    assert!(result.elapsed_secs.is_some());
}

#[tokio::test]
async fn malformed_response_becomes_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    let result = provider.process("QUJD", "image/jpeg").await;

    assert!(!result.is_success());
    assert!(result.error.unwrap().contains("parse"), "parse failure expected");
}

#[tokio::test]
async fn slow_provider_hits_the_timeout_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"pages": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 1)).unwrap();
    let result = provider.process("QUJD", "image/jpeg").await;

    assert!(!result.is_success());
    assert!(result.error.unwrap().contains("timed out"));
}

#[tokio::test]
async fn elapsed_time_reflects_provider_latency() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"pages": [{"index": 0, "markdown": "hola"}]}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    let result = provider.process("QUJD", "image/jpeg").await;

    assert!(result.is_success());
    assert!(result.elapsed_secs.unwrap() >= 0.4);
}

#[tokio::test]
async fn probe_reports_reachable_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .and(body_partial_json(json!({"document": {"type": "image_url"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pages": []})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    assert!(provider.probe().await);
}

#[tokio::test]
async fn probe_swallows_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ocr"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = OcrProvider::new(&ocr_config(&server.uri(), 5)).unwrap();
    assert!(!provider.probe().await);
}

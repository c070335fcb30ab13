use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OcrConfig;
use crate::error::{LectorError, Result};
use crate::models::{OcrPage, PageDimensions};

/// Build a self-describing data URI for an encoded image.
///
/// Content types containing `png` or `gif` (any case) keep their type;
/// anything else is submitted as JPEG.
pub fn image_data_url(image_base64: &str, content_type: &str) -> String {
    let lower = content_type.to_lowercase();
    let mime = if lower.contains("png") {
        "image/png"
    } else if lower.contains("gif") {
        "image/gif"
    } else {
        "image/jpeg"
    };
    format!("data:{mime};base64,{image_base64}")
}

#[derive(Debug, Serialize)]
struct OcrRequest {
    model: String,
    document: DocumentSource,
    include_image_base64: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum DocumentSource {
    #[serde(rename = "image_url")]
    ImageUrl { image_url: String },
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    pages: Vec<OcrResponsePage>,
}

#[derive(Debug, Deserialize)]
struct OcrResponsePage {
    index: u32,
    markdown: String,
    #[serde(default)]
    dimensions: Option<PageDimensions>,
}

#[derive(Clone, Debug)]
pub struct MistralOcrClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl MistralOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.mistral.ai/v1".to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LectorError::Ocr(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url,
            model: config.model.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one encoded image and return the normalized page list.
    ///
    /// The image is sent inline as a data URI; the provider is asked not to
    /// echo it back in the response.
    pub async fn process(&self, image_base64: &str, content_type: &str) -> Result<Vec<OcrPage>> {
        debug!(chars = image_base64.len(), "submitting image to Mistral OCR");

        let request = OcrRequest {
            model: self.model.clone(),
            document: DocumentSource::ImageUrl {
                image_url: image_data_url(image_base64, content_type),
            },
            include_image_base64: false,
        };

        let response = self
            .client
            .post(format!("{}/ocr", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| LectorError::Ocr(format!("API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LectorError::Ocr(format!(
                "API request failed: {status} - {body}"
            )));
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .map_err(|e| LectorError::Ocr(format!("Failed to parse response: {e}")))?;

        Ok(parsed
            .pages
            .into_iter()
            .map(|p| OcrPage {
                index: p.index,
                markdown: p.markdown,
                dimensions: p.dimensions,
            })
            .collect())
    }
}

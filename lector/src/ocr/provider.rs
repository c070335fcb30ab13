use std::time::{Duration, Instant};

use tracing::{error, warn};

use crate::config::OcrConfig;
use crate::error::{LectorError, Result};
use crate::models::OcrResult;

use super::api::MistralOcrClient;

/// 1x1 transparent GIF used by the connectivity probe.
const TINY_GIF_BASE64: &str = "R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Injectable OCR service, constructed once in `main` and cloned into the
/// application state. Wraps the raw API client with a wall-clock measurement
/// and an explicit timeout ceiling so a stuck provider call cannot hold a
/// request open indefinitely.
#[derive(Clone)]
pub struct OcrProvider {
    client: MistralOcrClient,
    timeout_secs: u64,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        Ok(Self {
            client: MistralOcrClient::new(config)?,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Run OCR over one encoded image.
    ///
    /// Never returns an `Err`: every provider failure (auth, quota, malformed
    /// document, network, timeout) is folded into a failed [`OcrResult`]
    /// carrying the stringified cause and the time spent so far.
    pub async fn process(&self, image_base64: &str, content_type: &str) -> OcrResult {
        let started = Instant::now();
        let ceiling = Duration::from_secs(self.timeout_secs);

        let outcome =
            tokio::time::timeout(ceiling, self.client.process(image_base64, content_type)).await;
        let elapsed = started.elapsed().as_secs_f64();

        match outcome {
            Ok(Ok(pages)) => OcrResult::success(pages, elapsed),
            Ok(Err(LectorError::Ocr(message))) => {
                error!(error = %message, "OCR processing failed");
                OcrResult::failure(message, elapsed)
            }
            Ok(Err(e)) => {
                error!(error = %e, "OCR processing failed");
                OcrResult::failure(e.to_string(), elapsed)
            }
            Err(_) => {
                error!(timeout_secs = self.timeout_secs, "OCR call timed out");
                OcrResult::failure(
                    format!("OCR timed out after {} seconds", self.timeout_secs),
                    elapsed,
                )
            }
        }
    }

    /// Liveness probe: round-trip a minimal hard-coded image.
    ///
    /// Errors are logged and swallowed; this only feeds health reporting and
    /// never gates the main path.
    pub async fn probe(&self) -> bool {
        match self.client.process(TINY_GIF_BASE64, "image/gif").await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "OCR connectivity probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_builds_from_config() {
        let config = OcrConfig {
            api_key: "test-key".to_string(),
            base_url: None,
            model: "mistral-ocr-latest".to_string(),
            timeout_secs: 60,
        };
        assert!(OcrProvider::new(&config).is_ok());
    }

    #[test]
    fn probe_image_is_valid_base64() {
        use base64::{engine::general_purpose::STANDARD, Engine};
        let bytes = STANDARD.decode(TINY_GIF_BASE64).unwrap();
        // GIF89a magic.
        assert_eq!(&bytes[..6], b"GIF89a");
    }
}

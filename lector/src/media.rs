use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{header, redirect, Client};
use tracing::{debug, error, info};

use crate::config::TwilioConfig;
use crate::error::{LectorError, Result};

/// Content type assumed when the media response omits one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// A downloaded attachment, body already base64-encoded for the OCR payload.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub base64: String,
    pub content_type: String,
}

/// Downloads attachments from Twilio's authenticated media URLs.
///
/// Stateless apart from the shared HTTP client; safe to clone into
/// concurrent request handlers.
#[derive(Clone)]
pub struct MediaFetcher {
    client: Client,
    account_sid: String,
    auth_token: String,
}

impl MediaFetcher {
    pub fn new(config: &TwilioConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.media_timeout_secs))
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(|e| LectorError::MediaFetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Fetch one media URL with HTTP Basic auth.
    ///
    /// Non-2xx statuses and transport errors both surface as
    /// [`LectorError::MediaFetch`]; the distinction only matters for the
    /// logs. No retries.
    pub async fn fetch(&self, url: &str) -> Result<FetchedMedia> {
        info!(url, "downloading media");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| {
                error!(url, error = %e, "media download transport error");
                LectorError::MediaFetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(url, %status, "media download rejected");
            return Err(LectorError::MediaFetch(format!(
                "HTTP {status} while downloading media"
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response.bytes().await.map_err(|e| {
            error!(url, error = %e, "media download interrupted");
            LectorError::MediaFetch(e.to_string())
        })?;

        debug!(%content_type, size = bytes.len(), "media downloaded");

        Ok(FetchedMedia {
            base64: STANDARD.encode(&bytes),
            content_type,
        })
    }
}

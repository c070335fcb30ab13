use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LectorError, Result};

/// Only the first attachment is processed end-to-end, even when the inbound
/// message declares more. Deliberate scope limit, not a parsing defect.
pub const MAX_MEDIA_PROCESSED: usize = 1;

/// One attachment position in an inbound message, indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSlot {
    pub url: Option<String>,
    pub content_type: Option<String>,
}

/// An inbound WhatsApp message as delivered by the Twilio webhook form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub from: String,
    pub to: Option<String>,
    pub body: Option<String>,
    pub num_media: u32,
    /// Media slots 0..num_media. Keys beyond the declared count are ignored.
    pub media: Vec<MediaSlot>,
}

impl InboundMessage {
    /// Build a message from the decoded webhook form parameters.
    ///
    /// `From` is the only required field. `NumMedia` defaults to 0 and media
    /// slots are collected index-aligned with it.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self> {
        let from = params
            .get("From")
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| LectorError::Validation("missing required field 'From'".to_string()))?;

        let num_media = params
            .get("NumMedia")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let media = (0..num_media)
            .map(|i| MediaSlot {
                url: params.get(&format!("MediaUrl{i}")).cloned(),
                content_type: params.get(&format!("MediaContentType{i}")).cloned(),
            })
            .collect();

        Ok(Self {
            from,
            to: params.get("To").cloned(),
            body: params.get("Body").cloned(),
            num_media,
            media,
        })
    }

    /// URL of the first processable media slot, when one was declared and
    /// carries a URL. Bounded by [`MAX_MEDIA_PROCESSED`].
    pub fn first_media_url(&self) -> Option<&str> {
        self.media
            .iter()
            .take(MAX_MEDIA_PROCESSED)
            .find_map(|slot| slot.url.as_deref())
    }
}

/// JSON variant of the webhook payload, used for testing without signature
/// validation. Field names match the Twilio form fields.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct WebhookJsonPayload {
    #[serde(rename = "Body")]
    pub body: Option<String>,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "NumMedia", default)]
    pub num_media: u32,
    #[serde(rename = "MediaUrl0")]
    pub media_url0: Option<String>,
    #[serde(rename = "MediaContentType0")]
    pub media_content_type0: Option<String>,
}

/// Page geometry reported by the OCR provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

/// One page of an OCR response, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrPage {
    pub index: u32,
    pub markdown: String,
    /// Present only when the provider reports geometry for the page.
    pub dimensions: Option<PageDimensions>,
}

/// Outcome of one OCR submission.
///
/// Constructed through [`OcrResult::success`] / [`OcrResult::failure`], which
/// uphold the invariant that a failure carries no pages and a success carries
/// no error. A success with zero pages is valid: no text was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrResult {
    pub pages: Vec<OcrPage>,
    pub error: Option<String>,
    pub elapsed_secs: Option<f64>,
}

impl OcrResult {
    pub fn success(pages: Vec<OcrPage>, elapsed_secs: f64) -> Self {
        Self {
            pages,
            error: None,
            elapsed_secs: Some(elapsed_secs),
        }
    }

    pub fn failure(error: impl Into<String>, elapsed_secs: f64) -> Self {
        Self {
            pages: Vec::new(),
            error: Some(error.into()),
            elapsed_secs: Some(elapsed_secs),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

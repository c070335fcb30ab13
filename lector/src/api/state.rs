use std::sync::Arc;

use crate::config::Config;
use crate::media::MediaFetcher;
use crate::ocr::OcrProvider;

/// Shared application state, cloned into each request handler.
///
/// The fetcher and OCR provider are single instances constructed at startup
/// and injected here; tests substitute them by pointing their base URLs at a
/// mock server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub media: MediaFetcher,
    pub ocr: OcrProvider,
}

impl AppState {
    pub fn new(config: Config, media: MediaFetcher, ocr: OcrProvider) -> Self {
        Self {
            config: Arc::new(config),
            media,
            ocr,
        }
    }
}

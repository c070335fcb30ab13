//! OCR client for the Mistral OCR API.
//!
//! Split in two layers:
//! - [`api::MistralOcrClient`] speaks the provider's HTTP protocol and
//!   normalizes its page list.
//! - [`provider::OcrProvider`] is the injectable service handed to request
//!   handlers: it owns the timeout ceiling, measures elapsed time, and folds
//!   every failure into an [`crate::models::OcrResult`].

pub mod api;
mod provider;

pub use api::image_data_url;
pub use provider::OcrProvider;

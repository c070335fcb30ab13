//! Reply composition.
//!
//! Pure functions from an OCR outcome to the user-facing reply text. The
//! literal strings here are part of the conversational contract with users
//! and must stay stable across releases.

use crate::models::OcrResult;

/// Cap on extracted text in a single reply; WhatsApp cuts longer messages.
pub const MAX_REPLY_CHARS: usize = 1500;

pub const WELCOME_MESSAGE: &str = "👋 Hola! Soy tu asistente OCR.\n\n📸 Envíame una foto de una credencial o documento y te devolveré el texto extraído.";

pub const PROCESSING_MESSAGE: &str =
    "📸 Recibí tu imagen. Procesando con OCR... (esto tomará unos segundos)";

pub const DOWNLOAD_ERROR_MESSAGE: &str = "❌ No pude descargar la imagen. Intenta de nuevo.";

pub const NO_TEXT_MESSAGE: &str = "⚠️ No encontré texto en la imagen.";

const SUCCESS_PREFIX: &str = "✅ Texto extraído:\n\n";

const OCR_ERROR_PREFIX: &str = "❌ Error en OCR: ";

const TRUNCATION_MARKER: &str = "...\n\n(Texto truncado por longitud)";

/// Compose the reply for one OCR outcome.
///
/// Only the first page is used; further pages are deliberately dropped from
/// the outward-facing reply. Pure: identical input yields identical output.
pub fn compose(result: &OcrResult) -> String {
    if !result.is_success() {
        let error = result.error.as_deref().unwrap_or("desconocido");
        return format!("{OCR_ERROR_PREFIX}{error}");
    }

    let Some(page) = result.pages.first() else {
        return NO_TEXT_MESSAGE.to_string();
    };

    let mut text: String = page.markdown.chars().take(MAX_REPLY_CHARS).collect();
    if page.markdown.chars().count() > MAX_REPLY_CHARS {
        text.push_str(TRUNCATION_MARKER);
    }

    match result.elapsed_secs {
        Some(secs) => format!("{SUCCESS_PREFIX}{text}\n\n⏱️ Tiempo: {secs:.2}s"),
        None => format!("{SUCCESS_PREFIX}{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OcrPage;
    use pretty_assertions::assert_eq;

    fn page(markdown: &str) -> OcrPage {
        OcrPage {
            index: 0,
            markdown: markdown.to_string(),
            dimensions: None,
        }
    }

    #[test]
    fn success_with_timing() {
        let result = OcrResult::success(vec![page("Hello")], 0.42);
        assert_eq!(
            compose(&result),
            "✅ Texto extraído:\n\nHello\n\n⏱️ Tiempo: 0.42s"
        );
    }

    #[test]
    fn success_without_timing_omits_suffix() {
        let result = OcrResult {
            pages: vec![page("Hello")],
            error: None,
            elapsed_secs: None,
        };
        assert_eq!(compose(&result), "✅ Texto extraído:\n\nHello");
    }

    #[test]
    fn short_text_is_not_truncated() {
        let markdown = "a".repeat(MAX_REPLY_CHARS);
        let result = OcrResult::success(vec![page(&markdown)], 1.0);
        let reply = compose(&result);
        assert!(reply.contains(&markdown));
        assert!(!reply.contains("(Texto truncado por longitud)"));
    }

    #[test]
    fn long_text_is_truncated_with_marker() {
        let markdown = "a".repeat(MAX_REPLY_CHARS + 100);
        let result = OcrResult::success(vec![page(&markdown)], 1.0);
        let reply = compose(&result);

        let expected_text = "a".repeat(MAX_REPLY_CHARS);
        assert!(reply.contains(&format!(
            "{expected_text}...\n\n(Texto truncado por longitud)"
        )));
        assert!(!reply.contains(&"a".repeat(MAX_REPLY_CHARS + 1)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // Multi-byte characters must not be split.
        let markdown = "ñ".repeat(MAX_REPLY_CHARS + 1);
        let result = OcrResult::success(vec![page(&markdown)], 1.0);
        let reply = compose(&result);
        assert!(reply.contains(&"ñ".repeat(MAX_REPLY_CHARS)));
        assert!(reply.contains("(Texto truncado por longitud)"));
    }

    #[test]
    fn only_first_page_is_used() {
        let mut second = page("segunda página");
        second.index = 1;
        let result = OcrResult::success(vec![page("primera"), second], 0.5);
        let reply = compose(&result);
        assert!(reply.contains("primera"));
        assert!(!reply.contains("segunda página"));
    }

    #[test]
    fn failure_embeds_error_verbatim_without_timing() {
        let result = OcrResult::failure("API request failed: 401 - unauthorized", 3.0);
        assert_eq!(
            compose(&result),
            "❌ Error en OCR: API request failed: 401 - unauthorized"
        );
    }

    #[test]
    fn success_with_no_pages_reports_no_text() {
        let result = OcrResult::success(vec![], 0.3);
        assert_eq!(compose(&result), NO_TEXT_MESSAGE);
    }

    #[test]
    fn compose_is_idempotent() {
        let result = OcrResult::success(vec![page("Hello")], 0.42);
        assert_eq!(compose(&result), compose(&result));
    }
}

//! Minimal TwiML messaging envelope.
//!
//! The reply wire format is a tiny fixed XML document; this builder only
//! interpolates message text into it, escaping as needed.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// A TwiML `<Response>` wrapping zero or more `<Message>` segments.
#[derive(Debug, Clone, Default)]
pub struct MessagingResponse {
    messages: Vec<String>,
}

impl MessagingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message segment.
    pub fn message(&mut self, text: impl Into<String>) -> &mut Self {
        self.messages.push(text.into());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for text in &self.messages {
            xml.push_str("<Message>");
            xml.push_str(&escape_xml(text));
            xml.push_str("</Message>");
        }
        xml.push_str("</Response>");
        xml
    }
}

impl IntoResponse for MessagingResponse {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, "application/xml")],
            self.to_xml(),
        )
            .into_response()
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

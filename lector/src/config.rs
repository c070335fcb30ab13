use std::env;

use crate::error::{LectorError, Result};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub twilio: TwilioConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// The provider-issued WhatsApp sender number, e.g. `whatsapp:+14155238886`.
    pub whatsapp_number: String,
    /// When false the webhook accepts unauthenticated requests. This is an
    /// explicit trade-off for local development, not an oversight.
    pub validate_signature: bool,
    pub media_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Missing required variables are collected and reported together so a
    /// misconfigured deployment fails fast with the full list.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        let mut required = |var: &'static str| match env::var(var) {
            Ok(val) if !val.is_empty() => val,
            _ => {
                missing.push(var);
                String::new()
            }
        };

        let twilio = TwilioConfig {
            account_sid: required("TWILIO_ACCOUNT_SID"),
            auth_token: required("TWILIO_AUTH_TOKEN"),
            whatsapp_number: required("TWILIO_WHATSAPP_NUMBER"),
            validate_signature: parse_env_or("VALIDATE_TWILIO_SIGNATURE", false),
            media_timeout_secs: parse_env_or("MEDIA_TIMEOUT", 15),
        };

        let ocr = OcrConfig {
            api_key: required("MISTRAL_API_KEY"),
            base_url: env::var("OCR_BASE_URL").ok(),
            model: env::var("OCR_MODEL").unwrap_or_else(|_| "mistral-ocr-latest".to_string()),
            timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
        };

        if !missing.is_empty() {
            return Err(LectorError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            server: ServerConfig {
                host: env::var("LECTOR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("LECTOR_PORT", 8000),
            },
            twilio,
            ocr,
        })
    }
}

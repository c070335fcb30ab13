//! Twilio webhook request signing.
//!
//! Twilio signs each webhook by concatenating the full request URL with every
//! POST parameter (sorted by name, `name` then `value`, no separators),
//! computing an HMAC-SHA1 over the result with the account's auth token, and
//! base64-encoding the digest into the `X-Twilio-Signature` header.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the provider-computed signature.
pub const SIGNATURE_HEADER: &str = "X-Twilio-Signature";

/// Compute the expected signature for a request.
///
/// The `BTreeMap` gives the sorted parameter order the scheme requires.
pub fn sign(auth_token: &str, url: &str, params: &BTreeMap<String, String>) -> Option<String> {
    let mut payload = String::from(url);
    for (name, value) in params {
        payload.push_str(name);
        payload.push_str(value);
    }

    let mut mac = HmacSha1::new_from_slice(auth_token.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify a provider-supplied signature against the recomputed one.
pub fn validate(
    auth_token: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    signature: &str,
) -> bool {
    let Some(expected) = sign(auth_token, url, params) else {
        return false;
    };
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

//! Share-link codec: bundle <-> URL-transportable token.
//!
//! A token is base64 (URL-safe alphabet, no padding) over the UTF-8 bytes of
//! the JSON object `{"markup": .., "style": .., "script": ..}`. Decoding also
//! accepts the standard alphabet and padded input.

use crate::bundle::{PartialBundle, SourceBundle};
use crate::constants::SHARE_QUERY_PARAM;
use crate::error::DecodeError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Serialize;
use std::fmt;

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Opaque token encoding one bundle snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    /// Wrap raw token text (for example a `code` query value) without validating it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize)]
struct SharePayload<'a> {
    markup: &'a str,
    style: &'a str,
    script: &'a str,
}

/// Encode a bundle. Same bundle, same token.
pub fn encode(bundle: &SourceBundle) -> ShareToken {
    let payload = SharePayload {
        markup: &bundle.markup,
        style: &bundle.style,
        script: &bundle.script,
    };
    // A struct of three `&str` fields always serializes.
    let json = serde_json::to_vec(&payload).unwrap_or_default();
    ShareToken(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token back into its (possibly partial) bundle.
///
/// # Errors
/// Returns [`DecodeError`] when the token is not base64, not UTF-8, not JSON,
/// or not a JSON object with string fields. No partial data is returned.
pub fn decode(token: &str) -> Result<PartialBundle, DecodeError> {
    let normalized: String = token
        .trim()
        .chars()
        .map(|ch| match ch {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = LENIENT_URL_SAFE.decode(normalized.as_bytes())?;
    let text = String::from_utf8(bytes)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

/// Decode a token, substituting an empty bundle on failure.
///
/// The failure is logged and otherwise swallowed; callers that need to react
/// to it use [`decode`].
pub fn decode_or_empty(token: &str) -> SourceBundle {
    match decode(token) {
        Ok(partial) => partial.normalize(),
        Err(err) => {
            tracing::warn!("Ignoring malformed share token: {}", err);
            SourceBundle::default()
        }
    }
}

/// Build `<origin><path>?code=<token>`.
///
/// # Arguments
/// - `origin`: Scheme and host; trailing slashes are ignored.
/// - `path`: Editor page path; a leading `/` is added when missing.
/// - `token`: Encoded sources.
pub fn share_url(origin: &str, path: &str, token: &ShareToken) -> String {
    let origin = origin.trim_end_matches('/');
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    format!("{}{}?{}={}", origin, path, SHARE_QUERY_PARAM, token)
}

/// Extract the share token from a raw query string (with or without `?`).
///
/// Percent-escapes are decoded; `+` is kept literally because standard-alphabet
/// tokens contain it. Returns `None` when the parameter is absent or empty.
pub fn token_from_query(query: &str) -> Option<ShareToken> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == SHARE_QUERY_PARAM)
        .map(|(_, value)| percent_decode(value))
        .filter(|value| !value.trim().is_empty())
        .map(ShareToken)
}

/// Extract the share token from a full share URL.
pub fn token_from_url(url: &str) -> Option<ShareToken> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    token_from_query(query)
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

#[cfg(test)]
mod tests;

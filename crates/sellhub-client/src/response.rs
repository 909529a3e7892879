//! Response envelope and uniform error classification.
//!
//! Every operation resolves to the same envelope shape: `{httpCode, body,
//! info?}`. Classification of non-2xx responses happens in exactly one
//! place, [`check_api_error`], so the message cascade (response `message`
//! field, joined `errors` list, full envelope dump) cannot drift between
//! operations.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind, Result};

/// Decoded or raw response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    /// JSON-decoded body.
    Json(Value),
    /// Raw body text.
    Raw(String),
}

impl Body {
    /// Apply the decode policy to a response body.
    ///
    /// The body stays raw only when decoding is disabled AND the status is
    /// exactly 200; every other combination is decoded. (The asymmetry is
    /// long-standing observable behavior and is kept as-is.) Text that is
    /// not valid JSON is retained raw.
    pub(crate) fn decode(http_code: u16, text: String, decode_mode: bool) -> Self {
        if !decode_mode && http_code == 200 {
            return Body::Raw(text);
        }

        match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Raw(text),
        }
    }

    /// The decoded JSON value, if this body was decoded.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Raw(_) => None,
        }
    }

    /// The raw text, if this body was kept raw.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Body::Json(_) => None,
            Body::Raw(text) => Some(text),
        }
    }

    /// Look up a field of a decoded JSON object body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }
}

/// The normalized result of one API call.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// HTTP status code from the transport.
    #[serde(rename = "httpCode")]
    pub http_code: u16,
    /// Response body, decoded per the decode-mode policy.
    pub body: Body,
    /// Transport diagnostics, present only when debug is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Map<String, Value>>,
}

impl Envelope {
    /// Returns true if the status is in [200, 299].
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_code)
    }
}

/// Classify an envelope: 2xx passes through, anything else becomes an
/// [`ErrorKind::Api`] whose message follows the cascade.
pub fn check_api_error(envelope: Envelope) -> Result<Envelope> {
    if envelope.is_success() {
        return Ok(envelope);
    }

    let message = error_message(&envelope);
    Err(Error::new(ErrorKind::Api {
        status: envelope.http_code,
        message,
    }))
}

/// The message cascade: `message` field, else joined `errors` list, else
/// the full serialized envelope.
fn error_message(envelope: &Envelope) -> String {
    if let Some(value) = envelope.body.as_json() {
        match value.get("message") {
            Some(Value::String(message)) => return message.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }

        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            return errors
                .iter()
                .map(|entry| match entry {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n");
        }
    }

    serde_json::to_string(envelope).unwrap_or_else(|_| format!("HTTP {}", envelope.http_code))
}

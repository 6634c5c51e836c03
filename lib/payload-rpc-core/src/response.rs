//! HTTP response handling.
//!
//! [`Response`] is what a transport returns. [`ResponseEnvelope`] is the
//! parsed payload together with the raw text kept for error messages.

use std::collections::HashMap;

use bytes::Bytes;

use crate::APPLICATION_JSON;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(key, value)| key.eq_ignore_ascii_case(name).then_some(value.as_str()))
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Content type announces JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| value.starts_with(APPLICATION_JSON))
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Response body as text, invalid UTF-8 sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// Parsed payload of a response plus its textual form.
///
/// For JSON responses `raw` is the compact re-serialization of `data`; for
/// anything else `data` is a JSON string holding the same text as `raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    data: serde_json::Value,
    raw: String,
}

impl ResponseEnvelope {
    /// Parse a response according to its content type.
    ///
    /// # Errors
    ///
    /// Returns an error if a JSON response does not contain valid JSON.
    pub fn from_response(response: &Response<Bytes>) -> crate::Result<Self> {
        if response.is_json() {
            let data: serde_json::Value = crate::from_json(response.body())?;
            let raw = serde_json::to_string(&data)?;
            Ok(Self { data, raw })
        } else {
            Ok(Self::text(response.text()))
        }
    }

    /// Envelope of a plain-text payload.
    #[must_use]
    pub fn text(text: String) -> Self {
        Self {
            data: serde_json::Value::String(text.clone()),
            raw: text,
        }
    }

    /// Parsed payload.
    #[must_use]
    pub const fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Text form of the payload.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consume into the parsed payload.
    #[must_use]
    pub fn into_data(self) -> serde_json::Value {
        self.data
    }

    /// Consume into the text form.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }
}

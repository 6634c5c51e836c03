//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// MIME type sent with every request and used to detect JSON responses.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use payload_rpc_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Post { title: String }
///
/// let post = Post { title: "Hello".to_string() };
/// let bytes = to_json(&post).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"title":"Hello"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "docs[0].title").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already parsed JSON payload into a typed value.
///
/// # Errors
///
/// Returns an error with the failing path if the payload does not match `T`.
///
/// # Example
///
/// ```
/// use payload_rpc_core::{CountResult, from_value};
///
/// let count: CountResult = from_value(serde_json::json!({"totalDocs": 3})).expect("count");
/// assert_eq!(count.total_docs, 3);
/// ```
pub fn from_value<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

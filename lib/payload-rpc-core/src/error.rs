//! Error types and HTTP status classification.

use derive_more::{Display, Error, From};

// ============================================================================
// Error Kind
// ============================================================================

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// HTTP 401.
    #[display("unauthorized")]
    Unauthorized,
    /// HTTP 403.
    #[display("forbidden")]
    Forbidden,
    /// HTTP 404.
    #[display("not found")]
    NotFound,
    /// Any other non-2xx status.
    #[display("generic")]
    Generic,
    /// The request never completed (DNS, connect, TLS, timeout, abort).
    #[display("transport")]
    Transport,
    /// The request could not be built or the response could not be decoded.
    #[display("local")]
    Local,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for payload-rpc operations.
///
/// HTTP-classified variants carry the raw response text verbatim.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// HTTP 401 response.
    #[display("unauthorized: {_0}")]
    #[from(skip)]
    Unauthorized(#[error(not(source))] String),

    /// HTTP 403 response.
    #[display("forbidden: {_0}")]
    #[from(skip)]
    Forbidden(#[error(not(source))] String),

    /// HTTP 404 response.
    #[display("not found: {_0}")]
    #[from(skip)]
    NotFound(#[error(not(source))] String),

    /// Any other non-2xx response.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response text.
        message: String,
    },

    /// Network, connection or TLS failure: no response was received.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] String),

    /// The transport gave up waiting for a response.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "docs[0].title").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Map a non-2xx status and its raw body text to a classified error.
///
/// 401, 403 and 404 get dedicated variants; every other status becomes
/// [`Error::Http`]. Callers check for success before classifying.
///
/// # Example
///
/// ```
/// use payload_rpc_core::{ErrorKind, classify};
///
/// let err = classify(403, r#"{"errors":[]}"#);
/// assert_eq!(err.kind(), ErrorKind::Forbidden);
/// assert_eq!(err.message(), Some(r#"{"errors":[]}"#));
/// ```
#[must_use]
pub fn classify(status: u16, raw: impl Into<String>) -> Error {
    let raw = raw.into();
    match status {
        401 => Error::Unauthorized(raw),
        403 => Error::Forbidden(raw),
        404 => Error::NotFound(raw),
        status => Error::Http {
            status,
            message: raw,
        },
    }
}

impl Error {
    /// Create a generic HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Http { .. } => ErrorKind::Generic,
            Self::Transport(_) | Self::Timeout => ErrorKind::Transport,
            Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::JsonDeserialization { .. }
            | Self::InvalidUrl(_) => ErrorKind::Local,
        }
    }

    /// Returns `true` if no response was ever received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns the HTTP status code if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response text if this error came from a response.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(raw) | Self::Forbidden(raw) | Self::NotFound(raw) => Some(raw),
            Self::Http { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Try to decode the raw response text as JSON.
    ///
    /// Returns `None` when this error did not come from a response.
    pub fn decode_message<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.message().map(|raw| crate::from_json(raw.as_bytes()))
    }
}

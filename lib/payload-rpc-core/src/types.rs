//! Standard response and request shapes of the backend.
//!
//! Every operation is generic over its result type, so these are optional:
//! `serde_json::Value` works everywhere.

use serde::{Deserialize, Serialize};

/// Paginated documents returned by `find`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResult<D> {
    /// Documents of this page.
    pub docs: Vec<D>,
    /// Number of matching documents.
    pub total_docs: u64,
    /// Page size.
    pub limit: u64,
    /// Number of pages.
    pub total_pages: u64,
    /// Current page, 1-based.
    #[serde(default)]
    pub page: Option<u64>,
    /// Index of the first document of the page, 1-based.
    pub paging_counter: u64,
    /// Whether a previous page exists.
    pub has_prev_page: bool,
    /// Whether a next page exists.
    pub has_next_page: bool,
    /// Previous page number.
    #[serde(default)]
    pub prev_page: Option<u64>,
    /// Next page number.
    #[serde(default)]
    pub next_page: Option<u64>,
}

/// Result of `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResult {
    /// Number of matching documents.
    pub total_docs: u64,
}

/// A single document with a status message (`create`, `update_by_id`, `delete_by_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMessage<D> {
    /// Status message.
    pub message: String,
    /// The document.
    pub doc: D,
}

/// Outcome of a bulk `update` or `delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResult<D> {
    /// Affected documents.
    pub docs: Vec<D>,
    /// Per-document failures.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Bare status message (`logout`, `unlock`, `forgot_password`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResult {
    /// Status message.
    pub message: String,
}

/// Result of `login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResult<D> {
    /// Status message.
    pub message: String,
    /// The user document.
    pub user: D,
    /// Token.
    pub token: String,
    /// Token expiry, seconds since the epoch.
    pub exp: i64,
}

/// User reference returned by `refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    /// User id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Auth collection slug.
    pub collection: String,
}

/// Result of `refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResult {
    /// Status message.
    pub message: String,
    /// The new token.
    pub refreshed_token: String,
    /// Token expiry, seconds since the epoch.
    pub exp: i64,
    /// The token owner.
    pub user: TokenUser,
}

/// Result of `me`. `user` is `None` when the request is anonymous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeResult<D> {
    /// Auth collection slug.
    #[serde(default)]
    pub collection: Option<String>,
    /// The authenticated user.
    pub user: Option<D>,
    /// Current token.
    #[serde(default)]
    pub token: Option<String>,
    /// Token expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Result of `reset_password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetPasswordResult<D> {
    /// Status message.
    pub message: String,
    /// The user document.
    pub user: D,
    /// Token.
    pub token: String,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Email and password pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `unlock` and `forgot_password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Email address.
    pub email: String,
}

impl EmailRequest {
    /// Body for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Body of `reset_password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Token.
    pub token: String,
    /// Password.
    pub password: String,
}

impl ResetPasswordRequest {
    /// Reset token and the new password.
    #[must_use]
    pub fn new(token: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            password: password.into(),
        }
    }
}

//! Request descriptors and wire-level HTTP requests.
//!
//! A [`RequestDescriptor`] is what an operation resolves to: method, path
//! segments, encoded query and optional JSON body. The dispatcher turns it into
//! a [`Request`] for the transport.
//!
//! # Example
//!
//! ```
//! use payload_rpc_core::{EntityKind, Method, RequestDescriptor};
//!
//! let descriptor = RequestDescriptor::new(Method::Get, ["posts", "42"])
//!     .entity(EntityKind::Collection, "posts")
//!     .query("depth=0");
//!
//! assert_eq!(
//!     descriptor.url("https://cms.example.com/api/"),
//!     "https://cms.example.com/api/posts/42?depth=0"
//! );
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use derive_more::Display;

use crate::Method;

/// The kind of entity a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntityKind {
    /// A document collection.
    #[display("collection")]
    Collection,
    /// A singleton global.
    #[display("global")]
    Global,
    /// A user-declared custom endpoint.
    #[display("custom")]
    Custom,
}

/// Cache mode requested from the transport, named after the fetch cache modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CachePolicy {
    /// `default`
    #[display("default")]
    Default,
    /// `no-store`
    #[display("no-store")]
    NoStore,
    /// `reload`
    #[display("reload")]
    Reload,
    /// `no-cache`
    #[display("no-cache")]
    NoCache,
    /// `force-cache`
    #[display("force-cache")]
    ForceCache,
    /// `only-if-cached`
    #[display("only-if-cached")]
    OnlyIfCached,
}

impl CachePolicy {
    /// `Cache-Control` request directive for transports without a cache of
    /// their own.
    #[must_use]
    pub const fn cache_control(&self) -> Option<&'static str> {
        match self {
            Self::NoStore => Some("no-store"),
            Self::NoCache | Self::Reload => Some("no-cache"),
            Self::Default | Self::ForceCache | Self::OnlyIfCached => None,
        }
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// Fully resolved method, path, query and body of one outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    kind: Option<EntityKind>,
    slug: Option<String>,
    method: Method,
    path: Vec<String>,
    query: String,
    body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    /// Descriptor with no entity, query or body.
    #[must_use]
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: None,
            slug: None,
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: String::new(),
            body: None,
        }
    }

    /// Tag the entity this request targets.
    #[must_use]
    pub fn entity(mut self, kind: EntityKind, slug: impl Into<String>) -> Self {
        self.kind = Some(kind);
        self.slug = Some(slug.into());
        self
    }

    /// Set the already encoded query string (without `?`).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the JSON body. `null` leaves the descriptor without a body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body).filter(|body| !body.is_null());
        self
    }

    /// Entity kind, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        self.kind
    }

    /// Entity slug, if any.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.path
    }

    /// Encoded query string, empty when there is none.
    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.query
    }

    /// JSON body.
    #[must_use]
    pub const fn json_body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Option<serde_json::Value> {
        self.body
    }

    /// Full URL below `base_url`, joined with exactly one `/`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let path = self.path.join("/");
        let path = path.trim_start_matches('/');

        if self.query.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{path}?{}", self.query)
        }
    }
}

// ============================================================================
// Wire request
// ============================================================================

/// An HTTP request with method, URL, headers, and optional body.
///
/// Header names are stored lowercase so later values replace earlier ones
/// regardless of their spelling.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    cache: Option<CachePolicy>,
    options: serde_json::Map<String, serde_json::Value>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers, keyed by lowercase name.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Requested cache mode.
    #[must_use]
    pub const fn cache(&self) -> Option<CachePolicy> {
        self.cache
    }

    /// Transport-specific options supplied by the request hook.
    #[must_use]
    pub fn options(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.options
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    cache: Option<CachePolicy>,
    options: serde_json::Map<String, serde_json::Value>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
            cache: None,
            options: serde_json::Map::new(),
        }
    }

    /// Replaces the method.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a header, replacing any previous value for that name.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers<K, V>(self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Sets the cache mode.
    #[must_use]
    pub const fn cache(mut self, cache: Option<CachePolicy>) -> Self {
        self.cache = cache;
        self
    }

    /// Merges transport-specific options, later keys win.
    #[must_use]
    pub fn options(mut self, options: serde_json::Map<String, serde_json::Value>) -> Self {
        self.options.extend(options);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            cache: self.cache,
            options: self.options,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", crate::APPLICATION_JSON).body(body))
    }
}

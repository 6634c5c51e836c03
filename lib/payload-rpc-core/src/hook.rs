//! Per-request augmentation hook.
//!
//! The hook sees where a request is going and may return
//! [`RequestOverrides`] that are applied on top of the dispatcher's own
//! method, cache mode and headers.

use std::sync::Arc;

use crate::{CachePolicy, EntityKind, Method};

/// What the hook gets to see about a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookContext<'a> {
    /// Entity kind, `None` for entity-less requests such as `access`.
    pub kind: Option<EntityKind>,
    /// Entity slug or custom endpoint name.
    pub slug: Option<&'a str>,
    /// HTTP method before overrides.
    pub method: Method,
    /// Full URL including the query string.
    pub url: &'a str,
}

/// Options returned by the hook. Set fields win over the dispatcher's values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides {
    /// Replacement method.
    pub method: Option<Method>,
    /// Replacement cache mode.
    pub cache: Option<CachePolicy>,
    /// Extra headers, replacing same-named ones.
    pub headers: Vec<(String, String)>,
    /// Free-form options forwarded to the transport (e.g. cache tags).
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl RequestOverrides {
    /// Empty overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the method.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Override the cache mode.
    #[must_use]
    pub const fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a transport option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Shared hook callback.
pub type RequestHook = Arc<dyn Fn(&HookContext<'_>) -> Option<RequestOverrides> + Send + Sync>;

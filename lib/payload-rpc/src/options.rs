//! Client options: where the backend lives and how every request is shaped.
//!
//! [`ClientOptions`] is built once and shared read-only by every handle the
//! client hands out.
//!
//! # Example
//!
//! ```
//! use payload_rpc::{CachePolicy, ClientOptions, Method};
//!
//! let options = ClientOptions::builder("https://cms.example.com/api")
//!     .header("Authorization", "users JWT abc")
//!     .cache(CachePolicy::NoStore)
//!     .auth_collection("users")
//!     .custom_endpoint("health", Method::Get, |_| "/health".to_string())
//!     .build()
//!     .expect("valid options");
//!
//! assert!(options.is_auth_collection("users"));
//! assert!(options.custom_endpoint("health").is_some());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use payload_rpc_core::{CachePolicy, HookContext, Method, RequestHook, RequestOverrides};

use crate::Result;

/// Parameters substituted into a custom endpoint's path.
pub type PathParams = HashMap<String, String>;

/// Builds a custom endpoint's path from its parameters.
pub type PathFn = Arc<dyn Fn(&PathParams) -> String + Send + Sync>;

/// A declared custom endpoint: fixed method, path computed per call.
#[derive(Clone)]
pub struct CustomEndpoint {
    method: Method,
    path: PathFn,
}

impl CustomEndpoint {
    /// Declare an endpoint.
    pub fn new<F>(method: Method, path: F) -> Self
    where
        F: Fn(&PathParams) -> String + Send + Sync + 'static,
    {
        Self {
            method,
            path: Arc::new(path),
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path for the given parameters.
    #[must_use]
    pub fn path(&self, params: &PathParams) -> String {
        (self.path)(params)
    }
}

impl fmt::Debug for CustomEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomEndpoint")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Immutable client configuration.
#[derive(Clone)]
pub struct ClientOptions {
    base_url: String,
    cache: Option<CachePolicy>,
    headers: Vec<(String, String)>,
    debug: bool,
    request_hook: Option<RequestHook>,
    custom_endpoints: Option<BTreeMap<String, CustomEndpoint>>,
    auth_collections: BTreeSet<String>,
}

impl ClientOptions {
    /// Start building options for the backend at `base_url`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ClientOptionsBuilder {
        ClientOptionsBuilder::new(base_url)
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cache mode requested for every call.
    #[must_use]
    pub const fn cache(&self) -> Option<CachePolicy> {
        self.cache
    }

    /// Headers sent with every call, in declaration order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether each dispatch is logged.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// The request hook, if any.
    #[must_use]
    pub fn request_hook(&self) -> Option<&RequestHook> {
        self.request_hook.as_ref()
    }

    /// Whether custom endpoints were declared at all.
    #[must_use]
    pub const fn has_custom_endpoints(&self) -> bool {
        self.custom_endpoints.is_some()
    }

    /// A declared custom endpoint.
    #[must_use]
    pub fn custom_endpoint(&self, name: &str) -> Option<&CustomEndpoint> {
        self.custom_endpoints.as_ref()?.get(name)
    }

    /// Names of the declared custom endpoints, sorted.
    pub fn custom_endpoint_names(&self) -> impl Iterator<Item = &str> {
        self.custom_endpoints
            .iter()
            .flat_map(BTreeMap::keys)
            .map(String::as_str)
    }

    /// Whether `slug` was declared authenticatable.
    #[must_use]
    pub fn is_auth_collection(&self, slug: &str) -> bool {
        self.auth_collections.contains(slug)
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .field("headers", &self.headers)
            .field("debug", &self.debug)
            .field("request_hook", &self.request_hook.is_some())
            .field("custom_endpoints", &self.custom_endpoints)
            .field("auth_collections", &self.auth_collections)
            .finish()
    }
}

/// Builder for [`ClientOptions`].
pub struct ClientOptionsBuilder {
    base_url: String,
    cache: Option<CachePolicy>,
    headers: Vec<(String, String)>,
    debug: bool,
    request_hook: Option<RequestHook>,
    custom_endpoints: Option<BTreeMap<String, CustomEndpoint>>,
    auth_collections: BTreeSet<String>,
}

impl ClientOptionsBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache: None,
            headers: Vec::new(),
            debug: false,
            request_hook: None,
            custom_endpoints: None,
            auth_collections: BTreeSet::new(),
        }
    }

    /// Cache mode for every call.
    #[must_use]
    pub const fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Add a header sent with every call.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers.
    #[must_use]
    pub fn headers<K, V>(self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Log every dispatch at `INFO` on target `payload_rpc::dispatch`.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Hook called before every request; its overrides win.
    #[must_use]
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> Option<RequestOverrides> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    /// Declare a custom endpoint. A later declaration with the same name wins.
    #[must_use]
    pub fn custom_endpoint<F>(self, name: impl Into<String>, method: Method, path: F) -> Self
    where
        F: Fn(&PathParams) -> String + Send + Sync + 'static,
    {
        self.custom_endpoints([(name.into(), CustomEndpoint::new(method, path))])
    }

    /// Declare custom endpoints. An empty iterator still enables the registry.
    #[must_use]
    pub fn custom_endpoints(
        mut self,
        endpoints: impl IntoIterator<Item = (String, CustomEndpoint)>,
    ) -> Self {
        self.custom_endpoints
            .get_or_insert_with(BTreeMap::new)
            .extend(endpoints);
        self
    }

    /// Declare `slug` as an authenticatable collection.
    #[must_use]
    pub fn auth_collection(mut self, slug: impl Into<String>) -> Self {
        self.auth_collections.insert(slug.into());
        self
    }

    /// Validate and build the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) when the base URL
    /// does not parse.
    pub fn build(self) -> Result<ClientOptions> {
        url::Url::parse(&self.base_url)?;

        Ok(ClientOptions {
            base_url: self.base_url,
            cache: self.cache,
            headers: self.headers,
            debug: self.debug,
            request_hook: self.request_hook,
            custom_endpoints: self.custom_endpoints,
            auth_collections: self.auth_collections,
        })
    }
}

impl fmt::Debug for ClientOptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptionsBuilder")
            .field("base_url", &self.base_url)
            .field("request_hook", &self.request_hook.is_some())
            .finish_non_exhaustive()
    }
}

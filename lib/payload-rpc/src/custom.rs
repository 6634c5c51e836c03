//! Calls to user-declared custom endpoints.
//!
//! Endpoints are declared on
//! [`ClientOptionsBuilder::custom_endpoint`](crate::ClientOptionsBuilder::custom_endpoint)
//! with a method and a function building the path from [`PathParams`].

use payload_rpc_core::{EntityKind, QueryMap, RequestDescriptor, Transport, encode};
use serde::de::DeserializeOwned;

use crate::{Dispatcher, Error, PathParams, Result};

/// Path parameters, query and body of one custom endpoint call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomInput {
    params: Option<PathParams>,
    query: Option<QueryMap>,
    body: Option<serde_json::Value>,
}

impl CustomInput {
    /// Empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a path parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(PathParams::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the path parameters.
    #[must_use]
    pub fn params(mut self, params: PathParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Query parameters, encoded like every other operation's.
    #[must_use]
    pub fn query(mut self, query: impl Into<QueryMap>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// JSON body, sent verbatim.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Registry of the declared custom endpoints.
pub struct CustomEndpoints<T> {
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for CustomEndpoints<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<T> std::fmt::Debug for CustomEndpoints<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomEndpoints").finish_non_exhaustive()
    }
}

impl<T: Transport> CustomEndpoints<T> {
    pub(crate) const fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// Declared endpoint names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dispatcher.options().custom_endpoint_names()
    }

    /// Whether `name` was declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dispatcher.options().custom_endpoint(name).is_some()
    }

    /// Descriptor of a call to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when `name` was never declared.
    pub fn descriptor(&self, name: &str, input: CustomInput) -> Result<RequestDescriptor> {
        let endpoint = self
            .dispatcher
            .options()
            .custom_endpoint(name)
            .ok_or_else(|| Error::invalid_request(format!("unknown custom endpoint: {name}")))?;

        let path = endpoint.path(&input.params.unwrap_or_default());
        let mut descriptor = RequestDescriptor::new(endpoint.method(), [path])
            .entity(EntityKind::Custom, name)
            .query(encode(input.query.as_ref()));
        if let Some(body) = input.body {
            descriptor = descriptor.body(body);
        }
        Ok(descriptor)
    }

    /// Call the endpoint `name`.
    pub async fn call<R: DeserializeOwned>(&self, name: &str, input: CustomInput) -> Result<R> {
        let descriptor = self.descriptor(name, input)?;
        self.dispatcher.call(descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use payload_rpc_core::Method;
    use serde_json::{Value, json};

    use super::*;
    use crate::ClientOptions;
    use crate::testing::RecordingTransport;

    fn endpoints(transport: &RecordingTransport) -> CustomEndpoints<RecordingTransport> {
        let options = ClientOptions::builder("http://localhost:3000/api")
            .custom_endpoint("postBySlug", Method::Get, |params| {
                format!(
                    "/posts/by-slug/{}",
                    params.get("slug").map_or("missing", String::as_str)
                )
            })
            .custom_endpoint("publish", Method::Post, |_| "posts/publish".to_string())
            .build()
            .expect("options");
        CustomEndpoints::new(Dispatcher::new(options, transport.clone()))
    }

    #[tokio::test]
    async fn path_params_and_query() {
        let transport = RecordingTransport::json(200, json!({"id": "1"}));
        let endpoints = endpoints(&transport);

        let input = CustomInput::new()
            .param("slug", "hello-world")
            .query(QueryMap::new().with("depth", 1));
        let_assert!(Ok(_) = endpoints.call::<Value>("postBySlug", input).await);

        check!(transport.last_request().method() == Method::Get);
        check!(
            transport.last_url() == "http://localhost:3000/api/posts/by-slug/hello-world?depth=1"
        );
        check!(transport.last_body().is_none());
    }

    #[tokio::test]
    async fn missing_params_get_an_empty_map() {
        let transport = RecordingTransport::json(200, json!({}));
        let endpoints = endpoints(&transport);

        let_assert!(Ok(_) = endpoints.call::<Value>("postBySlug", CustomInput::new()).await);
        check!(transport.last_url() == "http://localhost:3000/api/posts/by-slug/missing");
    }

    #[tokio::test]
    async fn body_is_sent_verbatim() {
        let transport = RecordingTransport::json(200, json!({}));
        let endpoints = endpoints(&transport);

        let input = CustomInput::new().body(json!({"ids": ["1", "2"], "at": null}));
        let_assert!(Ok(_) = endpoints.call::<Value>("publish", input).await);

        check!(transport.last_request().method() == Method::Post);
        check!(transport.last_url() == "http://localhost:3000/api/posts/publish");
        check!(transport.last_body() == Some(json!({"ids": ["1", "2"], "at": null})));
    }

    #[test]
    fn descriptor_is_tagged_custom() {
        let transport = RecordingTransport::json(200, json!({}));
        let endpoints = endpoints(&transport);

        let_assert!(Ok(descriptor) = endpoints.descriptor("publish", CustomInput::new()));
        check!(descriptor.kind() == Some(EntityKind::Custom));
        check!(descriptor.slug() == Some("publish"));
        check!(endpoints.names().collect::<Vec<_>>() == ["postBySlug", "publish"]);
    }

    #[tokio::test]
    async fn unknown_endpoint_fails_without_calling() {
        let transport = RecordingTransport::json(200, json!({}));
        let endpoints = endpoints(&transport);

        let_assert!(Err(err) = endpoints.call::<Value>("nope", CustomInput::new()).await);
        check!(matches!(err, Error::InvalidRequest(_)));
        check!(!endpoints.contains("nope"));
        check!(transport.calls() == 0);
    }
}

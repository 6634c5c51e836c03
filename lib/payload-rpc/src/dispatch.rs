//! The single request pipeline shared by every operation.
//!
//! A [`Dispatcher`] turns a [`RequestDescriptor`] into one transport call:
//! build the URL, let the request hook adjust the request, send it, parse the
//! response, and classify non-2xx statuses into errors.

use std::sync::Arc;

use payload_rpc_core::{
    APPLICATION_JSON, HookContext, Request, RequestDescriptor, ResponseEnvelope, Transport,
    classify, from_value, header, to_json,
};
use serde::de::DeserializeOwned;

use crate::{ClientOptions, Result};

struct Shared<T> {
    options: ClientOptions,
    transport: T,
}

/// Executes request descriptors against the configured backend.
///
/// Cloning is cheap: the options and transport sit behind one [`Arc`].
pub struct Dispatcher<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("options", &self.shared.options)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Dispatcher over `transport`.
    pub fn new(options: ClientOptions, transport: T) -> Self {
        Self {
            shared: Arc::new(Shared { options, transport }),
        }
    }

    /// The options every request is built from.
    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.shared.options
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.shared.transport
    }

    /// Send `descriptor` and return the parsed response.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`](crate::Error::Transport) or
    ///   [`Error::Timeout`](crate::Error::Timeout) when no response arrived
    /// - the classified HTTP error for a non-2xx status, carrying the raw body
    /// - [`Error::JsonDeserialization`](crate::Error::JsonDeserialization) when
    ///   a 2xx JSON response does not parse
    pub async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<ResponseEnvelope> {
        let options = self.options();
        let url = descriptor.url(options.base_url());
        let kind = descriptor.kind();
        let slug = descriptor.slug().map(str::to_owned);

        let overrides = options.request_hook().and_then(|hook| {
            hook(&HookContext {
                kind,
                slug: slug.as_deref(),
                method: descriptor.method(),
                url: &url,
            })
        });

        let mut builder = Request::builder(descriptor.method(), url::Url::parse(&url)?)
            .cache(options.cache())
            .headers(
                options
                    .headers()
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .header(header::CONTENT_TYPE, APPLICATION_JSON);

        if let Some(overrides) = &overrides {
            if let Some(method) = overrides.method {
                builder = builder.method(method);
            }
            if let Some(cache) = overrides.cache {
                builder = builder.cache(Some(cache));
            }
            builder = builder
                .headers(
                    overrides
                        .headers
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                )
                .options(overrides.options.clone());
        }

        if let Some(body) = descriptor.into_body() {
            builder = builder.body(to_json(&body)?);
        }

        let request = builder.build();
        let method = request.method();
        let result = self.shared.transport.execute(request).await;

        if options.debug() {
            match &result {
                Ok(response) => tracing::info!(
                    target: "payload_rpc::dispatch",
                    kind = ?kind,
                    slug = ?slug,
                    overrides = ?overrides,
                    %method,
                    %url,
                    status = response.status(),
                    "dispatch"
                ),
                Err(err) => tracing::info!(
                    target: "payload_rpc::dispatch",
                    kind = ?kind,
                    slug = ?slug,
                    overrides = ?overrides,
                    %method,
                    %url,
                    error = %err,
                    "dispatch"
                ),
            }
        }

        let response = result?;
        let envelope = match ResponseEnvelope::from_response(&response) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => ResponseEnvelope::text(response.text()),
            Err(err) => return Err(err),
        };

        if response.is_success() {
            Ok(envelope)
        } else {
            Err(classify(response.status(), envelope.into_raw()))
        }
    }

    /// Send `descriptor` and deserialize the payload into `R`.
    ///
    /// # Errors
    ///
    /// Everything [`dispatch`](Self::dispatch) returns, plus
    /// [`Error::JsonDeserialization`](crate::Error::JsonDeserialization) when
    /// the payload does not match `R`.
    pub async fn call<R: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<R> {
        let envelope = self.dispatch(descriptor).await?;
        from_value(envelope.into_data())
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use payload_rpc_core::{CachePolicy, EntityKind, ErrorKind, Method, RequestOverrides};
    use serde_json::json;

    use super::*;
    use crate::Error;
    use crate::testing::{CapturedLogs, RecordingTransport, options};

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new(Method::Get, ["posts"]).entity(EntityKind::Collection, "posts")
    }

    #[tokio::test]
    async fn sends_configured_headers_and_content_type() {
        let transport = RecordingTransport::json(200, json!({"docs": []}));
        let options = ClientOptions::builder("http://localhost:3000/api/")
            .header("Authorization", "users JWT abc")
            .cache(CachePolicy::NoStore)
            .build()
            .expect("options");
        let dispatcher = Dispatcher::new(options, transport.clone());

        let_assert!(Ok(envelope) = dispatcher.dispatch(descriptor()).await);
        check!(envelope.data() == &json!({"docs": []}));

        let request = transport.last_request();
        check!(request.url().as_str() == "http://localhost:3000/api/posts");
        check!(request.method() == Method::Get);
        check!(request.header("authorization") == Some("users JWT abc"));
        check!(request.header("content-type") == Some("application/json"));
        check!(request.cache() == Some(CachePolicy::NoStore));
        check!(request.body().is_none());
    }

    #[tokio::test]
    async fn body_is_serialized_json() {
        let transport = RecordingTransport::json(201, json!({"message": "ok"}));
        let dispatcher = Dispatcher::new(options(), transport.clone());

        let descriptor = RequestDescriptor::new(Method::Post, ["users"])
            .body(json!({"email": "a@b.com"}));
        let_assert!(Ok(_) = dispatcher.dispatch(descriptor).await);

        check!(transport.last_body() == Some(json!({"email": "a@b.com"})));
    }

    #[tokio::test]
    async fn hook_overrides_win() {
        let transport = RecordingTransport::json(200, json!({}));
        let options = ClientOptions::builder("http://localhost/api")
            .header("x-tenant", "base")
            .cache(CachePolicy::Default)
            .request_hook(|ctx| {
                (ctx.kind == Some(EntityKind::Collection) && ctx.slug == Some("posts")).then(|| {
                    RequestOverrides::new()
                        .method(Method::Post)
                        .cache(CachePolicy::ForceCache)
                        .header("X-Tenant", "hook")
                        .header("Content-Type", "application/vnd.api+json")
                        .option("next", json!({"revalidate": 60}))
                })
            })
            .build()
            .expect("options");
        let dispatcher = Dispatcher::new(options, transport.clone());

        let_assert!(Ok(_) = dispatcher.dispatch(descriptor()).await);

        let request = transport.last_request();
        check!(request.method() == Method::Post);
        check!(request.cache() == Some(CachePolicy::ForceCache));
        check!(request.header("x-tenant") == Some("hook"));
        check!(request.header("content-type") == Some("application/vnd.api+json"));
        check!(request.options()["next"] == json!({"revalidate": 60}));
    }

    #[tokio::test]
    async fn hook_sees_full_url() {
        let transport = RecordingTransport::json(200, json!({}));
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        let options = ClientOptions::builder("http://localhost/api")
            .request_hook(move |ctx| {
                sink.lock()
                    .expect("lock")
                    .push((ctx.kind, ctx.method, ctx.url.to_string()));
                None
            })
            .build()
            .expect("options");
        let dispatcher = Dispatcher::new(options, transport);

        let_assert!(Ok(_) = dispatcher.dispatch(descriptor().query("depth=1")).await);

        let seen = seen.lock().expect("lock");
        check!(
            *seen
                == [(
                    Some(EntityKind::Collection),
                    Method::Get,
                    "http://localhost/api/posts?depth=1".to_string()
                )]
        );
    }

    #[tokio::test]
    async fn non_success_json_is_classified_with_compact_text() {
        let transport = RecordingTransport::raw(
            403,
            "application/json",
            "{ \"errors\": [ { \"message\": \"You are not allowed to perform this action.\" } ] }",
        );
        let dispatcher = Dispatcher::new(options(), transport);

        let_assert!(Err(err) = dispatcher.dispatch(descriptor()).await);
        let_assert!(Error::Forbidden(message) = err);
        check!(message == r#"{"errors":[{"message":"You are not allowed to perform this action."}]}"#);
    }

    #[tokio::test]
    async fn non_success_text_is_generic() {
        let transport = RecordingTransport::raw(502, "text/html", "<h1>Bad Gateway</h1>");
        let dispatcher = Dispatcher::new(options(), transport);

        let_assert!(Err(err) = dispatcher.dispatch(descriptor()).await);
        check!(err.kind() == ErrorKind::Generic);
        check!(err.status() == Some(502));
        check!(err.message() == Some("<h1>Bad Gateway</h1>"));
    }

    #[tokio::test]
    async fn broken_json_error_body_falls_back_to_text() {
        let transport = RecordingTransport::raw(500, "application/json", "Internal Server Error");
        let dispatcher = Dispatcher::new(options(), transport);

        let_assert!(Err(Error::Http { status, message }) = dispatcher.dispatch(descriptor()).await);
        check!(status == 500);
        check!(message == "Internal Server Error");
    }

    #[tokio::test]
    async fn broken_json_success_body_fails() {
        let transport = RecordingTransport::raw(200, "application/json", "{\"docs\": [");
        let dispatcher = Dispatcher::new(options(), transport);

        let_assert!(Err(err) = dispatcher.dispatch(descriptor()).await);
        check!(matches!(err, Error::JsonDeserialization { .. }));
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_http_error() {
        let transport = RecordingTransport::failing("connection refused");
        let dispatcher = Dispatcher::new(options(), transport.clone());

        let_assert!(Err(err) = dispatcher.dispatch(descriptor()).await);
        check!(err.is_transport());
        check!(err.status().is_none());
        check!(transport.calls() == 1);
    }

    #[tokio::test]
    async fn call_deserializes_payload() {
        #[derive(Debug, serde::Deserialize)]
        struct Count {
            #[serde(rename = "totalDocs")]
            total_docs: u64,
        }

        let transport = RecordingTransport::json(200, json!({"totalDocs": 42}));
        let dispatcher = Dispatcher::new(options(), transport);

        let_assert!(Ok(count) = dispatcher.call::<Count>(descriptor()).await);
        check!(count.total_docs == 42);
    }

    #[tokio::test]
    async fn exactly_one_transport_call() {
        let transport = RecordingTransport::raw(404, "application/json", r#"{"errors":[]}"#);
        let dispatcher = Dispatcher::new(options(), transport.clone());

        let_assert!(Err(err) = dispatcher.dispatch(descriptor()).await);
        check!(err.is_not_found());
        check!(transport.calls() == 1);
    }

    const DISPATCH_TARGET: &str = "payload_rpc::dispatch";

    fn debug_options(debug: bool) -> ClientOptions {
        ClientOptions::builder("http://localhost:3000/api")
            .debug(debug)
            .build()
            .expect("options")
    }

    #[tokio::test]
    async fn debug_emits_one_event_per_call() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = RecordingTransport::json(200, json!({"docs": []}));
        let dispatcher = Dispatcher::new(debug_options(true), transport);

        let_assert!(Ok(_) = dispatcher.dispatch(descriptor().query("depth=1")).await);

        let events = logs.events(DISPATCH_TARGET);
        let_assert!([event] = events.as_slice());
        check!(event["level"] == "INFO");
        check!(event["message"] == "dispatch");
        check!(event["kind"] == "Some(Collection)");
        check!(event["slug"] == r#"Some("posts")"#);
        check!(event["method"] == "GET");
        check!(event["url"] == "http://localhost:3000/api/posts?depth=1");
        check!(event["status"] == 200);
    }

    #[tokio::test]
    async fn debug_event_carries_transport_error() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = RecordingTransport::failing("connection refused");
        let dispatcher = Dispatcher::new(debug_options(true), transport);

        let_assert!(Err(_) = dispatcher.dispatch(descriptor()).await);

        let events = logs.events(DISPATCH_TARGET);
        let_assert!([event] = events.as_slice());
        check!(event.get("status").is_none());
        let_assert!(Some(error) = event["error"].as_str());
        check!(error.contains("connection refused"));
    }

    #[tokio::test]
    async fn no_event_without_debug() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let transport = RecordingTransport::json(200, json!({}));
        let dispatcher = Dispatcher::new(debug_options(false), transport.clone());

        let_assert!(Ok(_) = dispatcher.dispatch(descriptor()).await);
        let_assert!(Ok(_) = dispatcher.dispatch(descriptor()).await);

        check!(transport.calls() == 2);
        check!(logs.events(DISPATCH_TARGET).is_empty());
    }
}

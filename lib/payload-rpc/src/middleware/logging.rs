//! Request/response logging middleware.
//!
//! Logs each request on the transport using the `tracing` crate. Credential
//! headers are redacted in debug output.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED_HEADERS: [&str; 3] = ["authorization", "cookie", "x-api-key"];

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```
/// use payload_rpc::HyperClient;
/// use payload_rpc::middleware::LoggingLayer;
///
/// let transport = HyperClient::builder().layer(LoggingLayer::debug()).build();
/// # let _ = transport;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request headers, cache mode).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

fn redacted_headers(request: &Request<Bytes>) -> BTreeMap<&str, &str> {
    request
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_HEADERS.contains(&name.as_str()) {
                "[redacted]"
            } else {
                value.as_str()
            };
            (name.as_str(), value)
        })
        .collect()
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();

        let span = span!(Level::INFO, "payload_request", %method, %url);

        match self.level {
            LogLevel::Debug => {
                debug!(
                    parent: &span,
                    headers = ?redacted_headers(&request),
                    cache = ?request.cache(),
                    body_len = request.body().map_or(0, Bytes::len),
                    "sending request"
                );
            }
            LogLevel::Info => info!(parent: &span, "sending request"),
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Ok(response) => {
                        warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
                    }
                    Err(err) => {
                        warn!(error = %err, kind = %err.kind(), elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

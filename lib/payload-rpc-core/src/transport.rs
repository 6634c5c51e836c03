//! Transport trait.
//!
//! - [`Transport`] - executes one HTTP request
//! - [`FnTransport`] - adapts an async closure into a [`Transport`]
//!
//! The default implementation lives in the `payload-rpc` crate (`HyperClient`).
//! Implement [`Transport`] directly for custom clients or for testing.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Executes HTTP requests on behalf of the dispatcher.
///
/// Implementations must report failures that happened before a response was
/// received as [`Error::Transport`](crate::Error::Transport) or
/// [`Error::Timeout`](crate::Error::Timeout). Any response, whatever its
/// status, is returned as `Ok`.
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - DNS or connection errors
    /// - TLS errors
    /// - Timeouts or aborts
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// A [`Transport`] backed by an async closure.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use payload_rpc_core::{Request, Response, Transport, transport_fn};
///
/// let transport = transport_fn(|request: Request<Bytes>| async move {
///     let body = Bytes::from(request.url().path().to_string());
///     Ok(Response::new(200, HashMap::new(), body))
/// });
/// # let _ = &transport;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnTransport<F>(F);

/// Wrap an async closure as a [`Transport`].
pub const fn transport_fn<F, Fut>(f: F) -> FnTransport<F>
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<Bytes>>> + Send,
{
    FnTransport(f)
}

impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<Bytes>>> + Send,
{
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (self.0)(request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{Error, Method};

    #[tokio::test]
    async fn closure_transport_executes() {
        let transport = transport_fn(|request: Request<Bytes>| async move {
            assert_eq!(request.method(), Method::Delete);
            Ok(Response::new(204, HashMap::new(), Bytes::new()))
        });

        let url = url::Url::parse("http://localhost/api/posts/1").expect("valid URL");
        let response = transport
            .execute(Request::builder(Method::Delete, url).build())
            .await
            .expect("response");
        assert_eq!(response.status(), 204);
    }

    #[tokio::test]
    async fn closure_transport_failure() {
        let transport =
            transport_fn(|_request: Request<Bytes>| async { Err(Error::transport("refused")) });

        let url = url::Url::parse("http://localhost/api").expect("valid URL");
        let err = transport
            .execute(Request::builder(Method::Get, url).build())
            .await
            .expect_err("transport failure");
        assert!(err.is_transport());
    }
}

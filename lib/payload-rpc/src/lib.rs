//! Dynamic REST client for Payload-style document backends.
//!
//! Give the client a base URL and it exposes every collection, global,
//! authentication flow and declared custom endpoint of the backend. Every
//! operation goes through one [`Dispatcher`]: build the URL, encode the query
//! in bracket notation, send JSON, classify non-2xx responses.
//!
//! # Example
//!
//! ```no_run
//! use payload_rpc::prelude::*;
//! use serde_json::Value;
//!
//! # async fn run() -> payload_rpc::Result<()> {
//! let options = ClientOptions::builder("https://cms.example.com/api")
//!     .header("Authorization", "users JWT <token>")
//!     .build()?;
//! let client = Client::new(options);
//!
//! let params = Params::new()
//!     .filter(Filter::or([
//!         Filter::equals("status", "published"),
//!         Filter::field("author", Operand::Exists(false)),
//!     ])?)
//!     .sort("-createdAt")
//!     .limit(5);
//! let page: FindResult<Value> = client.collection("posts").find(params).await?;
//!
//! match client.collection("posts").find_by_id::<Value>("missing", Params::new()).await {
//!     Err(err) if err.is_not_found() => {}
//!     other => { other?; }
//! }
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod collections;
mod config;
mod connector;
mod custom;
mod dispatch;
mod globals;
pub mod middleware;
mod options;
pub mod prelude;
#[cfg(test)]
mod testing;

pub use api::Client;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use collections::{AuthApi, CollectionApi, Collections};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use custom::{CustomEndpoints, CustomInput};
pub use dispatch::Dispatcher;
pub use globals::{GlobalApi, Globals};
pub use options::{ClientOptions, ClientOptionsBuilder, CustomEndpoint, PathFn, PathParams};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use payload_rpc_core::{
    APPLICATION_JSON, AuthOperation, BulkResult, CachePolicy, CollectionOperation, CountResult,
    Credentials, DocMessage, EmailRequest, EntityKind, Error, ErrorKind, Filter, FindResult,
    FnTransport, GlobalOperation, HookContext, JoinParams, LoginResult, MeResult, MessageResult,
    Method, Operand, Params, QueryMap, QueryValue, RefreshTokenResult, Request, RequestBuilder,
    RequestDescriptor, RequestHook, RequestOverrides, ResetPasswordRequest, ResetPasswordResult,
    Response, ResponseEnvelope, Result, TokenUser, Transport, classify, encode, from_json,
    from_value, query, to_json, transport_fn,
};

// Re-export http types for status codes and headers
pub use payload_rpc_core::{StatusCode, header};

pub use url;

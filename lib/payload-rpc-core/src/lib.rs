//! Core types for the payload-rpc REST client.
//!
//! This crate is I/O free. It provides:
//! - [`QueryMap`], [`QueryValue`] and [`encode`] - bracket-notation query strings
//! - [`Filter`], [`Operand`] and [`Params`] - the backend's query parameters
//! - [`RequestDescriptor`] - method, path, query and body of one call
//! - [`Request`] and [`Response`] - what a [`Transport`] consumes and produces
//! - [`ResponseEnvelope`] - parsed payload plus raw text
//! - [`Error`], [`ErrorKind`] and [`classify`] - status-based error classification
//! - [`CollectionOperation`], [`AuthOperation`], [`GlobalOperation`] - operation tables
//! - [`RequestHook`] - per-request overrides
//! - result shapes such as [`FindResult`] and [`CountResult`]
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod body;
mod error;
mod filter;
mod hook;
mod method;
mod operation;
mod params;
pub mod prelude;
pub mod query;
mod request;
mod response;
mod transport;
mod types;

pub use body::{APPLICATION_JSON, from_json, from_value, to_json};
pub use error::{Error, ErrorKind, Result, classify};
pub use filter::{Filter, Operand};
pub use hook::{HookContext, RequestHook, RequestOverrides};
pub use method::Method;
pub use operation::{AuthOperation, CollectionOperation, GlobalOperation};
pub use params::{JoinParams, Params};
pub use query::{QueryMap, QueryValue, encode};
pub use request::{CachePolicy, EntityKind, Request, RequestBuilder, RequestDescriptor};
pub use response::{Response, ResponseEnvelope};
pub use transport::{FnTransport, Transport, transport_fn};
pub use types::{
    BulkResult, CountResult, Credentials, DocMessage, EmailRequest, FindResult, LoginResult,
    MeResult, MessageResult, RefreshTokenResult, ResetPasswordRequest, ResetPasswordResult,
    TokenUser,
};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};

//! Prelude module for convenient imports.
//!
//! ```
//! use payload_rpc_core::prelude::*;
//! ```

pub use crate::{
    EntityKind, Error, ErrorKind, Filter, Method, Operand, Params, QueryMap, QueryValue, Request,
    RequestDescriptor, Response, ResponseEnvelope, Result, Transport, encode, from_json, to_json,
};

//! Prelude module for convenient imports.
//!
//! ```
//! use payload_rpc::prelude::*;
//! ```

pub use crate::{
    CachePolicy, Client, ClientOptions, CountResult, Credentials, DocMessage, Error, ErrorKind,
    Filter, FindResult, HyperClient, Method, Operand, Params, QueryMap, RequestOverrides, Result,
    Transport,
};
pub use serde::{Deserialize, Serialize};

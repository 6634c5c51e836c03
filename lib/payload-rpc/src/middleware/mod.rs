//! Tower middleware for [`HyperClient`](crate::HyperClient).
//!
//! Layers are added with [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer);
//! any tower layer over `Request<Bytes>`/`Response<Bytes>` works.
//!
//! - [`LoggingLayer`] - logs requests and responses using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};

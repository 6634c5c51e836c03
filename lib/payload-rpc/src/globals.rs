//! Global (singleton document) operations.

use payload_rpc_core::{EntityKind, GlobalOperation, Params, RequestDescriptor, Transport, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Dispatcher, Result};

/// Factory of global handles.
pub struct Globals<T> {
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for Globals<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Globals<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Globals").finish_non_exhaustive()
    }
}

impl<T: Transport> Globals<T> {
    pub(crate) const fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// Handle for the global `slug`.
    #[must_use]
    pub fn get(&self, slug: impl Into<String>) -> GlobalApi<T> {
        GlobalApi {
            dispatcher: self.dispatcher.clone(),
            slug: slug.into(),
        }
    }
}

/// Operations on one global.
pub struct GlobalApi<T> {
    dispatcher: Dispatcher<T>,
    slug: String,
}

impl<T> Clone for GlobalApi<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            slug: self.slug.clone(),
        }
    }
}

impl<T> std::fmt::Debug for GlobalApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalApi")
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> GlobalApi<T> {
    /// The global slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    fn descriptor(&self, operation: GlobalOperation, params: &Params) -> RequestDescriptor {
        RequestDescriptor::new(operation.method(), operation.path(&self.slug))
            .entity(EntityKind::Global, &self.slug)
            .query(encode(Some(params.as_query())))
    }

    /// `GET /globals/{slug}`
    pub async fn get<R: DeserializeOwned>(&self, params: Params) -> Result<R> {
        let descriptor = self.descriptor(GlobalOperation::Get, &params);
        self.dispatcher.call(descriptor).await
    }

    /// `POST /globals/{slug}` with `patch` as body.
    pub async fn update<R: DeserializeOwned>(
        &self,
        patch: impl Serialize,
        params: Params,
    ) -> Result<R> {
        let operation = GlobalOperation::Update;
        let mut descriptor = self.descriptor(operation, &params);
        if operation.has_body() {
            descriptor = descriptor.body(serde_json::to_value(patch)?);
        }
        self.dispatcher.call(descriptor).await
    }
}

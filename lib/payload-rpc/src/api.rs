//! The client facade.

use payload_rpc_core::{Method, RequestDescriptor, Transport};
use serde::de::DeserializeOwned;

use crate::{
    ClientOptions, CollectionApi, Collections, CustomEndpoints, Dispatcher, GlobalApi, Globals,
    HyperClient, Result,
};

/// Entry point: wires the options and a transport into the routers.
///
/// Cloning is cheap and every clone shares the same options and transport.
///
/// # Example
///
/// ```no_run
/// use payload_rpc::{Client, ClientOptions, Credentials, LoginResult, Params};
/// use serde_json::Value;
///
/// # async fn run() -> payload_rpc::Result<()> {
/// let options = ClientOptions::builder("https://cms.example.com/api")
///     .auth_collection("users")
///     .build()?;
/// let client = Client::new(options);
///
/// let post: Value = client.collection("posts").find_by_id("42", Params::new().depth(1)).await?;
///
/// if let Some(auth) = client.collection("users").auth() {
///     let login: LoginResult<Value> = auth.login(&Credentials::new("a@b.com", "secret")).await?;
///     # let _ = login;
/// }
/// # let _ = post;
/// # Ok(())
/// # }
/// ```
pub struct Client<T = HyperClient> {
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl Client {
    /// Client over the default [`HyperClient`] transport.
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self::with_transport(options, HyperClient::new())
    }
}

impl<T: Transport> Client<T> {
    /// Client over a custom transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        Self {
            dispatcher: Dispatcher::new(options, transport),
        }
    }

    /// The client options.
    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        self.dispatcher.options()
    }

    /// The shared dispatcher, for hand-built descriptors.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Collection handles.
    #[must_use]
    pub fn collections(&self) -> Collections<T> {
        Collections::new(self.dispatcher.clone())
    }

    /// Shortcut for `collections().get(slug)`.
    #[must_use]
    pub fn collection(&self, slug: impl Into<String>) -> CollectionApi<T> {
        self.collections().get(slug)
    }

    /// Global handles.
    #[must_use]
    pub fn globals(&self) -> Globals<T> {
        Globals::new(self.dispatcher.clone())
    }

    /// Shortcut for `globals().get(slug)`.
    #[must_use]
    pub fn global(&self, slug: impl Into<String>) -> GlobalApi<T> {
        self.globals().get(slug)
    }

    /// Custom endpoints, `None` when none were declared.
    #[must_use]
    pub fn custom(&self) -> Option<CustomEndpoints<T>> {
        self.options()
            .has_custom_endpoints()
            .then(|| CustomEndpoints::new(self.dispatcher.clone()))
    }

    /// `GET /access`: the permissions of the current user.
    pub async fn access<R: DeserializeOwned>(&self) -> Result<R> {
        let descriptor = RequestDescriptor::new(Method::Get, ["access"]);
        self.dispatcher.call(descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::{RecordingTransport, options};

    #[tokio::test]
    async fn access_has_no_entity_and_no_query() {
        let transport = RecordingTransport::json(
            200,
            json!({"canAccessAdmin": true, "collections": {"posts": {"read": {"permission": true}}}}),
        );
        let client = Client::with_transport(options(), transport.clone());

        let_assert!(Ok(access) = client.access::<Value>().await);
        check!(access["collections"]["posts"]["read"]["permission"] == true);
        check!(transport.last_request().method() == Method::Get);
        check!(transport.last_url() == "http://localhost:3000/api/access");
    }

    #[test]
    fn custom_is_absent_unless_declared() {
        let transport = RecordingTransport::json(200, json!({}));
        let client = Client::with_transport(options(), transport.clone());
        check!(client.custom().is_none());

        let declared = ClientOptions::builder("http://localhost/api")
            .custom_endpoints([])
            .build()
            .expect("options");
        let client = Client::with_transport(declared, transport);
        let_assert!(Some(custom) = client.custom());
        check!(custom.names().count() == 0);
    }

    #[tokio::test]
    async fn clones_share_the_transport() {
        let transport = RecordingTransport::json(200, json!({}));
        let client = Client::with_transport(options(), transport.clone());
        let other = client.clone();

        let_assert!(Ok(_) = client.global("settings").get::<Value>(Default::default()).await);
        let_assert!(Ok(_) = other.collection("posts").count::<Value>(Default::default()).await);
        check!(transport.calls() == 2);
        check!(transport.last_url() == "http://localhost:3000/api/posts/count");
    }
}

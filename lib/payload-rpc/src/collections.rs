//! Collection and auth operations.
//!
//! [`Collections::get`] hands out a [`CollectionApi`] for any slug; nothing is
//! registered up front. Collections declared with
//! [`auth_collection`](crate::ClientOptionsBuilder::auth_collection) also
//! expose an [`AuthApi`].
//!
//! # Example
//!
//! ```no_run
//! use payload_rpc::{Client, ClientOptions, Filter, FindResult, Params};
//! use serde_json::Value;
//!
//! # async fn run() -> payload_rpc::Result<()> {
//! let client = Client::new(ClientOptions::builder("https://cms.example.com/api").build()?);
//!
//! let posts: FindResult<Value> = client
//!     .collection("posts")
//!     .find(Params::new().filter(Filter::equals("status", "published")).limit(10))
//!     .await?;
//! # let _ = posts;
//! # Ok(())
//! # }
//! ```

use payload_rpc_core::{
    AuthOperation, CollectionOperation, Credentials, EmailRequest, EntityKind, Params,
    RequestDescriptor, ResetPasswordRequest, Transport, encode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Dispatcher, Result};

/// Factory of collection handles.
pub struct Collections<T> {
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for Collections<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Collections<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collections").finish_non_exhaustive()
    }
}

impl<T: Transport> Collections<T> {
    pub(crate) const fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// Handle for the collection `slug`.
    #[must_use]
    pub fn get(&self, slug: impl Into<String>) -> CollectionApi<T> {
        CollectionApi {
            dispatcher: self.dispatcher.clone(),
            slug: slug.into(),
        }
    }
}

/// Operations on one collection.
pub struct CollectionApi<T> {
    dispatcher: Dispatcher<T>,
    slug: String,
}

impl<T> Clone for CollectionApi<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            slug: self.slug.clone(),
        }
    }
}

impl<T> std::fmt::Debug for CollectionApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionApi")
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> CollectionApi<T> {
    /// The collection slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Auth operations, when the collection was declared authenticatable.
    #[must_use]
    pub fn auth(&self) -> Option<AuthApi<T>> {
        self.dispatcher
            .options()
            .is_auth_collection(&self.slug)
            .then(|| AuthApi {
                dispatcher: self.dispatcher.clone(),
                slug: self.slug.clone(),
            })
    }

    fn descriptor(
        &self,
        operation: CollectionOperation,
        id: Option<&str>,
        params: &Params,
    ) -> RequestDescriptor {
        RequestDescriptor::new(operation.method(), operation.path(&self.slug, id))
            .entity(EntityKind::Collection, &self.slug)
            .query(encode(Some(params.as_query())))
    }

    async fn send<R: DeserializeOwned>(
        &self,
        operation: CollectionOperation,
        id: Option<&str>,
        params: &Params,
        body: Option<serde_json::Value>,
    ) -> Result<R> {
        let mut descriptor = self.descriptor(operation, id, params);
        if let Some(body) = body.filter(|_| operation.has_body()) {
            descriptor = descriptor.body(body);
        }
        self.dispatcher.call(descriptor).await
    }

    /// `GET /{slug}`: paginated documents.
    pub async fn find<R: DeserializeOwned>(&self, params: Params) -> Result<R> {
        self.send(CollectionOperation::Find, None, &params, None)
            .await
    }

    /// `GET /{slug}/{id}`: one document.
    pub async fn find_by_id<R: DeserializeOwned>(
        &self,
        id: impl AsRef<str>,
        params: Params,
    ) -> Result<R> {
        self.send(CollectionOperation::FindById, Some(id.as_ref()), &params, None)
            .await
    }

    /// `GET /{slug}/count`: number of matching documents.
    pub async fn count<R: DeserializeOwned>(&self, params: Params) -> Result<R> {
        self.send(CollectionOperation::Count, None, &params, None)
            .await
    }

    /// `POST /{slug}`: create a document.
    pub async fn create<R: DeserializeOwned>(
        &self,
        doc: impl Serialize,
        params: Params,
    ) -> Result<R> {
        let body = serde_json::to_value(doc)?;
        self.send(CollectionOperation::Create, None, &params, Some(body))
            .await
    }

    /// `POST /{slug}?draft=true`: create a draft, whatever `draft` the params carry.
    pub async fn create_draft<R: DeserializeOwned>(
        &self,
        doc: impl Serialize,
        params: Params,
    ) -> Result<R> {
        let body = serde_json::to_value(doc)?;
        let params = params.draft(true);
        self.send(CollectionOperation::CreateDraft, None, &params, Some(body))
            .await
    }

    /// `PATCH /{slug}`: apply `patch` to every document matching the params.
    pub async fn update<R: DeserializeOwned>(
        &self,
        patch: impl Serialize,
        params: Params,
    ) -> Result<R> {
        let body = serde_json::to_value(patch)?;
        self.send(CollectionOperation::Update, None, &params, Some(body))
            .await
    }

    /// `PATCH /{slug}/{id}`: apply `patch` to one document.
    pub async fn update_by_id<R: DeserializeOwned>(
        &self,
        id: impl AsRef<str>,
        patch: impl Serialize,
        params: Params,
    ) -> Result<R> {
        let body = serde_json::to_value(patch)?;
        self.send(
            CollectionOperation::UpdateById,
            Some(id.as_ref()),
            &params,
            Some(body),
        )
        .await
    }

    /// `DELETE /{slug}`: delete every document matching the params.
    pub async fn delete<R: DeserializeOwned>(&self, params: Params) -> Result<R> {
        self.send(CollectionOperation::Delete, None, &params, None)
            .await
    }

    /// `DELETE /{slug}/{id}`: delete one document.
    pub async fn delete_by_id<R: DeserializeOwned>(
        &self,
        id: impl AsRef<str>,
        params: Params,
    ) -> Result<R> {
        self.send(CollectionOperation::DeleteById, Some(id.as_ref()), &params, None)
            .await
    }
}

/// Authentication flows of an authenticatable collection.
///
/// Tokens returned by the backend are not kept; pass them back as headers.
pub struct AuthApi<T> {
    dispatcher: Dispatcher<T>,
    slug: String,
}

impl<T> Clone for AuthApi<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            slug: self.slug.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AuthApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthApi")
            .field("slug", &self.slug)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> AuthApi<T> {
    /// The collection slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    async fn send<R: DeserializeOwned>(
        &self,
        operation: AuthOperation,
        body: Option<serde_json::Value>,
    ) -> Result<R> {
        let mut descriptor = RequestDescriptor::new(operation.method(), operation.path(&self.slug))
            .entity(EntityKind::Collection, &self.slug);
        if let Some(body) = body.filter(|_| operation.has_body()) {
            descriptor = descriptor.body(body);
        }
        self.dispatcher.call(descriptor).await
    }

    /// `POST /{slug}/login`
    pub async fn login<R: DeserializeOwned>(&self, credentials: &Credentials) -> Result<R> {
        let body = serde_json::to_value(credentials)?;
        self.send(AuthOperation::Login, Some(body)).await
    }

    /// `POST /{slug}/logout`
    pub async fn logout<R: DeserializeOwned>(&self) -> Result<R> {
        self.send(AuthOperation::Logout, None).await
    }

    /// `POST /{slug}/unlock`
    pub async fn unlock<R: DeserializeOwned>(&self, email: impl Into<String>) -> Result<R> {
        let body = serde_json::to_value(EmailRequest::new(email))?;
        self.send(AuthOperation::Unlock, Some(body)).await
    }

    /// `POST /{slug}/refresh-token`
    pub async fn refresh_token<R: DeserializeOwned>(&self) -> Result<R> {
        self.send(AuthOperation::RefreshToken, None).await
    }

    /// `GET /{slug}/me`
    pub async fn me<R: DeserializeOwned>(&self) -> Result<R> {
        self.send(AuthOperation::Me, None).await
    }

    /// `POST /{slug}/forgot-password`
    pub async fn forgot_password<R: DeserializeOwned>(
        &self,
        email: impl Into<String>,
    ) -> Result<R> {
        let body = serde_json::to_value(EmailRequest::new(email))?;
        self.send(AuthOperation::ForgotPassword, Some(body)).await
    }

    /// `POST /{slug}/reset-password`
    pub async fn reset_password<R: DeserializeOwned>(
        &self,
        token: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<R> {
        let body = serde_json::to_value(ResetPasswordRequest::new(token, password))?;
        self.send(AuthOperation::ResetPassword, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use payload_rpc_core::{CountResult, Credentials, Filter, Method, QueryMap};
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::{RecordingTransport, options};

    fn collections(transport: &RecordingTransport) -> Collections<RecordingTransport> {
        Collections::new(Dispatcher::new(options(), transport.clone()))
    }

    #[tokio::test]
    async fn find_without_params() {
        let transport = RecordingTransport::json(200, json!({"docs": []}));
        let users = collections(&transport).get("users");

        let_assert!(Ok(_) = users.find::<Value>(Params::new()).await);

        let request = transport.last_request();
        check!(request.method() == Method::Get);
        check!(transport.last_url() == "http://localhost:3000/api/users");
        check!(request.url().query().is_none());
        check!(request.body().is_none());
    }

    #[tokio::test]
    async fn find_by_id_keeps_id_out_of_query() {
        let transport = RecordingTransport::json(200, json!({"id": "7"}));
        let users = collections(&transport).get("users");

        let_assert!(Ok(_) = users.find_by_id::<Value>("7", Params::new().depth(0)).await);
        check!(transport.last_url() == "http://localhost:3000/api/users/7?depth=0");
    }

    #[tokio::test]
    async fn count_with_filter() {
        let transport = RecordingTransport::json(200, json!({"totalDocs": 3}));
        let users = collections(&transport).get("users");

        let params = Params::new().filter(Filter::equals("email", "a@b.com"));
        let_assert!(Ok(count) = users.count::<CountResult>(params).await);

        check!(count.total_docs == 3);
        check!(
            transport.last_url()
                == "http://localhost:3000/api/users/count?where[email][equals]=a@b.com"
        );
    }

    #[tokio::test]
    async fn create_sends_doc_as_body_only() {
        let transport = RecordingTransport::json(201, json!({"message": "ok", "doc": {}}));
        let users = collections(&transport).get("users");

        let_assert!(
            Ok(_) = users
                .create::<Value>(json!({"email": "a@b.com"}), Params::new())
                .await
        );

        check!(transport.last_request().method() == Method::Post);
        check!(transport.last_url() == "http://localhost:3000/api/users");
        check!(transport.last_body() == Some(json!({"email": "a@b.com"})));
    }

    #[tokio::test]
    async fn create_draft_appends_draft() {
        let transport = RecordingTransport::json(201, json!({}));
        let posts = collections(&transport).get("posts");

        let_assert!(
            Ok(_) = posts
                .create_draft::<Value>(json!({"title": "x"}), Params::new().locale("en"))
                .await
        );
        check!(transport.last_url() == "http://localhost:3000/api/posts?locale=en&draft=true");
    }

    #[tokio::test]
    async fn create_draft_replaces_caller_draft_in_place() {
        let transport = RecordingTransport::json(201, json!({}));
        let posts = collections(&transport).get("posts");

        let params = Params::new().draft(false).locale("en");
        let_assert!(Ok(_) = posts.create_draft::<Value>(json!({}), params).await);
        check!(transport.last_url() == "http://localhost:3000/api/posts?draft=true&locale=en");
    }

    #[tokio::test]
    async fn update_by_id_with_locale() {
        let transport = RecordingTransport::json(200, json!({}));
        let users = collections(&transport).get("users");

        let_assert!(
            Ok(_) = users
                .update_by_id::<Value>("7", json!({"name": "x"}), Params::new().locale("de"))
                .await
        );

        check!(transport.last_request().method() == Method::Patch);
        check!(transport.last_url() == "http://localhost:3000/api/users/7?locale=de");
        check!(transport.last_body() == Some(json!({"name": "x"})));
    }

    #[tokio::test]
    async fn bulk_update_and_delete() {
        let transport = RecordingTransport::json(200, json!({"docs": [], "errors": []}));
        let posts = collections(&transport).get("posts");
        let filter = || Params::new().filter(Filter::equals("status", "draft"));

        let_assert!(Ok(_) = posts.update::<Value>(json!({"status": "published"}), filter()).await);
        check!(transport.last_request().method() == Method::Patch);
        check!(
            transport.last_url() == "http://localhost:3000/api/posts?where[status][equals]=draft"
        );

        let_assert!(Ok(_) = posts.delete::<Value>(filter()).await);
        check!(transport.last_request().method() == Method::Delete);
        check!(transport.last_body().is_none());

        let_assert!(Ok(_) = posts.delete_by_id::<Value>("42", Params::new()).await);
        check!(transport.last_url() == "http://localhost:3000/api/posts/42");
        check!(transport.calls() == 3);
    }

    #[tokio::test]
    async fn null_doc_sends_no_body() {
        let transport = RecordingTransport::json(201, json!({"message": "ok", "doc": {}}));
        let posts = collections(&transport).get("posts");

        let_assert!(Ok(_) = posts.create::<Value>(Option::<Value>::None, Params::new()).await);
        check!(transport.last_request().method() == Method::Post);
        check!(transport.last_request().body().is_none());

        let_assert!(Ok(_) = posts.update_by_id::<Value>("7", (), Params::new()).await);
        check!(transport.last_request().body().is_none());
    }

    #[tokio::test]
    async fn empty_combinator_never_reaches_the_wire() {
        let transport = RecordingTransport::json(200, json!({"docs": [], "errors": []}));
        let posts = collections(&transport).get("posts");

        let_assert!(Err(err) = Filter::and([]));
        check!(matches!(err, crate::Error::InvalidRequest(_)));

        let nested = Filter::or([Filter::equals("status", "draft")])
            .and_then(|draft| Filter::and([draft, Filter::or(Vec::new())?]));
        let_assert!(Err(_) = nested);

        let filter = Filter::and([Filter::equals("status", "draft")]).expect("non-empty");
        let_assert!(Ok(_) = posts.delete::<Value>(Params::new().filter(filter)).await);
        check!(
            transport.last_url()
                == "http://localhost:3000/api/posts?where[and][0][status][equals]=draft"
        );
    }

    #[tokio::test]
    async fn any_slug_works() {
        let transport = RecordingTransport::json(200, json!({}));
        let never_declared = collections(&transport).get("never-declared");

        let_assert!(
            Ok(_) = never_declared
                .find::<Value>(QueryMap::new().with("page", 2).into())
                .await
        );
        check!(transport.last_url() == "http://localhost:3000/api/never-declared?page=2");
        check!(never_declared.auth().is_none());
    }

    #[tokio::test]
    async fn auth_only_for_declared_collections() {
        let transport = RecordingTransport::json(200, json!({}));
        let collections = collections(&transport);

        check!(collections.get("posts").auth().is_none());
        let_assert!(Some(auth) = collections.get("users").auth());
        check!(auth.slug() == "users");
    }

    #[tokio::test]
    async fn auth_operations() {
        let transport = RecordingTransport::json(200, json!({"message": "ok"}));
        let_assert!(Some(auth) = collections(&transport).get("users").auth());

        let_assert!(
            Ok(_) = auth
                .login::<Value>(&Credentials::new("a@b.com", "secret"))
                .await
        );
        check!(transport.last_request().method() == Method::Post);
        check!(transport.last_url() == "http://localhost:3000/api/users/login");
        check!(transport.last_body() == Some(json!({"email": "a@b.com", "password": "secret"})));

        let_assert!(Ok(_) = auth.logout::<Value>().await);
        check!(transport.last_url() == "http://localhost:3000/api/users/logout");
        check!(transport.last_body().is_none());

        let_assert!(Ok(_) = auth.unlock::<Value>("a@b.com").await);
        check!(transport.last_body() == Some(json!({"email": "a@b.com"})));

        let_assert!(Ok(_) = auth.refresh_token::<Value>().await);
        check!(transport.last_url() == "http://localhost:3000/api/users/refresh-token");

        let_assert!(Ok(_) = auth.me::<Value>().await);
        check!(transport.last_request().method() == Method::Get);
        check!(transport.last_url() == "http://localhost:3000/api/users/me");

        let_assert!(Ok(_) = auth.forgot_password::<Value>("a@b.com").await);
        check!(transport.last_url() == "http://localhost:3000/api/users/forgot-password");

        let_assert!(Ok(_) = auth.reset_password::<Value>("token", "new").await);
        check!(transport.last_url() == "http://localhost:3000/api/users/reset-password");
        check!(transport.last_body() == Some(json!({"token": "token", "password": "new"})));

        check!(transport.calls() == 7);
    }
}

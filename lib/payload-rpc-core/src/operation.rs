//! Named operations and their HTTP shape.
//!
//! Every operation a client exposes maps to a fixed method and path layout.
//! The tables here are the single source of that mapping; the routers only add
//! the slug, id, query and body of a particular call.

use derive_more::Display;

use crate::Method;

/// Operations available on every collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CollectionOperation {
    /// `GET /{slug}`
    #[display("find")]
    Find,
    /// `GET /{slug}/{id}`
    #[display("findById")]
    FindById,
    /// `GET /{slug}/count`
    #[display("count")]
    Count,
    /// `POST /{slug}`
    #[display("create")]
    Create,
    /// `POST /{slug}?draft=true`
    #[display("createDraft")]
    CreateDraft,
    /// `PATCH /{slug}`
    #[display("update")]
    Update,
    /// `PATCH /{slug}/{id}`
    #[display("updateById")]
    UpdateById,
    /// `DELETE /{slug}`
    #[display("delete")]
    Delete,
    /// `DELETE /{slug}/{id}`
    #[display("deleteById")]
    DeleteById,
}

impl CollectionOperation {
    /// HTTP method.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Find | Self::FindById | Self::Count => Method::Get,
            Self::Create | Self::CreateDraft => Method::Post,
            Self::Update | Self::UpdateById => Method::Patch,
            Self::Delete | Self::DeleteById => Method::Delete,
        }
    }

    /// Whether the document id is a path segment.
    #[must_use]
    pub const fn takes_id(self) -> bool {
        matches!(self, Self::FindById | Self::UpdateById | Self::DeleteById)
    }

    /// Whether the call sends a document or patch as body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(
            self,
            Self::Create | Self::CreateDraft | Self::Update | Self::UpdateById
        )
    }

    /// Path segments for `slug`, with `id` appended when the operation takes one.
    #[must_use]
    pub fn path(self, slug: &str, id: Option<&str>) -> Vec<String> {
        let mut path = vec![slug.to_string()];
        match (self, id) {
            (Self::Count, _) => path.push("count".to_string()),
            (op, Some(id)) if op.takes_id() => path.push(id.to_string()),
            _ => {}
        }
        path
    }
}

/// Operations of collections declared as authenticatable.
///
/// None of them carries a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AuthOperation {
    /// `POST /{slug}/login`
    #[display("login")]
    Login,
    /// `POST /{slug}/logout`
    #[display("logout")]
    Logout,
    /// `POST /{slug}/unlock`
    #[display("unlock")]
    Unlock,
    /// `POST /{slug}/refresh-token`
    #[display("refresh-token")]
    RefreshToken,
    /// `GET /{slug}/me`
    #[display("me")]
    Me,
    /// `POST /{slug}/forgot-password`
    #[display("forgot-password")]
    ForgotPassword,
    /// `POST /{slug}/reset-password`
    #[display("reset-password")]
    ResetPassword,
}

impl AuthOperation {
    /// HTTP method.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Me => Method::Get,
            _ => Method::Post,
        }
    }

    /// Path segment after the slug; also the operation's name.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Unlock => "unlock",
            Self::RefreshToken => "refresh-token",
            Self::Me => "me",
            Self::ForgotPassword => "forgot-password",
            Self::ResetPassword => "reset-password",
        }
    }

    /// Whether the call sends a body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(
            self,
            Self::Login | Self::Unlock | Self::ForgotPassword | Self::ResetPassword
        )
    }

    /// Path segments for `slug`.
    #[must_use]
    pub fn path(self, slug: &str) -> Vec<String> {
        vec![slug.to_string(), self.segment().to_string()]
    }
}

/// Operations available on every global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GlobalOperation {
    /// `GET /globals/{slug}`
    #[display("get")]
    Get,
    /// `POST /globals/{slug}`
    #[display("update")]
    Update,
}

impl GlobalOperation {
    /// HTTP method.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Get => Method::Get,
            Self::Update => Method::Post,
        }
    }

    /// Whether the call sends a patch as body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Update)
    }

    /// Path segments for `slug`.
    #[must_use]
    pub fn path(self, slug: &str) -> Vec<String> {
        vec!["globals".to_string(), slug.to_string()]
    }
}

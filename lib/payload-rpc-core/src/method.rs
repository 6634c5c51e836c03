//! HTTP method types.

use derive_more::Display;

/// HTTP method used by the backend's REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - read documents, counts and access maps.
    #[display("GET")]
    Get,
    /// POST method - create documents, auth actions, global updates.
    #[display("POST")]
    Post,
    /// PATCH method - partially update documents.
    #[display("PATCH")]
    Patch,
    /// DELETE method - remove documents.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` if the method does not modify resources.
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PATCH => Ok(Self::Patch),
            http::Method::DELETE => Ok(Self::Delete),
            other => Err(crate::Error::InvalidRequest(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn method_is_safe() {
        assert!(Method::Get.is_safe());
        assert!(!Method::Post.is_safe());
        assert!(!Method::Patch.is_safe());
        assert!(!Method::Delete.is_safe());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Patch), http::Method::PATCH);
    }

    #[test]
    fn method_from_http() {
        assert_eq!(
            Method::try_from(http::Method::DELETE).expect("DELETE"),
            Method::Delete
        );
        assert!(Method::try_from(http::Method::PUT).is_err());
    }
}

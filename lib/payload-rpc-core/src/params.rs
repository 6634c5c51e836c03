//! Query parameters accepted by collection and global operations.

use crate::{Filter, QueryMap, QueryValue};

/// Query parameters for an operation.
///
/// Typed setters cover the parameters the backend understands; anything else
/// goes through [`insert`](Self::insert). Keys are encoded in the order they
/// were first set.
///
/// # Example
///
/// ```
/// use payload_rpc_core::{Filter, Params, encode};
///
/// let params = Params::new()
///     .depth(1)
///     .filter(Filter::equals("slug", "hello"))
///     .limit(10);
///
/// assert_eq!(
///     encode(Some(params.as_query())),
///     "depth=1&where[slug][equals]=hello&limit=10"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    query: QueryMap,
}

impl Params {
    /// Empty parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: QueryMap::new(),
        }
    }

    /// Set an arbitrary parameter.
    #[must_use]
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Relationship population depth.
    #[must_use]
    pub fn depth(self, depth: u32) -> Self {
        self.insert("depth", depth)
    }

    /// Locale of localized fields (`all` for every locale).
    #[must_use]
    pub fn locale(self, locale: impl Into<String>) -> Self {
        self.insert("locale", locale.into())
    }

    /// Fallback locale (`null`, `false` or `none` disable the fallback).
    #[must_use]
    pub fn fallback_locale(self, locale: impl Into<String>) -> Self {
        self.insert("fallback-locale", locale.into())
    }

    /// Read or write the draft version.
    #[must_use]
    pub fn draft(self, draft: bool) -> Self {
        self.insert("draft", draft)
    }

    /// Sort field, prefixed with `-` for descending order.
    #[must_use]
    pub fn sort(self, field: impl Into<String>) -> Self {
        self.insert("sort", field.into())
    }

    /// `where` clause.
    #[must_use]
    pub fn filter(self, filter: Filter) -> Self {
        self.insert("where", filter)
    }

    /// Page size.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.insert("limit", limit)
    }

    /// Page number, starting at 1.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.insert("page", page)
    }

    /// Toggle pagination.
    #[must_use]
    pub fn pagination(self, enabled: bool) -> Self {
        self.insert("pagination", enabled)
    }

    /// Only return the given fields.
    #[must_use]
    pub fn select<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert("select", fields_map(fields))
    }

    /// Fields to return for documents of `collection` populated through
    /// relationships.
    #[must_use]
    pub fn populate<I, S>(self, collection: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_nested("populate", collection, fields_map(fields))
    }

    /// Paging and filtering of a join field.
    #[must_use]
    pub fn join(self, field: impl Into<String>, join: JoinParams) -> Self {
        self.insert_nested("joins", field, join.query)
    }

    /// Skip join fields entirely.
    #[must_use]
    pub fn without_joins(self) -> Self {
        self.insert("joins", false)
    }

    fn insert_nested(
        mut self,
        key: &str,
        child: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Self {
        if let Some(QueryValue::Map(map)) = self.query.get_mut(key) {
            map.insert(child, value);
            return self;
        }
        self.insert(key, QueryMap::new().with(child, value))
    }

    /// The underlying query map.
    #[must_use]
    pub const fn as_query(&self) -> &QueryMap {
        &self.query
    }

    /// Consume into the underlying query map.
    #[must_use]
    pub fn into_query(self) -> QueryMap {
        self.query
    }
}

impl From<QueryMap> for Params {
    fn from(query: QueryMap) -> Self {
        Self { query }
    }
}

impl From<Params> for QueryMap {
    fn from(params: Params) -> Self {
        params.query
    }
}

/// Paging, sorting and filtering of a single join field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinParams {
    query: QueryMap,
}

impl JoinParams {
    /// Empty join parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: QueryMap::new(),
        }
    }

    /// Number of joined documents.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.insert("limit", limit);
        self
    }

    /// Sort of joined documents.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.query.insert("sort", field.into());
        self
    }

    /// Filter of joined documents.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.insert("where", filter);
        self
    }
}

fn fields_map<I, S>(fields: I) -> QueryMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(|field| (field.into(), true)).collect()
}

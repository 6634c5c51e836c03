//! `where` clause trees.
//!
//! A [`Filter`] is either a field compared with one [`Operand`] or an
//! `and`/`or` combinator over a non-empty list of filters. Filters only exist
//! to be turned into a [`QueryValue`] and encoded.

use crate::{Error, QueryMap, QueryValue, Result};

/// Comparison applied to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `equals`
    Equals(QueryValue),
    /// `not_equals`
    NotEquals(QueryValue),
    /// `greater_than`
    GreaterThan(QueryValue),
    /// `greater_than_equal`
    GreaterThanEqual(QueryValue),
    /// `less_than`
    LessThan(QueryValue),
    /// `less_than_equal`
    LessThanEqual(QueryValue),
    /// `like` (case-insensitive, all words must be present)
    Like(String),
    /// `contains`
    Contains(String),
    /// `in` (comma separated values)
    In(String),
    /// `not_in` (comma separated values)
    NotIn(String),
    /// `all` (comma separated values)
    All(String),
    /// `exists`
    Exists(bool),
    /// `near` (`longitude,latitude,maxDistance,minDistance`)
    Near(String),
}

impl Operand {
    /// Query key of this operand.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Equals(_) => "equals",
            Self::NotEquals(_) => "not_equals",
            Self::GreaterThan(_) => "greater_than",
            Self::GreaterThanEqual(_) => "greater_than_equal",
            Self::LessThan(_) => "less_than",
            Self::LessThanEqual(_) => "less_than_equal",
            Self::Like(_) => "like",
            Self::Contains(_) => "contains",
            Self::In(_) => "in",
            Self::NotIn(_) => "not_in",
            Self::All(_) => "all",
            Self::Exists(_) => "exists",
            Self::Near(_) => "near",
        }
    }

    fn into_value(self) -> QueryValue {
        match self {
            Self::Equals(v)
            | Self::NotEquals(v)
            | Self::GreaterThan(v)
            | Self::GreaterThanEqual(v)
            | Self::LessThan(v)
            | Self::LessThanEqual(v) => v,
            Self::Like(s)
            | Self::Contains(s)
            | Self::In(s)
            | Self::NotIn(s)
            | Self::All(s)
            | Self::Near(s) => QueryValue::String(s),
            Self::Exists(b) => QueryValue::Bool(b),
        }
    }
}

/// A `where` predicate tree.
///
/// Combinators are only built through [`and`](Self::and) and
/// [`or`](Self::or), which reject empty lists, so an encoded filter always
/// constrains something.
///
/// # Example
///
/// ```
/// use payload_rpc_core::{Filter, Operand, QueryMap, encode};
///
/// let filter = Filter::or([
///     Filter::field("title", Operand::Like("rust".into())),
///     Filter::field("featured", Operand::Equals(true.into())),
/// ])
/// .expect("non-empty");
///
/// let query = QueryMap::new().with("where", filter);
/// assert_eq!(
///     encode(Some(&query)),
///     "where[or][0][title][like]=rust&where[or][1][featured][equals]=true"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(Node);

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Field { field: String, operand: Operand },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    /// Leaf comparing one field.
    ///
    /// Dotted paths are allowed (`author.name`).
    #[must_use]
    pub fn field(field: impl Into<String>, operand: Operand) -> Self {
        Self(Node::Field {
            field: field.into(),
            operand,
        })
    }

    /// Shorthand for an `equals` leaf.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self::field(field, Operand::Equals(value.into()))
    }

    /// `and` combinator: all children must match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `filters` is empty.
    pub fn and(filters: impl IntoIterator<Item = Self>) -> Result<Self> {
        Self::non_empty(filters, "and").map(|children| Self(Node::And(children)))
    }

    /// `or` combinator: at least one child must match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `filters` is empty.
    pub fn or(filters: impl IntoIterator<Item = Self>) -> Result<Self> {
        Self::non_empty(filters, "or").map(|children| Self(Node::Or(children)))
    }

    fn non_empty(filters: impl IntoIterator<Item = Self>, name: &str) -> Result<Vec<Self>> {
        let filters: Vec<Self> = filters.into_iter().collect();
        if filters.is_empty() {
            return Err(Error::invalid_request(format!(
                "`{name}` filter needs at least one child"
            )));
        }
        Ok(filters)
    }
}

impl From<Filter> for QueryValue {
    fn from(filter: Filter) -> Self {
        match filter.0 {
            Node::Field { field, operand } => {
                let name = operand.name();
                QueryMap::new()
                    .with(field, QueryMap::new().with(name, operand.into_value()))
                    .into()
            }
            Node::And(children) => QueryMap::new().with("and", children).into(),
            Node::Or(children) => QueryMap::new().with("or", children).into(),
        }
    }
}

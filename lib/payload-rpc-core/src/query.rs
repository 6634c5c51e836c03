//! Bracket-notation query string encoding.
//!
//! The backend reads nested query parameters in the `qs` bracket style:
//! `where[title][equals]=hello&depth=1`. [`encode`] walks a [`QueryMap`] in
//! insertion order and emits one `key=value` pair per leaf.
//!
//! Values are **not** percent-encoded. Callers must keep `&`, `=`, `[` and `]`
//! out of values they pass through this encoder.
//!
//! # Example
//!
//! ```
//! use payload_rpc_core::{QueryMap, encode};
//!
//! let query = QueryMap::new()
//!     .with("where", QueryMap::new().with("email", QueryMap::new().with("equals", "a@b.com")))
//!     .with("depth", 0);
//!
//! assert_eq!(encode(Some(&query)), "where[email][equals]=a@b.com&depth=0");
//! assert_eq!(encode(None), "");
//! ```

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// A value that can appear in a query string.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Emitted as `null`.
    Null,
    /// Emitted as `true` / `false`.
    Bool(bool),
    /// Emitted with JSON number formatting.
    Number(serde_json::Number),
    /// Emitted verbatim.
    String(String),
    /// Emitted as ISO-8601 with milliseconds (`2024-01-01T00:00:00.000Z`).
    Date(DateTime<Utc>),
    /// Nested under zero-based index keys (`key[0]`, `key[1]`, ...).
    List(Vec<QueryValue>),
    /// Nested under its own keys (`key[child]`).
    Map(QueryMap),
}

impl QueryValue {
    /// Convert any serializable value through its JSON representation.
    ///
    /// Dates must be inserted as [`QueryValue::Date`] to get the millisecond
    /// format; through serde they become whatever string the type produces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    fn leaf(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed("null"),
            Self::Bool(true) => Cow::Borrowed("true"),
            Self::Bool(false) => Cow::Borrowed("false"),
            Self::Number(number) => Cow::Owned(number.to_string()),
            Self::String(value) => Cow::Borrowed(value),
            Self::Date(date) => Cow::Owned(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            // Containers never reach leaf emission.
            Self::List(_) | Self::Map(_) => Cow::Borrowed(""),
        }
    }
}

impl From<serde_json::Value> for QueryValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(object) => Self::Map(object.into_iter().collect()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u8, u16, u32, u64, usize);

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| Self::String(value.to_string()), Self::Number)
    }
}

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(value: QueryMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// Ordered map
// ============================================================================

/// Insertion-ordered map of query parameters.
///
/// Re-inserting an existing key replaces its value without moving it, so the
/// encoded output only depends on the order keys were first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Convert a serializable struct or map.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the value is not an object.
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        match QueryValue::from_serialize(value)? {
            QueryValue::Map(map) => Ok(map),
            _ => Err(Error::invalid_request(
                "query parameters must serialize to an object",
            )),
        }
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Mutable value for a key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<QueryValue>> Extend<(K, V)> for QueryMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = std::vec::IntoIter<(String, QueryValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Encoder
// ============================================================================

/// Encode a query map into a bracket-notation query string.
///
/// `None` and empty maps encode to the empty string. No percent-encoding is
/// applied.
#[must_use]
pub fn encode(query: Option<&QueryMap>) -> String {
    let Some(query) = query else {
        return String::new();
    };

    let mut parts = Vec::new();
    for (key, value) in query.iter() {
        encode_pair(key.to_string(), value, &mut parts);
    }
    parts.join("&")
}

fn encode_pair(qualified: String, value: &QueryValue, parts: &mut Vec<String>) {
    match value {
        QueryValue::Map(map) => {
            for (key, child) in map.iter() {
                encode_pair(format!("{qualified}[{key}]"), child, parts);
            }
        }
        QueryValue::List(items) => {
            for (index, child) in items.iter().enumerate() {
                encode_pair(format!("{qualified}[{index}]"), child, parts);
            }
        }
        leaf => parts.push(format!("{qualified}={}", leaf.leaf())),
    }
}

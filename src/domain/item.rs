//! Item identifiers.
//!
//! The notes API returns string ids while the movies API returns numeric ids,
//! and the delete endpoint takes whatever the list returned. [`ItemId`] keeps
//! the id in its textual form and accepts either shape from JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a note or movie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from anything string-like.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::domain::ItemId;
    ///
    /// assert_eq!(ItemId::new("42"), ItemId::from(42));
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as it appears in request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Self::from(id),
            RawId::Text(id) => Self(id),
        })
    }
}

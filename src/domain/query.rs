//! List queries, cache keys, and paginated results.
//!
//! A [`ListQuery`] is an immutable value: every change of page or search term
//! produces a new query rather than mutating an existing one. Query equality,
//! together with the [`Entity`] being listed, is what makes two cache keys
//! equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of record a list query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Notes,
    Movies,
}

impl Entity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Movies => "movies",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a searchable list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    page: u32,
    per_page: u32,
    search_term: String,
}

impl ListQuery {
    /// Creates a query, clamping `page` and `per_page` to at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::domain::ListQuery;
    ///
    /// let query = ListQuery::new(0, 12, "");
    /// assert_eq!(query.page(), 1);
    /// ```
    #[must_use]
    pub fn new(page: u32, per_page: u32, search_term: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            search_term: search_term.into(),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

/// Cache key: which entity, and which page of which search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub entity: Entity,
    pub query: ListQuery,
}

impl QueryKey {
    #[must_use]
    pub const fn new(entity: Entity, query: ListQuery) -> Self {
        Self { entity, query }
    }

    /// Predicate matching every list query of `entity`, regardless of page
    /// or search term. Used for invalidation after mutations.
    pub fn all_of(entity: Entity) -> impl Fn(&Self) -> bool {
        move |key: &Self| key.entity == entity
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:p={}:n={}:q={}",
            self.entity,
            self.query.page,
            self.query.per_page,
            self.query.search_term
        )
    }
}

/// One page of results as returned by the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> ListResult<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_differ_by_entity() {
        let notes = QueryKey::new(Entity::Notes, ListQuery::new(1, 12, "a"));
        let movies = QueryKey::new(Entity::Movies, ListQuery::new(1, 12, "a"));

        assert_ne!(notes, movies);
        assert!(QueryKey::all_of(Entity::Notes)(&notes));
        assert!(!QueryKey::all_of(Entity::Notes)(&movies));
    }

    #[test]
    fn equal_inputs_make_equal_keys() {
        let a = QueryKey::new(Entity::Notes, ListQuery::new(2, 12, "milk"));
        let b = QueryKey::new(Entity::Notes, ListQuery::new(2, 12, "milk"));

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "notes:p=2:n=12:q=milk");
    }
}

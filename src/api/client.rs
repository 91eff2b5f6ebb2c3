//! API client traits and request parameters.

use crate::domain::{
    CreateNotePayload, DomainError, ItemId, ListQuery, ListResult, Movie, Note, NoteTag,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Operations of the NoteHub notes API.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// `GET /notes` for one page of an optionally filtered list.
    async fn fetch_notes(&self, params: &FetchNotesParams) -> Result<ListResult<Note>, DomainError>;

    /// `POST /notes`, returning the created note.
    async fn create_note(&self, payload: &CreateNotePayload) -> Result<Note, DomainError>;

    /// `DELETE /notes/{id}`, returning the deleted note.
    async fn delete_note(&self, id: &ItemId) -> Result<Note, DomainError>;
}

/// Operations of the movie search API.
#[async_trait]
pub trait MoviesApi: Send + Sync {
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<ListResult<Movie>, DomainError>;
}

/// Query parameters for `GET /notes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchNotesParams {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
    pub tag: Option<NoteTag>,
}

impl FetchNotesParams {
    /// Builds parameters from a list query. A blank search term is dropped so
    /// the API returns the unfiltered list.
    #[must_use]
    pub fn from_query(query: &ListQuery) -> Self {
        let search = Some(query.search_term().trim())
            .filter(|term| !term.is_empty())
            .map(|_| query.search_term().to_string());

        Self {
            page: query.page(),
            per_page: query.per_page(),
            search,
            tag: None,
        }
    }

    /// Query string pairs in the order the API documents them.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::api::FetchNotesParams;
    /// use notehub::domain::ListQuery;
    ///
    /// let params = FetchNotesParams::from_query(&ListQuery::new(2, 12, "  "));
    /// assert_eq!(
    ///     params.query_pairs(),
    ///     vec![("page", "2".to_string()), ("perPage", "12".to_string())]
    /// );
    /// ```
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("perPage", self.per_page.to_string()));
        if let Some(tag) = self.tag {
            pairs.push(("tag", tag.as_str().to_string()));
        }
        pairs
    }
}

/// Query parameters for the movie search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMoviesParams {
    pub query: String,
    pub page: u32,
}

impl SearchMoviesParams {
    #[must_use]
    pub fn from_query(query: &ListQuery) -> Self {
        Self {
            query: query.search_term().to_string(),
            page: query.page(),
        }
    }

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("query", self.query.clone()), ("page", self.page.to_string())]
    }
}

/// The API clients available to the runtime.
///
/// Either client may be absent; fetches for a missing client fail with a
/// transport error instead of panicking.
#[derive(Clone, Default)]
pub struct Services {
    pub notes: Option<Arc<dyn NotesApi>>,
    pub movies: Option<Arc<dyn MoviesApi>>,
}

impl Services {
    #[must_use]
    pub fn notes(api: Arc<dyn NotesApi>) -> Self {
        Self {
            notes: Some(api),
            movies: None,
        }
    }

    #[must_use]
    pub fn movies(api: Arc<dyn MoviesApi>) -> Self {
        Self {
            notes: None,
            movies: Some(api),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("notes", &self.notes.is_some())
            .field("movies", &self.movies.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_params_keep_untrimmed_term_and_tag() {
        let mut params = FetchNotesParams::from_query(&ListQuery::new(1, 12, "milk "));
        params.tag = Some(NoteTag::Shopping);

        assert_eq!(
            params.query_pairs(),
            vec![
                ("search", "milk ".to_string()),
                ("page", "1".to_string()),
                ("perPage", "12".to_string()),
                ("tag", "Shopping".to_string()),
            ]
        );
    }

    #[test]
    fn movie_params_carry_query_and_page() {
        let params = SearchMoviesParams::from_query(&ListQuery::new(3, 20, "matrix"));

        assert_eq!(
            params.query_pairs(),
            vec![("query", "matrix".to_string()), ("page", "3".to_string())]
        );
    }
}

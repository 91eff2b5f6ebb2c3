//! reqwest-backed implementations of the API client traits.
//!
//! Both clients hold one [`reqwest::Client`] built with the bearer token as a
//! default header and the configured request timeout. Responses are decoded
//! through private wire structs so the field naming of each remote API stays
//! out of the domain types.

use super::client::{FetchNotesParams, MoviesApi, NotesApi, SearchMoviesParams};
use crate::domain::{
    CreateNotePayload, DomainError, ItemId, ListResult, Movie, Note, NotehubError, Result,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

/// Default movie search endpoint relative to the TMDB v3 base URL.
pub const DEFAULT_MOVIES_SEARCH_PATH: &str = "/search/movie";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotesPage {
    #[serde(default)]
    notes: Vec<Note>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct MoviesPage {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    total_pages: u32,
}

fn build_client(token: Option<&str>, timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| NotehubError::Config(format!("invalid bearer token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| NotehubError::Config(format!("failed to build HTTP client: {e}")))
}

/// Converts a reqwest failure into the single domain transport error.
fn transport_error(error: &reqwest::Error) -> DomainError {
    let message = error.status().map_or_else(
        || error.to_string(),
        |status| format!("Request failed with status code {}", status.as_u16()),
    );
    DomainError::Transport(message)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn decode<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> std::result::Result<T, DomainError> {
    let response = request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| transport_error(&e))?;

    response.json::<T>().await.map_err(|e| transport_error(&e))
}

/// Client for the NoteHub notes API.
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpNotesClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Config`] if the token is not a valid header
    /// value or the TLS backend fails to initialize.
    pub fn new(base_url: impl Into<String>, token: Option<&str>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_client(token, timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl NotesApi for HttpNotesClient {
    async fn fetch_notes(
        &self,
        params: &FetchNotesParams,
    ) -> std::result::Result<ListResult<Note>, DomainError> {
        let url = join_url(&self.base_url, "notes");
        tracing::debug!(url = %url, page = params.page, search = ?params.search, "GET notes");

        let page: NotesPage = decode(self.http.get(&url).query(&params.query_pairs())).await?;
        Ok(ListResult::new(page.notes, page.total_pages))
    }

    async fn create_note(
        &self,
        payload: &CreateNotePayload,
    ) -> std::result::Result<Note, DomainError> {
        let url = join_url(&self.base_url, "notes");
        tracing::debug!(url = %url, title = %payload.title, "POST note");

        decode(self.http.post(&url).json(payload)).await
    }

    async fn delete_note(&self, id: &ItemId) -> std::result::Result<Note, DomainError> {
        let url = join_url(&self.base_url, &format!("notes/{id}"));
        tracing::debug!(url = %url, "DELETE note");

        decode(self.http.delete(&url)).await
    }
}

/// Client for the TMDB movie search API.
#[derive(Debug, Clone)]
pub struct HttpMoviesClient {
    http: reqwest::Client,
    search_url: String,
}

impl HttpMoviesClient {
    /// Creates a client searching at `base_url` + `search_path`.
    ///
    /// # Errors
    ///
    /// Returns [`NotehubError::Config`] if the token is not a valid header
    /// value or the TLS backend fails to initialize.
    pub fn new(
        base_url: &str,
        search_path: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: build_client(token, timeout)?,
            search_url: join_url(base_url, search_path),
        })
    }
}

#[async_trait]
impl MoviesApi for HttpMoviesClient {
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> std::result::Result<ListResult<Movie>, DomainError> {
        tracing::debug!(url = %self.search_url, query = %params.query, page = params.page, "GET movies");

        let page: MoviesPage =
            decode(self.http.get(&self.search_url).query(&params.query_pairs())).await?;
        Ok(ListResult::new(page.results, page.total_pages))
    }
}

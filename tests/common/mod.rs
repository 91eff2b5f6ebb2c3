//! Shared fixtures for the runtime flow tests: in-memory API stubs and a
//! recording notification sink.

#![allow(dead_code)]

use async_trait::async_trait;
use notehub::api::{FetchNotesParams, MoviesApi, NotesApi, SearchMoviesParams};
use notehub::app::{Notification, NotificationKind, NotificationSink};
use notehub::domain::{CreateNotePayload, DomainError, ItemId, ListResult, Movie, Note, NoteTag};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Collects every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub received: Vec<Notification>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<&str> {
        self.received.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.received
            .iter()
            .filter(|n| n.kind == NotificationKind::Error)
            .map(|n| n.message.as_str())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&mut self, notification: &Notification) {
        self.received.push(notification.clone());
    }
}

pub fn note(id: usize, title: &str) -> Note {
    Note {
        id: ItemId::new(format!("n{id}")),
        title: title.to_string(),
        content: format!("content of {title}"),
        tag: NoteTag::Todo,
        created_at: None,
        updated_at: None,
    }
}

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id: ItemId::from(id),
        title: title.to_string(),
        overview: format!("{title} overview"),
        poster_path: None,
        backdrop_path: Some(format!("/{id}.jpg")),
        release_date: Some("1999-03-31".to_string()),
        vote_average: Some(8.2),
    }
}

fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> ListResult<T> {
    let per_page = per_page.max(1) as usize;
    let total_pages = items.len().div_ceil(per_page) as u32;
    let start = (page.saturating_sub(1) as usize) * per_page;
    let slice = items.iter().skip(start).take(per_page).cloned().collect();
    ListResult::new(slice, total_pages)
}

/// In-memory notes backend.
///
/// Responses are computed when the call starts; a queued delay then holds
/// the response back, which lets tests make an older request finish last.
#[derive(Debug, Default)]
pub struct StubNotes {
    notes: Mutex<Vec<Note>>,
    delays: Mutex<VecDeque<Duration>>,
    fetches: Mutex<Vec<FetchNotesParams>>,
    deletes: AtomicUsize,
    failing_ids: Mutex<HashSet<ItemId>>,
    delete_delays: Mutex<HashMap<ItemId, Duration>>,
    creates: AtomicUsize,
    next_id: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl StubNotes {
    pub fn with_notes(count: usize) -> Self {
        let notes = (1..=count).map(|i| note(i, &format!("Note {i}"))).collect();
        Self {
            notes: Mutex::new(notes),
            next_id: AtomicUsize::new(count + 1),
            ..Self::default()
        }
    }

    /// Delays the next fetch response by `delay`. Queued delays apply in
    /// call order.
    pub fn delay_next_fetch(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    /// Makes deletes of `id` fail while other ids still succeed.
    pub fn fail_delete_of(&self, id: &ItemId) {
        self.failing_ids.lock().unwrap().insert(id.clone());
    }

    /// Holds the delete response for `id` back by `delay`.
    pub fn delay_delete_of(&self, id: &ItemId, delay: Duration) {
        self.delete_delays.lock().unwrap().insert(id.clone(), delay);
    }

    pub fn fetches(&self) -> Vec<FetchNotesParams> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotesApi for StubNotes {
    async fn fetch_notes(&self, params: &FetchNotesParams) -> Result<ListResult<Note>, DomainError> {
        let (response, delay) = {
            self.fetches.lock().unwrap().push(params.clone());
            let delay = self.delays.lock().unwrap().pop_front().unwrap_or_default();
            let response = if self.fail_fetch.load(Ordering::SeqCst) {
                Err(DomainError::Transport("Request failed with status code 500".to_string()))
            } else {
                let notes = self.notes.lock().unwrap();
                let matching: Vec<Note> = match &params.search {
                    Some(term) => {
                        let term = term.trim().to_lowercase();
                        notes
                            .iter()
                            .filter(|n| n.title.to_lowercase().contains(&term))
                            .cloned()
                            .collect()
                    }
                    None => notes.clone(),
                };
                Ok(paginate(&matching, params.page, params.per_page))
            };
            (response, delay)
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }

    async fn create_note(&self, payload: &CreateNotePayload) -> Result<Note, DomainError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Transport("Request failed with status code 400".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Note {
            tag: payload.tag,
            content: payload.content.clone(),
            ..note(id, &payload.title)
        };
        self.notes.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn delete_note(&self, id: &ItemId) -> Result<Note, DomainError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let delay = self.delete_delays.lock().unwrap().get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let not_found = || DomainError::Transport("Request failed with status code 404".to_string());
        if self.fail_delete.load(Ordering::SeqCst) || self.failing_ids.lock().unwrap().contains(id) {
            return Err(not_found());
        }
        let mut notes = self.notes.lock().unwrap();
        let position = notes.iter().position(|n| &n.id == id).ok_or_else(not_found)?;
        Ok(notes.remove(position))
    }
}

/// In-memory movie search backend with a fixed catalogue.
#[derive(Debug, Default)]
pub struct StubMovies {
    movies: Vec<Movie>,
    searches: Mutex<Vec<SearchMoviesParams>>,
    pub fail: AtomicBool,
}

impl StubMovies {
    /// `count` movies titled "Matrix 1", "Matrix 2", ...
    pub fn with_matrix_movies(count: usize) -> Self {
        Self {
            movies: (1..=count as i64).map(|i| movie(i, &format!("Matrix {i}"))).collect(),
            ..Self::default()
        }
    }

    pub fn searches(&self) -> Vec<SearchMoviesParams> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoviesApi for StubMovies {
    async fn search_movies(&self, params: &SearchMoviesParams) -> Result<ListResult<Movie>, DomainError> {
        self.searches.lock().unwrap().push(params.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Transport("Request failed with status code 401".to_string()));
        }
        let term = params.query.to_lowercase();
        let matching: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&term))
            .cloned()
            .collect();
        Ok(paginate(&matching, params.page, 20))
    }
}

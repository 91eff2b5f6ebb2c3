//! Typed clients for the remote notes and movies APIs.
//!
//! The application layer never talks HTTP directly. It depends on the
//! [`NotesApi`] and [`MoviesApi`] traits, which the runtime calls when it
//! executes fetch and mutation actions. The reqwest-backed implementations
//! live in [`http`]; tests substitute in-memory stubs.
//!
//! # Error Normalization
//!
//! Every transport failure (connect error, timeout, non-2xx status, bad JSON)
//! is converted into [`DomainError::Transport`](crate::domain::DomainError)
//! with a human-readable message before it leaves this module.

pub mod client;
pub mod http;

pub use client::{FetchNotesParams, MoviesApi, NotesApi, SearchMoviesParams, Services};
pub use http::{HttpMoviesClient, HttpNotesClient};

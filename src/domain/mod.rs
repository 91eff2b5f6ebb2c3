//! Domain layer for notehub.
//!
//! This module contains the core domain types shared by both list workflows,
//! independent of HTTP transport, caching, or terminal rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Wire-tolerant item identifiers
//! - [`note`]: Note records, tags, and the create payload
//! - [`movie`]: Movie records and detail formatting
//! - [`query`]: List queries, cache keys, and paginated results
//!
//! # Examples
//!
//! ```
//! use notehub::domain::{Entity, ListQuery, QueryKey};
//!
//! let key = QueryKey::new(Entity::Notes, ListQuery::new(1, 12, "groceries"));
//! assert_eq!(key.to_string(), "notes:p=1:n=12:q=groceries");
//! ```

pub mod error;
pub mod item;
pub mod movie;
pub mod note;
pub mod query;

pub use error::{DomainError, NotehubError, Result};
pub use item::ItemId;
pub use movie::Movie;
pub use note::{CreateNotePayload, Note, NoteTag};
pub use query::{Entity, ListQuery, ListResult, QueryKey};

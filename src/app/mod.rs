//! Application layer coordinating state, events, and actions.
//!
//! This module holds the logic of both workflows, sitting between the
//! terminal front end (main.rs) and the domain, cache and API layers. It
//! implements the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → App::handle_event → State Mutations → Actions → Side Effects
//!                             ↑                                            ↓
//!                             └────────── Completion Events ───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by applications
//! - [`handler`]: The [`Event`] enum and the [`App`] trait
//! - [`search`]: Debounced search input
//! - [`list`]: Page/search state and derived view states
//! - [`mutation`]: Create/delete bookkeeping
//! - [`browser`]: Search, list and cache wired together
//! - [`notes`] and [`movies`]: The two applications
//! - [`notify`]: Notifications and sinks
//! - [`runtime`]: The event loop executing actions
//!
//! # Example
//!
//! ```rust
//! use notehub::app::{Action, App, Event, NotesApp};
//!
//! let mut app = NotesApp::default();
//! let (render, actions) = app.handle_event(&Event::Start)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), notehub::domain::NotehubError>(())
//! ```

pub mod actions;
pub mod browser;
pub mod handler;
pub mod list;
pub mod movies;
pub mod mutation;
pub mod notes;
pub mod notify;
pub mod runtime;
pub mod search;

pub use actions::Action;
pub use handler::{App, Event};
pub use list::{ListView, Pagination, ViewState};
pub use movies::{MoviesApp, MoviesSettings};
pub use notes::{NotesApp, NotesSettings};
pub use notify::{Notification, NotificationKind, NotificationSink, ToastSink, TracingSink};
pub use runtime::Runtime;

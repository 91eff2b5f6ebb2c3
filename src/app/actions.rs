//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by an application after processing an event. Actions bridge pure
//! state transitions and effectful operations: HTTP calls, debounce timers
//! and notifications.
//!
//! # Architecture
//!
//! [`App::handle_event`](crate::app::App::handle_event) returns a
//! `Vec<Action>` after processing each event, allowing multiple side effects
//! to be queued atomically. The [`Runtime`](crate::app::Runtime) executes
//! them in order; anything asynchronous reports back as a new event.
//!
//! # Example
//!
//! ```rust
//! use notehub::app::Action;
//! use notehub::app::notify::Notification;
//! use std::time::Duration;
//!
//! let actions = vec![
//!     Action::ScheduleDebounce { generation: 1, delay: Duration::from_millis(300) },
//!     Action::Notify(Notification::success("Note created")),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::app::notify::Notification;
use crate::cache::FetchRequest;
use crate::domain::{CreateNotePayload, ItemId};
use std::time::Duration;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches one list page. The outcome returns as
    /// [`Event::NotesFetched`](crate::app::Event::NotesFetched) or
    /// [`Event::MoviesFetched`](crate::app::Event::MoviesFetched) carrying the
    /// same key and sequence.
    Fetch(FetchRequest),

    /// Starts the debounce timer for a search submission.
    ///
    /// Any previously scheduled timer is aborted first. When the timer fires
    /// the runtime posts [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ScheduleDebounce {
        /// Search generation the timer belongs to.
        generation: u64,
        /// Quiescence window.
        delay: Duration,
    },

    /// Aborts the pending debounce timer, if any.
    CancelDebounce,

    /// Sends `POST /notes`.
    CreateNote(CreateNotePayload),

    /// Sends `DELETE /notes/{id}`.
    DeleteNote(ItemId),

    /// Hands a message to the notification sink.
    Notify(Notification),
}

//! Events and the application trait.
//!
//! Both workflows (notes and movies) are state machines with the same shape:
//! they consume one [`Event`] at a time, mutate their own state, and return
//! whether a re-render is needed together with the [`Action`]s to execute.
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Lifecycle**: `Start`, `Dispose`
//! - **View**: `SearchInput`, `PageChange`, `NextPage`, `PrevPage`,
//!   `SelectItem`, `OpenCreateForm`, `CreateItem`, `DeleteItem`, `CloseModal`
//! - **Internal**: `DebounceElapsed`, `NotesFetched`, `MoviesFetched`,
//!   `NoteCreated`, `NoteDeleted`, posted by the runtime when a timer or
//!   request completes
//!
//! An application ignores events that do not concern it (the movie browser
//! has no mutations, the notes manager has no detail view).

use crate::app::Action;
use crate::domain::error::Result;
use crate::domain::{CreateNotePayload, DomainError, ItemId, ListResult, Movie, Note, QueryKey};
use crate::ui::viewmodel::UIViewModel;

/// Events triggered by user input or by completed side effects.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. Events are processed sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First event after construction; issues the initial fetch if any.
    Start,
    /// Raw search box content after a keystroke.
    SearchInput(String),
    /// A debounce timer fired.
    DebounceElapsed {
        generation: u64,
    },
    /// Jump to a page (1-based).
    PageChange(u32),
    NextPage,
    PrevPage,
    /// Open the detail view of a listed item.
    SelectItem(ItemId),
    OpenCreateForm,
    CreateItem(CreateNotePayload),
    DeleteItem(ItemId),
    /// Close the create form or the detail view.
    CloseModal,
    /// Tear down: cancel the pending debounce and ignore further input.
    Dispose,

    NotesFetched {
        key: QueryKey,
        seq: u64,
        result: std::result::Result<ListResult<Note>, DomainError>,
    },
    MoviesFetched {
        key: QueryKey,
        seq: u64,
        result: std::result::Result<ListResult<Movie>, DomainError>,
    },
    NoteCreated(std::result::Result<Note, DomainError>),
    NoteDeleted {
        id: ItemId,
        result: std::result::Result<Note, DomainError>,
    },
}

/// An application driven by the [`Runtime`](crate::app::Runtime).
pub trait App {
    /// Processes an event, mutates state, and returns actions to execute.
    ///
    /// The boolean is `true` when the visible state changed and the caller
    /// should re-render.
    ///
    /// # Errors
    ///
    /// Implementations return an error only for unrecoverable internal
    /// failures; API and validation failures are state, not errors.
    fn handle_event(&mut self, event: &Event) -> Result<(bool, Vec<Action>)>;

    /// Computes the view model for a terminal of `rows` x `cols` cells.
    fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel;
}

//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges and
//! truncated text.
//!
//! # Architecture
//!
//! View models are created via [`App::compute_viewmodel`](crate::app::App::compute_viewmodel)
//! and consumed by the renderer. They contain no business logic, only
//! display-ready data.
//!
//! # Example
//!
//! ```rust
//! use notehub::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " NoteHub ".to_string() },
//!     search_bar: SearchBarInfo {
//!         query: "milk".to_string(),
//!         placeholder: "Search notes".to_string(),
//!         is_pending: false,
//!     },
//!     status: None,
//!     display_items: vec![DisplayItem {
//!         id: "65a1".to_string(),
//!         title: "Buy milk".to_string(),
//!         detail: "2 liters".to_string(),
//!         badge: Some("Shopping".to_string()),
//!         is_busy: false,
//!         highlight_ranges: vec![(4, 8)],
//!     }],
//!     empty_state: None,
//!     pagination: None,
//!     modal: None,
//!     footer: FooterInfo { keybindings: ":q: quit".to_string() },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Search box content.
    pub search_bar: SearchBarInfo,

    /// Loading, updating or error line above the list.
    pub status: Option<StatusLine>,

    /// Rows of the list.
    pub display_items: Vec<DisplayItem>,

    /// Shown instead of rows when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Page control, present only when there is more than one page.
    pub pagination: Option<PaginationInfo>,

    /// Create form or detail view drawn over the list.
    pub modal: Option<ModalInfo>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Display information for a single note or movie.
///
/// Represents one row in the list. Contains pre-computed highlight ranges
/// for search match rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Identifier the user types to open or delete the item.
    pub id: String,

    /// Primary text, already truncated.
    pub title: String,

    /// Secondary text (note content, movie release date).
    pub detail: String,

    /// Short label shown at the end of the row (tag, rating).
    pub badge: Option<String>,

    /// A mutation of this item is in flight.
    pub is_busy: bool,

    /// Character ranges of `title` to highlight.
    ///
    /// Each tuple is `(start_index, end_index)` in UTF-8 character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
///
/// Contains help text and command hints for the bottom of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g., "/text: search  :q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
///
/// Shown when no items are available (no results, or nothing searched yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No notes found.").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed, settled or not.
    pub query: String,

    /// Shown when `query` is empty.
    pub placeholder: String,

    /// A debounce window is running.
    pub is_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Updating,
    Error,
}

/// One-line status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub total_pages: u32,
}

/// Overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalInfo {
    /// The create-note form.
    NoteForm {
        /// Accepted tag names.
        tags: Vec<String>,
        is_submitting: bool,
    },
    /// Details of the selected movie, with fallbacks already applied.
    MovieDetail {
        title: String,
        image: String,
        overview: String,
        release_date: String,
        rating: String,
    },
}

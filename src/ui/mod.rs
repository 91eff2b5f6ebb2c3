//! User interface rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled terminal frames through
//! composable rendering components. It provides theme support, responsive
//! layout, and search match highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! App → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Frame buffer and shared rendering utilities
//! - [`input`]: Command line to event mapping
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ModalInfo, PaginationInfo, SearchBarInfo,
    StatusKind, StatusLine, UIViewModel,
};

//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: [`App::compute_viewmodel`] turns application
//!    state into a [`UIViewModel`]
//! 2. **Component Rendering**: components draw the view model into a frame
//!
//! # Example
//!
//! ```rust
//! use notehub::app::{App, NotesApp};
//! use notehub::ui::{render, Theme};
//!
//! let app = NotesApp::default();
//! let screen = render(&app, None, &Theme::default(), 24, 80);
//! assert!(screen.contains("NoteHub"));
//! ```

use crate::app::notify::Notification;
use crate::app::App;
use crate::ui::components;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders an application screen.
///
/// Returns the complete frame, starting with a clear-screen sequence, ready
/// to be written to the terminal.
pub fn render<A: App + ?Sized>(
    app: &A,
    toast: Option<&Notification>,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> String {
    let viewmodel = app.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, toast, theme, rows, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(
    vm: &UIViewModel,
    toast: Option<&Notification>,
    theme: &Theme,
    rows: usize,
    cols: usize,
) -> String {
    let mut frame = Frame::new();
    frame.clear();
    components::render_layout(&mut frame, vm, toast, theme, rows, cols);
    frame.into_string()
}

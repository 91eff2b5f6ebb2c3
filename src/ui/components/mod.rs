//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements, following a component-based architecture. Each component draws
//! one part of the interface into a [`Frame`] and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box
//! - [`status`]: Loading, updating and error line
//! - [`table`]: Item list with columns (ID, TITLE, DETAILS)
//! - [`empty`]: Empty state message
//! - [`pagination`]: Page control
//! - [`modal`]: Create form and detail overlay
//! - [`footer`]: Notifications and command hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status]
//! [Table Headers]
//! [Table Rows | Empty State]   (modal drawn over this area)
//! [Pagination]
//! [Notification]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod modal;
pub mod pagination;
mod search;
mod status;
mod table;

use crate::app::notify::Notification;
use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::{render_footer, render_toast};
use header::render_header;
use modal::render_modal;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Rows used by everything except the item rows.
pub const CHROME_ROWS: usize = 12;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(color));
    frame.print("─".repeat(cols));
    frame.print(Theme::reset());
    row + 1
}

/// Renders the full screen layout.
pub fn render_layout(
    frame: &mut Frame,
    vm: &UIViewModel,
    toast: Option<&Notification>,
    theme: &Theme,
    rows: usize,
    cols: usize,
) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(frame, current_row, &vm.search_bar, theme, cols);
    current_row = render_status(frame, current_row, vm.status.as_ref(), theme);
    current_row = render_table_headers(frame, current_row, theme);
    let list_start = current_row;

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, list_start + 1, empty, theme, cols);
    } else {
        render_table_rows(frame, list_start, &vm.display_items, theme, cols);
    }

    if let Some(modal) = &vm.modal {
        render_modal(frame, list_start, modal, theme, cols);
    }

    let footer_row = rows.max(CHROME_ROWS);
    let border_row = footer_row - 1;
    let toast_row = border_row - 1;
    let pagination_row = toast_row - 1;

    if let Some(pagination) = vm.pagination {
        render_pagination(frame, pagination_row, pagination, theme, cols);
    }
    if let Some(toast) = toast {
        render_toast(frame, toast_row, toast, theme);
    }
    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_row, &vm.footer, theme, cols);
}

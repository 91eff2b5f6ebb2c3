//! List component: one row per note or movie.

use crate::ui::helpers::{self, char_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const ID_COLUMN_WIDTH: usize = 26;
const TITLE_COLUMN_WIDTH: usize = 42;

pub fn render_table_headers(frame: &mut Frame, row: usize, theme: &Theme) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::bold());
    frame.print(Theme::fg(&theme.colors.header_fg));
    frame.print(format_args!(
        " {:<id$}{:<title$}{}",
        "ID",
        "TITLE",
        "DETAILS",
        id = ID_COLUMN_WIDTH,
        title = TITLE_COLUMN_WIDTH
    ));
    frame.print(Theme::reset());
    row + 1
}

pub fn render_table_rows(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(frame, current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);

    let base = if item.is_busy {
        &theme.colors.busy_fg
    } else {
        &theme.colors.text_normal
    };

    frame.print(Theme::fg(&theme.colors.text_dim));
    frame.print(format_args!(" {:<width$}", item.id, width = ID_COLUMN_WIDTH));
    frame.print(Theme::fg(base));

    helpers::render_highlighted_text(frame, &item.title, &item.highlight_ranges, theme);
    frame.print(" ".repeat(TITLE_COLUMN_WIDTH.saturating_sub(char_len(&item.title))));

    frame.print(Theme::fg(&theme.colors.text_dim));
    frame.print(&item.detail);

    let badge = if item.is_busy {
        Some("deleting…".to_string())
    } else {
        item.badge.as_ref().map(|badge| format!("[{badge}]"))
    };
    let used = 1
        + ID_COLUMN_WIDTH.max(char_len(&item.id))
        + TITLE_COLUMN_WIDTH.max(char_len(&item.title))
        + char_len(&item.detail);

    if let Some(badge) = badge {
        frame.print(" ".repeat(cols.saturating_sub(used + char_len(&badge) + 1).max(1)));
        let color = if item.is_busy {
            &theme.colors.busy_fg
        } else {
            &theme.colors.badge_fg
        };
        frame.print(Theme::fg(color));
        frame.print(badge);
    }

    frame.print(Theme::reset());
    row + 1
}

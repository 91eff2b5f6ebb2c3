//! Search box component.

use crate::ui::helpers::{char_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 2;

pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    frame.position_cursor(row, 1);
    frame.print(&margin);
    frame.print(Theme::fg(&theme.colors.search_bar_border));
    frame.print(format_args!("┌{}┐", "─".repeat(inner_width)));
    frame.print(Theme::reset());

    let (text, color) = if search.query.is_empty() {
        (format!(" {}", search.placeholder), &theme.colors.text_dim)
    } else {
        (format!(" Search: {}", search.query), &theme.colors.text_normal)
    };
    let marker = if search.is_pending { " …" } else { "" };
    let padding = inner_width.saturating_sub(char_len(&text) + char_len(marker));

    frame.position_cursor(row + 1, 1);
    frame.print(&margin);
    frame.print(Theme::fg(&theme.colors.search_bar_border));
    frame.print("│");
    frame.print(Theme::fg(color));
    frame.print(&text);
    frame.print(Theme::fg(&theme.colors.text_dim));
    frame.print(marker);
    frame.print(" ".repeat(padding));
    frame.print(Theme::fg(&theme.colors.search_bar_border));
    frame.print("│");
    frame.print(Theme::reset());

    frame.position_cursor(row + 2, 1);
    frame.print(&margin);
    frame.print(Theme::fg(&theme.colors.search_bar_border));
    frame.print(format_args!("└{}┘", "─".repeat(inner_width)));
    frame.print(Theme::reset());

    row + 3
}

//! Empty state component: centered message and subtitle.

use crate::ui::helpers::{print_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(&theme.colors.empty_state_fg));
    print_centered(frame, &empty.message, cols);
    frame.print(Theme::reset());

    frame.position_cursor(row + 1, 1);
    frame.print(Theme::dim());
    frame.print(Theme::fg(&theme.colors.text_dim));
    print_centered(frame, &empty.subtitle, cols);
    frame.print(Theme::reset());

    row + 2
}

//! Header component: centered, bold title bar.

use crate::ui::helpers::{print_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::bold());
    frame.print(Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.print(Theme::bg(bg));
    }

    print_centered(frame, &header.title, cols);

    frame.print(Theme::reset());
    row + 1
}

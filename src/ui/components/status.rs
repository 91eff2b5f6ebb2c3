//! Status line component (loading, updating, error).

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

pub fn render_status(frame: &mut Frame, row: usize, status: Option<&StatusLine>, theme: &Theme) -> usize {
    frame.position_cursor(row, 2);
    if let Some(status) = status {
        let color = match status.kind {
            StatusKind::Loading | StatusKind::Updating => &theme.colors.text_dim,
            StatusKind::Error => &theme.colors.error_fg,
        };
        frame.print(Theme::fg(color));
        frame.print(&status.message);
        frame.print(Theme::reset());
    }
    row + 1
}

//! Footer component: command hints, and the latest notification above them.

use crate::app::notify::{Notification, NotificationKind};
use crate::ui::helpers::{print_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.print(Theme::fg(&theme.colors.text_dim));
    print_centered(frame, &footer.keybindings, cols);
    frame.print(Theme::reset());
    row + 1
}

pub fn render_toast(frame: &mut Frame, row: usize, toast: &Notification, theme: &Theme) -> usize {
    let color = match toast.kind {
        NotificationKind::Success => &theme.colors.success_fg,
        NotificationKind::Error => &theme.colors.error_fg,
    };

    frame.position_cursor(row, 2);
    frame.print(Theme::bold());
    frame.print(Theme::fg(color));
    frame.print(toast);
    frame.print(Theme::reset());
    row + 1
}

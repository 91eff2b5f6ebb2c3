//! Page control: `‹ 1 … 4 5 [6] 7 8 … 20 ›`.

use crate::ui::helpers::{print_centered, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Pages shown on each side of the current one.
const PAGE_RANGE: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabel {
    Page(u32),
    Current(u32),
    Gap,
}

/// Labels for the page control: the first and last page, a window around
/// the current page, and gaps in between.
#[must_use]
pub fn page_labels(info: PaginationInfo) -> Vec<PageLabel> {
    let total = info.total_pages.max(1);
    let current = info.page.clamp(1, total);
    let window_start = current.saturating_sub(PAGE_RANGE).max(1);
    let window_end = current.saturating_add(PAGE_RANGE).min(total);

    let candidates = std::iter::once(1)
        .chain(window_start..=window_end)
        .chain(std::iter::once(total));

    let mut labels = Vec::new();
    let mut last_shown = 0;
    for page in candidates {
        if page <= last_shown {
            continue;
        }
        if page > last_shown.saturating_add(1) {
            labels.push(PageLabel::Gap);
        }
        labels.push(if page == current {
            PageLabel::Current(page)
        } else {
            PageLabel::Page(page)
        });
        last_shown = page;
    }
    labels
}

pub fn render_pagination(frame: &mut Frame, row: usize, info: PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let body = page_labels(info)
        .into_iter()
        .map(|label| match label {
            PageLabel::Page(page) => page.to_string(),
            PageLabel::Current(page) => format!("[{page}]"),
            PageLabel::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    frame.position_cursor(row, 1);
    frame.print(Theme::fg(&theme.colors.text_normal));
    print_centered(frame, &format!("‹ {body} ›"), cols);
    frame.print(Theme::reset());
    row + 1
}

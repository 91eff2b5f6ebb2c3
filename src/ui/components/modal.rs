//! Overlay box for the create form and the movie detail view.

use crate::ui::helpers::{char_len, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalInfo;

const MAX_MODAL_WIDTH: usize = 72;

/// Greedy word wrap to `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && char_len(&line) + 1 + char_len(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn modal_lines(modal: &ModalInfo, inner_width: usize) -> (String, Vec<String>) {
    match modal {
        ModalInfo::NoteForm { tags, is_submitting } => {
            let mut lines = vec![
                "Create a note with:".to_string(),
                "  :new <title> | <content> | <tag>".to_string(),
                String::new(),
                format!("Tags: {}", tags.join(", ")),
            ];
            if *is_submitting {
                lines.push(String::new());
                lines.push("Creating…".to_string());
            }
            (" New note ".to_string(), lines)
        }
        ModalInfo::MovieDetail {
            title,
            image,
            overview,
            release_date,
            rating,
        } => {
            let mut lines = vec![format!("Image: {image}"), String::new()];
            lines.extend(wrap(overview, inner_width));
            lines.push(String::new());
            lines.push(format!("Release date: {release_date}"));
            lines.push(format!("Rating: {rating}"));
            (format!(" {title} "), lines)
        }
    }
}

pub fn render_modal(frame: &mut Frame, row: usize, modal: &ModalInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(4).min(MAX_MODAL_WIDTH).max(20);
    let inner_width = width.saturating_sub(4);
    let left = cols.saturating_sub(width) / 2 + 1;

    let (title, lines) = modal_lines(modal, inner_width);
    let title: String = title.chars().take(inner_width).collect();
    let border = &theme.colors.modal_border;

    frame.position_cursor(row, left);
    frame.print(Theme::fg(border));
    frame.print("┌");
    frame.print(Theme::bold());
    frame.print(&title);
    frame.print(Theme::reset());
    frame.print(Theme::fg(border));
    frame.print("─".repeat(width.saturating_sub(2 + char_len(&title))));
    frame.print("┐");

    let mut current_row = row + 1;
    for line in &lines {
        let line: String = line.chars().take(inner_width).collect();
        frame.position_cursor(current_row, left);
        frame.print(Theme::fg(border));
        frame.print("│ ");
        frame.print(Theme::fg(&theme.colors.text_normal));
        frame.print(&line);
        frame.print(" ".repeat(inner_width.saturating_sub(char_len(&line))));
        frame.print(Theme::fg(border));
        frame.print(" │");
        current_row += 1;
    }

    frame.position_cursor(current_row, left);
    frame.print(format_args!("└{}┘", "─".repeat(width.saturating_sub(2))));
    frame.print(Theme::reset());
    current_row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap("a quick brown fox jumps", 11),
            vec!["a quick", "brown fox", "jumps"]
        );
    }
}

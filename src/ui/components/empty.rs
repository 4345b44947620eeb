//! Empty state component renderer.
//!
//! Shown in place of the list when it has no rows: before the first search,
//! while the first page loads, after a search with no matches, and in an
//! empty favorites view.

use crate::ui::helpers::{center_padding, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message centered at `row`, with the subtitle dimmed below it.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let (msg_left, msg_right) = center_padding(char_width(&empty.message), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_left));
    print!("{}", empty.message);
    print!("{}", " ".repeat(msg_right));
    print!("{}", Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    let (sub_left, sub_right) = center_padding(char_width(&empty.subtitle), cols);

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_left));
    print!("{}", empty.subtitle);
    print!("{}", " ".repeat(sub_right));
    print!("{}", Theme::reset());
}

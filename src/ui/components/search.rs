//! Query bar component renderer.
//!
//! A 3-line bordered box holding the field label, the query and, in the
//! results view, the sort selector:
//!
//! ```text
//! [margin] ┌──────────────────────────────────┐ [margin]
//! [margin] │ Title: dune▏         sort: Year ↑ │ [margin]
//! [margin] └──────────────────────────────────┘ [margin]
//! ```
//!
//! The border takes the accent color while the bar has focus and the plain
//! border color otherwise.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the query bar starting at `row`. Returns the row after the box.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.focused { "▏" } else { "" };
    let query_text = format!(" {}: {}{cursor}", search.label, search.query);
    let sort_text = search
        .sort_label
        .as_ref()
        .map(|label| format!("sort: {label} "))
        .unwrap_or_default();

    let query_width = char_width(&query_text);
    let sort_width = char_width(&sort_text);
    let (query_text, padding) = if query_width + sort_width <= inner_width {
        (query_text, inner_width - query_width - sort_width)
    } else {
        // keep the tail of a long query visible
        let keep = inner_width.saturating_sub(sort_width + 1);
        let tail: String = query_text.chars().skip(query_width.saturating_sub(keep)).collect();
        (format!("…{tail}"), 0)
    };

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{query_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{sort_text}");
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

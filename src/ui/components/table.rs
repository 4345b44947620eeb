//! List component renderer.
//!
//! One row per book or favorite:
//!
//! ```text
//!  ★ Dune Messiah                    Frank Herbert · 1969
//!  ☆ Children of Dune                Frank Herbert · 1976
//! ```

use crate::ui::helpers::{self, char_width, position_cursor, title_width, MARKER_WIDTH};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders all rows starting at `row`. Returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row, padded to the full pane width so the selection
/// background spans the line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (row_fg, row_bg) = if item.is_selected {
        (&theme.colors.selection_fg, Some(&theme.colors.selection_bg))
    } else {
        (&theme.colors.text_normal, None)
    };
    let restore = |fg: &str| {
        print!("{}", Theme::fg(fg));
        if let Some(bg) = row_bg {
            print!("{}", Theme::bg(bg));
        }
    };

    restore(row_fg.as_str());
    if item.is_favorite {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!(" ★ ");
    } else {
        print!(" ☆ ");
    }
    restore(row_fg.as_str());

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);

    let title_column = title_width(cols) + 2;
    print!("{}", " ".repeat(title_column.saturating_sub(char_width(&item.title))));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.detail);

    let line_len = MARKER_WIDTH + title_column.max(char_width(&item.title)) + char_width(&item.detail);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

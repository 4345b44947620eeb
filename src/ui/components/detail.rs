//! Detail panel renderer.
//!
//! Replaces the list with the full record of the selected entry:
//!
//! ```text
//!  ★ Dune
//!
//!    Authors          Frank Herbert
//!    First published  1965
//!    Cover            https://covers.openlibrary.org/b/id/11481354-M.jpg
//! ```

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 17;

/// Renders the panel between `row` and `last_row` inclusive. Rows that do
/// not fit are dropped.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    if row > last_row {
        return;
    }

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    if detail.is_favorite {
        print!("{} ★ ", Theme::fg(&theme.colors.favorite_fg));
    } else {
        print!("{} ☆ ", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let title: String = detail.title.chars().take(cols.saturating_sub(3)).collect();
    print!("{title}");
    print!("{}", Theme::reset());

    let value_width = cols.saturating_sub(LABEL_WIDTH + 3);
    for (offset, (label, value)) in detail.rows.iter().enumerate() {
        let current = row + 2 + offset;
        if current > last_row {
            break;
        }
        position_cursor(current, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("   {label}");
        print!("{}", " ".repeat(LABEL_WIDTH.saturating_sub(char_width(label))));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        let value: String = value.chars().take(value_width).collect();
        print!("{value}");
        print!("{}", Theme::reset());
    }
}

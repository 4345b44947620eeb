//! Shared rendering utilities.
//!
//! Cursor positioning, column geometry, and fuzzy match highlighting. Widths
//! are measured in characters, not bytes, so titles with accents or CJK text
//! do not shift the columns.

use crate::ui::theme::Theme;

/// Columns taken by the favorite marker and its padding (`" ★ "`).
pub const MARKER_WIDTH: usize = 3;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Width of the title column for a pane `cols` wide.
#[must_use]
pub fn title_width(cols: usize) -> usize {
    (cols.saturating_sub(MARKER_WIDTH + 1) / 2).max(12)
}

/// Width left for the secondary column after the marker, title and gap.
#[must_use]
pub fn detail_width(cols: usize) -> usize {
    cols.saturating_sub(MARKER_WIDTH + title_width(cols) + 2)
}

/// Display width of `text` in characters.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Left and right padding that centers `text_len` characters in `cols`.
///
/// When the split is uneven the extra column goes to the right.
#[must_use]
pub const fn center_padding(text_len: usize, cols: usize) -> (usize, usize) {
    let left = cols.saturating_sub(text_len) / 2;
    (left, cols.saturating_sub(left + text_len))
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Selected rows skip match highlighting so the selection
/// background stays uniform.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

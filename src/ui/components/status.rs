//! Status line renderer.
//!
//! One line between the list and the footer. Precedence, left side: error,
//! then notice, then loading indicator, then the result summary. The
//! load-more hint sits on the right whenever it is set.

use crate::ui::helpers::{char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusInfo;

const LOAD_MORE_HINT: &str = "m: load more ";

/// Renders the status line at `row`. Returns the next row.
pub fn render_status(row: usize, status: &StatusInfo, theme: &Theme, cols: usize) -> usize {
    let (text, color) = if let Some(error) = &status.error {
        (format!(" ✗ {error}"), &theme.colors.error_fg)
    } else if let Some(notice) = &status.notice {
        (format!(" ! {notice}"), &theme.colors.error_fg)
    } else if status.loading {
        (" Loading…".to_string(), &theme.colors.text_dim)
    } else {
        (format!(" {}", status.summary), &theme.colors.text_dim)
    };

    let hint = if status.load_more_hint { LOAD_MORE_HINT } else { "" };
    let text: String = text.chars().take(cols.saturating_sub(hint.len())).collect();
    let padding = cols.saturating_sub(char_width(&text) + hint.len());

    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{hint}");
    print!("{}", Theme::reset());
    row + 1
}

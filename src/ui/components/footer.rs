//! Footer component renderer.
//!
//! Renders the keybinding hints centered and dimmed. Hints wider than the
//! pane are cut at the pane edge rather than wrapped, so the layout never
//! grows an extra line on narrow terminals.

use crate::ui::helpers::{center_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row`. Returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let (left, right) = center_padding(help_text.chars().count(), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(left));
    print!("{help_text}");
    print!("{}", " ".repeat(right));
    print!("{}", Theme::reset());
    row + 1
}

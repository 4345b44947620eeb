//! View model types representing renderable UI state.
//!
//! View models are created by [`AppState::compute_viewmodel`] and consumed by
//! the renderer. They hold display-ready strings and flags only; no business
//! logic runs during rendering.
//!
//! [`AppState::compute_viewmodel`]: crate::app::AppState::compute_viewmodel

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows of the visible window of the list.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub status: StatusInfo,
    pub footer: FooterInfo,

    /// Set when the list is empty.
    pub empty_state: Option<EmptyState>,

    /// Set when the detail panel is open; replaces the list.
    pub detail: Option<DetailInfo>,
}

/// One list row: a search result or a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, already truncated to its column.
    pub title: String,

    /// Secondary column: authors plus year or "added" age.
    pub detail: String,

    pub is_selected: bool,

    /// Drives the `★`/`☆` marker.
    pub is_favorite: bool,

    /// Character ranges of `title` to highlight, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Query bar contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Prefix naming what is being edited ("Title", "Author", "Filter", ...).
    pub label: String,

    pub query: String,

    /// Sort selector label; absent in the favorites view.
    pub sort_label: Option<String>,

    /// Whether keystrokes currently go to the bar.
    pub focused: bool,
}

/// The line between the list and the footer.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,

    /// Shown only when more pages exist and nothing is loading.
    pub load_more_hint: bool,

    /// e.g. "40 results · page 2".
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered message shown instead of an empty list.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Full record of the selected entry.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,

    /// `(label, value)` pairs; fields without a value are omitted.
    pub rows: Vec<(String, String)>,

    pub is_favorite: bool,
}

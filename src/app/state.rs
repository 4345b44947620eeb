//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the search
//! criteria and accumulated results, focus and view modes, the selection, and
//! the injected [`FavoritesStore`]. The search controller transitions live in
//! [`search`](super::search); this module holds everything else plus
//! [`AppState::compute_viewmodel`], which turns a state snapshot into a
//! renderable [`UIViewModel`].

use super::debounce::Debouncer;
use super::modes::{InputFocus, ViewMode};
use crate::catalog::DEFAULT_CATALOG_URL;
use crate::domain::error::Result;
use crate::domain::{derive_book_id, Book, Favorite, SearchField, SortOrder};
use crate::favorites::{FavoritesStore, ToggleOutcome};
use crate::ui::helpers::{detail_width, title_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Message shown for every failed fetch, whatever the cause.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch results. Try again later.";

/// Rows used by everything except the list: blank, header, border, search
/// box (3), status, border, footer.
const CHROME_ROWS: usize = 9;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Raw query text as typed.
    pub query: String,
    pub field: SearchField,
    pub sort: SortOrder,

    /// 1-based page of the most recently issued fetch.
    pub page: u32,

    /// Page of the results currently on screen. A failed load-more rolls
    /// `page` back to this.
    pub(crate) loaded_page: u32,

    /// Accumulated results, in display order.
    pub results: Vec<Book>,

    /// Set while the latest issued fetch is unanswered.
    pub loading: bool,

    /// User-facing fetch error, cleared by the next successful fetch.
    pub error: Option<String>,

    pub has_more: bool,

    /// Token of the latest issued fetch; responses carrying any other token
    /// are stale.
    pub(crate) latest_token: u64,

    pub debouncer: Debouncer,

    pub focus: InputFocus,
    pub view_mode: ViewMode,

    /// Zero-based index into the visible list (results or filtered favorites).
    pub selected_index: usize,

    /// Whether the detail panel for the selected entry is open.
    pub detail_open: bool,

    pub favorites: FavoritesStore,

    /// Local fuzzy filter applied to the favorites view.
    pub favorites_filter: String,

    /// Transient notice, e.g. a favorites write failure.
    pub notice: Option<String>,

    /// Catalog base URL without trailing slash.
    pub catalog_url: String,

    pub theme: Theme,
}

impl AppState {
    /// Creates a state with empty results and the given favorites store.
    ///
    /// # Example
    ///
    /// ```
    /// use bookfinder::app::AppState;
    /// use bookfinder::favorites::FavoritesStore;
    /// use bookfinder::storage::MemoryStorage;
    /// use bookfinder::ui::Theme;
    ///
    /// let favorites = FavoritesStore::load(Box::new(MemoryStorage::new()));
    /// let state = AppState::new(favorites, Theme::default());
    /// assert_eq!(state.page, 1);
    /// assert!(!state.loading);
    /// ```
    #[must_use]
    pub fn new(favorites: FavoritesStore, theme: Theme) -> Self {
        Self {
            query: String::new(),
            field: SearchField::default(),
            sort: SortOrder::default(),
            page: 1,
            loaded_page: 1,
            results: Vec::new(),
            loading: false,
            error: None,
            has_more: false,
            latest_token: 0,
            debouncer: Debouncer::default(),
            focus: InputFocus::Typing,
            view_mode: ViewMode::Results,
            selected_index: 0,
            detail_open: false,
            favorites,
            favorites_filter: String::new(),
            notice: None,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            theme,
        }
    }

    /// Number of rows in the list currently shown.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Results => self.results.len(),
            ViewMode::Favorites => self.filtered_favorites().len(),
        }
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    pub(crate) fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
            self.detail_open = false;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// The highlighted search result, in the results view.
    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        match self.view_mode {
            ViewMode::Results => self.results.get(self.selected_index),
            ViewMode::Favorites => None,
        }
    }

    /// The highlighted favorite, in the favorites view.
    #[must_use]
    pub fn selected_favorite(&self) -> Option<&Favorite> {
        match self.view_mode {
            ViewMode::Results => None,
            ViewMode::Favorites => self.filtered_favorites().get(self.selected_index).copied(),
        }
    }

    /// Favorites matching the local filter, most recent first.
    ///
    /// Every whitespace-separated token must fuzzy-match the title or the
    /// author list.
    #[must_use]
    pub fn filtered_favorites(&self) -> Vec<&Favorite> {
        let tokens: Vec<String> = self
            .favorites_filter
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        if tokens.is_empty() {
            return self.favorites.entries().iter().collect();
        }

        let matcher = SkimMatcherV2::default();
        self.favorites
            .entries()
            .iter()
            .filter(|fav| {
                let haystack = format!("{} {}", fav.title, fav.authors_display()).to_lowercase();
                tokens
                    .iter()
                    .all(|token| matcher.fuzzy_match(&haystack, token).is_some())
            })
            .collect()
    }

    /// Toggles the favorite state of the highlighted entry.
    ///
    /// In the results view the selected book is added or removed; in the
    /// favorites view the selected entry is removed. A failed write leaves the
    /// in-memory change in place and sets a notice.
    ///
    /// # Parameters
    ///
    /// * `now` - Unix timestamp stamped on a newly added favorite
    ///
    /// # Errors
    ///
    /// Returns the storage error when persisting fails.
    pub fn toggle_selected_favorite(&mut self, now: i64) -> Result<()> {
        self.notice = None;

        let outcome = match self.view_mode {
            ViewMode::Results => {
                let Some(book) = self.results.get(self.selected_index) else {
                    return Ok(());
                };
                self.favorites.toggle(book, now)
            }
            ViewMode::Favorites => {
                let Some(id) = self.selected_favorite().map(|f| f.id.clone()) else {
                    return Ok(());
                };
                let removed = self.favorites.remove_by_id(&id);
                self.clamp_selection();
                removed.map(|_| ToggleOutcome::Removed)
            }
        };

        match outcome {
            Ok(outcome) => {
                tracing::debug!(?outcome, "favorite toggle applied");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist favorites");
                self.notice = Some("Could not save favorites".to_string());
                Err(e)
            }
        }
    }

    /// Computes a renderable view model for the given terminal size.
    ///
    /// The list is windowed around the selection so the highlighted row is
    /// always visible.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height; the list gets what the chrome leaves over
    /// * `cols` - Pane width, used to size and truncate columns
    /// * `now` - Unix timestamp for "added Xd ago" labels
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] holding only the visible window of rows, with
    /// `selected_index` relative to that window.
    ///
    /// # Example
    ///
    /// ```
    /// use bookfinder::app::AppState;
    /// use bookfinder::favorites::FavoritesStore;
    /// use bookfinder::storage::MemoryStorage;
    /// use bookfinder::ui::Theme;
    ///
    /// let favorites = FavoritesStore::load(Box::new(MemoryStorage::new()));
    /// let state = AppState::new(favorites, Theme::default());
    ///
    /// let vm = state.compute_viewmodel(24, 80, 0);
    /// assert!(vm.display_items.is_empty());
    /// assert!(vm.empty_state.is_some());
    /// ```
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize, now: i64) -> UIViewModel {
        let detail = if self.detail_open {
            self.compute_detail()
        } else {
            None
        };

        let (display_items, selected_index) = self.compute_display_items(rows, cols, now);
        let empty_state = if display_items.is_empty() {
            Some(self.compute_empty_state())
        } else {
            None
        };

        UIViewModel {
            display_items,
            selected_index,
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            footer: self.compute_footer(),
            empty_state,
            detail,
        }
    }

    fn compute_display_items(&self, rows: usize, cols: usize, now: i64) -> (Vec<DisplayItem>, usize) {
        let total = self.visible_len();
        if total == 0 {
            return (vec![], 0);
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let items = match self.view_mode {
            ViewMode::Results => {
                let matcher = (!self.query.trim().is_empty()).then(SkimMatcherV2::default);
                self.results[visible_start..visible_end]
                    .iter()
                    .enumerate()
                    .map(|(offset, book)| {
                        self.book_item(book, visible_start + offset, cols, matcher.as_ref())
                    })
                    .collect()
            }
            ViewMode::Favorites => self.filtered_favorites()[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(offset, fav)| self.favorite_item(fav, visible_start + offset, cols, now))
                .collect(),
        };

        (items, self.selected_index.saturating_sub(visible_start))
    }

    fn book_item(
        &self,
        book: &Book,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = truncate(&book.title, title_width(cols));
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            highlight_ranges(m, &title, self.query.trim())
        });

        let mut detail = book.authors_display();
        if let Some(year) = book.first_publish_year {
            if !detail.is_empty() {
                detail.push_str(" · ");
            }
            detail.push_str(&year.to_string());
        }

        DisplayItem {
            title,
            detail: truncate(&detail, detail_width(cols)),
            is_selected: absolute_idx == self.selected_index,
            is_favorite: self.favorites.is_favorite(book),
            highlight_ranges,
        }
    }

    fn favorite_item(&self, fav: &Favorite, absolute_idx: usize, cols: usize, now: i64) -> DisplayItem {
        let title = truncate(&fav.title, title_width(cols));
        let filter = self.favorites_filter.trim();
        let highlight_ranges = if filter.is_empty() {
            vec![]
        } else {
            highlight_ranges(&SkimMatcherV2::default(), &title, filter)
        };

        let mut detail = fav.authors_display();
        let ago = fav.time_ago(now);
        if !ago.is_empty() {
            if !detail.is_empty() {
                detail.push_str(" · ");
            }
            detail.push_str("added ");
            detail.push_str(&ago);
        }

        DisplayItem {
            title,
            detail: truncate(&detail, detail_width(cols)),
            is_selected: absolute_idx == self.selected_index,
            is_favorite: true,
            highlight_ranges,
        }
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        if let Some(book) = self.selected_book() {
            let mut rows = Vec::new();
            push_row(&mut rows, "Authors", book.authors_display());
            push_row(
                &mut rows,
                "First published",
                book.first_publish_year.map(|y| y.to_string()).unwrap_or_default(),
            );
            push_row(
                &mut rows,
                "Editions",
                book.edition_count.map(|n| n.to_string()).unwrap_or_default(),
            );
            push_row(&mut rows, "Subjects", join_first(book.subject.as_deref(), 6));
            push_row(&mut rows, "Languages", join_first(book.language.as_deref(), 6));
            push_row(&mut rows, "Work key", book.key.clone().unwrap_or_default());
            push_row(&mut rows, "ISBN", join_first(book.isbn.as_deref(), 3));
            push_row(&mut rows, "Id", derive_book_id(book).unwrap_or_default());
            push_row(&mut rows, "Cover", book.cover_url().unwrap_or_default());

            return Some(DetailInfo {
                title: book.title.clone(),
                rows,
                is_favorite: self.favorites.is_favorite(book),
            });
        }

        let fav = self.selected_favorite()?;
        let mut rows = Vec::new();
        push_row(&mut rows, "Authors", fav.authors_display());
        push_row(&mut rows, "Id", fav.id.clone());
        push_row(&mut rows, "Cover", fav.cover_url().unwrap_or_default());
        if let Some(added) = fav.added_at.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)) {
            push_row(&mut rows, "Added", added.format("%Y-%m-%d %H:%M UTC").to_string());
        }

        Some(DetailInfo {
            title: fav.title.clone(),
            rows,
            is_favorite: true,
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Results => format!(" Bookfinder ({}) ", self.results.len()),
            ViewMode::Favorites => format!(" Favorites ({}) ", self.favorites.len()),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        match self.view_mode {
            ViewMode::Results => SearchBarInfo {
                label: self.field.label().to_string(),
                query: self.query.clone(),
                sort_label: Some(self.sort.label().to_string()),
                focused: self.focus == InputFocus::Typing,
            },
            ViewMode::Favorites => SearchBarInfo {
                label: "Filter".to_string(),
                query: self.favorites_filter.clone(),
                sort_label: None,
                focused: self.focus == InputFocus::Typing,
            },
        }
    }

    fn compute_status(&self) -> StatusInfo {
        let in_results = self.view_mode == ViewMode::Results;
        StatusInfo {
            loading: in_results && self.loading,
            error: if in_results { self.error.clone() } else { None },
            notice: self.notice.clone(),
            load_more_hint: in_results
                && self.has_more
                && !self.loading
                && !self.debouncer.is_pending(),
            summary: if in_results && !self.results.is_empty() {
                format!("{} results · page {}", self.results.len(), self.loaded_page)
            } else {
                String::new()
            },
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        match self.view_mode {
            ViewMode::Results if self.query.trim().is_empty() => EmptyState {
                message: "Search the Open Library catalog".to_string(),
                subtitle: "Type a title, author or ISBN".to_string(),
            },
            ViewMode::Results if self.loading || self.debouncer.is_pending() => EmptyState {
                message: "Searching...".to_string(),
                subtitle: String::new(),
            },
            ViewMode::Results => EmptyState {
                message: "No books found".to_string(),
                subtitle: "Try another field with Tab".to_string(),
            },
            ViewMode::Favorites if self.favorites.is_empty() => EmptyState {
                message: "No favorites yet".to_string(),
                subtitle: "Press f on a result to save it".to_string(),
            },
            ViewMode::Favorites => EmptyState {
                message: "No favorites match".to_string(),
                subtitle: String::new(),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail_open {
            "Esc: close  f: toggle favorite  q: quit"
        } else {
            match (self.focus, self.view_mode) {
                (InputFocus::Typing, ViewMode::Results) => {
                    "Enter: search  Tab: field  Ctrl+s: sort  ↓/Esc: results"
                }
                (InputFocus::Typing, ViewMode::Favorites) => "Type to filter  ↓/Esc: list",
                (InputFocus::Navigating, ViewMode::Results) => {
                    "j/k: move  Enter: details  f: favorite  m: more  t/s: field/sort  /: edit  v: favorites  q: quit"
                }
                (InputFocus::Navigating, ViewMode::Favorites) => {
                    "j/k: move  Enter: details  f: remove  /: filter  v: results  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max` characters, ending in `...` when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn push_row(rows: &mut Vec<(String, String)>, label: &str, value: String) {
    if !value.is_empty() {
        rows.push((label.to_string(), value));
    }
}

fn join_first(values: Option<&[String]>, limit: usize) -> String {
    let Some(values) = values else {
        return String::new();
    };
    let mut joined = values.iter().take(limit).cloned().collect::<Vec<_>>().join(", ");
    if values.len() > limit {
        joined.push_str(&format!(" (+{})", values.len() - limit));
    }
    joined
}

/// Character ranges of `text` matched by `pattern`, with consecutive indices
/// coalesced into `(start, end)` runs.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, pattern: &str) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

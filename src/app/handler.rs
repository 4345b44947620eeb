//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point the plugin shim calls. It maps one
//! [`Event`] onto `AppState` transitions and returns whether the UI should be
//! re-rendered together with the side effects to execute.
//!
//! # Event Types
//!
//! - **Query bar**: `Char`, `Backspace`, `ClearInput`, `CycleField`,
//!   `CycleSort`, `SubmitSearch`
//! - **List**: `KeyDown`, `KeyUp`, `LoadMore`, `ToggleFavorite`,
//!   `OpenDetail`, `CloseDetail`
//! - **Modes**: `FocusResults`, `FocusQuery`, `ToggleView`, `CloseFocus`
//! - **Host**: `DebounceElapsed`, `SearchCompleted`, `PermissionsResult`
//!
//! # Example
//!
//! ```
//! use bookfinder::app::{handle_event, Action, AppState, Event};
//! use bookfinder::favorites::FavoritesStore;
//! use bookfinder::storage::MemoryStorage;
//! use bookfinder::ui::Theme;
//!
//! let favorites = FavoritesStore::load(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(favorites, Theme::default());
//!
//! let (render, actions) = handle_event(&mut state, &Event::Char('d'))?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::ScheduleDebounce { .. }]));
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

use super::modes::{InputFocus, ViewMode};
use super::{Action, AppState};
use crate::catalog::RequestTag;
use crate::domain::error::Result;

/// Events from user input and host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query, or to the favorites filter.
    Char(char),
    /// Removes the last character from the query or filter.
    Backspace,
    /// Empties the query or filter.
    ClearInput,
    CycleField,
    CycleSort,
    /// Searches immediately, skipping the debounce.
    SubmitSearch,

    KeyDown,
    KeyUp,
    LoadMore,
    /// Toggles the favorite state of the selected entry.
    ToggleFavorite,
    OpenDetail,
    CloseDetail,

    /// Moves focus from the query bar to the list.
    FocusResults,
    /// Moves focus from the list back to the query bar.
    FocusQuery,
    /// Switches between the results and favorites lists.
    ToggleView,
    /// Hides the plugin.
    CloseFocus,

    /// A debounce timer armed by [`Action::ScheduleDebounce`] elapsed.
    DebounceElapsed,

    /// The host answered a [`Action::Fetch`].
    SearchCompleted {
        tag: RequestTag,
        /// HTTP status; transport failures arrive as a non-2xx status.
        status: u16,
        body: Vec<u8>,
    },

    /// Outcome of the web access permission request.
    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns the storage error when a favorite toggle cannot be persisted. The
/// state has been updated regardless and is safe to render.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::Char(c) => {
            if state.focus != InputFocus::Typing {
                return Ok((false, vec![]));
            }
            Ok((true, edit_input(state, |text| text.push(*c))))
        }
        Event::Backspace => {
            if state.focus != InputFocus::Typing {
                return Ok((false, vec![]));
            }
            Ok((true, edit_input(state, |text| {
                text.pop();
            })))
        }
        Event::ClearInput => Ok((true, edit_input(state, String::clear))),
        Event::CycleField => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }
            Ok((true, state.cycle_field()))
        }
        Event::CycleSort => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }
            Ok((true, state.cycle_sort()))
        }
        Event::SubmitSearch => {
            if state.view_mode != ViewMode::Results {
                state.focus = InputFocus::Navigating;
                return Ok((true, vec![]));
            }
            let actions = state.search_now();
            state.focus = InputFocus::Navigating;
            Ok((true, actions))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            if state.view_mode != ViewMode::Results {
                return Ok((false, vec![]));
            }
            let actions = state.load_more();
            Ok((!actions.is_empty(), actions))
        }
        Event::ToggleFavorite => {
            let now = chrono::Utc::now().timestamp();
            state.toggle_selected_favorite(now)?;
            Ok((true, vec![]))
        }
        Event::OpenDetail => {
            if state.visible_len() == 0 {
                return Ok((false, vec![]));
            }
            state.detail_open = true;
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let was_open = std::mem::replace(&mut state.detail_open, false);
            Ok((was_open, vec![]))
        }
        Event::FocusResults => {
            state.focus = InputFocus::Navigating;
            Ok((true, vec![]))
        }
        Event::FocusQuery => {
            state.focus = InputFocus::Typing;
            state.detail_open = false;
            Ok((true, vec![]))
        }
        Event::ToggleView => {
            state.view_mode = state.view_mode.toggled();
            state.selected_index = 0;
            state.detail_open = false;
            state.notice = None;
            tracing::debug!(view_mode = ?state.view_mode, "view switched");
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::DebounceElapsed => {
            let actions = state.debounce_elapsed();
            Ok((!actions.is_empty(), actions))
        }
        Event::SearchCompleted { tag, status, body } => {
            Ok((state.apply_response(*tag, *status, body), vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                return Ok((false, vec![]));
            }
            tracing::warn!("web access denied, searches will fail");
            state.notice = Some("Web access permission denied".to_string());
            Ok((true, vec![]))
        }
    }
}

/// Applies `edit` to whichever text the current view edits.
///
/// The query triggers the search controller; the favorites filter is purely
/// local.
fn edit_input(state: &mut AppState, edit: impl FnOnce(&mut String)) -> Vec<Action> {
    match state.view_mode {
        ViewMode::Results => {
            let mut query = std::mem::take(&mut state.query);
            edit(&mut query);
            tracing::trace!(query = %query, "query updated");
            state.set_query(query)
        }
        ViewMode::Favorites => {
            edit(&mut state.favorites_filter);
            state.selected_index = 0;
            state.clamp_selection();
            vec![]
        }
    }
}

/// Debug view of an event that omits response bodies from span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::SearchCompleted { tag, status, body } => f
                .debug_struct("SearchCompleted")
                .field("tag", tag)
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;
    use crate::favorites::FavoritesStore;
    use crate::storage::MemoryStorage;
    use crate::ui::Theme;

    fn state_with(storage: MemoryStorage) -> AppState {
        AppState::new(FavoritesStore::load(Box::new(storage)), Theme::default())
    }

    fn state() -> AppState {
        state_with(MemoryStorage::new())
    }

    fn type_text(s: &mut AppState, text: &str) -> Vec<Action> {
        text.chars()
            .flat_map(|c| handle_event(s, &Event::Char(c)).unwrap().1)
            .collect()
    }

    #[test]
    fn typing_schedules_one_timer_per_keystroke() {
        let mut s = state();
        let actions = type_text(&mut s, "dune");
        assert_eq!(actions.len(), 4);
        assert_eq!(s.query, "dune");
    }

    #[test]
    fn debounced_typing_fetches_once() {
        let mut s = state();
        let timers = type_text(&mut s, "dune").len();

        let fetches: Vec<_> = (0..timers)
            .flat_map(|_| handle_event(&mut s, &Event::DebounceElapsed).unwrap().1)
            .collect();
        assert_eq!(fetches.len(), 1);
        assert!(matches!(&fetches[0], Action::Fetch(r) if r.url.ends_with("title=dune&page=1&limit=20")));
    }

    #[test]
    fn keys_ignored_while_navigating() {
        let mut s = state();
        handle_event(&mut s, &Event::FocusResults).unwrap();
        let (render, actions) = handle_event(&mut s, &Event::Char('j')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(s.query.is_empty());
    }

    #[test]
    fn backspace_to_empty_clears_without_fetch() {
        let mut s = state();
        type_text(&mut s, "a");
        s.results = vec![Book::titled("stale")];

        let (_, actions) = handle_event(&mut s, &Event::Backspace).unwrap();
        assert!(actions.is_empty());
        assert!(s.results.is_empty());
    }

    #[test]
    fn submit_fetches_and_focuses_results() {
        let mut s = state();
        type_text(&mut s, "emma");
        let (_, actions) = handle_event(&mut s, &Event::SubmitSearch).unwrap();
        assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
        assert_eq!(s.focus, InputFocus::Navigating);
    }

    #[test]
    fn search_completed_applies_latest_response() {
        let mut s = state();
        type_text(&mut s, "emma");
        let (_, actions) = handle_event(&mut s, &Event::SubmitSearch).unwrap();
        let Action::Fetch(request) = &actions[0] else {
            panic!("expected fetch");
        };

        let event = Event::SearchCompleted {
            tag: RequestTag {
                token: request.token,
                page: request.page,
                replace: request.replace,
            },
            status: 200,
            body: br#"{"docs":[{"title":"Emma"}],"start":0,"numFound":1}"#.to_vec(),
        };
        let (render, _) = handle_event(&mut s, &event).unwrap();
        assert!(render);
        assert_eq!(s.results.len(), 1);
        assert!(!s.loading);
    }

    #[test]
    fn favorites_view_filters_locally() {
        let mut s = state();
        s.favorites
            .toggle(&Book { key: Some("/w/1".into()), ..Book::titled("Dune") }, 0)
            .unwrap();
        handle_event(&mut s, &Event::ToggleView).unwrap();

        let actions = type_text(&mut s, "zzz");
        assert!(actions.is_empty(), "favorites filter never hits the network");
        assert!(s.query.is_empty());
        assert_eq!(s.visible_len(), 0);

        handle_event(&mut s, &Event::ClearInput).unwrap();
        assert_eq!(s.visible_len(), 1);
    }

    #[test]
    fn toggle_favorite_twice_round_trips() {
        let storage = MemoryStorage::new();
        let mut s = state_with(storage.clone());
        s.results = vec![Book { key: Some("/w/1".into()), ..Book::titled("Dune") }];
        handle_event(&mut s, &Event::FocusResults).unwrap();

        handle_event(&mut s, &Event::ToggleFavorite).unwrap();
        assert!(s.favorites.is_favorite(&s.results[0]));
        handle_event(&mut s, &Event::ToggleFavorite).unwrap();
        assert!(s.favorites.is_empty());

        let restored = FavoritesStore::load(Box::new(storage));
        assert!(restored.is_empty());
    }

    #[test]
    fn toggle_favorite_surfaces_storage_error() {
        let mut s = state_with(MemoryStorage::new().failing_writes());
        s.results = vec![Book::titled("Dune")];
        assert!(handle_event(&mut s, &Event::ToggleFavorite).is_err());
        assert!(s.notice.is_some());
    }

    #[test]
    fn detail_opens_only_with_selection() {
        let mut s = state();
        assert!(!handle_event(&mut s, &Event::OpenDetail).unwrap().0);

        s.results = vec![Book::titled("Dune")];
        handle_event(&mut s, &Event::OpenDetail).unwrap();
        assert!(s.detail_open);
        assert!(handle_event(&mut s, &Event::CloseDetail).unwrap().0);
        assert!(!handle_event(&mut s, &Event::CloseDetail).unwrap().0);
    }

    #[test]
    fn load_more_outside_results_view_is_ignored() {
        let mut s = state();
        s.has_more = true;
        s.query = "x".to_string();
        handle_event(&mut s, &Event::ToggleView).unwrap();
        let (render, actions) = handle_event(&mut s, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn close_focus_emits_action() {
        let mut s = state();
        let (_, actions) = handle_event(&mut s, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn denied_permission_sets_notice() {
        let mut s = state();
        handle_event(&mut s, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(s.notice.is_some());
    }
}

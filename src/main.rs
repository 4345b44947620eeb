//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Bookfinder library and the Zellij
//! plugin API. Everything Zellij-specific lives here: key mapping, timers,
//! web requests and pane visibility. All state transitions happen in
//! [`bookfinder::handle_event`].
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `Timer`, `WebRequestResult`, `PermissionRequestResult`
//! 3. **Update**: Map the host event, delegate to the library, execute actions
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → query editing or list navigation, depending on focus
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::SearchCompleted` (tag read from the context)
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Typing (query bar focused):
//! - characters: Edit the query (or the favorites filter)
//! - `Enter`: Search now
//! - `Tab`: Cycle search field
//! - `Ctrl+s`: Cycle sort order
//! - `Ctrl+u`: Clear the input
//! - `Down` / `Esc`: Focus the list
//!
//! Navigating (list focused):
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open detail
//! - `f`: Toggle favorite
//! - `m`: Load more
//! - `t` / `s`: Cycle field / sort
//! - `/`: Back to the query bar
//! - `v`: Switch between results and favorites
//! - `q` / `Esc`: Close plugin
//!
//! Detail view:
//! - `Esc` / `Enter`: Close detail
//! - `f`: Toggle favorite
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use plugin::State;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("bookfinder is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use bookfinder::catalog::{RequestTag, SearchRequest};
    use bookfinder::{handle_event, Action, Config, Event, InputFocus};

    /// Plugin state wrapper around the library's `AppState`.
    pub(crate) struct State {
        app: bookfinder::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: bookfinder::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, installs tracing and asks for web access.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            bookfinder::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(config = ?config, "parsed configuration");
            self.app = bookfinder::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::Timer,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        /// Translates the host event, runs it through the library and
        /// executes the resulting actions. Returns `true` to re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    match Self::map_web_result(status, body, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    Event::PermissionsResult {
                        granted: matches!(status, PermissionStatus::Granted),
                    }
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled"
                    );
                    for a in &actions {
                        Self::execute_action(a);
                    }
                    should_render
                }
                Err(e) => {
                    // State is still consistent; the notice explains the failure.
                    tracing::warn!(error = %e, "error handling event");
                    true
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            bookfinder::ui::render(&self.app, rows, cols, chrono::Utc::now().timestamp());
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events.
        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::trace!(bare_key = ?key.bare_key, "key event");

            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('n') => Some(Event::KeyDown),
                    BareKey::Char('p') => Some(Event::KeyUp),
                    BareKey::Char('s') => Some(Event::CycleSort),
                    BareKey::Char('u') => Some(Event::ClearInput),
                    BareKey::Char('c') => Some(Event::CloseFocus),
                    _ => None,
                };
            }

            if self.app.detail_open {
                return match key.bare_key {
                    BareKey::Esc | BareKey::Enter => Some(Event::CloseDetail),
                    BareKey::Char('f') => Some(Event::ToggleFavorite),
                    BareKey::Char('q') => Some(Event::CloseFocus),
                    _ => None,
                };
            }

            match self.app.focus {
                InputFocus::Typing => Some(match key.bare_key {
                    BareKey::Enter => Event::SubmitSearch,
                    BareKey::Tab => Event::CycleField,
                    BareKey::Down | BareKey::Esc => Event::FocusResults,
                    BareKey::Backspace => Event::Backspace,
                    BareKey::Char(c) => Event::Char(c),
                    _ => return None,
                }),
                InputFocus::Navigating => Some(match key.bare_key {
                    BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                    BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                    BareKey::Enter => Event::OpenDetail,
                    BareKey::Char('f') => Event::ToggleFavorite,
                    BareKey::Char('m') => Event::LoadMore,
                    BareKey::Tab | BareKey::Char('t') => Event::CycleField,
                    BareKey::Char('s') => Event::CycleSort,
                    BareKey::Char('/') => Event::FocusQuery,
                    BareKey::Char('v') => Event::ToggleView,
                    BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                    _ => return None,
                }),
            }
        }

        /// Maps a web request result back onto the fetch that issued it.
        ///
        /// Results without a search tag did not come from this plugin's
        /// fetches and are dropped.
        fn map_web_result(
            status: u16,
            body: Vec<u8>,
            context: &BTreeMap<String, String>,
        ) -> Option<Event> {
            let Some(tag) = RequestTag::from_context(context) else {
                tracing::debug!(status, "web result without search context, ignoring");
                return None;
            };
            tracing::debug!(status, token = tag.token, page = tag.page, body_len = body.len(), "web result");
            Some(Event::SearchCompleted { tag, status, body })
        }

        fn fetch(request: &SearchRequest) {
            let mut headers = BTreeMap::new();
            headers.insert("Accept".to_string(), "application/json".to_string());
            web_request(
                &request.url,
                HttpVerb::Get,
                headers,
                Vec::new(),
                request.context(),
            );
        }

        /// Translates a library action into Zellij API calls.
        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::ScheduleDebounce { seconds } => set_timeout(*seconds),
                Action::Fetch(request) => {
                    tracing::debug!(url = %request.url, token = request.token, "fetching");
                    Self::fetch(request);
                }
            }
        }
    }
}

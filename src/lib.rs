//! Bookfinder: a Zellij plugin for searching the Open Library catalog.
//!
//! Bookfinder provides:
//! - Debounced as-you-type search by title, author, ISBN or free text
//! - Paginated results with load-more and a stable year sort
//! - A persistent favorites list with a local fuzzy filter
//! - A detail view with identifiers, subjects and cover URL

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, debounce, pagination             │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Favorites     │   │ Catalog       │
//! │ (ui/)         │   │ (favorites/,  │   │ (catalog/)    │
//! │ - Rendering   │   │  storage/)    │   │ - Search URL  │
//! │ - Theming     │   │ - Toggle      │   │ - Decoding    │
//! │ - Components  │   │ - JSON I/O    │   │ - Req. tags   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Book, Favorite, identity, errors (domain/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookfinder.wasm" {
//!         search_field "author"
//!         sort "year_desc"
//!         debounce_ms "300"
//!         theme "catppuccin-latte"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, initialize, Config, Event};
//!
//! let dir = std::env::temp_dir().join("bookfinder-lib-doctest");
//! let config = Config {
//!     data_dir: dir,
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! for c in "dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed)?;
//! assert!(actions.is_empty(), "three timers are still outstanding");
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputFocus, ViewMode};
pub use domain::{Book, BookfinderError, Favorite, Result};
pub use ui::Theme;

use app::Debouncer;
use catalog::DEFAULT_CATALOG_URL;
use domain::{SearchField, SortOrder};
use favorites::FavoritesStore;
use infrastructure::{expand_tilde, get_data_dir, strip_host_prefix};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{JsonFileStorage, MemoryStorage, Storage};

/// Plugin configuration parsed from Zellij's KDL plugin block.
///
/// Every key is optional; unparseable values fall back to the default and
/// are logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog base URL without a trailing slash.
    pub catalog_url: String,

    /// Quiet period before an as-you-type search fires. Default: 450
    pub debounce_ms: u64,

    /// Initial search field. Default: title
    pub search_field: SearchField,

    /// Initial sort order. Default: relevance
    pub sort: SortOrder,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to `/host`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory holding the favorites record and trace output.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            debounce_ms: app::DEFAULT_DEBOUNCE_MS,
            search_field: SearchField::default(),
            sort: SortOrder::default(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            data_dir: get_data_dir(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `catalog_url`: must be `http(s)://…`; trailing `/` trimmed
    /// - `debounce_ms`: `u64`
    /// - `search_field`: `title`, `author`, `isbn` or `q`
    /// - `sort`: `relevance`, `year_asc` or `year_desc`
    /// - `theme`, `theme_file`, `trace_level`: taken as-is
    /// - `data_dir`: `~` expanded to `/host`
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookfinder::Config;
    /// use bookfinder::domain::SearchField;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_field".to_string(), "author".to_string());
    /// map.insert("debounce_ms".to_string(), "300".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.search_field, SearchField::Author);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let catalog_url = config
            .get("catalog_url")
            .and_then(|raw| {
                parse_catalog_url(raw)
                    .map_err(|e| tracing::warn!(error = %e, "ignoring catalog_url"))
                    .ok()
            })
            .unwrap_or(defaults.catalog_url);

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|raw| parse_option(raw, "debounce_ms", |s| s.trim().parse::<u64>().ok()))
            .unwrap_or(defaults.debounce_ms);

        let search_field = config
            .get("search_field")
            .and_then(|raw| parse_option(raw, "search_field", SearchField::from_config))
            .unwrap_or(defaults.search_field);

        let sort = config
            .get("sort")
            .and_then(|raw| parse_option(raw, "sort", SortOrder::from_config))
            .unwrap_or(defaults.sort);

        let data_dir = config
            .get("data_dir")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.data_dir, |s| PathBuf::from(expand_tilde(s)));

        Self {
            catalog_url,
            debounce_ms,
            search_field,
            sort,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            data_dir,
        }
    }

    /// Resolves the configured theme: file first, then name, then default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }
        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn parse_option<T>(raw: &str, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "invalid plugin option, using default");
    }
    parsed
}

/// Validates a catalog base URL and trims any trailing slash.
///
/// # Errors
///
/// Returns [`BookfinderError::Config`] if the URL is not `http://` or
/// `https://` or has no host.
pub fn parse_catalog_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| BookfinderError::Config(format!("catalog_url must be http(s): {raw}")))?;
    if host.is_empty() {
        return Err(BookfinderError::Config(format!("catalog_url has no host: {raw}")));
    }
    Ok(trimmed.to_string())
}

/// Builds the initial `AppState` from configuration.
///
/// Opens the favorites record under `config.data_dir`. If the directory
/// cannot be created the plugin still starts, with favorites held in memory
/// for the session only.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let storage: Box<dyn Storage> = match JsonFileStorage::open(config.data_dir.clone()) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(
                data_dir = %strip_host_prefix(&config.data_dir.to_string_lossy()),
                error = %e,
                "favorites will not persist this session"
            );
            Box::new(MemoryStorage::new())
        }
    };
    let favorites = FavoritesStore::load(storage);

    let mut state = AppState::new(favorites, config.resolve_theme());
    state.field = config.search_field;
    state.sort = config.sort;
    state.debouncer = Debouncer::new(config.debounce_ms);
    state.catalog_url.clone_from(&config.catalog_url);

    tracing::info!(
        favorites = state.favorites.len(),
        field = ?state.field,
        sort = ?state.sort,
        "bookfinder initialized"
    );
    state
}

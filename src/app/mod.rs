//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (main.rs) and the catalog, favorites and UI
//! layers. Data flows one way:
//!
//! ```text
//! Key / Timer / WebRequestResult → Event → handle_event → AppState → Actions
//!        ↑                                                              │
//!        └──────────── set_timeout / web_request / hide_self ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`debounce`]: Quiet-period tracking over non-cancellable timers
//! - [`handler`]: Event dispatch
//! - [`modes`]: Focus and view mode types
//! - [`search`]: Search controller transitions
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod search;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use handler::{handle_event, Event};
pub use modes::{InputFocus, ViewMode};
pub use state::{AppState, FETCH_ERROR_MESSAGE};

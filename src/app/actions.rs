//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host directly. It mutates state and
//! returns a `Vec<Action>`; the plugin shim executes them in order, turning
//! them into `set_timeout`, `web_request` or `hide_self` calls.

use crate::catalog::SearchRequest;

/// Commands produced by the event handler and executed by the plugin shim.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a host timer. Its expiry comes back as
    /// [`Event::DebounceElapsed`](crate::app::Event::DebounceElapsed).
    ScheduleDebounce {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Issues a catalog search. The response comes back as
    /// [`Event::SearchCompleted`](crate::app::Event::SearchCompleted) carrying
    /// the request's tag.
    Fetch(SearchRequest),
}

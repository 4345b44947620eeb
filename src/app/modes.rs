//! Focus and view state machine types.
//!
//! Two independent axes decide how keys are interpreted and what the list
//! shows:
//!
//! - [`InputFocus`]: whether keystrokes edit the query bar or drive the list
//! - [`ViewMode`]: whether the list shows search results or saved favorites
//!
//! ```
//! use bookfinder::app::{InputFocus, ViewMode};
//!
//! assert_eq!(InputFocus::default(), InputFocus::Typing);
//! assert_eq!(ViewMode::Results.toggled(), ViewMode::Favorites);
//! ```

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFocus {
    /// Characters edit the query bar (or the favorites filter).
    ///
    /// Enter searches immediately, Tab cycles the field, Ctrl+s cycles sort.
    #[default]
    Typing,

    /// Keys drive the list.
    ///
    /// j/k move, Enter opens details, f toggles a favorite, m loads more,
    /// and / returns to typing.
    Navigating,
}

/// Which list is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Catalog search results.
    #[default]
    Results,

    /// Saved favorites, filtered locally.
    Favorites,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Results => Self::Favorites,
            Self::Favorites => Self::Results,
        }
    }
}

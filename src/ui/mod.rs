//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output through small components.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod viewmodel;
pub mod renderer;
pub mod components;
pub mod helpers;
pub mod theme;

pub use viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo,
    UIViewModel,
};
pub use renderer::render;
pub use theme::Theme;

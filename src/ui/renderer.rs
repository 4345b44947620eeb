//! Top-level rendering coordinator.
//!
//! Computes the view model and hands it to the layout in
//! [`components`](crate::ui::components). Output goes to stdout, which Zellij
//! captures as the plugin pane's contents.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// `now` is the current unix time, used for relative "added" ages in the
/// favorites list.
pub fn render(state: &AppState, rows: usize, cols: usize, now: i64) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols, now);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}

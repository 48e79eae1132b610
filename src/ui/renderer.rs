//! Top-level rendering coordinator.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] turns state into a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), then the components
//! print it. Nothing here reads state directly.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, rows, cols);
}

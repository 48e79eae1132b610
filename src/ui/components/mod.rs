//! Composable UI component renderers.
//!
//! Each component prints one region of the screen at a given row and returns
//! the next free row.
//!
//! - [`header`]: title line and view navigation
//! - [`filters`]: summary of the active query
//! - [`search`]: search and date entry box
//! - [`table`]: result lists and the holdings table
//! - [`detail`]: holding detail screen
//! - [`empty`]: loading and empty states
//! - [`toast`]: transient notification line
//! - [`dialog`]: centered modal overlays
//! - [`footer`]: keybinding hints

mod detail;
mod dialog;
mod empty;
mod filters;
mod footer;
mod header;
mod search;
mod table;
mod toast;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, EmptyState, UIViewModel};

use detail::render_detail;
use dialog::render_overlay;
use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use header::{render_header, render_nav};
use search::render_input_box;
use table::render_table;
use toast::render_toast;

/// Horizontal separator across the full width.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Navigation and tabs]
/// [Border]
/// [Filter bar]
/// [Input box, 3 lines, while typing]
/// [Body: table, detail or message]
/// [Toast]
/// [Border]
/// [Footer]
/// ```
///
/// Overlays are drawn last, on top of everything else.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_nav(current_row, &vm.nav, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(filters) = &vm.filters {
        current_row = render_filter_bar(current_row, filters, theme, cols);
    }
    if let Some(input) = &vm.input {
        current_row = render_input_box(current_row, input, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let toast_row = border_row.saturating_sub(1);

    match &vm.body {
        Body::Loading(text) => {
            let loading = EmptyState {
                message: text.clone(),
                subtitle: String::new(),
            };
            render_empty_state(current_row, &loading, theme, cols);
        }
        Body::Empty(empty) => render_empty_state(current_row, empty, theme, cols),
        Body::Table(table) => {
            render_table(current_row, toast_row, table, theme, cols);
        }
        Body::Detail(detail) => render_detail(current_row, toast_row, detail, theme, cols),
    }

    if let Some(toast) = &vm.toast {
        render_toast(toast_row, toast, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(overlay) = &vm.overlay {
        render_overlay(overlay, theme, rows, cols);
    }
}

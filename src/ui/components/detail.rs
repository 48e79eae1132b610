//! Holding detail screen.

use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

use super::table::render_table;

/// Renders the title, the action's labelled fields and its client holdings.
///
/// ```text
/// Holding details for TICKER
///   Label     value
///   Label     value
///
/// [holdings table]
/// ```
pub fn render_detail(row: usize, end_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    position_cursor(row + 1, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {}", fit(&detail.title, cols.saturating_sub(1)));
    print!("{}", Theme::reset());

    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| text_width(label))
        .max()
        .unwrap_or_default();
    let value_width = cols.saturating_sub(label_width + 4);

    let mut current_row = row + 2;
    for (label, value) in &detail.fields {
        if current_row >= end_row {
            return;
        }
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("  {}  ", fit(label, label_width));
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit(value, value_width));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if current_row + 1 < end_row {
        render_table(current_row + 1, end_row, &detail.holdings, theme, cols);
    }
}

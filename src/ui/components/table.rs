//! Table component renderer.
//!
//! Draws any [`TableInfo`]: the two result lists and the holdings table on the
//! detail screen. Cells arrive truncated; this module pads them to their
//! column and applies selection and search highlighting.

use crate::ui::helpers::{self, fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Column, DisplayRow, TableInfo, COLUMN_GAP};

/// Renders column titles, as many rows as fit above `end_row`, and the pager.
///
/// Returns the next free row.
pub fn render_table(row: usize, end_row: usize, table: &TableInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_table_headers(row, table, theme, cols);

    let pager_rows = usize::from(table.pager.is_some());
    let last_row = end_row.saturating_sub(pager_rows);
    for display_row in &table.rows {
        if current_row >= last_row {
            break;
        }
        current_row = render_table_row(current_row, display_row, table, theme, cols);
    }

    if let Some(pager) = &table.pager {
        let text = helpers::truncate(pager, cols);
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", " ".repeat(cols.saturating_sub(text_width(&text) + 1)));
        print!("{text} ");
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

fn render_table_headers(row: usize, table: &TableInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", " ".repeat(table.tag_width));

    let mut used = table.tag_width;
    for column in visible_columns(&table.columns) {
        print!("{}", fit(&column.title, column.width));
        print!("{}", " ".repeat(COLUMN_GAP));
        used += column.width + COLUMN_GAP;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders one record.
///
/// ```text
/// TAG CELL [gap] CELL [gap] ... [padding to fill line]
/// ```
///
/// Styling precedence: selection colors over match highlights over normal text.
/// The row is padded to the full width so the selection background spans it.
fn render_table_row(row: usize, display_row: &DisplayRow, table: &TableInfo, theme: &Theme, cols: usize) -> usize {
    let row_colors = || {
        if display_row.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    };

    position_cursor(row, 1);
    row_colors();

    if table.tag_width > 0 {
        let tag = display_row.tag.as_deref().unwrap_or_default();
        if !display_row.is_selected {
            print!("{}", Theme::fg(&theme.colors.new_tag_fg));
        }
        print!("{}", fit(tag, table.tag_width));
        row_colors();
    }

    let mut used = table.tag_width;
    for (column, cell) in visible_columns(&table.columns).zip(&display_row.cells) {
        helpers::render_highlighted_text(&cell.text, &cell.highlight_ranges, theme, display_row.is_selected);
        print!("{}", " ".repeat(column.width.saturating_sub(text_width(&cell.text)) + COLUMN_GAP));
        used += column.width + COLUMN_GAP;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

/// Columns squeezed to zero width are skipped along with their cells.
fn visible_columns(columns: &[Column]) -> impl Iterator<Item = &Column> {
    columns.iter().take_while(|column| column.width > 0)
}

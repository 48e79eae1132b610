//! One-line summary of the active query.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

const SEGMENT_SEPARATOR: &str = "  │  ";

/// Renders `label: value` segments. Values that differ from the defaults are
/// drawn bold in the highlight color. Segments that do not fit are cut.
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 1;
    print!(" ");

    for (idx, segment) in filters.segments.iter().enumerate() {
        if idx > 0 {
            if used + text_width(SEGMENT_SEPARATOR) >= cols {
                break;
            }
            print!("{}", Theme::fg(&theme.colors.border));
            print!("{SEGMENT_SEPARATOR}");
            used += text_width(SEGMENT_SEPARATOR);
        }

        let label = truncate(&format!("{}: ", segment.label), cols.saturating_sub(used));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label}");
        used += text_width(&label);

        let value = truncate(&segment.value, cols.saturating_sub(used));
        if segment.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.new_tag_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{value}");
        print!("{}", Theme::reset());
        used += text_width(&value);
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

//! Title line and view navigation.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, NavItem};

const SUBTITLE_SEPARATOR: &str = " · ";

/// Renders the centered title with its subtitle, and the busy indicator at
/// the right edge while a query runs.
///
/// ```text
/// [padding] TITLE · subtitle [padding] busy
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let bg = theme.colors.header_bg.as_deref().map(Theme::bg).unwrap_or_default();
    let busy = header.busy.as_deref().unwrap_or_default();
    let busy_width = text_width(busy);

    let title = truncate(&header.title, cols);
    let title_width = text_width(&title);
    let subtitle_room = cols
        .saturating_sub(title_width + text_width(SUBTITLE_SEPARATOR) + busy_width + 2);
    let subtitle = truncate(&header.subtitle, subtitle_room);
    let subtitle_width = if subtitle.is_empty() {
        0
    } else {
        text_width(SUBTITLE_SEPARATOR) + text_width(&subtitle)
    };

    let padding = cols.saturating_sub(title_width + subtitle_width) / 2;

    position_cursor(row, 1);
    print!("{bg}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{title}");
    print!("{}", Theme::reset());

    if !subtitle.is_empty() {
        print!("{bg}");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{SUBTITLE_SEPARATOR}{subtitle}");
    }

    let used = padding + title_width + subtitle_width;
    print!("{bg}");
    if busy_width > 0 && used + busy_width + 1 <= cols {
        print!("{}", " ".repeat(cols - used - busy_width - 1));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{busy} ");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders view navigation followed by the tabs of the current view.
pub fn render_nav(row: usize, nav: &[NavItem], tabs: &[NavItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;

    for item in nav {
        used += render_nav_item(item, theme, cols.saturating_sub(used));
    }
    if !tabs.is_empty() && used + 3 < cols {
        print!("{}", Theme::fg(&theme.colors.border));
        print!(" │ ");
        print!("{}", Theme::reset());
        used += 3;
        for tab in tabs {
            used += render_nav_item(tab, theme, cols.saturating_sub(used));
        }
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}

/// Prints ` label ` within `room` columns and returns the width printed.
fn render_nav_item(item: &NavItem, theme: &Theme, room: usize) -> usize {
    let text = truncate(&format!(" {} ", item.label), room);
    if item.active {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{text}");
    print!("{}", Theme::reset());
    if room > text_width(&text) {
        print!(" ");
        text_width(&text) + 1
    } else {
        text_width(&text)
    }
}

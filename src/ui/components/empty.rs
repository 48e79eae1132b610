//! Empty state component renderer.
//!
//! Shown while a list has no result yet and when a query matches nothing.

use crate::ui::helpers::{center_padding, position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank rows between the top of the body and the message.
const TOP_GAP: usize = 2;

/// Renders a centered two-line message.
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// The message uses `empty_state_fg`; the subtitle, usually a hint for
/// clearing filters, is dimmed.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_padding = center_padding(&message, cols);

    position_cursor(row + TOP_GAP, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + text_width(&message))));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_padding = center_padding(&subtitle, cols);

    position_cursor(row + TOP_GAP + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + text_width(&subtitle))));
    print!("{}", Theme::reset());
}

//! Transient notification line.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ToastInfo, ToastKind};

/// Renders `✓ Title  description` (or `! ...` for warnings) with the dismiss
/// hint right-aligned when it fits.
pub fn render_toast(row: usize, toast: &ToastInfo, theme: &Theme, cols: usize) -> usize {
    let (icon, color) = match toast.kind {
        ToastKind::Success => ("✓", &theme.colors.toast_success_fg),
        ToastKind::Warning => ("!", &theme.colors.toast_warning_fg),
    };

    let title = truncate(&format!(" {icon} {}", toast.title), cols);
    let mut used = text_width(&title);
    let description = truncate(&toast.description, cols.saturating_sub(used + 2));

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{title}");
    print!("{}", Theme::reset());
    if !description.is_empty() {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {description}");
        used += 2 + text_width(&description);
    }

    let hint_width = text_width(&toast.hint);
    if used + hint_width + 3 <= cols {
        print!("{}", " ".repeat(cols - used - hint_width - 1));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{} ", toast.hint);
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }
    print!("{}", Theme::reset());
    row + 1
}

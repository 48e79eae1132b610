//! Search and date entry box.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBoxInfo;

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 5;

/// Renders a 3-line bordered box with the prompt, the typed value (or the
/// placeholder, dimmed) and, after a rejected submit, the error message.
///
/// ```text
/// [margin] ┌─────────────────────────┐ [margin]
/// [margin] │ Label: value    error   │ [margin]
/// [margin] └─────────────────────────┘ [margin]
/// ```
pub fn render_input_box(row: usize, input: &InputBoxInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prompt = truncate(&format!(" {}: ", input.label), inner_width);
    let mut used = text_width(&prompt);
    let (value, value_color) = if input.value.is_empty() {
        (&input.placeholder, &theme.colors.text_dim)
    } else {
        (&input.value, &theme.colors.text_normal)
    };
    let value = truncate(value, inner_width.saturating_sub(used + 1));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{prompt}");
    print!("{}", Theme::fg(value_color));
    print!("{value}");
    used += text_width(&value);

    if let Some(error) = &input.error {
        let error = truncate(error, inner_width.saturating_sub(used + 3));
        if !error.is_empty() {
            print!("{}", Theme::fg(&theme.colors.toast_warning_fg));
            print!("  {error}");
            used += 2 + text_width(&error);
        }
    }

    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

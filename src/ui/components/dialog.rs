//! Centered modal overlays.
//!
//! Every overlay is flattened into styled lines first and then framed, so the
//! three dialog kinds share one drawing routine.

use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ChecklistItem, OverlayInfo};

const MAX_DIALOG_WIDTH: usize = 72;
const DIALOG_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Title,
    Normal,
    Dim,
    Error,
    Cursor,
}

struct DialogLine {
    text: String,
    style: LineStyle,
}

impl DialogLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }
}

/// Draws `overlay` in a box centered over the screen.
pub fn render_overlay(overlay: &OverlayInfo, theme: &Theme, rows: usize, cols: usize) {
    let box_width = cols.saturating_sub(DIALOG_MARGIN * 2).min(MAX_DIALOG_WIDTH);
    let inner_width = box_width.saturating_sub(4);
    let lines = dialog_lines(overlay, inner_width);

    let height = lines.len() + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(top, left);
    print!("{border}┌{}┐", "─".repeat(box_width.saturating_sub(2)));

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│ ");
        match line.style {
            LineStyle::Title => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.header_fg));
            }
            LineStyle::Normal => print!("{}", Theme::fg(&theme.colors.text_normal)),
            LineStyle::Dim => print!("{}", Theme::fg(&theme.colors.text_dim)),
            LineStyle::Error => print!("{}", Theme::fg(&theme.colors.toast_warning_fg)),
            LineStyle::Cursor => {
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            }
        }
        print!("{}", fit(&line.text, inner_width));
        print!("{}", Theme::reset());
        print!("{border} │");
    }

    position_cursor(top + height - 1, left);
    print!("{border}└{}┘", "─".repeat(box_width.saturating_sub(2)));
    print!("{}", Theme::reset());
}

fn dialog_lines(overlay: &OverlayInfo, width: usize) -> Vec<DialogLine> {
    let wrapped = |text: &str, style: LineStyle| -> Vec<DialogLine> {
        wrap(text, width)
            .into_iter()
            .map(|line| DialogLine::new(line, style))
            .collect()
    };

    let mut lines = Vec::new();
    match overlay {
        OverlayInfo::Message { title, lines: body, hint } => {
            lines.push(DialogLine::new(title.as_str(), LineStyle::Title));
            for text in body {
                lines.push(DialogLine::blank());
                lines.extend(wrapped(text, LineStyle::Normal));
            }
            lines.push(DialogLine::blank());
            lines.push(DialogLine::new(hint.as_str(), LineStyle::Dim));
        }
        OverlayInfo::Form {
            title,
            description,
            label,
            value,
            placeholder,
            error,
            hint,
        } => {
            lines.push(DialogLine::new(title.as_str(), LineStyle::Title));
            lines.push(DialogLine::blank());
            lines.extend(wrapped(description, LineStyle::Normal));
            lines.push(DialogLine::blank());
            lines.push(DialogLine::new(label.as_str(), LineStyle::Dim));
            if value.is_empty() {
                lines.push(DialogLine::new(format!("> {placeholder}"), LineStyle::Dim));
            } else {
                lines.extend(wrapped(&format!("> {value}"), LineStyle::Normal));
            }
            if let Some(error) = error {
                lines.extend(wrapped(error, LineStyle::Error));
            }
            lines.push(DialogLine::blank());
            lines.push(DialogLine::new(hint.as_str(), LineStyle::Dim));
        }
        OverlayInfo::Checklist {
            title,
            description,
            items,
            error,
            hint,
        } => {
            lines.push(DialogLine::new(title.as_str(), LineStyle::Title));
            lines.push(DialogLine::blank());
            lines.extend(wrapped(description, LineStyle::Normal));
            lines.push(DialogLine::blank());
            lines.extend(items.iter().map(checklist_line));
            if let Some(error) = error {
                lines.push(DialogLine::blank());
                lines.extend(wrapped(error, LineStyle::Error));
            }
            lines.push(DialogLine::blank());
            lines.push(DialogLine::new(hint.as_str(), LineStyle::Dim));
        }
    }
    lines
}

fn checklist_line(item: &ChecklistItem) -> DialogLine {
    let mark = if item.checked { "x" } else { " " };
    let style = if item.is_cursor {
        LineStyle::Cursor
    } else {
        LineStyle::Normal
    };
    DialogLine::new(format!("[{mark}] {}", item.label), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_marks_checked_items_and_cursor() {
        let overlay = OverlayInfo::Checklist {
            title: "Manage".into(),
            description: "Pick".into(),
            items: vec![
                ChecklistItem {
                    label: "Bonus Issue".into(),
                    checked: true,
                    is_cursor: false,
                },
                ChecklistItem {
                    label: "Ticker Change".into(),
                    checked: false,
                    is_cursor: true,
                },
            ],
            error: Some("Select at least one.".into()),
            hint: "Enter".into(),
        };

        let lines = dialog_lines(&overlay, 40);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"[x] Bonus Issue"));
        let cursor = lines.iter().find(|l| l.style == LineStyle::Cursor).unwrap();
        assert_eq!(cursor.text, "[ ] Ticker Change");
        assert!(lines.iter().any(|l| l.style == LineStyle::Error));
    }

    #[test]
    fn empty_form_value_shows_placeholder() {
        let overlay = OverlayInfo::Form {
            title: "Confirm".into(),
            description: "Remarks for AAPL".into(),
            label: "Remarks".into(),
            value: String::new(),
            placeholder: "Describe".into(),
            error: None,
            hint: "Enter".into(),
        };
        let lines = dialog_lines(&overlay, 40);
        assert!(lines
            .iter()
            .any(|l| l.text == "> Describe" && l.style == LineStyle::Dim));
    }
}

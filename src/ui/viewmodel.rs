//! Render-ready snapshot of the application state.
//!
//! Built by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel).
//! Every string in here is already localized and truncated; the renderer only
//! positions and colors it.

use crate::ui::helpers;

#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub nav: Vec<NavItem>,
    /// Pending/Completed tabs, Holding Processing only.
    pub tabs: Vec<NavItem>,
    pub filters: Option<FilterBarInfo>,
    /// Search or date entry box, present while typing.
    pub input: Option<InputBoxInfo>,
    pub body: Body,
    pub toast: Option<ToastInfo>,
    pub overlay: Option<OverlayInfo>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
    /// Shown at the right edge while a query is in flight.
    pub busy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub active: bool,
}

/// One line summarizing the active query.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub segments: Vec<FilterSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSegment {
    pub label: String,
    pub value: String,
    /// Non-default values are drawn emphasized.
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct InputBoxInfo {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Body {
    /// No result computed yet.
    Loading(String),
    Empty(EmptyState),
    Table(TableInfo),
    Detail(DetailInfo),
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    /// Width in terminal columns, separator excluded.
    pub width: usize,
}

/// Requested width of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Fixed(usize),
    /// Share of the space left after fixed columns.
    Flex(usize),
}

/// Gap printed after every column.
pub const COLUMN_GAP: usize = 1;

impl Column {
    /// Distributes `available` columns over `specs`.
    ///
    /// Fixed columns get their width first. Flexible columns split the rest by
    /// weight, the last one absorbing rounding. When space runs out, columns
    /// from the right end shrink to zero and are not drawn.
    #[must_use]
    pub fn layout(specs: &[(String, ColumnWidth)], available: usize) -> Vec<Self> {
        let gaps = specs.len() * COLUMN_GAP;
        let fixed: usize = specs
            .iter()
            .map(|(_, w)| match w {
                ColumnWidth::Fixed(n) => *n,
                ColumnWidth::Flex(_) => 0,
            })
            .sum();
        let total_weight: usize = specs
            .iter()
            .map(|(_, w)| match w {
                ColumnWidth::Flex(weight) => *weight,
                ColumnWidth::Fixed(_) => 0,
            })
            .sum();
        let flexible = available.saturating_sub(fixed + gaps);
        let last_flex = specs
            .iter()
            .rposition(|(_, w)| matches!(w, ColumnWidth::Flex(_)));

        let mut flex_left = flexible;
        let mut room = available;
        specs
            .iter()
            .enumerate()
            .map(|(idx, (title, width))| {
                let wanted = match width {
                    ColumnWidth::Fixed(n) => *n,
                    ColumnWidth::Flex(_) if Some(idx) == last_flex => flex_left,
                    ColumnWidth::Flex(weight) => {
                        let share = flexible * weight / total_weight.max(1);
                        flex_left -= share;
                        share
                    }
                };
                let width = wanted.min(room.saturating_sub(COLUMN_GAP));
                room = room.saturating_sub(width + COLUMN_GAP);
                Self {
                    title: title.clone(),
                    width,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct TableInfo {
    pub columns: Vec<Column>,
    pub rows: Vec<DisplayRow>,
    /// Width reserved before the first column for row tags. Zero for none.
    pub tag_width: usize,
    /// Localized "Page x of y", paginated lists only.
    pub pager: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DisplayRow {
    /// One per column, already truncated to the column width.
    pub cells: Vec<DisplayCell>,
    pub tag: Option<String>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DisplayCell {
    pub text: String,
    /// Character ranges `(start, end)` matching the search term.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl DisplayCell {
    /// Truncates `text` to `width` and highlights occurrences of the
    /// lower-cased `needle` that remain visible.
    #[must_use]
    pub fn fitted(text: &str, width: usize, needle: &str) -> Self {
        let shown = helpers::truncate(text, width);
        let visible = if shown == text {
            shown.chars().count()
        } else {
            shown.chars().count().saturating_sub(1)
        };
        Self {
            highlight_ranges: helpers::clip_ranges(&helpers::match_ranges(text, needle), visible),
            text: shown,
        }
    }
}

/// Holding detail screen.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub title: String,
    /// Labelled facts about the action, one per line.
    pub fields: Vec<(String, String)>,
    pub holdings: TableInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct ToastInfo {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub hint: String,
}

#[derive(Debug, Clone)]
pub enum OverlayInfo {
    /// Static text with a close hint.
    Message {
        title: String,
        lines: Vec<String>,
        hint: String,
    },
    /// Single text field.
    Form {
        title: String,
        description: String,
        label: String,
        value: String,
        placeholder: String,
        error: Option<String>,
        hint: String,
    },
    /// Multi-select list.
    Checklist {
        title: String,
        description: String,
        items: Vec<ChecklistItem>,
        error: Option<String>,
        hint: String,
    },
}

#[derive(Debug, Clone)]
pub struct ChecklistItem {
    pub label: String,
    pub checked: bool,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str, width: ColumnWidth) -> (String, ColumnWidth) {
        (title.to_string(), width)
    }

    #[test]
    fn flex_columns_share_leftover_space() {
        let columns = Column::layout(
            &[
                spec("date", ColumnWidth::Fixed(10)),
                spec("company", ColumnWidth::Flex(1)),
                spec("details", ColumnWidth::Flex(3)),
            ],
            53,
        );
        let widths: Vec<usize> = columns.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![10, 10, 30]);
    }

    #[test]
    fn narrow_panes_squeeze_trailing_columns() {
        let columns = Column::layout(
            &[
                spec("date", ColumnWidth::Fixed(10)),
                spec("ticker", ColumnWidth::Fixed(8)),
                spec("type", ColumnWidth::Fixed(26)),
            ],
            24,
        );
        let widths: Vec<usize> = columns.iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![10, 8, 3]);
    }

    #[test]
    fn highlights_stop_at_truncation() {
        let cell = DisplayCell::fitted("Apple Apple", 8, "apple");
        assert_eq!(cell.text, "Apple A…");
        assert_eq!(cell.highlight_ranges, vec![(0, 5), (6, 7)]);
    }
}

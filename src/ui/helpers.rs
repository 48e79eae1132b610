//! Shared rendering utilities.
//!
//! Text is measured in terminal columns, not bytes: CJK characters (company
//! and client names, the `zh` dictionary) take two columns. Highlight ranges
//! are character indices.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Columns taken by `c` in a terminal.
const fn char_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// Columns taken by `text` in a terminal.
///
/// ```
/// use actionboard::ui::helpers::text_width;
///
/// assert_eq!(text_width("AAPL"), 4);
/// assert_eq!(text_width("陈大文"), 6);
/// ```
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Cuts `text` to at most `width` columns, ending in `…` when shortened.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Truncates or right-pads `text` to exactly `width` columns.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let pad = width.saturating_sub(text_width(&out));
    out.push_str(&" ".repeat(pad));
    out
}

/// Breaks `text` into lines of at most `width` columns.
///
/// Lines break at spaces where possible. Words wider than `width`, and runs of
/// CJK text without spaces, are split between characters.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0;

    for word in text.split(' ') {
        let word_width = text_width(word);
        let sep = usize::from(!line.is_empty());
        if used + sep + word_width <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            used += sep + word_width;
            continue;
        }
        if word_width <= width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            used = word_width;
            continue;
        }
        if !line.is_empty() {
            line.push(' ');
            used += 1;
        }
        for c in word.chars() {
            let w = char_width(c);
            if used + w > width {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            line.push(c);
            used += w;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Left padding that centers `text` in `cols`.
#[must_use]
pub fn center_padding(text: &str, cols: usize) -> usize {
    cols.saturating_sub(text_width(text)) / 2
}

/// Character ranges of every case-insensitive occurrence of `needle`.
///
/// `needle` must already be lower-cased. Text whose lower-case form has a
/// different character count gets no ranges rather than misplaced ones.
///
/// ```
/// use actionboard::ui::helpers::match_ranges;
///
/// assert_eq!(match_ranges("Apple Inc.", "p"), vec![(1, 2), (2, 3)]);
/// assert!(match_ranges("Apple", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    if lower.chars().count() != text.chars().count() {
        return Vec::new();
    }

    let needle_len = needle.chars().count();
    lower
        .match_indices(needle)
        .map(|(byte, _)| {
            let start = lower[..byte].chars().count();
            (start, start + needle_len)
        })
        .collect()
}

/// Drops or shortens ranges that fall past the first `visible` characters.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], visible: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < visible)
        .map(|&(start, end)| (start, end.min(visible)))
        .collect()
}

/// Prints `text` with `ranges` drawn in the match highlight colors.
///
/// Selected rows keep their selection colors, so highlighting is skipped.
/// After each highlight the normal text color is restored.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("Microsoft Corporation", 9), "Microsof…");
        assert_eq!(truncate("AAPL", 9), "AAPL");
        assert_eq!(truncate("AAPL", 0), "");
    }

    #[test]
    fn truncate_counts_wide_characters_twice() {
        assert_eq!(truncate("陈大文先生", 5), "陈大…");
        assert_eq!(text_width(&fit("陈大文", 8)), 8);
    }

    #[test]
    fn wrap_breaks_on_spaces_and_inside_cjk_runs() {
        assert_eq!(wrap("export the results", 10), vec!["export the", "results"]);
        assert_eq!(wrap("企业行动列表", 6), vec!["企业行", "动列表"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn match_ranges_are_char_indices() {
        assert_eq!(match_ranges("Tencent 腾讯 Tech", "tech"), vec![(11, 15)]);
        assert_eq!(match_ranges("MSFT", "ms"), vec![(0, 2)]);
    }

    #[test]
    fn clip_keeps_only_visible_part() {
        assert_eq!(clip_ranges(&[(0, 2), (5, 9), (12, 14)], 8), vec![(0, 2), (5, 8)]);
    }
}

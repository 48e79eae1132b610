//! Filter, sort and paginate.
//!
//! Every function here is pure: the input slice is never modified and the
//! output only ever contains clones of input records, each at most once.

use crate::domain::ActionRecord;
use crate::engine::query::{Query, SortDirection, SortKey};
use std::cmp::Ordering;

/// Rows per page in paginated lists.
pub const PAGE_SIZE: usize = 5;

/// One window of a filtered result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<ActionRecord>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    /// Always at least 1, even for an empty result.
    pub total_pages: usize,
    /// Number of records across all pages.
    pub total: usize,
}

/// Applies the text, type and date filters followed by the sort.
///
/// The date range is checked against the effective date. The sort is stable,
/// so records with equal dates keep their input order.
#[must_use]
pub fn filter_and_sort(records: &[ActionRecord], query: &Query) -> Vec<ActionRecord> {
    let _span = tracing::debug_span!(
        "filter_and_sort",
        input = records.len(),
        term = %query.search_term,
        action_type = ?query.action_type,
    )
    .entered();

    let needle = query.search_term.to_lowercase();

    let mut matched: Vec<ActionRecord> = records
        .iter()
        .filter(|r| r.matches_term(&needle))
        .filter(|r| query.action_type.map_or(true, |t| r.action_type == t))
        .filter(|r| {
            query
                .date_range
                .map_or(true, |range| range.contains(r.effective_date))
        })
        .cloned()
        .collect();

    if let Some(spec) = query.sort {
        matched.sort_by(|a, b| {
            let ord = compare_on(a, b, spec.key);
            match spec.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }

    tracing::debug!(output = matched.len(), "query evaluated");
    matched
}

fn compare_on(a: &ActionRecord, b: &ActionRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::AnnouncementDate => a.announcement_date.cmp(&b.announcement_date),
        SortKey::EffectiveDate => a.effective_date.cmp(&b.effective_date),
    }
}

/// Number of pages needed for `total` records. Never less than 1.
#[must_use]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Cuts one page out of `records`.
///
/// `page` is clamped into `1..=total_pages`, so page 0 yields the first page
/// and anything past the end yields the last.
#[must_use]
pub fn paginate(records: &[ActionRecord], page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total = records.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);
    let window = records.get(start..end).unwrap_or_default().to_vec();

    Page {
        records: window,
        page,
        total_pages,
        total,
    }
}

/// Runs the whole pipeline.
///
/// With `query.page` unset the result is a single page holding every match.
#[must_use]
pub fn apply(records: &[ActionRecord], query: &Query, page_size: usize) -> Page {
    let matched = filter_and_sort(records, query);
    match query.page {
        Some(page) => paginate(&matched, page, page_size),
        None => Page {
            total: matched.len(),
            records: matched,
            page: 1,
            total_pages: 1,
        },
    }
}

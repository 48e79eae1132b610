//! Query model consumed by the pipeline.
//!
//! A [`Query`] is owned by the application state and shipped to the worker on
//! every change. It is plain data: serializable, cloneable, and validated before
//! it gets here (date inputs are parsed upstream by the input handler).

use crate::domain::ActionType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range. Either bound may be open.
///
/// `from` is compared at the start of its day and `to` at the very end of its
/// day, so both boundary dates are inside the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `date` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Date-bearing fields a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    AnnouncementDate,
    EffectiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Newest announcements first. Used as the initial order of every list and
    /// restored when filters are cleared.
    pub const DEFAULT: Self = Self {
        key: SortKey::AnnouncementDate,
        direction: SortDirection::Descending,
    };

    /// Sort order after the user selects `key`.
    ///
    /// Selecting the active key while ascending flips to descending; anything
    /// else starts ascending on `key`.
    ///
    /// ```
    /// use actionboard::engine::{SortDirection, SortKey, SortSpec};
    ///
    /// let asc = SortSpec::toggle(Some(SortSpec::DEFAULT), SortKey::EffectiveDate);
    /// assert_eq!(asc.direction, SortDirection::Ascending);
    /// let desc = SortSpec::toggle(Some(asc), SortKey::EffectiveDate);
    /// assert_eq!(desc.direction, SortDirection::Descending);
    /// ```
    #[must_use]
    pub fn toggle(current: Option<Self>, key: SortKey) -> Self {
        let direction = match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        Self { key, direction }
    }
}

/// Filter, sort and page selection for one result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Case-insensitive substring matched against ticker and company name.
    pub search_term: String,
    /// `None` matches every type.
    pub action_type: Option<ActionType>,
    pub date_range: Option<DateRange>,
    pub sort: Option<SortSpec>,
    /// 1-based page. `None` disables pagination.
    pub page: Option<usize>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            action_type: None,
            date_range: None,
            sort: Some(SortSpec::DEFAULT),
            page: None,
        }
    }
}

impl Query {
    /// Default query for a paginated list, positioned on the first page.
    #[must_use]
    pub fn paginated() -> Self {
        Self {
            page: Some(1),
            ..Self::default()
        }
    }

    /// Resets filters and sort, keeping whether the list is paginated.
    pub fn clear_filters(&mut self) {
        let paginated = self.page.is_some();
        *self = if paginated {
            Self::paginated()
        } else {
            Self::default()
        };
    }

    /// Moves back to the first page. Called after any non-page field changes.
    pub fn reset_page(&mut self) {
        if self.page.is_some() {
            self.page = Some(1);
        }
    }

    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.search_term.is_empty()
            || self.action_type.is_some()
            || self.date_range.is_some_and(|r| !r.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_includes_both_bounds() {
        let range = DateRange {
            from: Some(date(2024, 7, 1)),
            to: Some(date(2024, 7, 15)),
        };
        assert!(range.contains(date(2024, 7, 1)));
        assert!(range.contains(date(2024, 7, 15)));
        assert!(!range.contains(date(2024, 7, 16)));
        assert!(!range.contains(date(2024, 6, 30)));
    }

    #[test]
    fn open_range_contains_everything() {
        let range = DateRange::default();
        assert!(range.is_open());
        assert!(range.contains(date(1999, 1, 1)));
    }

    #[test]
    fn toggle_from_other_key_starts_ascending() {
        let spec = SortSpec::toggle(Some(SortSpec::DEFAULT), SortKey::AnnouncementDate);
        assert_eq!(
            spec,
            SortSpec {
                key: SortKey::AnnouncementDate,
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn clear_filters_restores_default_sort_and_first_page() {
        let mut query = Query::paginated();
        query.search_term = "apple".to_string();
        query.action_type = Some(ActionType::CashDividend);
        query.sort = Some(SortSpec::toggle(None, SortKey::EffectiveDate));
        query.page = Some(3);

        query.clear_filters();

        assert_eq!(query, Query::paginated());
        assert!(!query.has_filters());
    }

    #[test]
    fn reset_page_leaves_unpaginated_query_alone() {
        let mut query = Query::default();
        query.reset_page();
        assert_eq!(query.page, None);
    }
}

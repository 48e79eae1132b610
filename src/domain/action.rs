//! Corporate action domain model.
//!
//! An [`ActionRecord`] describes one corporate event (dividend, split, ticker
//! change, ...) announced by a listed company. Records are loaded once from the
//! embedded dataset and never mutated afterwards.
//!
//! Holding processing status lives on the record itself as a
//! [`ProcessingStatus`], so the pending and completed lists are two derived
//! views of one sequence and an action can never appear in both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed set of corporate action categories.
///
/// The serialized form is the human-readable category name used by the dataset.
/// Localized display text is looked up through
/// [`ActionTypeLabels`](crate::i18n::ActionTypeLabels) via [`ActionType::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "Cash Dividend")]
    CashDividend,
    #[serde(rename = "Bonus Issue")]
    BonusIssue,
    #[serde(rename = "Stock Split/Consolidation")]
    StockSplitConsolidation,
    #[serde(rename = "Ticker Change")]
    TickerChange,
    #[serde(rename = "Shareholder Meeting")]
    ShareholderMeeting,
    #[serde(rename = "Board Transfer")]
    BoardTransfer,
    #[serde(rename = "Trading Status Change")]
    TradingStatusChange,
}

impl ActionType {
    /// Every action type, in menu order.
    pub const ALL: [Self; 7] = [
        Self::CashDividend,
        Self::BonusIssue,
        Self::StockSplitConsolidation,
        Self::TickerChange,
        Self::ShareholderMeeting,
        Self::BoardTransfer,
        Self::TradingStatusChange,
    ];

    /// Action types that require holding processing by default.
    pub const HOLDING: [Self; 3] = [
        Self::BonusIssue,
        Self::StockSplitConsolidation,
        Self::TickerChange,
    ];

    /// Dictionary key under the `[actionTypes]` table.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CashDividend => "cashDividend",
            Self::BonusIssue => "bonusIssue",
            Self::StockSplitConsolidation => "stockSplitConsolidation",
            Self::TickerChange => "tickerChange",
            Self::ShareholderMeeting => "shareholderMeeting",
            Self::BoardTransfer => "boardTransfer",
            Self::TradingStatusChange => "tradingStatusChange",
        }
    }

    /// Canonical category name, identical to the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CashDividend => "Cash Dividend",
            Self::BonusIssue => "Bonus Issue",
            Self::StockSplitConsolidation => "Stock Split/Consolidation",
            Self::TickerChange => "Ticker Change",
            Self::ShareholderMeeting => "Shareholder Meeting",
            Self::BoardTransfer => "Board Transfer",
            Self::TradingStatusChange => "Trading Status Change",
        }
    }

    /// Steps an optional type filter through `options`.
    ///
    /// `None` ("all types") advances to the first option, the last option wraps
    /// back to `None`. A current value that is not in `options` restarts the
    /// cycle at `None`.
    ///
    /// ```
    /// use actionboard::domain::ActionType;
    ///
    /// let options = ActionType::HOLDING;
    /// assert_eq!(ActionType::cycle(&options, None), Some(ActionType::BonusIssue));
    /// assert_eq!(ActionType::cycle(&options, Some(ActionType::TickerChange)), None);
    /// ```
    #[must_use]
    pub fn cycle(options: &[Self], current: Option<Self>) -> Option<Self> {
        match current {
            None => options.first().copied(),
            Some(current) => options
                .iter()
                .position(|t| *t == current)
                .and_then(|idx| options.get(idx + 1).copied()),
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata recorded when holding processing for an action is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionInfo {
    /// Name of the operator who processed the action.
    pub processor: String,
    /// Date the processing happened. Expected to be on or after the effective date.
    pub processed_date: NaiveDate,
    /// Operator note. Never empty.
    pub remarks: String,
}

/// Holding processing state of an action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Completed(CompletionInfo),
}

impl ProcessingStatus {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[must_use]
    pub const fn completion(&self) -> Option<&CompletionInfo> {
        match self {
            Self::Completed(info) => Some(info),
            Self::Pending => None,
        }
    }
}

/// One corporate action event.
///
/// # Invariants
///
/// - `id` is unique across the dataset
/// - `ticker` and `company_name` are non-empty
/// - both dates are well-formed calendar dates (guaranteed by `NaiveDate`)
///
/// `effective_date` is not required to be on or after `announcement_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub id: String,
    pub announcement_date: NaiveDate,
    pub ticker: String,
    pub company_name: String,
    pub action_type: ActionType,
    pub action_details: String,
    pub effective_date: NaiveDate,
    /// Pre-event state such as a share count or old ticker symbol.
    #[serde(default, rename = "before", skip_serializing_if = "Option::is_none")]
    pub value_before: Option<String>,
    /// Post-event state such as a share count or new ticker symbol.
    #[serde(default, rename = "after", skip_serializing_if = "Option::is_none")]
    pub value_after: Option<String>,
    #[serde(default)]
    pub status: ProcessingStatus,
}

impl ActionRecord {
    /// Case-insensitive substring match against ticker and company name.
    ///
    /// `needle` must already be lower-cased. An empty needle matches everything.
    #[must_use]
    pub fn matches_term(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.ticker.to_lowercase().contains(needle)
            || self.company_name.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_dataset_shape() {
        let json = r#"{
            "id": "5",
            "announcementDate": "2024-04-10",
            "ticker": "FB",
            "companyName": "Meta Platforms, Inc.",
            "actionType": "Ticker Change",
            "actionDetails": "Company changed ticker from FB to META.",
            "effectiveDate": "2024-05-01",
            "before": "FB",
            "after": "META",
            "status": {
                "state": "completed",
                "processor": "Admin A",
                "processedDate": "2024-05-02",
                "remarks": "done"
            }
        }"#;

        let record: ActionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.action_type, ActionType::TickerChange);
        assert_eq!(record.value_before.as_deref(), Some("FB"));
        let info = record.status.completion().unwrap();
        assert_eq!(info.processor, "Admin A");
        assert_eq!(info.processed_date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        let json = r#"{
            "id": "1",
            "announcementDate": "2024-07-01",
            "ticker": "AAPL",
            "companyName": "Apple Inc.",
            "actionType": "Cash Dividend",
            "actionDetails": "Quarterly cash dividend of $0.25 per share.",
            "effectiveDate": "2024-07-15"
        }"#;

        let record: ActionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, ProcessingStatus::Pending);
        assert!(record.value_after.is_none());
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let json = r#"{
            "id": "1",
            "announcementDate": "2024-07-01",
            "ticker": "AAPL",
            "companyName": "Apple Inc.",
            "actionType": "Spin-off",
            "actionDetails": "",
            "effectiveDate": "2024-07-15"
        }"#;

        assert!(serde_json::from_str::<ActionRecord>(json).is_err());
    }

    #[test]
    fn term_matching_is_substring_on_ticker_or_company() {
        let json = r#"{
            "id": "1",
            "announcementDate": "2024-07-01",
            "ticker": "AAPL",
            "companyName": "Apple Inc.",
            "actionType": "Cash Dividend",
            "actionDetails": "",
            "effectiveDate": "2024-07-15"
        }"#;
        let record: ActionRecord = serde_json::from_str(json).unwrap();

        assert!(record.matches_term("apple"));
        assert!(record.matches_term("aap"));
        assert!(record.matches_term(""));
        assert!(!record.matches_term("msft"));
    }

    #[test]
    fn cycle_walks_all_options_then_wraps() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..ActionType::ALL.len() {
            current = ActionType::cycle(&ActionType::ALL, current);
            seen.push(current.unwrap());
        }
        assert_eq!(seen, ActionType::ALL.to_vec());
        assert_eq!(ActionType::cycle(&ActionType::ALL, current), None);
    }

    #[test]
    fn cycle_restarts_when_current_not_offered() {
        assert_eq!(
            ActionType::cycle(&ActionType::HOLDING, Some(ActionType::CashDividend)),
            None
        );
    }
}

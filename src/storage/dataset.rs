//! Static record store.
//!
//! The corporate action dataset and the mock client holdings are embedded in the
//! binary and parsed once on first use. Records are never mutated afterwards;
//! the pending and completed lists are both derived from each record's
//! [`ProcessingStatus`](crate::domain::ProcessingStatus).

use crate::domain::error::{ActionboardError, Result};
use crate::domain::{ActionRecord, ActionType, ClientHolding};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const EMBEDDED_DATASET: &str = include_str!("../../data/stock_actions.json");

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[allow(dead_code)]
    version: u32,
    actions: Vec<ActionRecord>,
    #[serde(default)]
    holdings: Vec<ClientHolding>,
}

/// Which slice of the dataset a query runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordScope {
    /// Every action regardless of type or status.
    AllActions,
    /// Pending actions whose type is in `types`.
    Pending { types: Vec<ActionType> },
    /// Completed actions whose type is in `types`.
    Completed { types: Vec<ActionType> },
}

/// Read-only, validated dataset.
#[derive(Debug, Clone)]
pub struct RecordStore {
    actions: Vec<ActionRecord>,
    holdings: Vec<ClientHolding>,
}

impl RecordStore {
    /// Parses and validates the dataset compiled into the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::Dataset`] if the embedded JSON is malformed
    /// or violates a record invariant.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Parses and validates a dataset document.
    ///
    /// Checks that ids are unique, ticker and company name are non-empty, and
    /// completed records carry non-empty remarks. Dates and action types are
    /// enforced by deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::Dataset`] describing the first violation.
    pub fn from_json(json: &str) -> Result<Self> {
        let _span = tracing::debug_span!("load_dataset", bytes = json.len()).entered();

        let file: DatasetFile = serde_json::from_str(json)
            .map_err(|e| ActionboardError::Dataset(format!("failed to parse dataset: {e}")))?;

        let mut seen = HashSet::with_capacity(file.actions.len());
        for record in &file.actions {
            if !seen.insert(record.id.as_str()) {
                return Err(ActionboardError::Dataset(format!(
                    "duplicate action id '{}'",
                    record.id
                )));
            }
            if record.ticker.trim().is_empty() || record.company_name.trim().is_empty() {
                return Err(ActionboardError::Dataset(format!(
                    "action '{}' has an empty ticker or company name",
                    record.id
                )));
            }
            if let Some(info) = record.status.completion() {
                if info.remarks.trim().is_empty() {
                    return Err(ActionboardError::Dataset(format!(
                        "completed action '{}' has no remarks",
                        record.id
                    )));
                }
            }
        }

        tracing::debug!(
            actions = file.actions.len(),
            holdings = file.holdings.len(),
            "dataset loaded"
        );

        Ok(Self {
            actions: file.actions,
            holdings: file.holdings,
        })
    }

    /// All actions in dataset order.
    #[must_use]
    pub fn all(&self) -> &[ActionRecord] {
        &self.actions
    }

    #[must_use]
    pub fn holdings(&self) -> &[ClientHolding] {
        &self.holdings
    }

    /// Looks up a single action by id.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::NotFound`] if no action has this id.
    pub fn find(&self, id: &str) -> Result<&ActionRecord> {
        self.actions
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ActionboardError::NotFound(format!("action '{id}'")))
    }

    /// Copies out the records belonging to `scope`, in dataset order.
    #[must_use]
    pub fn scoped(&self, scope: &RecordScope) -> Vec<ActionRecord> {
        let keep = |record: &&ActionRecord| match scope {
            RecordScope::AllActions => true,
            RecordScope::Pending { types } => {
                !record.status.is_completed() && types.contains(&record.action_type)
            }
            RecordScope::Completed { types } => {
                record.status.is_completed() && types.contains(&record.action_type)
            }
        };
        self.actions.iter().filter(keep).cloned().collect()
    }

    /// Ids of the `n` most recently announced actions.
    ///
    /// Ties on the announcement date keep dataset order.
    #[must_use]
    pub fn newest_ids(&self, n: usize) -> Vec<String> {
        let mut by_date: Vec<&ActionRecord> = self.actions.iter().collect();
        by_date.sort_by(|a, b| b.announcement_date.cmp(&a.announcement_date));
        by_date.into_iter().take(n).map(|r| r.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::embedded().unwrap()
    }

    #[test]
    fn embedded_dataset_is_valid() {
        let store = store();
        assert_eq!(store.all().len(), 12);
        assert_eq!(store.holdings().len(), 3);
    }

    #[test]
    fn find_unknown_id_is_not_found() {
        let err = store().find("999").unwrap_err();
        assert!(matches!(err, ActionboardError::NotFound(_)));
    }

    #[test]
    fn find_known_id() {
        assert_eq!(store().find("3").unwrap().ticker, "GOOGL");
    }

    #[test]
    fn pending_and_completed_scopes_are_disjoint() {
        let store = store();
        let types = ActionType::HOLDING.to_vec();
        let pending = store.scoped(&RecordScope::Pending {
            types: types.clone(),
        });
        let completed = store.scoped(&RecordScope::Completed { types });

        let pending_ids: HashSet<_> = pending.iter().map(|r| r.id.clone()).collect();
        assert!(completed.iter().all(|r| !pending_ids.contains(&r.id)));

        let completed_ids: Vec<_> = completed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(completed_ids, vec!["5", "6"]);
        assert!(pending
            .iter()
            .all(|r| ActionType::HOLDING.contains(&r.action_type)));
    }

    #[test]
    fn newest_ids_orders_by_announcement() {
        assert_eq!(store().newest_ids(3), vec!["12", "11", "9"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{
            "version": 1,
            "actions": [
                {"id": "1", "announcementDate": "2024-01-01", "ticker": "A", "companyName": "A Co",
                 "actionType": "Cash Dividend", "actionDetails": "", "effectiveDate": "2024-01-02"},
                {"id": "1", "announcementDate": "2024-01-01", "ticker": "B", "companyName": "B Co",
                 "actionType": "Cash Dividend", "actionDetails": "", "effectiveDate": "2024-01-02"}
            ]
        }"#;
        let err = RecordStore::from_json(json).unwrap_err();
        assert!(matches!(err, ActionboardError::Dataset(_)));
    }

    #[test]
    fn empty_remarks_are_rejected() {
        let json = r#"{
            "version": 1,
            "actions": [
                {"id": "1", "announcementDate": "2024-01-01", "ticker": "A", "companyName": "A Co",
                 "actionType": "Bonus Issue", "actionDetails": "", "effectiveDate": "2024-01-02",
                 "status": {"state": "completed", "processor": "X", "processedDate": "2024-01-03", "remarks": "  "}}
            ]
        }"#;
        assert!(RecordStore::from_json(json).is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let json = r#"{
            "version": 1,
            "actions": [
                {"id": "1", "announcementDate": "2024-13-01", "ticker": "A", "companyName": "A Co",
                 "actionType": "Cash Dividend", "actionDetails": "", "effectiveDate": "2024-01-02"}
            ]
        }"#;
        assert!(RecordStore::from_json(json).is_err());
    }
}

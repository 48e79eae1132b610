//! Typed localization dictionaries.
//!
//! Every user-facing string is a field on [`Dictionary`]. The TOML resource is
//! deserialized straight into these structs, so a key missing from a locale
//! file is a load error instead of a blank label at render time.

use crate::domain::error::{ActionboardError, Result};
use crate::domain::ActionType;
use crate::i18n::locale::Locale;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutText {
    pub title: String,
    pub description: String,
    pub loading_spinner_text: String,
    pub not_found_title: String,
    /// Placeholder: `{id}`.
    pub not_found_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarText {
    pub corporate_actions: String,
    pub holding_processing: String,
}

/// Filter bar, table and export strings shared by both list views.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerText {
    pub search_label: String,
    pub search_placeholder: String,
    pub action_type_label: String,
    pub all_action_types: String,
    pub date_range_label: String,
    pub select_date_range: String,
    pub date_from_prompt: String,
    pub date_to_prompt: String,
    /// Placeholder: `{value}`.
    pub invalid_date: String,
    pub sort_label: String,
    pub clear_filters_button: String,
    pub export_csv_button: String,
    pub table_header_announce_date: String,
    pub table_header_ticker: String,
    pub table_header_company_name: String,
    pub table_header_action_type: String,
    pub table_header_details: String,
    pub table_header_effective_date: String,
    pub new_tag: String,
    pub no_actions_found: String,
    /// Placeholders: `{currentPage}`, `{totalPages}`.
    pub page_indicator: String,
    pub toast_no_data_title: String,
    pub toast_no_data_description: String,
    pub toast_export_success_title: String,
    /// Placeholder: `{filename}`.
    pub toast_export_success_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsTableText {
    pub chinese_name: String,
    pub english_name: String,
    pub account_number: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDialogText {
    pub title: String,
    /// Placeholder: `{ticker}`.
    pub description: String,
    pub remarks_label: String,
    pub remarks_placeholder: String,
    pub remarks_required: String,
    pub submit_button: String,
    pub cancel_button: String,
    pub toast_success_title: String,
    /// Placeholder: `{ticker}`.
    pub toast_success_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageDialogText {
    pub title: String,
    pub description: String,
    pub at_least_one: String,
    pub submit_button: String,
    pub cancel_button: String,
    pub toast_success_title: String,
    /// Placeholder: `{count}`.
    pub toast_success_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingText {
    pub pending_tab: String,
    pub completed_tab: String,
    pub table_header_processor: String,
    pub table_header_processed_date: String,
    pub table_header_remarks: String,
    pub no_pending_actions: String,
    pub no_completed_actions: String,
    pub manage_action_types_button: String,
    /// Placeholder: `{ticker}`.
    pub holding_details_for: String,
    pub before_label: String,
    pub after_label: String,
    pub back_to_list_button: String,
    pub confirm_process_button: String,
    pub details_table: DetailsTableText,
    pub dialog: ConfirmDialogText,
    pub manage_dialog: ManageDialogText,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsText {
    pub title: String,
    pub step1: String,
    pub step2: String,
    pub close_button: String,
}

/// Footer keybinding labels.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyHints {
    pub navigate: String,
    pub page: String,
    pub search: String,
    pub action_type: String,
    pub date_from: String,
    pub date_to: String,
    pub sort_announced: String,
    pub sort_effective: String,
    pub clear: String,
    pub export: String,
    pub switch_view: String,
    pub tabs: String,
    pub details: String,
    pub manage: String,
    pub help: String,
    pub language: String,
    pub quit: String,
    pub back: String,
    pub confirm: String,
    pub toggle: String,
    pub submit: String,
    pub cancel: String,
    pub apply: String,
    pub dismiss: String,
}

/// Display names for every [`ActionType`].
///
/// Built from the raw `[actionTypes]` table and rejected at load time unless
/// every action type has an entry, which makes [`ActionTypeLabels::label`] total.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct ActionTypeLabels {
    labels: [String; ActionType::ALL.len()],
}

impl TryFrom<BTreeMap<String, String>> for ActionTypeLabels {
    type Error = ActionboardError;

    fn try_from(mut raw: BTreeMap<String, String>) -> Result<Self> {
        let mut missing = Vec::new();
        let labels = ActionType::ALL.map(|action_type| {
            raw.remove(action_type.key()).unwrap_or_else(|| {
                missing.push(action_type.key());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(ActionboardError::Dictionary(format!(
                "missing action type labels: {}",
                missing.join(", ")
            )));
        }
        if !raw.is_empty() {
            tracing::warn!(unknown = ?raw.keys().collect::<Vec<_>>(), "ignoring unknown action type labels");
        }

        Ok(Self { labels })
    }
}

impl ActionTypeLabels {
    #[must_use]
    pub fn label(&self, action_type: ActionType) -> &str {
        // ActionType::ALL lists the variants in declaration order.
        &self.labels[action_type as usize]
    }
}

/// All user-facing text for one locale.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub layout: LayoutText,
    pub sidebar: SidebarText,
    pub tracker: TrackerText,
    pub holding: HoldingText,
    pub instructions: InstructionsText,
    pub keys: KeyHints,
    pub action_types: ActionTypeLabels,
}

impl Dictionary {
    /// Loads the dictionary bundled for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::Dictionary`] if the resource does not parse or
    /// lacks a key, including any action type label.
    pub fn load(locale: Locale) -> Result<Self> {
        let _span = tracing::debug_span!("load_dictionary", locale = %locale).entered();
        Self::parse(locale.source())
    }

    /// Parses a dictionary from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ActionboardError::Dictionary`] on malformed input or a missing key.
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| ActionboardError::Dictionary(format!("failed to load dictionary: {e}")))
    }

    /// Substitutes `{name}` placeholders in `template`.
    ///
    /// Placeholders without a matching value are left as they are.
    ///
    /// ```
    /// use actionboard::i18n::Dictionary;
    ///
    /// let text = Dictionary::fill(
    ///     "Page {currentPage} of {totalPages}",
    ///     &[("currentPage", "2"), ("totalPages", "3")],
    /// );
    /// assert_eq!(text, "Page 2 of 3");
    /// ```
    #[must_use]
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    #[must_use]
    pub fn action_type(&self, action_type: ActionType) -> &str {
        self.action_types.label(action_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_locales_load() {
        for locale in Locale::ALL {
            let dictionary = Dictionary::load(locale).unwrap();
            for action_type in ActionType::ALL {
                assert!(!dictionary.action_type(action_type).is_empty());
            }
        }
    }

    #[test]
    fn english_labels_match_type_names() {
        let dictionary = Dictionary::load(Locale::En).unwrap();
        for action_type in ActionType::ALL {
            assert_eq!(dictionary.action_type(action_type), action_type.name());
        }
    }

    #[test]
    fn missing_action_type_label_fails_at_load() {
        let source = Locale::En.source().replace("boardTransfer = \"Board Transfer\"\n", "");
        let err = Dictionary::parse(&source).unwrap_err();
        assert!(matches!(err, ActionboardError::Dictionary(_)));
        assert!(err.to_string().contains("boardTransfer"));
    }

    #[test]
    fn missing_plain_key_fails_at_load() {
        let source = Locale::Zh.source().replace("newTag = \"新\"\n", "");
        assert!(Dictionary::parse(&source).is_err());
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(
            Dictionary::fill("Saved {filename} to {dir}.", &[("filename", "a.csv")]),
            "Saved a.csv to {dir}."
        );
    }
}

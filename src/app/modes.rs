//! Screen and input mode types.
//!
//! [`View`] picks the screen, [`InputMode`] decides how keys are read, and an
//! optional [`Overlay`] sits on top of both and captures all input while open.

use crate::domain::ActionType;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every announced action, paginated.
    CorporateActions,
    /// Actions of the holding types, split into pending and completed tabs.
    HoldingProcessing,
    /// One action with its client holdings, reached from Holding Processing.
    HoldingDetail,
}

/// Tabs of the Holding Processing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldingTab {
    #[default]
    Pending,
    Completed,
}

/// Which bound of the effective date range is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    From,
    To,
}

/// How keystrokes are interpreted outside overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Normal,
    /// Characters edit the search term; results refresh on every keystroke.
    Search,
    /// Characters edit a date buffer that is validated on Enter.
    DateInput(DateBound),
}

/// Modal dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Instructions,

    /// Confirm holding processing for the action on the detail screen.
    ConfirmProcessing {
        remarks: String,
        /// Set after a submit with blank remarks.
        show_required: bool,
    },

    /// Pick which action types Holding Processing covers.
    ManageTypes {
        /// Indexed like [`ActionType::ALL`].
        selected: [bool; ActionType::ALL.len()],
        cursor: usize,
        /// Set after a submit with nothing selected.
        show_required: bool,
    },
}

impl Overlay {
    /// Opens the type manager with `current` pre-selected.
    #[must_use]
    pub fn manage_types(current: &[ActionType]) -> Self {
        Self::ManageTypes {
            selected: ActionType::ALL.map(|t| current.contains(&t)),
            cursor: 0,
            show_required: false,
        }
    }

    #[must_use]
    pub const fn confirm_processing() -> Self {
        Self::ConfirmProcessing {
            remarks: String::new(),
            show_required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_types_preselects_current_types() {
        let Overlay::ManageTypes { selected, .. } = Overlay::manage_types(&ActionType::HOLDING) else {
            panic!("expected type manager");
        };
        let chosen: Vec<ActionType> = ActionType::ALL
            .into_iter()
            .zip(selected)
            .filter_map(|(t, on)| on.then_some(t))
            .collect();
        assert_eq!(chosen, ActionType::HOLDING.to_vec());
    }
}

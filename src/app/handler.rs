//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It returns whether
//! the screen needs a redraw together with the [`Action`]s the plugin shim must
//! execute (worker requests, timers, hiding the pane).
//!
//! Keys are mapped to events by the shim according to the current overlay and
//! input mode, so the same event may mean different things: `Submit` confirms
//! a dialog when one is open and applies a typed date otherwise.
//!
//! # Event Types
//!
//! - **Navigation**: `MoveDown`, `MoveUp`, `NextPage`, `PrevPage`, `SwitchView`, `ShowTab`
//! - **Query**: `StartSearch`, `StartDateInput`, `CycleActionType`, `ToggleSort`, `ClearFilters`
//! - **Commands**: `Export`, `Select`, `ManageTypes`, `ShowInstructions`, `SwitchLocale`
//! - **Text input**: `Char`, `Backspace`, `Submit`, `Toggle`, `Escape`
//! - **System**: `Close`, `Timer`, `DismissToast`, `PermissionsResult`, `WorkerResponse`

use super::modes::{DateBound, HoldingTab, InputMode, Overlay, View};
use super::state::{DetailState, ListId};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::ActionType;
use crate::engine::{SortKey, SortSpec};
use crate::export::{self, FlatRecord};
use crate::i18n::Dictionary;
use crate::ui::viewmodel::ToastKind;
use crate::worker::{WorkerMessage, WorkerResponse};
use chrono::NaiveDate;
use zellij_tile::prelude::PermissionType;

/// Format accepted for typed dates.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Next row, or next checklist item in the type manager.
    MoveDown,
    MoveUp,
    /// Next page of a paginated list.
    NextPage,
    PrevPage,
    /// Toggles between Corporate Actions and Holding Processing.
    SwitchView,
    ShowTab(HoldingTab),

    StartSearch,
    StartDateInput(DateBound),
    CycleActionType,
    ToggleSort(SortKey),
    ClearFilters,

    /// Writes the current result list to a CSV file.
    Export,
    /// Opens the selected action, or the confirm dialog on the detail screen.
    Select,
    ManageTypes,
    ShowInstructions,
    SwitchLocale,

    Char(char),
    Backspace,
    Submit,
    /// Checks or unchecks the item under the cursor.
    Toggle,
    /// Closes the innermost overlay, input box or screen.
    Escape,

    /// Hides the plugin pane.
    Close,
    /// A timer set through [`Action::SetTimeout`] elapsed.
    Timer,
    DismissToast,
    PermissionsResult {
        granted: Vec<PermissionType>,
    },
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the screen must be redrawn.
///
/// # Errors
///
/// Returns an error if encoding an export fails. State stays consistent: the
/// export is simply not sent.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::MoveDown | Event::MoveUp => {
            let down = *event == Event::MoveDown;
            if let Some(Overlay::ManageTypes { cursor, .. }) = &mut state.overlay {
                let len = ActionType::ALL.len();
                *cursor = if down { (*cursor + 1) % len } else { (*cursor + len - 1) % len };
                return Ok((true, vec![]));
            }
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            let list = state.list_mut(id);
            if down {
                list.move_down();
            } else {
                list.move_up();
            }
            Ok((true, vec![]))
        }
        Event::NextPage | Event::PrevPage => {
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            let changed = state.list_mut(id).turn_page(*event == Event::NextPage);
            Ok((changed, vec![]))
        }
        Event::SwitchView => {
            let (view, id) = match state.view {
                View::CorporateActions => (View::HoldingProcessing, ListId::HoldingProcessing),
                View::HoldingProcessing | View::HoldingDetail => {
                    (View::CorporateActions, ListId::CorporateActions)
                }
            };
            tracing::debug!(from = ?state.view, to = ?view, "switching view");
            state.view = view;
            state.detail = None;
            state.input_mode = InputMode::Normal;
            Ok((true, vec![state.dispatch_query(id)]))
        }
        Event::ShowTab(tab) => {
            if state.view != View::HoldingProcessing || state.tab == *tab {
                return Ok((false, vec![]));
            }
            state.tab = *tab;
            let list = &mut state.holding_processing;
            list.results = None;
            list.selected = 0;
            Ok((true, vec![state.dispatch_query(ListId::HoldingProcessing)]))
        }

        Event::StartSearch => {
            if state.active_list_id().is_none() {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::StartDateInput(bound) => {
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            let range = state.list(id).query.date_range.unwrap_or_default();
            let current = match bound {
                DateBound::From => range.from,
                DateBound::To => range.to,
            };
            state.input_buffer = current.map(|d| d.to_string()).unwrap_or_default();
            state.input_error = None;
            state.input_mode = InputMode::DateInput(*bound);
            Ok((true, vec![]))
        }
        Event::CycleActionType => {
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            let next = ActionType::cycle(state.type_options(id), state.list(id).query.action_type);
            tracing::debug!(action_type = ?next, "type filter changed");
            update_query(state, id, |query| query.action_type = next)
        }
        Event::ToggleSort(key) => {
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            let key = *key;
            update_query(state, id, |query| query.sort = Some(SortSpec::toggle(query.sort, key)))
        }
        Event::ClearFilters => {
            let Some(id) = state.active_list_id() else {
                return Ok((false, vec![]));
            };
            update_query(state, id, |query| query.clear_filters())
        }

        Event::Export => export_current(state),
        Event::Select => open_selected(state),
        Event::ManageTypes => {
            if state.view != View::HoldingProcessing {
                return Ok((false, vec![]));
            }
            state.overlay = Some(Overlay::manage_types(&state.holding_types));
            Ok((true, vec![]))
        }
        Event::ShowInstructions => {
            state.overlay = Some(Overlay::Instructions);
            Ok((true, vec![]))
        }
        Event::SwitchLocale => match state.cycle_locale() {
            Ok(()) => Ok((true, vec![])),
            Err(e) => {
                tracing::error!(error = %e, "failed to switch locale");
                Ok((false, vec![]))
            }
        },

        Event::Char(c) => handle_char(state, *c),
        Event::Backspace => handle_backspace(state),
        Event::Submit => handle_submit(state),
        Event::Toggle => {
            let Some(Overlay::ManageTypes {
                selected,
                cursor,
                show_required,
            }) = &mut state.overlay
            else {
                return Ok((false, vec![]));
            };
            selected[*cursor] = !selected[*cursor];
            if selected.iter().any(|on| *on) {
                *show_required = false;
            }
            Ok((true, vec![]))
        }
        Event::Escape => handle_escape(state),

        Event::Close => Ok((false, vec![Action::CloseFocus])),
        Event::Timer => Ok((state.expire_toast(), vec![])),
        Event::DismissToast => Ok((state.toast.take().is_some(), vec![])),
        Event::PermissionsResult { granted } => {
            tracing::debug!(?granted, "permissions result");
            if state.started {
                return Ok((false, vec![]));
            }
            state.started = true;
            let id = state.active_list_id().unwrap_or(ListId::CorporateActions);
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::initialize()),
                    state.dispatch_query(id),
                ],
            ))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Applies `change` to the query of `id`, returns to the first page and asks
/// the worker for the new result.
fn update_query<F>(state: &mut AppState, id: ListId, change: F) -> Result<(bool, Vec<Action>)>
where
    F: FnOnce(&mut crate::engine::Query),
{
    let list = state.list_mut(id);
    change(&mut list.query);
    list.query.reset_page();
    list.selected = 0;
    Ok((true, vec![state.dispatch_query(id)]))
}

fn handle_char(state: &mut AppState, c: char) -> Result<(bool, Vec<Action>)> {
    if let Some(overlay) = &mut state.overlay {
        return match overlay {
            Overlay::ConfirmProcessing { remarks, .. } => {
                remarks.push(c);
                Ok((true, vec![]))
            }
            Overlay::Instructions | Overlay::ManageTypes { .. } => Ok((false, vec![])),
        };
    }

    match (state.input_mode, state.active_list_id()) {
        (InputMode::Search, Some(id)) => {
            tracing::trace!(char = %c, "search term updated");
            update_query(state, id, |query| query.search_term.push(c))
        }
        (InputMode::DateInput(_), _) => {
            state.input_buffer.push(c);
            Ok((true, vec![]))
        }
        _ => Ok((false, vec![])),
    }
}

fn handle_backspace(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if let Some(Overlay::ConfirmProcessing { remarks, .. }) = &mut state.overlay {
        return Ok((remarks.pop().is_some(), vec![]));
    }
    if state.overlay.is_some() {
        return Ok((false, vec![]));
    }

    match (state.input_mode, state.active_list_id()) {
        (InputMode::Search, Some(id)) => {
            if state.list(id).query.search_term.is_empty() {
                return Ok((false, vec![]));
            }
            update_query(state, id, |query| {
                query.search_term.pop();
            })
        }
        (InputMode::DateInput(_), _) => Ok((state.input_buffer.pop().is_some(), vec![])),
        _ => Ok((false, vec![])),
    }
}

fn handle_submit(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.overlay.take() {
        Some(Overlay::Instructions) => return Ok((true, vec![])),
        Some(Overlay::ConfirmProcessing { remarks, .. }) => return confirm_processing(state, remarks),
        Some(Overlay::ManageTypes { selected, cursor, .. }) => {
            return apply_action_types(state, selected, cursor);
        }
        None => {}
    }

    match (state.input_mode, state.active_list_id()) {
        (InputMode::Search, _) => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        (InputMode::DateInput(bound), Some(id)) => apply_date_input(state, id, bound),
        _ => Ok((false, vec![])),
    }
}

fn handle_escape(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    if let Some(overlay) = state.overlay.take() {
        tracing::debug!(?overlay, "overlay dismissed");
        return Ok((true, vec![]));
    }

    match state.input_mode {
        InputMode::Search => {
            state.input_mode = InputMode::Normal;
            return Ok((true, vec![]));
        }
        InputMode::DateInput(_) => {
            state.input_mode = InputMode::Normal;
            state.input_buffer.clear();
            state.input_error = None;
            return Ok((true, vec![]));
        }
        InputMode::Normal => {}
    }

    if state.view == View::HoldingDetail {
        state.view = View::HoldingProcessing;
        state.detail = None;
        return Ok((true, vec![]));
    }
    Ok((false, vec![]))
}

/// Validates the typed date and stores it as one bound of the range.
///
/// An empty buffer clears the bound. Invalid text keeps the box open with an
/// error message.
fn apply_date_input(state: &mut AppState, id: ListId, bound: DateBound) -> Result<(bool, Vec<Action>)> {
    let text = state.input_buffer.trim().to_string();
    let value = if text.is_empty() {
        None
    } else if let Ok(date) = NaiveDate::parse_from_str(&text, DATE_INPUT_FORMAT) {
        Some(date)
    } else {
        tracing::debug!(input = %text, "rejected date input");
        state.input_error = Some(Dictionary::fill(
            &state.dictionary.tracker.invalid_date,
            &[("value", text.as_str())],
        ));
        return Ok((true, vec![]));
    };

    state.input_mode = InputMode::Normal;
    state.input_buffer.clear();
    state.input_error = None;

    update_query(state, id, |query| {
        let mut range = query.date_range.unwrap_or_default();
        match bound {
            DateBound::From => range.from = value,
            DateBound::To => range.to = value,
        }
        query.date_range = (!range.is_open()).then_some(range);
    })
}

fn open_selected(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.view {
        View::HoldingProcessing => {
            let Some(record) = state.holding_processing.selected_record() else {
                tracing::debug!("no action selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(id = %record.id, ticker = %record.ticker, "opening holding detail");
            state.view = View::HoldingDetail;
            state.detail = Some(DetailState::Loading {
                id: record.id.clone(),
            });
            Ok((true, vec![Action::PostToWorker(WorkerMessage::lookup_action(record.id))]))
        }
        View::HoldingDetail if state.detail_is_pending() => {
            state.overlay = Some(Overlay::confirm_processing());
            Ok((true, vec![]))
        }
        View::CorporateActions | View::HoldingDetail => Ok((false, vec![])),
    }
}

fn confirm_processing(state: &mut AppState, remarks: String) -> Result<(bool, Vec<Action>)> {
    if remarks.trim().is_empty() {
        state.overlay = Some(Overlay::ConfirmProcessing {
            remarks,
            show_required: true,
        });
        return Ok((true, vec![]));
    }

    let ticker = match &state.detail {
        Some(DetailState::Loaded { record, .. }) => record.ticker.clone(),
        _ => String::new(),
    };
    tracing::info!(ticker = %ticker, remarks = %remarks.trim(), "holding processing confirmed");

    let dialog = &state.dictionary.holding.dialog;
    let title = dialog.toast_success_title.clone();
    let description = Dictionary::fill(&dialog.toast_success_description, &[("ticker", ticker.as_str())]);
    Ok((true, vec![state.show_toast(ToastKind::Success, title, description)]))
}

fn apply_action_types(
    state: &mut AppState,
    selected: [bool; ActionType::ALL.len()],
    cursor: usize,
) -> Result<(bool, Vec<Action>)> {
    let types: Vec<ActionType> = ActionType::ALL
        .into_iter()
        .zip(selected)
        .filter_map(|(t, on)| on.then_some(t))
        .collect();

    if types.is_empty() {
        state.overlay = Some(Overlay::ManageTypes {
            selected,
            cursor,
            show_required: true,
        });
        return Ok((true, vec![]));
    }

    tracing::info!(types = ?types, "holding action types updated");
    let count = types.len().to_string();
    state.holding_types = types;

    let list = &mut state.holding_processing;
    if list
        .query
        .action_type
        .is_some_and(|t| !state.holding_types.contains(&t))
    {
        list.query.action_type = None;
    }
    list.query.reset_page();
    list.selected = 0;

    let manage = &state.dictionary.holding.manage_dialog;
    let title = manage.toast_success_title.clone();
    let description = Dictionary::fill(&manage.toast_success_description, &[("count", count.as_str())]);
    let toast = state.show_toast(ToastKind::Success, title, description);
    Ok((true, vec![state.dispatch_query(ListId::HoldingProcessing), toast]))
}

/// Encodes the visible result list and hands it to the worker for writing.
///
/// An empty result shows a warning instead of writing a file.
fn export_current(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(id) = state.active_list_id() else {
        return Ok((false, vec![]));
    };
    let Some(records) = state.list(id).results.as_ref() else {
        tracing::debug!("export requested before results arrived");
        return Ok((false, vec![]));
    };

    let processed = id == ListId::HoldingProcessing && state.tab == HoldingTab::Completed;
    let rows: Vec<FlatRecord> = records
        .iter()
        .map(|record| {
            let row = if processed {
                FlatRecord::from_processed_action(record)
            } else {
                FlatRecord::from_action(record)
            };
            row.without("id")
        })
        .collect();

    let Some(content) = export::to_csv(&rows)? else {
        let tracker = &state.dictionary.tracker;
        let title = tracker.toast_no_data_title.clone();
        let description = tracker.toast_no_data_description.clone();
        return Ok((true, vec![state.show_toast(ToastKind::Warning, title, description)]));
    };

    let filename = export::export_filename(chrono::Utc::now().date_naive());
    tracing::info!(filename = %filename, rows = rows.len(), "exporting csv");
    Ok((
        false,
        vec![Action::PostToWorker(WorkerMessage::export_csv(
            state.export_dir.clone(),
            filename,
            content,
        ))],
    ))
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::Initialized {
            newest_ids,
            instructions_shown,
        } => {
            state.newest_ids.clone_from(newest_ids);
            if *instructions_shown {
                return Ok((true, vec![]));
            }
            tracing::debug!("first run, showing instructions");
            state.overlay = Some(Overlay::Instructions);
            Ok((true, vec![Action::PostToWorker(WorkerMessage::mark_instructions_shown())]))
        }
        WorkerResponse::QueryCompleted { generation, records } => {
            Ok((state.accept_results(*generation, records.clone()), vec![]))
        }
        WorkerResponse::ActionLoaded { record, holdings } => match &state.detail {
            Some(DetailState::Loading { id }) if *id == record.id => {
                state.detail = Some(DetailState::Loaded {
                    record: record.clone(),
                    holdings: holdings.clone(),
                });
                Ok((true, vec![]))
            }
            _ => {
                tracing::debug!(id = %record.id, "ignoring detail for a closed screen");
                Ok((false, vec![]))
            }
        },
        WorkerResponse::ActionNotFound { id } => match &state.detail {
            Some(DetailState::Loading { id: loading }) if loading == id => {
                state.detail = Some(DetailState::NotFound { id: id.clone() });
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        WorkerResponse::ExportFinished { filename, path } => {
            tracing::info!(filename = %filename, path = %path, "csv export written");
            let tracker = &state.dictionary.tracker;
            let title = tracker.toast_export_success_title.clone();
            let description = Dictionary::fill(
                &tracker.toast_export_success_description,
                &[("filename", filename.as_str())],
            );
            Ok((true, vec![state.show_toast(ToastKind::Success, title, description)]))
        }
        WorkerResponse::ExportFailed { filename, message } => {
            tracing::error!(filename = %filename, error = %message, "csv export failed");
            Ok((false, vec![]))
        }
        WorkerResponse::InstructionsMarked => Ok((false, vec![])),
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionRecord, CompletionInfo, ProcessingStatus};
    use crate::engine::DateRange;
    use crate::i18n::Locale;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(
            Theme::default(),
            Locale::En,
            Dictionary::load(Locale::En).unwrap(),
            "/host".to_string(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, ticker: &str) -> ActionRecord {
        ActionRecord {
            id: id.to_string(),
            announcement_date: date(2024, 1, 1),
            ticker: ticker.to_string(),
            company_name: format!("{ticker} Inc."),
            action_type: ActionType::BonusIssue,
            action_details: "1 for 10".to_string(),
            effective_date: date(2024, 2, 1),
            value_before: None,
            value_after: None,
            status: ProcessingStatus::Pending,
        }
    }

    fn range_of(state: &AppState, id: ListId) -> Option<DateRange> {
        state.list(id).query.date_range
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    /// Answers the query most recently dispatched in `actions`.
    fn answer(state: &mut AppState, actions: &[Action], records: Vec<ActionRecord>) {
        let generation = actions
            .iter()
            .find_map(|action| match action {
                Action::PostToWorker(WorkerMessage::RunQuery { generation, .. }) => Some(*generation),
                _ => None,
            })
            .expect("a query was dispatched");
        send(
            state,
            Event::WorkerResponse(WorkerResponse::QueryCompleted { generation, records }),
        );
    }

    fn load(state: &mut AppState, n: usize) {
        let (_, actions) = send(state, Event::PermissionsResult { granted: vec![] });
        let records = (1..=n).map(|i| record(&i.to_string(), &format!("T{i}"))).collect();
        answer(state, &actions, records);
    }

    #[test]
    fn startup_initializes_worker_and_runs_first_query() {
        let mut state = state();
        let (render, actions) = send(&mut state, Event::PermissionsResult { granted: vec![] });
        assert!(render);
        assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::Initialize { .. })));
        assert!(matches!(
            actions[1],
            Action::PostToWorker(WorkerMessage::RunQuery { generation: 1, .. })
        ));

        let (_, again) = send(&mut state, Event::PermissionsResult { granted: vec![] });
        assert!(again.is_empty());
    }

    #[test]
    fn changing_type_filter_returns_to_first_page() {
        let mut state = state();
        load(&mut state, 12);
        send(&mut state, Event::NextPage);
        send(&mut state, Event::NextPage);
        assert_eq!(state.corporate_actions.query.page, Some(3));

        let (_, actions) = send(&mut state, Event::CycleActionType);
        assert_eq!(state.corporate_actions.query.page, Some(1));
        assert_eq!(
            state.corporate_actions.query.action_type,
            Some(ActionType::CashDividend)
        );
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::RunQuery { query, .. })] if query.page == Some(1)
        ));
    }

    #[test]
    fn late_reply_for_an_old_search_is_dropped() {
        let mut state = state();
        load(&mut state, 3);
        send(&mut state, Event::StartSearch);
        let (_, first) = send(&mut state, Event::Char('a'));
        let (_, second) = send(&mut state, Event::Char('b'));

        answer(&mut state, &second, vec![record("9", "AB")]);
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::QueryCompleted {
            generation: match &first[0] {
                Action::PostToWorker(WorkerMessage::RunQuery { generation, .. }) => *generation,
                _ => unreachable!(),
            },
            records: vec![],
        }))
        .unwrap();

        assert!(!render);
        let results = state.corporate_actions.results.as_ref().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "AB");
    }

    #[test]
    fn exporting_an_empty_result_only_warns() {
        let mut state = state();
        load(&mut state, 0);

        let (render, actions) = send(&mut state, Event::Export);
        assert!(render);
        assert_eq!(actions, vec![Action::SetTimeout(3)]);
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Warning);
        assert_eq!(toast.title, "No data to export");
    }

    #[test]
    fn export_sends_csv_without_ids() {
        let mut state = state();
        load(&mut state, 2);

        let (_, actions) = send(&mut state, Event::Export);
        let [Action::PostToWorker(WorkerMessage::ExportCsv { dir, filename, content, .. })] = &actions[..] else {
            panic!("expected an export request, got {actions:?}");
        };
        assert_eq!(dir, "/host");
        assert!(filename.starts_with("stock_actions_") && filename.ends_with(".csv"));
        assert!(content.starts_with("announcementDate,"));
        assert_eq!(content.split("\r\n").count(), 3);
    }

    #[test]
    fn export_result_shows_success_toast_and_failure_only_logs() {
        let mut state = state();
        let (_, actions) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ExportFinished {
                filename: "stock_actions_2024-07-01.csv".into(),
                path: "~/stock_actions_2024-07-01.csv".into(),
            }),
        );
        assert_eq!(actions, vec![Action::SetTimeout(3)]);
        assert_eq!(
            state.toast.as_ref().unwrap().description,
            "Saved stock_actions_2024-07-01.csv."
        );

        state.toast = None;
        let (render, actions) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ExportFailed {
                filename: "x.csv".into(),
                message: "denied".into(),
            }),
        );
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.toast.is_none());
    }

    #[test]
    fn invalid_date_keeps_input_open() {
        let mut state = state();
        load(&mut state, 1);
        send(&mut state, Event::StartDateInput(DateBound::From));
        for c in "2024-13-01".chars() {
            send(&mut state, Event::Char(c));
        }
        let (_, actions) = send(&mut state, Event::Submit);

        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::DateInput(DateBound::From));
        assert_eq!(
            state.input_error.as_deref(),
            Some("Invalid date '2024-13-01', expected YYYY-MM-DD")
        );
        assert_eq!(range_of(&state, ListId::CorporateActions), None);
    }

    #[test]
    fn date_bounds_are_set_and_cleared() {
        let mut state = state();
        load(&mut state, 1);
        send(&mut state, Event::StartDateInput(DateBound::To));
        for c in "2024-07-15".chars() {
            send(&mut state, Event::Char(c));
        }
        let (_, actions) = send(&mut state, Event::Submit);
        assert_eq!(actions.len(), 1);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            range_of(&state, ListId::CorporateActions),
            Some(DateRange {
                from: None,
                to: Some(date(2024, 7, 15))
            })
        );

        send(&mut state, Event::StartDateInput(DateBound::To));
        assert_eq!(state.input_buffer, "2024-07-15");
        for _ in 0..10 {
            send(&mut state, Event::Backspace);
        }
        send(&mut state, Event::Submit);
        assert_eq!(range_of(&state, ListId::CorporateActions), None);
    }

    #[test]
    fn sort_toggles_between_directions() {
        let mut state = state();
        load(&mut state, 1);
        send(&mut state, Event::ToggleSort(SortKey::EffectiveDate));
        send(&mut state, Event::ToggleSort(SortKey::EffectiveDate));
        let sort = state.corporate_actions.query.sort.unwrap();
        assert_eq!(sort.key, SortKey::EffectiveDate);
        assert_eq!(sort.direction, crate::engine::SortDirection::Descending);

        send(&mut state, Event::ClearFilters);
        assert_eq!(state.corporate_actions.query.sort, Some(SortSpec::DEFAULT));
    }

    fn open_detail(state: &mut AppState) {
        let (_, actions) = send(state, Event::SwitchView);
        assert_eq!(state.view, View::HoldingProcessing);
        answer(state, &actions, vec![record("7", "BABA")]);

        let (_, actions) = send(state, Event::Select);
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::LookupAction {
                id: "7".into(),
                trace_context: None
            })]
        );
        send(
            state,
            Event::WorkerResponse(WorkerResponse::ActionLoaded {
                record: record("7", "BABA"),
                holdings: vec![],
            }),
        );
    }

    #[test]
    fn remarks_are_required_to_confirm() {
        let mut state = state();
        open_detail(&mut state);
        send(&mut state, Event::Select);
        assert!(matches!(state.overlay, Some(Overlay::ConfirmProcessing { .. })));

        send(&mut state, Event::Char(' '));
        send(&mut state, Event::Submit);
        assert!(matches!(
            state.overlay,
            Some(Overlay::ConfirmProcessing { show_required: true, .. })
        ));

        for c in "done".chars() {
            send(&mut state, Event::Char(c));
        }
        let (_, actions) = send(&mut state, Event::Submit);
        assert!(state.overlay.is_none());
        assert_eq!(actions, vec![Action::SetTimeout(3)]);
        assert_eq!(
            state.toast.as_ref().unwrap().description,
            "Holding processing for BABA has been recorded."
        );
    }

    #[test]
    fn completed_detail_cannot_be_confirmed_again() {
        let mut state = state();
        state.view = View::HoldingDetail;
        let mut done = record("5", "FB");
        done.status = ProcessingStatus::Completed(CompletionInfo {
            processor: "Admin A".into(),
            processed_date: date(2024, 5, 2),
            remarks: "ok".into(),
        });
        state.detail = Some(DetailState::Loaded {
            record: done,
            holdings: vec![],
        });

        let (render, _) = send(&mut state, Event::Select);
        assert!(!render);
        assert!(state.overlay.is_none());
    }

    #[test]
    fn missing_action_shows_not_found() {
        let mut state = state();
        state.view = View::HoldingDetail;
        state.detail = Some(DetailState::Loading { id: "404".into() });
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::ActionNotFound { id: "404".into() }),
        );
        assert_eq!(state.detail, Some(DetailState::NotFound { id: "404".into() }));

        send(&mut state, Event::Escape);
        assert_eq!(state.view, View::HoldingProcessing);
    }

    #[test]
    fn at_least_one_action_type_must_stay_selected() {
        let mut state = state();
        state.view = View::HoldingProcessing;
        send(&mut state, Event::ManageTypes);

        // Uncheck the three default holding types.
        for _ in 0..ActionType::ALL.len() {
            let checked = matches!(
                &state.overlay,
                Some(Overlay::ManageTypes { selected, cursor, .. }) if selected[*cursor]
            );
            if checked {
                send(&mut state, Event::Toggle);
            }
            send(&mut state, Event::MoveDown);
        }
        let (_, actions) = send(&mut state, Event::Submit);
        assert!(actions.is_empty());
        assert!(matches!(
            state.overlay,
            Some(Overlay::ManageTypes { show_required: true, .. })
        ));
        assert_eq!(state.holding_types, ActionType::HOLDING.to_vec());

        send(&mut state, Event::Toggle);
        let (_, actions) = send(&mut state, Event::Submit);
        assert!(state.overlay.is_none());
        assert_eq!(state.holding_types, vec![ActionType::CashDividend]);
        assert_eq!(actions.len(), 2);
        assert_eq!(
            state.toast.as_ref().unwrap().description,
            "Holding processing now covers 1 action types."
        );
    }

    #[test]
    fn narrowing_types_drops_a_filter_on_a_removed_type() {
        let mut state = state();
        state.view = View::HoldingProcessing;
        state.holding_processing.query.action_type = Some(ActionType::TickerChange);
        let mut selected = [false; ActionType::ALL.len()];
        selected[1] = true;
        state.overlay = Some(Overlay::ManageTypes {
            selected,
            cursor: 0,
            show_required: false,
        });

        send(&mut state, Event::Submit);
        assert_eq!(state.holding_types, vec![ActionType::BonusIssue]);
        assert_eq!(state.holding_processing.query.action_type, None);
    }

    #[test]
    fn first_run_shows_instructions_once() {
        let mut state = state();
        let (_, actions) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Initialized {
                newest_ids: vec!["12".into()],
                instructions_shown: false,
            }),
        );
        assert_eq!(state.overlay, Some(Overlay::Instructions));
        assert!(matches!(
            &actions[..],
            [Action::PostToWorker(WorkerMessage::MarkInstructionsShown { .. })]
        ));
        assert_eq!(state.newest_ids, vec!["12".to_string()]);

        send(&mut state, Event::Escape);
        let (_, actions) = send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::Initialized {
                newest_ids: vec![],
                instructions_shown: true,
            }),
        );
        assert!(actions.is_empty());
        assert!(state.overlay.is_none());
    }

    #[test]
    fn locale_switch_relabels_the_screen() {
        let mut state = state();
        send(&mut state, Event::SwitchLocale);
        assert_eq!(state.locale, Locale::Zh);
        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.nav[0].label, state.dictionary.sidebar.corporate_actions);
        assert_ne!(vm.nav[0].label, "Corporate Actions");

        send(&mut state, Event::SwitchLocale);
        assert_eq!(state.locale, Locale::En);
    }

    #[test]
    fn any_key_dismisses_a_toast() {
        let mut state = state();
        let _ = state.show_toast(ToastKind::Success, "t".into(), String::new());
        let (render, _) = send(&mut state, Event::DismissToast);
        assert!(render);
        assert!(state.toast.is_none());
        // The timer of the dismissed toast is harmless.
        let (render, _) = send(&mut state, Event::Timer);
        assert!(!render);
    }
}
